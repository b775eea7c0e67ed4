use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::BufReader;

use image::RgbImage;
use serde::de::DeserializeOwned;
use shellexpand::tilde;
use tracing_subscriber::EnvFilter;

use crate::error::{EvalError, Result};

pub const IMAGE_EXTENSION: &str = "jpg";

/// Deserialize a whole JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| EvalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| EvalError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Expand a leading `~` in a configured path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(tilde(path).into_owned())
}

/// `<prefix><12-digit zero padded id>.jpg`, the COCO file naming scheme.
pub fn padded_image_name(prefix: &str, image_id: u64) -> String {
    format!("{}{:012}.{}", prefix, image_id, IMAGE_EXTENSION)
}

/// Open and decode an image, converting it to 8-bit RGB.
pub fn read_image(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| EvalError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgb8())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`), so that stdout
/// only carries the reported metrics.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
