use std::path::PathBuf;

use thiserror::Error;

use crate::data::SampleId;

/// Errors raised while building datasets, loading images, running the model
/// or scoring its outputs.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A dataset family tag that no loader exists for.
    #[error("unknown dataset family `{0}`")]
    UnknownDataset(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// OK-VQA needs an answers file next to the questions file.
    #[error("dataset family `{family}` requires an annotations file")]
    MissingAnnotations { family: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write run log {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A caption annotation points at an image missing from the image list.
    #[error("annotation references unknown image id {image_id} in {path}")]
    UnknownImageId { image_id: SampleId, path: PathBuf },

    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Reference and hypothesis mappings must cover the same ids.
    #[error("reference and hypothesis ids differ: {missing} without hypothesis, {extra} without reference")]
    MismatchedKeys { missing: usize, extra: usize },

    #[error("empty caption list for id {0}")]
    EmptyCaptions(SampleId),

    #[error("cannot score an empty dataset")]
    EmptyDataset,

    #[error("model returned no text for sample {0}")]
    EmptyGeneration(SampleId),

    #[cfg(feature = "python")]
    #[error("python error: {0}")]
    Python(#[from] pyo3::PyErr),
}

pub type Result<T> = std::result::Result<T, EvalError>;
