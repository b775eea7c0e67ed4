use std::path::Path;

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::Array3;

use super::config::{Interpolation, ProcessorsConfig, TransformConfig};
use super::data::ImageTensors;
use crate::error::Result;
use crate::utils::read_image;

/// A pure, deterministic mapping from a decoded RGB image to a CHW tensor.
pub trait VisualTransform {
    fn apply(&self, image: &RgbImage) -> Array3<f32>;
}

/// Exact square resize followed by per-channel `(x / 255 - mean) / std`.
#[derive(Debug, Clone)]
pub struct ResizeNormalize {
    config: TransformConfig,
}

impl ResizeNormalize {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    fn filter(&self) -> FilterType {
        match self.config.interpolation {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
        }
    }
}

impl VisualTransform for ResizeNormalize {
    fn apply(&self, image: &RgbImage) -> Array3<f32> {
        let size = self.config.image_size;
        let resized = imageops::resize(image, size, size, self.filter());

        let mut tensor = Array3::<f32>::zeros((3, size as usize, size as usize));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for c in 0..3 {
                let value = pixel[c] as f32 / 255.0;
                tensor[(c, y as usize, x as usize)] = (value - self.config.mean[c]) / self.config.std[c];
            }
        }
        tensor
    }
}

/// Resolves image paths to model-ready tensors.
///
/// Every call decodes the file again; samples are visited once per run so
/// nothing is cached.
pub struct MediaLoader {
    image: Box<dyn VisualTransform>,
    ram_image: Box<dyn VisualTransform>,
}

impl MediaLoader {
    pub fn new(image: Box<dyn VisualTransform>, ram_image: Box<dyn VisualTransform>) -> Self {
        Self { image, ram_image }
    }

    pub fn from_config(config: &ProcessorsConfig) -> Self {
        Self::new(
            Box::new(ResizeNormalize::new(config.image.clone())),
            Box::new(ResizeNormalize::new(config.ram_image.clone())),
        )
    }

    /// Decode `path` once and run both transforms on the decoded RGB image.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<ImageTensors> {
        let decoded = read_image(path)?;
        Ok(ImageTensors {
            image: self.image.apply(&decoded),
            ram_image: self.ram_image.apply(&decoded),
        })
    }
}

impl Default for MediaLoader {
    fn default() -> Self {
        Self::from_config(&ProcessorsConfig::default())
    }
}
