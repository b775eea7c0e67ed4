use serde::Deserialize;

/// CLIP normalization, used by the primary evaluation processor.
pub const CLIP_MEAN: [f32; 3] = [0.48145466, 0.4578275, 0.40821073];
#[allow(clippy::excessive_precision)]
pub const CLIP_STD: [f32; 3] = [0.26862954, 0.26130258, 0.27577711];

/// ImageNet normalization, used by the tag recognition transform.
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    Bilinear,
    Bicubic,
}

#[derive(Debug, Clone, PartialEq)]
#[derive(Deserialize)]
pub struct TransformConfig {
    /// Output is `image_size` x `image_size`.
    pub image_size: u32,
    pub interpolation: Interpolation,
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl TransformConfig {
    pub fn primary() -> Self {
        Self {
            image_size: 224,
            interpolation: Interpolation::Bicubic,
            mean: CLIP_MEAN,
            std: CLIP_STD,
        }
    }

    pub fn tag() -> Self {
        Self {
            image_size: 384,
            interpolation: Interpolation::Bilinear,
            mean: IMAGENET_MEAN,
            std: IMAGENET_STD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[derive(Deserialize)]
pub struct ProcessorsConfig {
    #[serde(default = "TransformConfig::primary")]
    pub image: TransformConfig,
    #[serde(default = "TransformConfig::tag")]
    pub ram_image: TransformConfig,
}

impl Default for ProcessorsConfig {
    fn default() -> Self {
        Self {
            image: TransformConfig::primary(),
            ram_image: TransformConfig::tag(),
        }
    }
}
