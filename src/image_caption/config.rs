use serde::Deserialize;

use super::data::CaptionFamily;

#[derive(Debug, Clone, Deserialize)]
pub struct CaptionDatasetConfig {
    pub family: CaptionFamily,
    /// Directory the annotation's file names are relative to.
    pub image_root: String,
    pub ann_path: String,
    /// Keep only the first N samples.
    #[serde(default)]
    pub num_instances: Option<usize>,
}

impl CaptionDatasetConfig {
    /// COCO val2014 and TextCaps 0.1 val, laid out under `images/`.
    pub fn defaults() -> Vec<Self> {
        vec![
            CaptionDatasetConfig {
                family: CaptionFamily::Coco,
                image_root: String::from("images/coco/images/val2014"),
                ann_path: String::from("images/coco/annotations/captions_val2014.json"),
                num_instances: None,
            },
            CaptionDatasetConfig {
                family: CaptionFamily::TextCaps,
                image_root: String::from("images/textcaps/images/train_images"),
                ann_path: String::from("images/textcaps/images/TextCaps_0.1_val.json"),
                num_instances: None,
            },
        ]
    }
}
