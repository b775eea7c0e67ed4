use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use super::config::CaptionDatasetConfig;
use super::data::{CaptionDataset, CaptionFamily, CaptionSample, RawCocoCaptions, RawTextCaps};
use crate::data::Dataset;
use crate::error::{EvalError, Result};
use crate::utils::{expand_path, read_json};

/// Build a caption dataset from its annotation file.
pub fn load_caption_dataset(config: &CaptionDatasetConfig) -> Result<CaptionDataset> {
    let image_root = expand_path(&config.image_root);
    let ann_path = expand_path(&config.ann_path);

    let samples = match config.family {
        CaptionFamily::Coco => load_coco_captions(&image_root, &ann_path)?,
        CaptionFamily::TextCaps => load_textcaps_captions(&image_root, &ann_path)?,
    };
    let mut dataset = Dataset::new(config.family.tag(), samples);
    if let Some(num_instances) = config.num_instances {
        dataset.truncate(num_instances);
    }
    info!(dataset = dataset.name(), samples = dataset.len(), "loaded caption dataset");
    Ok(dataset)
}

/// One sample per caption annotation, file name resolved through the image list.
pub fn load_coco_captions(image_root: &Path, ann_path: &Path) -> Result<Vec<CaptionSample>> {
    let raw: RawCocoCaptions = read_json(ann_path)?;
    let id_to_fname: HashMap<_, _> = raw.images
        .into_iter()
        .map(|img| (img.id, img.file_name))
        .collect();

    raw.annotations
        .into_iter()
        .map(|ann| -> Result<CaptionSample> {
            let file_name = id_to_fname.get(&ann.image_id).ok_or_else(|| EvalError::UnknownImageId {
                image_id: ann.image_id.clone(),
                path: ann_path.to_path_buf(),
            })?;
            Ok(CaptionSample {
                image_path: image_root.join(file_name),
                image_id: ann.image_id,
                caption: ann.caption,
            })
        })
        .collect()
}

pub fn load_textcaps_captions(image_root: &Path, ann_path: &Path) -> Result<Vec<CaptionSample>> {
    let raw: RawTextCaps = read_json(ann_path)?;
    let samples = raw.data
        .into_iter()
        .map(|record| CaptionSample {
            image_id: record.image_id,
            image_path: image_root.join(record.image_path),
            caption: record.caption_str,
        })
        .collect();
    Ok(samples)
}
