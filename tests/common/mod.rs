#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use serde_json::Value as JSONValue;

use vlm_eval::config::{ProcessorsConfig, TransformConfig};
use vlm_eval::data::ModelInput;
use vlm_eval::image_caption::caption::{CaptionMap, CorpusMetric, CorpusScore};
use vlm_eval::image_preprocess::config::{Interpolation, CLIP_MEAN, CLIP_STD, IMAGENET_MEAN, IMAGENET_STD};
use vlm_eval::{MediaLoader, Model, Result};

pub fn write_json(dir: &Path, name: &str, value: &JSONValue) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_vec(value).unwrap()).unwrap();
    path
}

pub fn write_image(dir: &Path, name: &str, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(4, 4, Rgb(color)).save(&path).unwrap();
    path
}

/// 8x8 primary tensor, 12x12 tag tensor.
pub fn small_processors() -> ProcessorsConfig {
    ProcessorsConfig {
        image: TransformConfig {
            image_size: 8,
            interpolation: Interpolation::Nearest,
            mean: CLIP_MEAN,
            std: CLIP_STD,
        },
        ram_image: TransformConfig {
            image_size: 12,
            interpolation: Interpolation::Nearest,
            mean: IMAGENET_MEAN,
            std: IMAGENET_STD,
        },
    }
}

pub fn small_loader() -> MediaLoader {
    MediaLoader::from_config(&small_processors())
}

/// Replies with the queued texts in order and remembers every input.
/// Once the queue is empty it returns no text at all.
pub struct ScriptedModel {
    replies: RefCell<VecDeque<String>>,
    pub inputs: RefCell<Vec<ModelInput>>,
}

impl ScriptedModel {
    pub fn new(replies: &[&str]) -> Self {
        ScriptedModel {
            replies: RefCell::new(replies.iter().map(|r| r.to_string()).collect()),
            inputs: RefCell::new(Vec::new()),
        }
    }
}

impl Model for ScriptedModel {
    fn generate(&self, input: &ModelInput) -> Result<Vec<String>> {
        self.inputs.borrow_mut().push(input.clone());
        Ok(self.replies.borrow_mut().pop_front().into_iter().collect())
    }
}

/// Fraction of ids whose hypothesis equals the reference; counts calls.
#[derive(Default)]
pub struct ExactMatchMetric {
    pub calls: Cell<usize>,
}

impl CorpusMetric for ExactMatchMetric {
    fn corpus_score(&self, references: &CaptionMap, hypotheses: &CaptionMap) -> Result<CorpusScore> {
        self.calls.set(self.calls.get() + 1);
        let per_item: Vec<f64> = references
            .iter()
            .map(|(id, refs)| if hypotheses[id] == *refs { 1.0 } else { 0.0 })
            .collect();
        let score = per_item.iter().sum::<f64>() / per_item.len() as f64;
        Ok(CorpusScore { score, per_item })
    }
}
