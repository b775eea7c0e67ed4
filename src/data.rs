use std::fmt;
use std::ops::Index;
use std::slice::Iter;

use serde::Deserialize;

pub use crate::image_caption::data::{CaptionSample, CaptionFamily};
pub use crate::vqa::data::{VqaSample, VqaFamily};
pub use crate::image_preprocess::data::ImageTensors;
pub use crate::inference::data::{ModelInput, TaskKind};

/// Identifier of an image or a question.
///
/// COCO-derived annotations use integers, TextCaps image ids and A-OK-VQA
/// question ids are strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Deserialize)]
#[serde(untagged)]
pub enum SampleId {
    Num(u64),
    Str(String),
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleId::Num(id) => write!(f, "{}", id),
            SampleId::Str(id) => f.write_str(id),
        }
    }
}

impl From<u64> for SampleId {
    fn from(id: u64) -> Self {
        SampleId::Num(id)
    }
}

impl From<&str> for SampleId {
    fn from(id: &str) -> Self {
        SampleId::Str(id.to_owned())
    }
}

/// One generated text, keyed by the id of the sample it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub sample_id: SampleId,
    pub hypothesis: String,
}

/// Ordered, read-only collection of normalized samples.
#[derive(Debug, Clone)]
pub struct Dataset<S> {
    name: String,
    samples: Vec<S>,
}

impl<S> Dataset<S> {
    pub fn new(name: impl Into<String>, samples: Vec<S>) -> Self {
        Dataset {
            name: name.into(),
            samples,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&S> {
        self.samples.get(idx)
    }

    pub fn iter(&self) -> Iter<'_, S> {
        self.samples.iter()
    }

    /// Keep only the first `num_instances` samples.
    pub fn truncate(&mut self, num_instances: usize) {
        self.samples.truncate(num_instances);
    }
}

impl<S> Index<usize> for Dataset<S> {
    type Output = S;

    fn index(&self, idx: usize) -> &S {
        &self.samples[idx]
    }
}

impl<'a, S> IntoIterator for &'a Dataset<S> {
    type Item = &'a S;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
