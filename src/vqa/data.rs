use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::data::{Dataset, SampleId};
use crate::error::EvalError;

pub type VqaDataset = Dataset<VqaSample>;

/// Supported VQA annotation schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Deserialize)]
#[serde(try_from = "String")]
pub enum VqaFamily {
    /// Open-ended questions, answers in a separate annotations file.
    OkVqa,
    /// Multiple choice; every choice counts as a correct answer.
    AOkVqa,
}

impl VqaFamily {
    pub fn tag(&self) -> &'static str {
        match self {
            VqaFamily::OkVqa => "okvqa",
            VqaFamily::AOkVqa => "aokvqa",
        }
    }
}

impl fmt::Display for VqaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for VqaFamily {
    type Err = EvalError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "okvqa" => Ok(VqaFamily::OkVqa),
            "aokvqa" => Ok(VqaFamily::AOkVqa),
            other => Err(EvalError::UnknownDataset(other.to_owned())),
        }
    }
}

impl TryFrom<String> for VqaFamily {
    type Error = EvalError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VqaSample {
    pub question_id: SampleId,
    pub question: String,
    pub image_id: u64,
    pub image_path: PathBuf,
    /// Every annotator answer, duplicates kept.
    pub answers: Vec<String>,
    /// Answers a prediction must match exactly to count as correct.
    pub top1_answers: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAOkVqaRecord {
    pub question_id: SampleId,
    pub question: String,
    pub choices: Vec<String>,
    pub image_id: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOkVqaQuestions {
    pub questions: Vec<RawOkVqaQuestion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOkVqaQuestion {
    pub question_id: SampleId,
    pub image_id: u64,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOkVqaAnnotations {
    pub annotations: Vec<RawOkVqaAnnotation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOkVqaAnnotation {
    pub question_id: SampleId,
    pub answers: Vec<RawOkVqaAnswer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOkVqaAnswer {
    pub answer: String,
}
