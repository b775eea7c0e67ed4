use std::collections::BTreeSet;
use std::path::Path;

use tracing::info;

use super::data::{VqaDataset, VqaSample};
use crate::data::SampleId;
use crate::error::{EvalError, Result};
use crate::image_preprocess::transform::MediaLoader;
use crate::inference::data::TaskKind;
use crate::inference::generate::{run_inference, EvalSample, Model};

impl EvalSample for VqaSample {
    const TASK: TaskKind = TaskKind::Vqa;

    fn sample_id(&self) -> SampleId {
        self.question_id.clone()
    }

    fn image_path(&self) -> &Path {
        &self.image_path
    }

    fn instruction(&self) -> &str {
        &self.question
    }
}

/// Exact-match accuracy counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VqaAccuracy {
    pub total: usize,
    pub correct: usize,
}

impl VqaAccuracy {
    /// Count one prediction; it is correct iff it is one of `top1_answers`
    /// verbatim.
    pub fn record(&mut self, hypothesis: &str, top1_answers: &BTreeSet<String>) -> bool {
        self.total += 1;
        let hit = top1_answers.contains(hypothesis);
        if hit {
            self.correct += 1;
        }
        hit
    }

    /// `correct / total`. Fails on an empty dataset.
    pub fn accuracy(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(EvalError::EmptyDataset);
        }
        Ok(self.correct as f64 / self.total as f64)
    }
}

/// Answer every question of `dataset` and score each answer as it arrives.
pub fn answer_questions<M: Model + ?Sized>(model: &M, loader: &MediaLoader, dataset: &VqaDataset) -> Result<VqaAccuracy> {
    let mut counters = VqaAccuracy::default();
    run_inference(model, loader, dataset, |sample, prediction| {
        counters.record(&prediction.hypothesis, &sample.top1_answers);
        Ok(())
    })?;
    info!(dataset = dataset.name(), total = counters.total, correct = counters.correct, "answered questions");
    Ok(counters)
}
