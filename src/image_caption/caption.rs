use std::collections::BTreeMap;
use std::path::Path;

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyDict;
use tracing::info;

use super::data::{CaptionDataset, CaptionSample};
use crate::data::SampleId;
use crate::error::{EvalError, Result};
use crate::image_preprocess::transform::MediaLoader;
use crate::inference::data::TaskKind;
use crate::inference::generate::{run_inference, EvalSample, Model};
#[cfg(feature = "python")]
use crate::resources::PyResources;

pub const CAPTION_PROMPT: &str = "Please describe the image using a single short sentence.";

/// Captions keyed by image id.
pub type CaptionMap = BTreeMap<SampleId, Vec<String>>;

impl EvalSample for CaptionSample {
    const TASK: TaskKind = TaskKind::Captioning;

    fn sample_id(&self) -> SampleId {
        self.image_id.clone()
    }

    fn image_path(&self) -> &Path {
        &self.image_path
    }

    fn instruction(&self) -> &str {
        CAPTION_PROMPT
    }
}

/// Reference captions next to the model's captions, both keyed by image id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionRun {
    pub references: CaptionMap,
    pub hypotheses: CaptionMap,
}

/// Corpus-level result of a captioning metric.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusScore {
    pub score: f64,
    pub per_item: Vec<f64>,
}

/// A corpus metric over references and hypotheses sharing one key set,
/// such as CIDEr.
pub trait CorpusMetric {
    fn corpus_score(&self, references: &CaptionMap, hypotheses: &CaptionMap) -> Result<CorpusScore>;
}

/// Caption every sample of `dataset`.
///
/// Each image id maps to a single reference and a single hypothesis; an image
/// listed under several captions keeps the ones from its last sample.
pub fn caption_images<M: Model + ?Sized>(model: &M, loader: &MediaLoader, dataset: &CaptionDataset) -> Result<CaptionRun> {
    let mut run = CaptionRun::default();
    run_inference(model, loader, dataset, |sample, prediction| {
        run.references.insert(sample.image_id.clone(), vec![sample.caption.clone()]);
        run.hypotheses.insert(prediction.sample_id, vec![prediction.hypothesis]);
        Ok(())
    })?;
    Ok(run)
}

/// Score a caption run after checking both sides cover the same non-empty
/// caption lists. An empty run is an error rather than a NaN score.
pub fn score_captions<C: CorpusMetric + ?Sized>(metric: &C, run: &CaptionRun) -> Result<CorpusScore> {
    if run.references.is_empty() && run.hypotheses.is_empty() {
        return Err(EvalError::EmptyDataset);
    }
    let missing = run.references.keys().filter(|id| !run.hypotheses.contains_key(id)).count();
    let extra = run.hypotheses.keys().filter(|id| !run.references.contains_key(id)).count();
    if missing > 0 || extra > 0 {
        return Err(EvalError::MismatchedKeys { missing, extra });
    }
    let empty = run.references.iter()
        .chain(run.hypotheses.iter())
        .find(|(_, captions)| captions.is_empty());
    if let Some((id, _)) = empty {
        return Err(EvalError::EmptyCaptions(id.clone()));
    }

    let score = metric.corpus_score(&run.references, &run.hypotheses)?;
    info!(images = run.references.len(), score = score.score, "scored captions");
    Ok(score)
}

#[cfg(feature = "python")]
pub fn setup_cider(py: Python) -> Result<PyObject> {
    let cider = py.import("pycocoevalcap.cider.cider")?
        .getattr("Cider")?
        .call0()?;
    Ok(cider.to_object(py))
}

#[cfg(feature = "python")]
impl CorpusMetric for PyResources {
    fn corpus_score(&self, references: &CaptionMap, hypotheses: &CaptionMap) -> Result<CorpusScore> {
        let pool = unsafe {self.gil_guard.python().new_pool()};
        let py = pool.python();
        let cider = self.cider.as_ref()
            .ok_or_else(|| EvalError::Config(String::from("CIDEr scorer was not loaded")))?;

        let gts = PyDict::new(py);
        for (image_id, captions) in references.iter() {
            gts.set_item(image_id, captions)?;
        }
        let res = PyDict::new(py);
        for (image_id, captions) in hypotheses.iter() {
            res.set_item(image_id, captions)?;
        }

        let result = cider.as_ref(py).call_method1("compute_score", (gts, res))?;
        let (score, per_item): (f64, &PyAny) = result.extract()?;
        let per_item: Vec<f64> = per_item.call_method0("tolist")?.extract()?;
        Ok(CorpusScore { score, per_item })
    }
}
