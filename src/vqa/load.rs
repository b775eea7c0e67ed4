use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use super::aggregate::top1_answers;
use super::config::VqaDatasetConfig;
use super::data::{
    RawAOkVqaRecord, RawOkVqaAnnotations, RawOkVqaQuestions, VqaDataset, VqaFamily, VqaSample,
};
use crate::data::Dataset;
use crate::error::{EvalError, Result};
use crate::utils::{expand_path, padded_image_name, read_json};

const OKVQA_IMAGE_PREFIX: &str = "COCO_val2014_";

/// Build a VQA dataset from its question (and, for OK-VQA, answer) files.
pub fn load_vqa_dataset(config: &VqaDatasetConfig) -> Result<VqaDataset> {
    let image_root = expand_path(&config.image_root);
    let question_path = expand_path(&config.question_path);

    let samples = match config.family {
        VqaFamily::AOkVqa => load_aokvqa(&image_root, &question_path)?,
        VqaFamily::OkVqa => {
            let ann_path = config.ann_path
                .as_deref()
                .map(expand_path)
                .ok_or_else(|| EvalError::MissingAnnotations {
                    family: config.family.tag().to_owned(),
                })?;
            load_okvqa(&image_root, &question_path, &ann_path)?
        }
    };
    let mut dataset = Dataset::new(config.family.tag(), samples);
    if let Some(num_instances) = config.num_instances {
        dataset.truncate(num_instances);
    }
    info!(dataset = dataset.name(), samples = dataset.len(), "loaded vqa dataset");
    Ok(dataset)
}

/// Multiple-choice records; all choices are accepted answers.
pub fn load_aokvqa(image_root: &Path, question_path: &Path) -> Result<Vec<VqaSample>> {
    let records: Vec<RawAOkVqaRecord> = read_json(question_path)?;
    let samples = records
        .into_iter()
        .map(|record| VqaSample {
            question_id: record.question_id,
            question: record.question,
            image_id: record.image_id,
            image_path: image_root.join(padded_image_name("", record.image_id)),
            top1_answers: record.choices.iter().cloned().collect(),
            answers: record.choices,
        })
        .collect();
    Ok(samples)
}

/// Join questions with their annotator answers on question id.
///
/// Annotations whose question is not in the questions file are skipped.
pub fn load_okvqa(image_root: &Path, question_path: &Path, ann_path: &Path) -> Result<Vec<VqaSample>> {
    let questions: RawOkVqaQuestions = read_json(question_path)?;
    let questions: HashMap<_, _> = questions.questions
        .into_iter()
        .map(|q| (q.question_id, (q.question, q.image_id)))
        .collect();

    let annotations: RawOkVqaAnnotations = read_json(ann_path)?;
    let num_annotations = annotations.annotations.len();
    let mut samples = Vec::with_capacity(num_annotations);
    for ann in annotations.annotations {
        let (question, image_id) = match questions.get(&ann.question_id) {
            Some((question, image_id)) => (question.clone(), *image_id),
            None => {
                debug!(question_id = %ann.question_id, "no question for annotation, skipped");
                continue;
            }
        };
        let answers: Vec<String> = ann.answers.into_iter().map(|a| a.answer).collect();
        samples.push(VqaSample {
            question_id: ann.question_id,
            question,
            image_id,
            image_path: image_root.join(padded_image_name(OKVQA_IMAGE_PREFIX, image_id)),
            top1_answers: top1_answers(&answers),
            answers,
        });
    }

    let skipped = num_annotations - samples.len();
    if skipped > 0 {
        info!(skipped, "annotations without a matching question were dropped");
    }
    Ok(samples)
}
