mod common;

use std::collections::BTreeSet;
use std::path::Path;

use float_cmp::approx_eq;
use serde_json::json;
use tempfile::TempDir;

use vlm_eval::config::VqaDatasetConfig;
use vlm_eval::data::{Dataset, SampleId, TaskKind, VqaFamily};
use vlm_eval::vqa::answer::VqaAccuracy;
use vlm_eval::vqa::data::VqaDataset;
use vlm_eval::{answer_questions, load_vqa_dataset, EvalError};

use common::{small_loader, write_image, write_json, ScriptedModel};

fn aokvqa_fixture(dir: &Path) -> VqaDataset {
    let image_root = dir.join("test2017");
    std::fs::create_dir_all(&image_root).unwrap();
    write_image(&image_root, "000000000042.jpg", [120, 180, 250]);
    write_json(dir, "aokvqa.json", &json!([
        {"question_id": 7, "question": "What color is the sky?", "choices": ["blue", "clear"], "image_id": 42}
    ]));
    load_vqa_dataset(&VqaDatasetConfig {
        family: VqaFamily::AOkVqa,
        image_root: image_root.to_str().unwrap().to_owned(),
        question_path: dir.join("aokvqa.json").to_str().unwrap().to_owned(),
        ann_path: None,
        num_instances: None,
    }).unwrap()
}

fn okvqa_fixture(dir: &Path) -> VqaDataset {
    let image_root = dir.join("val2014");
    std::fs::create_dir_all(&image_root).unwrap();
    write_image(&image_root, "COCO_val2014_000000000009.jpg", [90, 90, 90]);
    write_image(&image_root, "COCO_val2014_000000000011.jpg", [30, 60, 90]);
    write_json(dir, "questions.json", &json!({
        "questions": [
            {"question_id": 3, "image_id": 9, "question": "What animal is shown?"},
            {"question_id": 5, "image_id": 11, "question": "What is the man holding?"},
            {"question_id": 6, "image_id": 9, "question": "Where is the animal?"}
        ]
    }));
    write_json(dir, "answers.json", &json!({
        "annotations": [
            {"question_id": 3, "answers": [{"answer": "dog"}, {"answer": "dog"}, {"answer": "cat"}]},
            {"question_id": 5, "answers": [{"answer": "bat"}, {"answer": "racket"}]},
            {"question_id": 6, "answers": [{"answer": "park"}, {"answer": "park"}]}
        ]
    }));
    load_vqa_dataset(&VqaDatasetConfig {
        family: VqaFamily::OkVqa,
        image_root: image_root.to_str().unwrap().to_owned(),
        question_path: dir.join("questions.json").to_str().unwrap().to_owned(),
        ann_path: Some(dir.join("answers.json").to_str().unwrap().to_owned()),
        num_instances: None,
    }).unwrap()
}

#[test]
fn test_aokvqa_choice_counts_as_correct() {
    let dir = TempDir::new().unwrap();
    let dataset = aokvqa_fixture(dir.path());
    let model = ScriptedModel::new(&["blue"]);

    let counters = answer_questions(&model, &small_loader(), &dataset).unwrap();
    assert_eq!(counters, VqaAccuracy { total: 1, correct: 1 });
    assert!(approx_eq!(f64, counters.accuracy().unwrap(), 1.0, ulps = 2));

    let inputs = model.inputs.borrow();
    assert_eq!(inputs[0].question, vec!["What color is the sky?"]);
    assert_eq!(inputs[0].task, TaskKind::Vqa);
    assert_eq!(inputs[0].task.ram_key(), "ram_img");
    assert_eq!(inputs[0].image.shape(), &[1, 3, 8, 8]);
}

#[test]
fn test_okvqa_accuracy_is_exact_ratio() {
    let dir = TempDir::new().unwrap();
    let dataset = okvqa_fixture(dir.path());
    // "Dog" differs in case from the majority answer and is not accepted.
    let model = ScriptedModel::new(&["Dog", "racket", "park"]);

    let counters = answer_questions(&model, &small_loader(), &dataset).unwrap();
    assert_eq!(counters.total, 3);
    assert_eq!(counters.correct, 2);
    assert_eq!(counters.accuracy().unwrap(), 2.0 / 3.0);
}

#[test]
fn test_okvqa_tied_answers_all_accepted() {
    let dir = TempDir::new().unwrap();
    let dataset = okvqa_fixture(dir.path());
    let expected: BTreeSet<String> = ["bat", "racket"].iter().map(|a| a.to_string()).collect();
    assert_eq!(dataset[1].question_id, SampleId::Num(5));
    assert_eq!(dataset[1].top1_answers, expected);

    let model = ScriptedModel::new(&["dog", "bat", "park"]);
    let counters = answer_questions(&model, &small_loader(), &dataset).unwrap();
    assert_eq!(counters.correct, 3);
}

#[test]
fn test_record_counts_exact_members() {
    let top1: BTreeSet<String> = ["dog"].iter().map(|a| a.to_string()).collect();
    let mut counters = VqaAccuracy::default();
    assert!(counters.record("dog", &top1));
    assert!(!counters.record("dog ", &top1));
    assert!(!counters.record("a dog", &top1));
    assert!(counters.record("dog", &top1));
    assert_eq!(counters, VqaAccuracy { total: 4, correct: 2 });
    assert_eq!(counters.accuracy().unwrap(), 0.5);
}

#[test]
fn test_empty_dataset_accuracy_fails() {
    let dataset: VqaDataset = Dataset::new("empty", Vec::new());
    let model = ScriptedModel::new(&[]);

    let counters = answer_questions(&model, &small_loader(), &dataset).unwrap();
    assert_eq!(counters.total, 0);
    assert!(matches!(counters.accuracy(), Err(EvalError::EmptyDataset)));
}

#[test]
fn test_model_without_output_aborts() {
    let dir = TempDir::new().unwrap();
    let dataset = okvqa_fixture(dir.path());
    let model = ScriptedModel::new(&["dog"]);

    let err = answer_questions(&model, &small_loader(), &dataset).unwrap_err();
    assert!(matches!(err, EvalError::EmptyGeneration(SampleId::Num(5))));
    assert_eq!(model.inputs.borrow().len(), 2);
}

#[test]
fn test_missing_image_aborts() {
    let dir = TempDir::new().unwrap();
    let dataset = aokvqa_fixture(dir.path());
    std::fs::remove_file(dir.path().join("test2017/000000000042.jpg")).unwrap();
    let model = ScriptedModel::new(&["blue"]);

    let err = answer_questions(&model, &small_loader(), &dataset).unwrap_err();
    assert!(matches!(err, EvalError::Image { .. }));
    assert!(model.inputs.borrow().is_empty());
}
