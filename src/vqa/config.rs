use serde::Deserialize;

use super::data::VqaFamily;

#[derive(Debug, Clone, Deserialize)]
pub struct VqaDatasetConfig {
    pub family: VqaFamily,
    pub image_root: String,
    pub question_path: String,
    /// Answers file, required for OK-VQA and ignored for A-OK-VQA.
    #[serde(default)]
    pub ann_path: Option<String>,
    #[serde(default)]
    pub num_instances: Option<usize>,
}

impl VqaDatasetConfig {
    /// OK-VQA val2014 and A-OK-VQA v1.0 test, laid out under `images/`.
    pub fn defaults() -> Vec<Self> {
        vec![
            VqaDatasetConfig {
                family: VqaFamily::OkVqa,
                image_root: String::from("images/okvqa/images/val2014"),
                question_path: String::from("images/okvqa/images/OpenEnded_mscoco_val2014_questions.json"),
                ann_path: Some(String::from("images/okvqa/images/mscoco_val2014_annotations.json")),
                num_instances: None,
            },
            VqaDatasetConfig {
                family: VqaFamily::AOkVqa,
                image_root: String::from("images/aokvqa/coco/test2017"),
                question_path: String::from("images/aokvqa/images/aokvqa/aokvqa_v1p0_test.json"),
                ann_path: None,
                num_instances: None,
            },
        ]
    }
}
