use ndarray::{Array4, Axis};

use crate::image_preprocess::data::ImageTensors;

/// Task label every evaluation request carries.
pub const IMAGE_LEVEL_CATEGORY: &str = "image_level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Captioning,
    Vqa,
}

impl TaskKind {
    /// Key the auxiliary tag tensor is passed under.
    ///
    /// The captioning and VQA entry points of the model read different keys.
    pub fn ram_key(&self) -> &'static str {
        match self {
            TaskKind::Captioning => "ram_image",
            TaskKind::Vqa => "ram_img",
        }
    }
}

/// Everything one `generate` call consumes. Tensors carry a leading batch
/// axis of size 1.
#[derive(Debug, Clone)]
pub struct ModelInput {
    pub image: Array4<f32>,
    pub ram_image: Array4<f32>,
    pub question: Vec<String>,
    pub category: &'static str,
    pub task: TaskKind,
}

impl ModelInput {
    pub fn new(tensors: ImageTensors, instruction: &str, task: TaskKind) -> Self {
        ModelInput {
            image: tensors.image.insert_axis(Axis(0)),
            ram_image: tensors.ram_image.insert_axis(Axis(0)),
            question: vec![instruction.to_owned()],
            category: IMAGE_LEVEL_CATEGORY,
            task,
        }
    }
}
