pub mod error;
pub mod utils;
pub mod data;
pub mod config;
pub mod logger;
pub mod image_caption;
pub mod vqa;
pub mod image_preprocess;
pub mod inference;
#[cfg(feature = "python")]
pub mod resources;

pub use error::{EvalError, Result};
pub use image_caption::load::load_caption_dataset;
pub use image_caption::caption::{caption_images, score_captions};
pub use vqa::load::load_vqa_dataset;
pub use vqa::aggregate::top1_answers;
pub use vqa::answer::answer_questions;
pub use image_preprocess::transform::MediaLoader;
pub use inference::generate::{run_inference, Model};
