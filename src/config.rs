use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use structopt::StructOpt;

pub use crate::image_caption::config::CaptionDatasetConfig;
pub use crate::vqa::config::VqaDatasetConfig;
pub use crate::image_preprocess::config::{ProcessorsConfig, TransformConfig};
pub use crate::inference::config::ModelConfig;

use crate::error::{EvalError, Result};
use crate::utils::expand_path;

/// Command line of the evaluation binaries.
#[derive(StructOpt, Debug, Clone)]
#[structopt(about = "Evaluate a vision-language model on captioning or VQA benchmarks")]
pub struct Opts {
    /// Path to evaluation config YAML (e.g. configs/eval.yaml)
    #[structopt(long = "cfg-path", parse(from_os_str))]
    pub cfg_path: PathBuf,
}

/// Contents of the evaluation YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct EvalConfig {
    #[serde(default)]
    pub model: ModelConfig,
    /// Prepended to the interpreter's `sys.path` before the model is built.
    #[serde(default)]
    pub python_path: Option<String>,
    #[serde(default = "CaptionDatasetConfig::defaults")]
    pub caption_datasets: Vec<CaptionDatasetConfig>,
    #[serde(default = "VqaDatasetConfig::defaults")]
    pub vqa_datasets: Vec<VqaDatasetConfig>,
    #[serde(default)]
    pub processors: ProcessorsConfig,
}

impl EvalConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).map_err(|source| EvalError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn setup_config(&self, load_cider: bool) -> ResourcesSetupConfig {
        ResourcesSetupConfig {
            load_model: Some(self.model.clone()),
            load_cider,
            python_path: self.python_path.as_deref().map(expand_path),
        }
    }
}

/// What the embedded interpreter should load.
pub struct ResourcesSetupConfig {
    pub load_model: Option<ModelConfig>,
    pub load_cider: bool,
    pub python_path: Option<PathBuf>,
}
