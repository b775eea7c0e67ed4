use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "python")]
use ndarray::Array4;
#[cfg(feature = "python")]
use numpy::IntoPyArray;
#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyDict;
use tracing::debug;

use super::data::{ModelInput, TaskKind};
#[cfg(feature = "python")]
use super::config::ModelConfig;
use crate::data::{Dataset, Prediction, SampleId};
use crate::error::{EvalError, Result};
use crate::image_preprocess::transform::MediaLoader;
#[cfg(feature = "python")]
use crate::resources::PyResources;

/// A vision-language model that turns one input bundle into text.
pub trait Model {
    /// One generated text per batch item of `input`.
    fn generate(&self, input: &ModelInput) -> Result<Vec<String>>;
}

impl<M: Model + ?Sized> Model for &M {
    fn generate(&self, input: &ModelInput) -> Result<Vec<String>> {
        (**self).generate(input)
    }
}

/// A normalized sample the inference loop can feed to the model.
pub trait EvalSample {
    const TASK: TaskKind;

    /// Key the prediction for this sample is reported under.
    fn sample_id(&self) -> SampleId;
    fn image_path(&self) -> &Path;
    /// Instruction or question text sent with the image.
    fn instruction(&self) -> &str;
}

fn progress_bar(len: usize, name: &str) -> ProgressBar {
    let progress = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style.progress_chars("#>-"));
    progress.set_message(name.to_owned());
    progress
}

/// Run the model once over every sample of `dataset`, in order.
///
/// Each image is decoded and preprocessed right before its sample is sent to
/// the model. The first failure aborts the pass.
pub fn run_inference<M, S, F>(model: &M, loader: &MediaLoader, dataset: &Dataset<S>, mut on_prediction: F) -> Result<()>
where
    M: Model + ?Sized,
    S: EvalSample,
    F: FnMut(&S, Prediction) -> Result<()>,
{
    let progress = progress_bar(dataset.len(), dataset.name());
    for sample in dataset {
        let tensors = loader.load(sample.image_path())?;
        let input = ModelInput::new(tensors, sample.instruction(), S::TASK);
        let sample_id = sample.sample_id();
        let hypothesis = model
            .generate(&input)?
            .into_iter()
            .next()
            .ok_or_else(|| EvalError::EmptyGeneration(sample_id.clone()))?;
        debug!(sample = %sample_id, hypothesis = hypothesis.as_str(), "generated");
        on_prediction(sample, Prediction { sample_id, hypothesis })?;
        progress.inc(1);
    }
    progress.finish_and_clear();
    Ok(())
}

/// Build the model through its registry, switch it to eval mode and move it
/// to the target device. Returns the model and the device object.
#[cfg(feature = "python")]
pub fn setup_model(config: &ModelConfig, py: Python) -> Result<(PyObject, PyObject)> {
    let model_cfg = config.to_json()
        .map_err(|e| EvalError::Config(format!("model section is not representable as JSON: {}", e)))?;
    let model_cfg = py.import("json")?.call_method1("loads", (model_cfg, ))?;
    let model_cfg = py.import("omegaconf")?
        .getattr("OmegaConf")?
        .call_method1("create", (model_cfg, ))?;

    let registry = py.import("common.registry")?.getattr("registry")?;
    let model_cls = registry.call_method1("get_model_class", (config.arch.as_str(), ))?;
    let model = model_cls.call_method1("from_config", (model_cfg, ))?;
    model.call_method0("eval")?;

    let torch = py.import("torch")?;
    let device = match &config.device {
        Some(device) => device.clone(),
        None => {
            let has_cuda: bool = torch.getattr("cuda")?.call_method0("is_available")?.extract()?;
            String::from(if has_cuda { "cuda" } else { "cpu" })
        }
    };
    let device = torch.call_method1("device", (device, ))?;
    let model = model.call_method1("to", (device, ))?;
    Ok((model.to_object(py), device.to_object(py)))
}

#[cfg(feature = "python")]
fn to_device_tensor<'py>(py: Python<'py>, torch: &'py PyModule, device: &'py PyAny, arr: &Array4<f32>) -> PyResult<&'py PyAny> {
    let arr = arr.clone().into_pyarray(py);
    torch.call_method1("from_numpy", (arr, ))?.call_method1("to", (device, ))
}

#[cfg(feature = "python")]
impl Model for PyResources {
    fn generate(&self, input: &ModelInput) -> Result<Vec<String>> {
        let pool = unsafe {self.gil_guard.python().new_pool()};
        let py = pool.python();
        let (model, device) = match (&self.model, &self.device) {
            (Some(model), Some(device)) => (model.as_ref(py), device.as_ref(py)),
            _ => return Err(EvalError::Config(String::from("model was not loaded"))),
        };
        let torch = self.torch.as_ref(py);

        let samples = PyDict::new(py);
        samples.set_item("image", to_device_tensor(py, torch, device, &input.image)?)?;
        samples.set_item(input.task.ram_key(), to_device_tensor(py, torch, device, &input.ram_image)?)?;
        samples.set_item("question", input.question.clone())?;
        samples.set_item("category", input.category)?;

        let result = model.call_method1("generate", (samples, ))?;
        let texts = match result.extract::<String>() {
            Ok(text) => vec![text],
            Err(_) => result.extract::<Vec<String>>()?,
        };
        Ok(texts)
    }
}
