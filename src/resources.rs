use pyo3::GILGuard;
use pyo3::prelude::*;
use pyo3::types::PyList;
use tracing::info;

use crate::config::ResourcesSetupConfig;
use crate::data::SampleId;
use crate::error::Result;
use crate::image_caption::caption::setup_cider;
use crate::inference::generate::setup_model;

/// Python objects the evaluation talks to, kept alive with the GIL held.
///
/// Built once per run and never mutated afterwards.
pub struct PyResources {
    pub(crate) gil_guard: GILGuard,
    pub(crate) torch: Py<PyModule>,
    pub(crate) model: Option<PyObject>,
    pub(crate) device: Option<PyObject>,
    pub(crate) cider: Option<PyObject>,
}

impl PyResources {
    pub fn new(config: ResourcesSetupConfig) -> Result<Self> {
        let gil = Python::acquire_gil();
        let pool = unsafe {gil.python().new_pool()};
        let py = pool.python();

        if let Some(python_path) = &config.python_path {
            let syspath = py.import("sys")?
                .getattr("path")?
                .downcast::<PyList>()
                .map_err(PyErr::from)?;
            syspath.insert(0, python_path.to_string_lossy().as_ref())?;
        }
        let torch: Py<PyModule> = py.import("torch")?.into_py(py);

        let (model, device) = match &config.load_model {
            Some(model_config) => {
                let (model, device) = setup_model(model_config, py)?;
                info!(arch = model_config.arch.as_str(), "model ready");
                (Some(model), Some(device))
            },
            None => (None, None)
        };

        let cider = if config.load_cider {
            Some(setup_cider(py)?)
        }
        else {
            None
        };

        Ok(PyResources {
            gil_guard: gil,
            torch,
            model,
            device,
            cider,
        })
    }
}

impl ToPyObject for SampleId {
    fn to_object(&self, py: Python) -> PyObject {
        match self {
            SampleId::Num(id) => id.to_object(py),
            SampleId::Str(id) => id.to_object(py),
        }
    }
}
