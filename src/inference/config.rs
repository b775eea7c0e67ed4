use std::collections::BTreeMap;

use serde::Deserialize;

fn default_arch() -> String {
    String::from("lion_t5")
}

/// Model construction settings.
///
/// `arch` picks the model class from the registry; everything apart from
/// `device` is handed to that class's `from_config` untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_arch")]
    pub arch: String,
    /// e.g. `cuda`, `cuda:1`, `cpu`. CUDA is used when available if unset.
    #[serde(default)]
    pub device: Option<String>,
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_yaml::Value>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            arch: default_arch(),
            device: None,
            params: BTreeMap::new(),
        }
    }
}

impl ModelConfig {
    /// The model section as it is passed to `from_config`, `arch` included.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut section = BTreeMap::new();
        section.insert(String::from("arch"), serde_yaml::Value::String(self.arch.clone()));
        for (key, value) in self.params.iter() {
            section.insert(key.clone(), value.clone());
        }
        serde_json::to_string(&section)
    }
}
