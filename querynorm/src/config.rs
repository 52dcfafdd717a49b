//! Normalizer configuration stored in `querynorm.toml`.
//!
//! ```toml
//! [defaults]
//! limit = 25
//! sort = "created_at desc"
//!
//! [output]
//! format = "table"
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{OptionsError, OptionsResult};
use crate::options::OptionsHash;
use crate::value::OptionValue;

pub const CONFIG_FILE_NAME: &str = "querynorm.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Option entries seeded before caller-supplied options.
    #[serde(default)]
    pub defaults: IndexMap<String, toml::Value>,
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_format")]
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

fn default_output_format() -> String {
    "table".to_string()
}

impl NormalizerConfig {
    pub fn from_toml_str(source: &str) -> OptionsResult<Self> {
        toml::from_str(source).map_err(|err| OptionsError::config(format!("invalid config: {err}")))
    }

    pub fn load(path: &Path) -> OptionsResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|err| OptionsError::config(format!("failed to read {}: {err}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Look for `querynorm.toml` in `dir` and its ancestors.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Build an options hash seeded with the configured defaults.
    pub fn defaults_hash(&self) -> OptionsResult<OptionsHash> {
        OptionsHash::from_seed(self.defaults.iter().map(|(key, value)| (key, toml_to_option(value))))
    }
}

fn toml_to_option(value: &toml::Value) -> OptionValue {
    match value {
        toml::Value::String(text) => OptionValue::Str(text.clone()),
        toml::Value::Integer(number) => OptionValue::Int(*number),
        toml::Value::Float(number) => OptionValue::Float(*number),
        toml::Value::Boolean(flag) => OptionValue::Bool(*flag),
        toml::Value::Datetime(datetime) => OptionValue::Str(datetime.to_string()),
        toml::Value::Array(items) => OptionValue::Seq(items.iter().map(toml_to_option).collect()),
        toml::Value::Table(table) => OptionValue::Map(
            table
                .iter()
                .map(|(key, value)| (key.clone(), toml_to_option(value)))
                .collect(),
        ),
    }
}
