//! Configuration types for the simulation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the directory that holds the output template
pub const TEMPLATES_PATH_ENV: &str = "LIFE_TEMPLATES_PATH";

/// Location of the XML skeleton the writer fills in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory containing the template
    pub templates_path: PathBuf,
    /// File name of the template inside `templates_path`
    pub template_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            templates_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../templates"),
            template_name: "output-template.xml".to_string(),
        }
    }
}

impl OutputConfig {
    /// Default configuration, with `templates_path` taken from `LIFE_TEMPLATES_PATH` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(path) = std::env::var_os(TEMPLATES_PATH_ENV).filter(|p| !p.is_empty()) {
            config.templates_path = PathBuf::from(path);
        }
        config
    }

    pub fn template_file(&self) -> PathBuf {
        self.templates_path.join(&self.template_name)
    }
}

/// A single load-simulate-save run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Input document path
    pub input: PathBuf,
    /// Output document path
    pub output: PathBuf,
    /// Random seed for reproducibility; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Output template location
    pub output_config: OutputConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.xml"),
            output: PathBuf::from("output.xml"),
            seed: None,
            output_config: OutputConfig::default(),
        }
    }
}
