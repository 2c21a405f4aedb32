//! Normalizer configuration loaded from YAML

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::engine::annotators::AnnotatorSet;
use crate::engine::constants::DEFAULT_ANNOTATORS;

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_annotators")]
    pub annotators: Vec<String>,
    #[serde(default)]
    pub pretty: bool,
}

fn default_annotators() -> Vec<String> {
    DEFAULT_ANNOTATORS.iter().map(|s| s.to_string()).collect()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            annotators: default_annotators(),
            pretty: false,
        }
    }
}

impl NormalizerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let path = config_path.as_ref();

        if !path.exists() {
            return Err(anyhow!("Config file not found: {}", path.display()));
        }

        let yaml_str = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;

        Self::from_yaml_str(&yaml_str)
            .map_err(|e| anyhow!("Invalid YAML config in {}: {}", path.display(), e))
    }

    pub fn from_yaml_str(yaml_str: &str) -> Result<Self> {
        let config: NormalizerConfig = serde_yaml::from_str(yaml_str)?;
        Ok(config)
    }

    pub fn annotator_set(&self) -> AnnotatorSet {
        self.annotators.iter().map(String::as_str).collect()
    }

    /// A comma-separated override list wins over the configured annotators
    pub fn resolve_annotators(&self, override_list: Option<&str>) -> AnnotatorSet {
        match override_list {
            Some(list) => AnnotatorSet::parse_list(list),
            None => self.annotator_set(),
        }
    }
}
