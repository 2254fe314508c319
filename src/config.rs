use crate::domain::entities::SamplerConfig;
use crate::domain::errors::SamplerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub manifest: PathBuf,
    #[serde(flatten)]
    pub sampler: SamplerConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    pub limit: Option<usize>,
    pub report_file: Option<PathBuf>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, SamplerError> {
        let config_str = fs::read_to_string(path).map_err(|source| SamplerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&config_str)
    }

    pub fn parse(config_str: &str) -> Result<Self, SamplerError> {
        let config: Config = toml::from_str(config_str).map_err(|e| SamplerError::Config(e.to_string()))?;
        config.dataset.sampler.validate()?;
        Ok(config)
    }
}
