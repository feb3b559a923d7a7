//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::TakeListConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment, then validate it.
    pub fn load(project_dir: &Path) -> Result<TakeListConfig, ApiError> {
        let config = MergeService::load(project_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<TakeListConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> TakeListConfig {
        TakeListConfig::default()
    }
}
