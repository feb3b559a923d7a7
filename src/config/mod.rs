//! Configuration
//!
//! Layered settings for the take list: project location, session defaults,
//! and logging. Loaded through [`ConfigLoader`].

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::record::validate_name;
use crate::types::Status;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the take list inside a project directory.
pub const TAKELIST_FILE_NAME: &str = "takelist.csv";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TakeListConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TakeListConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        self.project.validate()?;
        self.session.validate()
    }
}

fn default_project_name() -> String {
    "default".to_string()
}

/// Where the project's take list lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name; the take list is stored under `projects/<name>/`
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Root directory holding `projects/`; None means the XDG data directory.
    /// Relative paths resolve against the project directory.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            root_dir: None,
        }
    }
}

impl ProjectConfig {
    fn validate(&self) -> Result<(), ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::ConfigError(
                "project.name cannot be empty".to_string(),
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ApiError::ConfigError(format!(
                "project.name must be a single path segment, got {:?}",
                self.name
            )));
        }
        Ok(())
    }

    /// Resolve the root directory, anchoring relative paths at `project_dir`.
    pub fn resolve_root(&self, project_dir: &Path) -> Result<PathBuf, ApiError> {
        match &self.root_dir {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(project_dir.join(dir)),
            None => xdg::default_root_dir(),
        }
    }

    /// `<root>/projects/<name>/takelist.csv`
    pub fn takelist_path(&self, project_dir: &Path) -> Result<PathBuf, ApiError> {
        Ok(self
            .resolve_root(project_dir)?
            .join("projects")
            .join(self.name.trim())
            .join(TAKELIST_FILE_NAME))
    }
}

fn default_sequence() -> String {
    "Sequence".to_string()
}

fn default_frame_rate() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

fn default_status() -> Status {
    Status::Good
}

/// Recording session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sequence new takes are logged under until changed
    #[serde(default = "default_sequence")]
    pub sequence: String,

    /// Nominal frame rate used to turn timecodes into durations
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Save the take list after every change
    #[serde(default = "default_true")]
    pub autosave: bool,

    /// Status given to takes logged by the recorder
    #[serde(default = "default_status")]
    pub default_status: Status,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sequence: default_sequence(),
            frame_rate: default_frame_rate(),
            autosave: default_true(),
            default_status: default_status(),
        }
    }
}

impl SessionConfig {
    fn validate(&self) -> Result<(), ApiError> {
        if self.frame_rate == 0 || self.frame_rate > 120 {
            return Err(ApiError::ConfigError(format!(
                "session.frame_rate must be between 1 and 120, got {}",
                self.frame_rate
            )));
        }
        validate_name("Sequence", &self.sequence)
            .map_err(|e| ApiError::ConfigError(format!("session.sequence: {}", e)))
    }
}
