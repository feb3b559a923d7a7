//! CLI Tooling
//!
//! Command-line interface for logging, editing, and exporting takes. Every
//! command runs against the take list of one project.

use crate::config::{ConfigLoader, TakeListConfig};
use crate::error::ApiError;
use crate::record::TakeRecord;
use crate::session::TakeSession;
use crate::store::{CsvTakeListStore, LoadReport};
use crate::timecode::Timecode;
use crate::tree::AddTakeOutcome;
use crate::types::Status;
use crate::view::{color_enabled, format_records_json, format_take_table, format_tree_outline};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Takelist CLI - slate and take logging for recording sessions
#[derive(Parser)]
#[command(name = "takelist")]
#[command(about = "Log slate and take metadata for recording sessions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory (holds takelist.toml)
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Project name (overrides config)
    #[arg(long)]
    pub project: Option<String>,

    /// Enable verbose logging to stderr
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut TakeListConfig) {
        if let Some(project) = &self.project {
            config.project.name = project.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
            config.logging.output = "stderr".to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a take, creating its sequence and slate if needed
    Add {
        /// Sequence name
        sequence: String,
        /// Slate name
        slate: String,
        /// Take number
        take: u32,
        /// Notes for the take
        #[arg(long, default_value = "")]
        notes: String,
        /// Status: S, G, NG, or empty (default: session default status)
        #[arg(long)]
        status: Option<String>,
        /// Start timecode (HH:MM:SS:FF)
        #[arg(long, default_value = "00:00:00:00")]
        timecode: String,
        /// Duration in seconds
        #[arg(long, default_value = "0")]
        duration: f64,
    },
    /// Edit the notes or status of a logged take
    Set {
        sequence: String,
        slate: String,
        take: u32,
        /// Field to edit (Notes or Status)
        field: String,
        value: String,
    },
    /// Show the take list
    List {
        /// Output format (text, tree, or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write the take list to another CSV file
    Export { path: PathBuf },
    /// Merge takes from a CSV file into the project's take list
    Import { path: PathBuf },
    /// Print the path of the project's take list
    Path,
    /// Print the effective configuration
    Config,
}

/// CLI context holding the open session for one project.
pub struct CliContext {
    project_dir: PathBuf,
    config: TakeListConfig,
    session: TakeSession,
}

impl CliContext {
    /// Create a new CLI context, loading configuration for `project_dir`.
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = Self::load_config(&project_dir, config_path.as_deref())?;
        Self::with_config(project_dir, config)
    }

    pub fn load_config(
        project_dir: &Path,
        config_path: Option<&Path>,
    ) -> Result<TakeListConfig, ApiError> {
        match config_path {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(project_dir),
        }
    }

    /// Create a context from already-resolved configuration.
    pub fn with_config(project_dir: PathBuf, config: TakeListConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let path = config.project.takelist_path(&project_dir)?;
        info!("Opening take list {}", path.display());
        let session = TakeSession::open(
            config.session.clone(),
            Box::new(CsvTakeListStore::new(path)),
        )?;
        Ok(Self {
            project_dir,
            config,
            session,
        })
    }

    pub fn session(&self) -> &TakeSession {
        &self.session
    }

    pub fn config(&self) -> &TakeListConfig {
        &self.config
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Execute a command and return its output.
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        let output = match command {
            Commands::Add {
                sequence,
                slate,
                take,
                notes,
                status,
                timecode,
                duration,
            } => self.handle_add(sequence, slate, *take, notes, status.as_deref(), timecode, *duration)?,
            Commands::Set {
                sequence,
                slate,
                take,
                field,
                value,
            } => self.handle_set(sequence, slate, *take, field, value)?,
            Commands::List { format } => self.handle_list(format)?,
            Commands::Export { path } => {
                let count = self.session.export_to(&CsvTakeListStore::new(path))?;
                format!("Exported {} takes to {}", count, path.display())
            }
            Commands::Import { path } => {
                let LoadReport {
                    inserted,
                    duplicates,
                } = self.session.import_from(&CsvTakeListStore::new(path))?;
                format!(
                    "Imported {} takes from {} ({} duplicates skipped)",
                    inserted,
                    path.display(),
                    duplicates
                )
            }
            Commands::Path => self.session.store_path().display().to_string(),
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                ApiError::ConfigError(format!("Failed to serialize configuration: {}", e))
            })?,
        };

        // A one-shot command must not leave changes unsaved when autosave is off.
        if self.session.is_dirty() {
            self.session.save()?;
        }
        Ok(output)
    }

    #[allow(clippy::too_many_arguments)]
    fn handle_add(
        &mut self,
        sequence: &str,
        slate: &str,
        take: u32,
        notes: &str,
        status: Option<&str>,
        timecode: &str,
        duration: f64,
    ) -> Result<String, ApiError> {
        let status = match status {
            Some(s) => s.parse::<Status>().map_err(ApiError::InvalidInput)?,
            None => self.config.session.default_status,
        };
        let timecode = timecode
            .parse::<Timecode>()
            .map_err(ApiError::InvalidInput)?;

        let record = TakeRecord {
            sequence: sequence.to_string(),
            slate: slate.to_string(),
            take,
            timecode,
            duration,
            status,
            notes: notes.to_string(),
        };
        match self.session.insert_record(&record)? {
            AddTakeOutcome::Inserted(_) => Ok(format!(
                "Logged {} / {} take {}",
                sequence, slate, take
            )),
            AddTakeOutcome::Duplicate(_) => Ok(format!(
                "Take {} already exists in {} / {}; kept the existing take",
                take, sequence, slate
            )),
        }
    }

    fn handle_set(
        &mut self,
        sequence: &str,
        slate: &str,
        take: u32,
        field: &str,
        value: &str,
    ) -> Result<String, ApiError> {
        if self
            .session
            .set_take_field_by_key(sequence, slate, take, field, value)?
        {
            Ok(format!(
                "Updated {} of {} / {} take {}",
                field, sequence, slate, take
            ))
        } else {
            Err(ApiError::InvalidInput(format!(
                "Cannot set {:?} to {:?}: only Notes and Status (S, G, NG or empty) are editable",
                field, value
            )))
        }
    }

    fn handle_list(&self, format: &str) -> Result<String, ApiError> {
        let tree = self.session.tree();
        match format {
            "text" => Ok(format_take_table(tree, color_enabled())),
            "tree" => Ok(format_tree_outline(tree, color_enabled())),
            "json" => format_records_json(&tree.flatten()),
            other => Err(ApiError::InvalidInput(format!(
                "Invalid list format: {} (must be 'text', 'tree', or 'json')",
                other
            ))),
        }
    }
}
