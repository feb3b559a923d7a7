//! Defaults every configuration build starts from.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the lowest-precedence defaults.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("project.name", "default")?
        .set_default("session.sequence", "Sequence")?
        .set_default("session.frame_rate", 30)?
        .set_default("session.autosave", true)?
        .set_default("session.default_status", "G")
}
