//! Environment variable source: TAKELIST_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses TAKELIST prefix and __ as separator for nested keys,
/// e.g. `TAKELIST__SESSION__FRAME_RATE=24`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("TAKELIST")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
