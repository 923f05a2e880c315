//! Environment source: `WILLITCONNECT__SECTION__KEY=value`, e.g. `WILLITCONNECT__SERVICE__TIMEOUT_SECS=5`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("WILLITCONNECT")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}
