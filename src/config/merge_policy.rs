//! Merge rules: defaults and override order.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("service.timeout_secs", 30)?
        .set_default("service.connect_timeout_secs", 10)?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")
}
