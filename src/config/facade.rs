//! Config loading facade over the source and merge modules.

use super::merge_policy::builder_with_defaults;
use super::sources::{environment, explicit_file, global_file};
use super::WillItConnectConfig;
use config::ConfigError;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the user config file, `WILLITCONNECT_CONFIG` and environment overrides.
    pub fn load() -> Result<WillItConnectConfig, ConfigError> {
        let mut builder = global_file::add_to_builder(builder_with_defaults()?)?;
        if let Some(path) = explicit_file::env_config_path() {
            builder = explicit_file::add_to_builder(builder, &path)?;
        }
        environment::add_to_builder(builder)?
            .build()?
            .try_deserialize()
    }

    /// Load defaults, the given file and environment overrides; the user config file is skipped.
    pub fn load_from_file(path: &Path) -> Result<WillItConnectConfig, ConfigError> {
        let builder = explicit_file::add_to_builder(builder_with_defaults()?, path)?;
        environment::add_to_builder(builder)?
            .build()?
            .try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
