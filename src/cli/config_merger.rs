//! Merging of CLI overrides into file-based configuration

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Applies CLI overrides on top of loaded settings.
///
/// CLI flags have the highest priority, above files and `HERALD_*` variables.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads settings the way the CLI asks for.
    ///
    /// `--config` switches to single-file mode and `--env` overrides
    /// `HERALD_APP_ENV`.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load()?))
    }

    /// Returns the base settings with CLI overrides applied and validated
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
