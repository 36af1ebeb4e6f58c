//! Layered configuration loading
//!
//! Sources, lowest to highest priority:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `HERALD_*` environment variables
//!
//! In single-file mode only the given file and the environment variables
//! are read.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "HERALD_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "HERALD_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "HERALD";

/// Separator for nested keys: `HERALD_EVENT_BUS__CAPACITY` -> `event_bus.capacity`
const ENV_SEPARATOR: &str = "__";

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a loader from `HERALD_CONFIG_DIR`, `HERALD_CONFIG_FILE` and `HERALD_APP_ENV`
    ///
    /// # Errors
    ///
    /// Returns an error if both `HERALD_CONFIG_DIR` and `HERALD_CONFIG_FILE`
    /// are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_dir.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "HERALD_CONFIG_DIR and HERALD_CONFIG_FILE cannot both be set. \
                 Use HERALD_CONFIG_DIR for layered configuration or \
                 HERALD_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Switch to single-file mode
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment read from `HERALD_APP_ENV`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate settings from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the required file is missing
    /// - a source fails to parse
    /// - the merged settings fail validation
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        Self::add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}
