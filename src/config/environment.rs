//! Deployment environment selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Environment whose overlay file (`{environment}.toml`) is layered over the defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// Environment variable consulted by [`Environment::from_env`]
    pub const ENV_VAR: &'static str = "HERALD_APP_ENV";

    /// Reads `HERALD_APP_ENV`, falling back to `Development` when unset or invalid
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::EnvVarError(format!(
                "Invalid environment '{}'. Valid values are: development, test, staging, production",
                s
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        let cases = [
            ("development", Environment::Development),
            ("dev", Environment::Development),
            ("test", Environment::Test),
            ("stage", Environment::Staging),
            ("PROD", Environment::Production),
            ("Production", Environment::Production),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Environment>().unwrap(), expected, "input {}", input);
        }
    }

    #[test]
    fn test_parse_invalid() {
        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarError(ref msg) if msg.contains("'qa'")));
    }

    #[test]
    fn test_display_matches_overlay_file_stem() {
        assert_eq!(Environment::Staging.to_string(), "staging");
        assert_eq!(Environment::default(), Environment::Development);
    }
}
