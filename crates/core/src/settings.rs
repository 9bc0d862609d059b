// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Runtime settings read from `LOADSCOPE_*` environment variables.

use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix for all settings.
pub const ENV_PREFIX: &str = "LOADSCOPE";

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A variable was present but could not be parsed.
    #[error("Invalid settings: {0}")]
    Invalid(#[from] config::ConfigError),

    /// A value parsed but is outside its domain.
    #[error("Invalid value for {key}: {reason}")]
    OutOfRange {
        /// Setting name.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Runtime knobs of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Assumed wall-clock minutes of a full multi-profile run, used by the
    /// pod-time cost estimate (`LOADSCOPE_RUN_MINUTES`).
    pub run_minutes: f64,
    /// Log filter used when `RUST_LOG` is unset (`LOADSCOPE_LOG`).
    pub log: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            run_minutes: 27.0,
            log: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit environment source.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let settings: Settings = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if !self.run_minutes.is_finite() || self.run_minutes <= 0.0 {
            return Err(SettingsError::OutOfRange {
                key: "run_minutes",
                reason: format!("expected a positive number of minutes, got {}", self.run_minutes),
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults_without_variables() {
        let settings = Settings::load(env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_run_minutes_override() {
        let settings = Settings::load(env(&[("LOADSCOPE_RUN_MINUTES", "45")])).unwrap();
        assert_eq!(settings.run_minutes, 45.0);
        assert_eq!(settings.log, "warn");
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let err = Settings::load(env(&[("LOADSCOPE_RUN_MINUTES", "0")])).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { key: "run_minutes", .. }));
    }

    #[test]
    fn test_rejects_unparseable_duration() {
        assert!(Settings::load(env(&[("LOADSCOPE_RUN_MINUTES", "half an hour")])).is_err());
    }
}
