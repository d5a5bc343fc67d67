//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COURSE_REGISTRAR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use course_registrar::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Lottery seed: {:?}", config.registrar.lottery_seed);
//! ```

mod error;
mod logging;
mod registrar;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use registrar::RegistrarConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Registrar behaviour (lottery seed, scenario file)
    #[serde(default)]
    pub registrar: RegistrarConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COURSE_REGISTRAR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COURSE_REGISTRAR__REGISTRAR__LOTTERY_SEED=42` -> `registrar.lottery_seed = 42`
    /// - `COURSE_REGISTRAR__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COURSE_REGISTRAR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.registrar.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("COURSE_REGISTRAR__REGISTRAR__LOTTERY_SEED");
        env::remove_var("COURSE_REGISTRAR__REGISTRAR__SCENARIO_PATH");
        env::remove_var("COURSE_REGISTRAR__LOGGING__LEVEL");
        env::remove_var("COURSE_REGISTRAR__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.registrar.lottery_seed, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COURSE_REGISTRAR__REGISTRAR__LOTTERY_SEED", "42");
        env::set_var("COURSE_REGISTRAR__REGISTRAR__SCENARIO_PATH", "./fall.yaml");
        env::set_var("COURSE_REGISTRAR__LOGGING__LEVEL", "debug");
        env::set_var("COURSE_REGISTRAR__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.registrar.lottery_seed, Some(42));
        assert_eq!(
            config.registrar.scenario_path,
            Some(PathBuf::from("./fall.yaml"))
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unparsable_seed_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("COURSE_REGISTRAR__REGISTRAR__LOTTERY_SEED", "not-a-number");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_bad_log_filter() {
        let config = AppConfig {
            logging: LoggingConfig {
                level: "course_registrar=loud".to_string(),
                format: LogFormat::Pretty,
            },
            ..AppConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
