//! Logging configuration

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use super::ValidationError;

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per record
    Json,
}

/// Tracing subscriber settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `course_registrar=debug`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.level.trim().is_empty() {
            return Err(ValidationError::MissingRequired("logging.level"));
        }
        EnvFilter::try_new(&self.level).map_err(|e| ValidationError::InvalidLogFilter {
            filter: self.level.clone(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_pretty_info() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn accepts_target_directives() {
        let config = LoggingConfig {
            level: "warn,course_registrar=debug".to_string(),
            format: LogFormat::Json,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_level_in_directive() {
        let config = LoggingConfig {
            level: "course_registrar=verbose".to_string(),
            format: LogFormat::Pretty,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogFilter { .. })
        ));
    }

    #[test]
    fn rejects_blank_level() {
        let config = LoggingConfig {
            level: "  ".to_string(),
            format: LogFormat::Pretty,
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("logging.level"))
        );
    }

    #[test]
    fn format_deserializes_lowercase() {
        let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, LogFormat::Json);
    }
}
