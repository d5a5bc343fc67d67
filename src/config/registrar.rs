//! Registrar configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::ValidationError;

/// Registrar behaviour settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrarConfig {
    /// Fixed seed for the closing lottery. Seeded from OS entropy when unset.
    #[serde(default)]
    pub lottery_seed: Option<u64>,

    /// Scenario file replayed by the command-line runner
    #[serde(default)]
    pub scenario_path: Option<PathBuf>,
}

impl RegistrarConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.scenario_path {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::EmptyScenarioPath);
            }
        }
        Ok(())
    }

    /// Returns true if lottery results are reproducible across runs.
    pub fn is_deterministic(&self) -> bool {
        self.lottery_seed.is_some()
    }
}
