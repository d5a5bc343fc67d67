//! # course-registrar - Binary Entry Point
//!
//! Replays a YAML scenario against an in-memory registrar and writes one
//! JSON line per step to stdout. The scenario path is the first argument,
//! or `COURSE_REGISTRAR__REGISTRAR__SCENARIO_PATH`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;

use course_registrar::adapters::events::TracingEventPublisher;
use course_registrar::adapters::scenario::{ScenarioError, ScenarioFile, ScenarioRunner};
use course_registrar::application::Registrar;
use course_registrar::config::{AppConfig, ConfigError};
use course_registrar::telemetry::{self, TelemetryError};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("Failed to encode step report: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("No scenario given. Usage: course-registrar <scenario.yaml>")]
    NoScenario,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "course-registrar failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    telemetry::init_tracing(&config.logging)?;

    let scenario_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.registrar.scenario_path.clone())
        .ok_or(CliError::NoScenario)?;

    let scenario = ScenarioFile::load(&scenario_path)?;
    tracing::info!(
        path = %scenario_path.display(),
        steps = scenario.steps.len(),
        deterministic = config.registrar.is_deterministic(),
        "scenario loaded"
    );

    let registrar = Registrar::from_config(&config.registrar, Arc::new(TracingEventPublisher::new()));
    let reports = ScenarioRunner::new(&registrar).run(&scenario)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        writeln!(out, "{}", serde_json::to_string(report)?)?;
    }
    out.flush()?;

    let rejected = reports.iter().filter(|r| !r.ok).count();
    tracing::info!(steps = reports.len(), rejected, "scenario finished");
    Ok(())
}
