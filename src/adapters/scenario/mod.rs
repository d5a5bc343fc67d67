//! Scenario adapter - batch-drives the registrar from a YAML file.
//!
//! - `ScenarioFile` - seed students, seed courses and scripted steps
//! - `ScenarioRunner` - replays the steps and reports each outcome

mod file;
mod runner;

pub use file::{CourseSeed, ScenarioError, ScenarioFile, ScenarioStep, StudentSeed};
pub use runner::{ScenarioRunner, StepError, StepReport};
