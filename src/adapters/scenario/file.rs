//! YAML scenario file: seed data plus scripted registrar operations.
//!
//! ```yaml
//! students:
//!   - { id: S1, name: Alice }
//! courses:
//!   - { code: CS101, title: Intro, capacity: 2, status: open }
//! steps:
//!   - register: { student: S1, course: CS101 }
//!   - set_status: { course: CS101, status: closed, capacity_increase: 6 }
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, StudentId};
use crate::domain::registration::RegistrationError;

/// Errors raised while loading or seeding a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to deserialize scenario: {0}")]
    DeserializationFailed(String),

    #[error("Invalid seed data: {0}")]
    Seed(#[from] RegistrationError),
}

/// Student to create before the steps run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentSeed {
    pub id: StudentId,
    pub name: String,
}

/// Course to create before the steps run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CourseSeed {
    pub code: CourseCode,
    pub title: String,
    pub capacity: i64,
    #[serde(default)]
    pub status: CourseStatus,
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStep {
    Register {
        student: StudentId,
        course: CourseCode,
    },
    Waitlist {
        student: StudentId,
        course: CourseCode,
    },
    Unregister {
        student: StudentId,
        course: CourseCode,
    },
    SetCapacity {
        course: CourseCode,
        capacity: i64,
    },
    SetStatus {
        course: CourseCode,
        status: CourseStatus,
        #[serde(default)]
        capacity_increase: Option<i64>,
    },
    Roster {
        course: CourseCode,
    },
    ShowWaitlist {
        course: CourseCode,
    },
    Schedule {
        student: StudentId,
    },
}

impl ScenarioStep {
    /// Operation name used in step reports.
    pub fn operation(&self) -> &'static str {
        match self {
            ScenarioStep::Register { .. } => "register",
            ScenarioStep::Waitlist { .. } => "waitlist",
            ScenarioStep::Unregister { .. } => "unregister",
            ScenarioStep::SetCapacity { .. } => "set_capacity",
            ScenarioStep::SetStatus { .. } => "set_status",
            ScenarioStep::Roster { .. } => "roster",
            ScenarioStep::ShowWaitlist { .. } => "show_waitlist",
            ScenarioStep::Schedule { .. } => "schedule",
        }
    }
}

/// A complete scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub students: Vec<StudentSeed>,

    #[serde(default)]
    pub courses: Vec<CourseSeed>,

    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<ScenarioStep>,
}

impl ScenarioFile {
    /// Parses a scenario from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ScenarioError> {
        serde_yaml::from_str(yaml).map_err(|e| ScenarioError::DeserializationFailed(e.to_string()))
    }

    /// Reads and parses a scenario file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::NotFound(path.to_path_buf()));
        }

        let yaml =
            std::fs::read_to_string(path).map_err(|e| ScenarioError::IoError(e.to_string()))?;

        Self::from_yaml_str(&yaml)
    }
}
