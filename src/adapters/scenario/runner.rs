//! Replays a scenario against a registrar and reports each step.

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::application::{
    Registrar, RegisterStudentCommand, SetCourseCapacityCommand, SetCourseStatusCommand,
    UnregisterStudentCommand, WaitlistStudentCommand,
};
use crate::domain::course::Course;
use crate::domain::registration::RegistrationError;
use crate::domain::student::Student;

use super::file::{ScenarioError, ScenarioFile, ScenarioStep};

/// Rejection reason in a step report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepError {
    pub code: String,
    pub message: String,
}

impl From<&RegistrationError> for StepError {
    fn from(err: &RegistrationError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message(),
        }
    }
}

/// Outcome of one scenario step, rendered as one JSON line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// 1-based step number.
    pub step: usize,
    pub operation: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<StepError>,
}

impl StepReport {
    fn from_outcome<T: Serialize>(
        step: usize,
        operation: &'static str,
        outcome: Result<T, RegistrationError>,
    ) -> Self {
        match outcome {
            Ok(value) => Self {
                step,
                operation,
                ok: true,
                result: Some(serde_json::to_value(value).unwrap_or(JsonValue::Null)),
                error: None,
            },
            Err(err) => Self {
                step,
                operation,
                ok: false,
                result: None,
                error: Some(StepError::from(&err)),
            },
        }
    }
}

/// Drives a [`Registrar`] from a [`ScenarioFile`].
pub struct ScenarioRunner<'a> {
    registrar: &'a Registrar,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(registrar: &'a Registrar) -> Self {
        Self { registrar }
    }

    /// Creates the seed students and courses.
    ///
    /// Fails on the first duplicate identifier.
    pub fn seed(&self, scenario: &ScenarioFile) -> Result<(), ScenarioError> {
        for seed in &scenario.students {
            self.registrar
                .add_student(Student::new(seed.id.clone(), seed.name.clone()))?;
        }
        for seed in &scenario.courses {
            self.registrar.add_course(Course::new(
                seed.code.clone(),
                seed.title.clone(),
                seed.capacity,
                seed.status,
            ))?;
        }
        info!(
            students = scenario.students.len(),
            courses = scenario.courses.len(),
            "scenario seeded"
        );
        Ok(())
    }

    /// Seeds the registrar, then runs every step in order.
    ///
    /// Rejected steps are reported and do not stop the run.
    pub fn run(&self, scenario: &ScenarioFile) -> Result<Vec<StepReport>, ScenarioError> {
        self.seed(scenario)?;
        Ok(scenario
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| self.run_step(i + 1, step))
            .collect())
    }

    /// Executes one step.
    pub fn run_step(&self, index: usize, step: &ScenarioStep) -> StepReport {
        let operation = step.operation();
        let r = self.registrar;
        let report = match step.clone() {
            ScenarioStep::Register { student, course } => StepReport::from_outcome(
                index,
                operation,
                r.register_student(RegisterStudentCommand {
                    student_id: student,
                    course_code: course,
                }),
            ),
            ScenarioStep::Waitlist { student, course } => StepReport::from_outcome(
                index,
                operation,
                r.waitlist_student(WaitlistStudentCommand {
                    student_id: student,
                    course_code: course,
                }),
            ),
            ScenarioStep::Unregister { student, course } => StepReport::from_outcome(
                index,
                operation,
                r.unregister_student(UnregisterStudentCommand {
                    student_id: student,
                    course_code: course,
                }),
            ),
            ScenarioStep::SetCapacity { course, capacity } => StepReport::from_outcome(
                index,
                operation,
                r.set_course_capacity(SetCourseCapacityCommand {
                    course_code: course,
                    capacity,
                }),
            ),
            ScenarioStep::SetStatus {
                course,
                status,
                capacity_increase,
            } => StepReport::from_outcome(
                index,
                operation,
                r.set_course_status(SetCourseStatusCommand {
                    course_code: course,
                    status,
                    capacity_increase,
                }),
            ),
            ScenarioStep::Roster { course } => {
                StepReport::from_outcome(index, operation, r.course_roster(&course))
            }
            ScenarioStep::ShowWaitlist { course } => {
                StepReport::from_outcome(index, operation, r.course_waitlist(&course))
            }
            ScenarioStep::Schedule { student } => {
                StepReport::from_outcome(index, operation, r.student_schedule(&student))
            }
        };

        debug!(step = index, operation, ok = report.ok, "scenario step");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use std::sync::Arc;

    const CS101_SCENARIO: &str = r#"
students:
  - { id: S1, name: Alice }
  - { id: S2, name: Bob }
  - { id: S3, name: Carol }
courses:
  - { code: CS101, title: Intro to Programming, capacity: 2, status: open }
steps:
  - register: { student: S1, course: CS101 }
  - register: { student: S2, course: CS101 }
  - register: { student: S3, course: CS101 }
  - waitlist: { student: S3, course: CS101 }
  - unregister: { student: S1, course: CS101 }
  - roster: { course: CS101 }
"#;

    fn registrar() -> Registrar {
        Registrar::with_lottery_seed(Arc::new(InMemoryEventBus::new()), 3)
    }

    #[test]
    fn replays_enrollment_scenario() {
        let r = registrar();
        let scenario = ScenarioFile::from_yaml_str(CS101_SCENARIO).unwrap();

        let reports = ScenarioRunner::new(&r).run(&scenario).unwrap();

        let oks: Vec<bool> = reports.iter().map(|r| r.ok).collect();
        assert_eq!(oks, vec![true, true, false, true, true, true]);
        assert_eq!(reports[2].error.as_ref().unwrap().code, "COURSE_FULL");
        assert_eq!(reports[4].result.as_ref().unwrap()["promoted"], "S3");
        assert_eq!(reports[5].result.as_ref().unwrap()["enrolled"][1]["name"], "Carol");
    }

    #[test]
    fn duplicate_seed_fails_the_run() {
        let r = registrar();
        let scenario = ScenarioFile::from_yaml_str(
            "students:\n  - { id: S1, name: A }\n  - { id: S1, name: B }\n",
        )
        .unwrap();

        let err = ScenarioRunner::new(&r).run(&scenario).unwrap_err();

        assert!(matches!(err, ScenarioError::Seed(_)));
    }

    #[test]
    fn report_omits_empty_sections() {
        let r = registrar();
        r.add_student(Student::new(
            crate::domain::foundation::StudentId::new("S1").unwrap(),
            "Alice",
        ))
        .unwrap();

        let report = ScenarioRunner::new(&r).run_step(
            1,
            &ScenarioStep::Schedule {
                student: crate::domain::foundation::StudentId::new("S1").unwrap(),
            },
        );
        let line = serde_json::to_string(&report).unwrap();

        assert!(line.contains("\"ok\":true"));
        assert!(!line.contains("\"error\""));
    }
}
