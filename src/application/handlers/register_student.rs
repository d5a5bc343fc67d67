//! RegisterStudent - Enroll a student in a course.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, EventId, StudentId, Timestamp};
use crate::domain::registration::{RegistrationError, RegistrationEvent};

use crate::application::Registrar;

/// Command to enroll a student in a course.
#[derive(Debug, Clone)]
pub struct RegisterStudentCommand {
    pub student_id: StudentId,
    pub course_code: CourseCode,
}

/// Result of a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterStudentResult {
    pub student_id: StudentId,
    pub course_code: CourseCode,
    pub enrolled_count: usize,
    pub capacity: u32,
    /// Course status after the enrollment (Full if this was the last seat).
    pub status: CourseStatus,
    /// The student was on this course's waitlist and has left it.
    pub left_waitlist: bool,
}

impl Registrar {
    /// Enrolls a student.
    ///
    /// Validation order: student exists, course exists, course visible,
    /// not already enrolled, then the course status decides. An Open course
    /// found already at capacity is marked Full and the request rejected.
    pub fn register_student(
        &self,
        cmd: RegisterStudentCommand,
    ) -> Result<RegisterStudentResult, RegistrationError> {
        let student_handle = self.student_handle(&cmd.student_id)?;
        let course_handle = self.course_handle(&cmd.course_code)?;

        let mut events = Vec::new();
        let outcome = {
            let mut course = course_handle.lock();
            let before = course.status();

            if !course.is_visible_to_students() {
                return Err(RegistrationError::not_visible(cmd.course_code, before));
            }
            if course.is_enrolled(&cmd.student_id) {
                return Err(RegistrationError::already_enrolled(
                    cmd.student_id,
                    cmd.course_code,
                ));
            }

            let outcome = course.try_enroll(&cmd.student_id);
            let now = Timestamp::now();

            if let Ok(admission) = &outcome {
                student_handle.lock().add_course_direct(&cmd.course_code);
                events.push(RegistrationEvent::StudentEnrolled {
                    event_id: EventId::new(),
                    course_code: cmd.course_code.clone(),
                    student_id: cmd.student_id.clone(),
                    enrolled_count: admission.enrolled_count,
                    capacity: course.capacity(),
                    status: course.status(),
                    occurred_at: now,
                });
            }
            if course.status() != before {
                events.push(RegistrationEvent::StatusChanged {
                    event_id: EventId::new(),
                    course_code: cmd.course_code.clone(),
                    from: before,
                    to: course.status(),
                    occurred_at: now,
                });
            }

            outcome.map(|admission| RegisterStudentResult {
                student_id: cmd.student_id.clone(),
                course_code: cmd.course_code.clone(),
                enrolled_count: admission.enrolled_count,
                capacity: course.capacity(),
                status: course.status(),
                left_waitlist: admission.left_waitlist,
            })
        };

        self.publish(cmd.student_id.as_str(), events);

        match &outcome {
            Ok(result) => {
                debug!(
                    student_id = %result.student_id,
                    course_code = %result.course_code,
                    enrolled = result.enrolled_count,
                    capacity = result.capacity,
                    "student enrolled"
                );
                if result.status == CourseStatus::Full {
                    info!(course_code = %result.course_code, "course is now full");
                }
            }
            Err(RegistrationError::CourseFull { course, status }) => {
                debug!(
                    student_id = %cmd.student_id,
                    course_code = %course,
                    %status,
                    "enrollment rejected, course full"
                );
            }
            Err(_) => {}
        }

        outcome
    }
}
