//! WaitlistStudent - Queue a student for a full course.

use serde::Serialize;
use tracing::debug;

use crate::domain::foundation::{CourseCode, EventId, StudentId, Timestamp};
use crate::domain::registration::{RegistrationError, RegistrationEvent};

use crate::application::Registrar;

/// Command to add a student to a course's waitlist.
#[derive(Debug, Clone)]
pub struct WaitlistStudentCommand {
    pub student_id: StudentId,
    pub course_code: CourseCode,
}

/// Result of a successful waitlist request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistStudentResult {
    pub student_id: StudentId,
    pub course_code: CourseCode,
    /// 1-based position in the queue.
    pub position: usize,
}

impl Registrar {
    /// Appends a student to the waitlist of a Full course.
    ///
    /// Validation order: student exists, course exists, course visible,
    /// not already waitlisted, not already enrolled, then the course status
    /// decides.
    pub fn waitlist_student(
        &self,
        cmd: WaitlistStudentCommand,
    ) -> Result<WaitlistStudentResult, RegistrationError> {
        let student_handle = self.student_handle(&cmd.student_id)?;
        let course_handle = self.course_handle(&cmd.course_code)?;

        let position = {
            let mut course = course_handle.lock();
            if !course.is_visible_to_students() {
                return Err(RegistrationError::not_visible(
                    cmd.course_code,
                    course.status(),
                ));
            }

            let position = course.try_waitlist(&cmd.student_id)?;
            student_handle.lock().add_waitlist_direct(&cmd.course_code);
            position
        };

        self.publish(
            cmd.student_id.as_str(),
            vec![RegistrationEvent::StudentWaitlisted {
                event_id: EventId::new(),
                course_code: cmd.course_code.clone(),
                student_id: cmd.student_id.clone(),
                position,
                occurred_at: Timestamp::now(),
            }],
        );

        debug!(
            student_id = %cmd.student_id,
            course_code = %cmd.course_code,
            position,
            "student waitlisted"
        );

        Ok(WaitlistStudentResult {
            student_id: cmd.student_id,
            course_code: cmd.course_code,
            position,
        })
    }
}
