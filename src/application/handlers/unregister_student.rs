//! UnregisterStudent - Drop a student from a course, refilling the seat.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, EventId, StudentId, Timestamp};
use crate::domain::registration::{
    Membership, PromotionPolicy, RegistrationError, RegistrationEvent,
};

use crate::application::Registrar;

/// Command to remove a student from a course.
#[derive(Debug, Clone)]
pub struct UnregisterStudentCommand {
    pub student_id: StudentId,
    pub course_code: CourseCode,
}

/// Result of a successful drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnregisterStudentResult {
    pub student_id: StudentId,
    pub course_code: CourseCode,
    pub removed_from: Membership,
    /// Waitlisted student moved into the freed seat, if any.
    pub promoted: Option<StudentId>,
    pub status: CourseStatus,
}

impl Registrar {
    /// Removes a student from a course.
    ///
    /// When an enrolled student leaves an Open or Full course that now has a
    /// free seat and a waitlist, the head of the waitlist takes the seat.
    pub fn unregister_student(
        &self,
        cmd: UnregisterStudentCommand,
    ) -> Result<UnregisterStudentResult, RegistrationError> {
        let student_handle = self.student_handle(&cmd.student_id)?;
        let course_handle = self.course_handle(&cmd.course_code)?;

        let mut events = Vec::new();
        let result = {
            let mut course = course_handle.lock();
            let before = course.status();

            let removed_from = course.membership_of(&cmd.student_id).ok_or_else(|| {
                RegistrationError::not_registered(cmd.student_id.clone(), cmd.course_code.clone())
            })?;

            student_handle.lock().remove_course_direct(&cmd.course_code);
            course.remove_student(&cmd.student_id);
            let now = Timestamp::now();
            events.push(RegistrationEvent::StudentDropped {
                event_id: EventId::new(),
                course_code: cmd.course_code.clone(),
                student_id: cmd.student_id.clone(),
                removed_from,
                occurred_at: now,
            });

            let mut promoted = None;
            if removed_from == Membership::Enrolled
                && course.status().accepts_promotion()
                && course.has_space()
                && course.has_waitlist()
            {
                if let Some(next) = course.pop_next_waitlisted() {
                    course.add_student_direct(next.clone());
                    if let Some(handle) = self.students.get(&next) {
                        handle.lock().add_course_direct(&cmd.course_code);
                    }
                    events.push(RegistrationEvent::StudentPromoted {
                        event_id: EventId::new(),
                        course_code: cmd.course_code.clone(),
                        student_id: next.clone(),
                        policy: PromotionPolicy::Fifo,
                        occurred_at: now,
                    });
                    promoted = Some(next);
                }
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

            UnregisterStudentResult {
                student_id: cmd.student_id.clone(),
                course_code: cmd.course_code.clone(),
                removed_from,
                promoted,
                status: course.status(),
            }
        };

        self.publish(cmd.student_id.as_str(), events);

        debug!(
            student_id = %result.student_id,
            course_code = %result.course_code,
            removed_from = %result.removed_from,
            "student dropped"
        );
        if let Some(promoted) = &result.promoted {
            info!(
                student_id = %promoted,
                course_code = %result.course_code,
                "promoted from waitlist"
            );
        }

        Ok(result)
    }
}
