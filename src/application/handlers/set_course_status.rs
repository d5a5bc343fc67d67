//! SetCourseStatus - Administrator lifecycle transition.

use serde::Serialize;
use tracing::info;

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, EventId, StudentId, Timestamp};
use crate::domain::registration::{PromotionPolicy, RegistrationError, RegistrationEvent};

use crate::application::Registrar;

/// Command to move a course to another lifecycle stage.
#[derive(Debug, Clone)]
pub struct SetCourseStatusCommand {
    pub course_code: CourseCode,
    pub status: CourseStatus,
    /// New capacity to apply before a Full -> Closed lottery. Ignored for
    /// other transitions and when not larger than the current capacity.
    pub capacity_increase: Option<i64>,
}

/// Result of a lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetCourseStatusResult {
    pub course_code: CourseCode,
    pub from: CourseStatus,
    pub to: CourseStatus,
    pub capacity: u32,
    /// Winners of the closing lottery.
    pub promoted: Vec<StudentId>,
    /// Students removed by cancellation.
    pub detached: Vec<StudentId>,
}

impl Registrar {
    /// Applies a transition allowed by the course's transition table.
    ///
    /// Full -> Closed runs the closing lottery. Cancellation detaches every
    /// enrolled and waitlisted student from the course.
    pub fn set_course_status(
        &self,
        cmd: SetCourseStatusCommand,
    ) -> Result<SetCourseStatusResult, RegistrationError> {
        let course_handle = self.course_handle(&cmd.course_code)?;

        let (change, previous_capacity) = {
            let mut course = course_handle.lock();
            let previous_capacity = course.capacity();
            let change = {
                let mut rng = self.lottery.lock();
                course.apply_status_change(cmd.status, cmd.capacity_increase, &mut *rng)?
            };

            for id in &change.promoted {
                if let Some(handle) = self.students.get(id) {
                    handle.lock().add_course_direct(&cmd.course_code);
                }
            }
            for id in &change.detached {
                if let Some(handle) = self.students.get(id) {
                    handle.lock().remove_course_direct(&cmd.course_code);
                }
            }
            (change, previous_capacity)
        };

        let now = Timestamp::now();
        let mut events = Vec::new();
        if change.capacity != previous_capacity {
            events.push(RegistrationEvent::CapacityChanged {
                event_id: EventId::new(),
                course_code: cmd.course_code.clone(),
                previous: previous_capacity,
                capacity: change.capacity,
                status: change.from,
                occurred_at: now,
            });
        }
        events.extend(change.promoted.iter().map(|id| RegistrationEvent::StudentPromoted {
            event_id: EventId::new(),
            course_code: cmd.course_code.clone(),
            student_id: id.clone(),
            policy: PromotionPolicy::Lottery,
            occurred_at: now,
        }));
        events.push(RegistrationEvent::StatusChanged {
            event_id: EventId::new(),
            course_code: cmd.course_code.clone(),
            from: change.from,
            to: change.to,
            occurred_at: now,
        });
        if change.to == CourseStatus::Cancelled {
            events.push(RegistrationEvent::CourseCancelled {
                event_id: EventId::new(),
                course_code: cmd.course_code.clone(),
                detached: change.detached.clone(),
                occurred_at: now,
            });
        }
        self.publish("admin", events);

        info!(
            course_code = %cmd.course_code,
            from = %change.from,
            to = %change.to,
            promoted = change.promoted.len(),
            detached = change.detached.len(),
            "course status changed"
        );

        Ok(SetCourseStatusResult {
            course_code: cmd.course_code,
            from: change.from,
            to: change.to,
            capacity: change.capacity,
            promoted: change.promoted,
            detached: change.detached,
        })
    }
}
