//! SetCourseCapacity - Administrator capacity change.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, EventId, Timestamp};
use crate::domain::registration::{RegistrationError, RegistrationEvent};

use crate::application::Registrar;

/// Command to change a course's capacity.
///
/// Negative values are accepted and stored as zero.
#[derive(Debug, Clone)]
pub struct SetCourseCapacityCommand {
    pub course_code: CourseCode,
    pub capacity: i64,
}

/// Result of a capacity change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetCourseCapacityResult {
    pub course_code: CourseCode,
    pub previous: u32,
    pub capacity: u32,
    pub status: CourseStatus,
    /// The requested capacity was negative and stored as zero.
    pub clamped: bool,
    /// More students are enrolled than the new capacity. Nobody is evicted.
    pub over_capacity: bool,
}

impl Registrar {
    /// Stores a new capacity and lets the course recompute its status.
    ///
    /// Raising capacity does not promote waitlisted students; they may
    /// enroll directly once the course is Open.
    pub fn set_course_capacity(
        &self,
        cmd: SetCourseCapacityCommand,
    ) -> Result<SetCourseCapacityResult, RegistrationError> {
        let course_handle = self.course_handle(&cmd.course_code)?;

        let change = course_handle.lock().set_capacity(cmd.capacity);

        let now = Timestamp::now();
        let mut events = vec![RegistrationEvent::CapacityChanged {
            event_id: EventId::new(),
            course_code: cmd.course_code.clone(),
            previous: change.previous,
            capacity: change.capacity,
            status: change.status,
            occurred_at: now,
        }];
        if change.status != change.previous_status {
            events.push(RegistrationEvent::StatusChanged {
                event_id: EventId::new(),
                course_code: cmd.course_code.clone(),
                from: change.previous_status,
                to: change.status,
                occurred_at: now,
            });
        }
        self.publish("admin", events);

        if change.clamped {
            warn!(
                course_code = %cmd.course_code,
                requested = cmd.capacity,
                "negative capacity clamped to zero"
            );
        }
        if change.over_capacity {
            warn!(
                course_code = %cmd.course_code,
                capacity = change.capacity,
                "course over capacity; remains full until resolved"
            );
        }
        info!(
            course_code = %cmd.course_code,
            previous = change.previous,
            capacity = change.capacity,
            status = %change.status,
            "capacity changed"
        );

        Ok(SetCourseCapacityResult {
            course_code: cmd.course_code,
            previous: change.previous,
            capacity: change.capacity,
            status: change.status,
            clamped: change.clamped,
            over_capacity: change.over_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn raising_capacity_reopens_without_promoting() {
        let (r, bus) = fixture();
        course(&r, "CS101", 1, CourseStatus::Open);
        r.register_student(register("S1", "CS101")).unwrap();
        r.waitlist_student(waitlist("S2", "CS101")).unwrap();
        bus.clear();

        let result = r.set_course_capacity(capacity("CS101", 3)).unwrap();

        assert_eq!(result.previous, 1);
        assert_eq!(result.status, CourseStatus::Open);
        assert_eq!(r.course(&code("CS101")).unwrap().waitlist(), vec![sid("S2")]);
        assert_eq!(
            bus.event_types(),
            vec!["course.capacity_changed.v1", "course.status_changed.v1"]
        );
    }

    #[test]
    fn reducing_below_enrollment_is_flagged() {
        let (r, _) = fixture();
        course(&r, "CS101", 5, CourseStatus::Open);
        for s in ["S1", "S2", "S3"] {
            r.register_student(register(s, "CS101")).unwrap();
        }

        let result = r.set_course_capacity(capacity("CS101", 2)).unwrap();

        assert!(result.over_capacity);
        assert_eq!(result.status, CourseStatus::Full);
        assert_eq!(r.course(&code("CS101")).unwrap().enrolled_count(), 3);
    }

    #[test]
    fn negative_capacity_is_clamped() {
        let (r, _) = fixture();
        course(&r, "CS101", 5, CourseStatus::Open);

        let result = r.set_course_capacity(capacity("CS101", -4)).unwrap();

        assert!(result.clamped);
        assert_eq!(result.capacity, 0);
        assert_eq!(result.status, CourseStatus::Full);
    }

    #[test]
    fn unknown_course_is_not_found() {
        let (r, _) = fixture();
        let err = r.set_course_capacity(capacity("NOPE1", 3)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CourseNotFound);
    }
}
