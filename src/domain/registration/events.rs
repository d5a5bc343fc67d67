//! Registration domain events.
//!
//! Every successful registrar operation emits one or more of these events.
//! They replace human-readable console output: a presentation layer
//! subscribes to them (or to the structured results) and renders whatever
//! it likes.
//!
//! # Event Naming Convention
//!
//! Events are named in past tense:
//! - `StudentEnrolled` not `EnrollStudent`
//! - `StudentPromoted` not `PromoteStudent`

use serde::{Deserialize, Serialize};

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, DomainEvent, EventId, StudentId, Timestamp};

use super::Membership;

/// How a waitlisted student was moved into the enrolled set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionPolicy {
    /// Head of the waitlist, after a drop freed a seat.
    Fifo,
    /// Uniform random draw, when a full course is closed.
    Lottery,
}

/// Events that occur during course registration.
///
/// All events are scoped to the course aggregate whose lock produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RegistrationEvent {
    /// Student took a seat in the course.
    StudentEnrolled {
        event_id: EventId,
        course_code: CourseCode,
        student_id: StudentId,
        enrolled_count: usize,
        capacity: u32,
        status: CourseStatus,
        occurred_at: Timestamp,
    },

    /// Student joined the tail of the waitlist.
    StudentWaitlisted {
        event_id: EventId,
        course_code: CourseCode,
        student_id: StudentId,
        /// 1-based queue position.
        position: usize,
        occurred_at: Timestamp,
    },

    /// Student left the course (seat or waitlist slot).
    StudentDropped {
        event_id: EventId,
        course_code: CourseCode,
        student_id: StudentId,
        removed_from: Membership,
        occurred_at: Timestamp,
    },

    /// Waitlisted student was promoted to enrolled.
    StudentPromoted {
        event_id: EventId,
        course_code: CourseCode,
        student_id: StudentId,
        policy: PromotionPolicy,
        occurred_at: Timestamp,
    },

    /// Administrator changed the course capacity.
    CapacityChanged {
        event_id: EventId,
        course_code: CourseCode,
        previous: u32,
        capacity: u32,
        status: CourseStatus,
        occurred_at: Timestamp,
    },

    /// Course moved to another lifecycle stage.
    StatusChanged {
        event_id: EventId,
        course_code: CourseCode,
        from: CourseStatus,
        to: CourseStatus,
        occurred_at: Timestamp,
    },

    /// Course was cancelled and every student detached from it.
    CourseCancelled {
        event_id: EventId,
        course_code: CourseCode,
        detached: Vec<StudentId>,
        occurred_at: Timestamp,
    },
}

impl RegistrationEvent {
    /// Returns the course this event belongs to.
    pub fn course_code(&self) -> &CourseCode {
        match self {
            RegistrationEvent::StudentEnrolled { course_code, .. }
            | RegistrationEvent::StudentWaitlisted { course_code, .. }
            | RegistrationEvent::StudentDropped { course_code, .. }
            | RegistrationEvent::StudentPromoted { course_code, .. }
            | RegistrationEvent::CapacityChanged { course_code, .. }
            | RegistrationEvent::StatusChanged { course_code, .. }
            | RegistrationEvent::CourseCancelled { course_code, .. } => course_code,
        }
    }

    /// Returns the student this event is about, if it concerns a single student.
    pub fn student_id(&self) -> Option<&StudentId> {
        match self {
            RegistrationEvent::StudentEnrolled { student_id, .. }
            | RegistrationEvent::StudentWaitlisted { student_id, .. }
            | RegistrationEvent::StudentDropped { student_id, .. }
            | RegistrationEvent::StudentPromoted { student_id, .. } => Some(student_id),
            RegistrationEvent::CapacityChanged { .. }
            | RegistrationEvent::StatusChanged { .. }
            | RegistrationEvent::CourseCancelled { .. } => None,
        }
    }
}

impl DomainEvent for RegistrationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            RegistrationEvent::StudentEnrolled { .. } => "registration.student_enrolled.v1",
            RegistrationEvent::StudentWaitlisted { .. } => "registration.student_waitlisted.v1",
            RegistrationEvent::StudentDropped { .. } => "registration.student_dropped.v1",
            RegistrationEvent::StudentPromoted { .. } => "registration.student_promoted.v1",
            RegistrationEvent::CapacityChanged { .. } => "course.capacity_changed.v1",
            RegistrationEvent::StatusChanged { .. } => "course.status_changed.v1",
            RegistrationEvent::CourseCancelled { .. } => "course.cancelled.v1",
        }
    }

    fn schema_version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> String {
        self.course_code().to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Course"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            RegistrationEvent::StudentEnrolled { occurred_at, .. }
            | RegistrationEvent::StudentWaitlisted { occurred_at, .. }
            | RegistrationEvent::StudentDropped { occurred_at, .. }
            | RegistrationEvent::StudentPromoted { occurred_at, .. }
            | RegistrationEvent::CapacityChanged { occurred_at, .. }
            | RegistrationEvent::StatusChanged { occurred_at, .. }
            | RegistrationEvent::CourseCancelled { occurred_at, .. } => *occurred_at,
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            RegistrationEvent::StudentEnrolled { event_id, .. }
            | RegistrationEvent::StudentWaitlisted { event_id, .. }
            | RegistrationEvent::StudentDropped { event_id, .. }
            | RegistrationEvent::StudentPromoted { event_id, .. }
            | RegistrationEvent::CapacityChanged { event_id, .. }
            | RegistrationEvent::StatusChanged { event_id, .. }
            | RegistrationEvent::CourseCancelled { event_id, .. } => event_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SerializableDomainEvent;

    fn cs101() -> CourseCode {
        CourseCode::new("CS101").unwrap()
    }

    fn s3() -> StudentId {
        StudentId::new("S3").unwrap()
    }

    #[test]
    fn promoted_event_routes_to_course_aggregate() {
        let event = RegistrationEvent::StudentPromoted {
            event_id: EventId::new(),
            course_code: cs101(),
            student_id: s3(),
            policy: PromotionPolicy::Fifo,
            occurred_at: Timestamp::now(),
        };

        assert_eq!(event.event_type(), "registration.student_promoted.v1");
        assert_eq!(event.aggregate_id(), "CS101");
        assert_eq!(event.aggregate_type(), "Course");
        assert_eq!(event.student_id(), Some(&s3()));
    }

    #[test]
    fn course_level_events_have_no_single_student() {
        let event = RegistrationEvent::StatusChanged {
            event_id: EventId::new(),
            course_code: cs101(),
            from: CourseStatus::Full,
            to: CourseStatus::Closed,
            occurred_at: Timestamp::now(),
        };

        assert!(event.student_id().is_none());
        assert_eq!(event.course_code(), &cs101());
    }

    #[test]
    fn envelope_payload_is_tagged_with_variant() {
        let event = RegistrationEvent::StudentWaitlisted {
            event_id: EventId::from_string("evt-9"),
            course_code: cs101(),
            student_id: s3(),
            position: 1,
            occurred_at: Timestamp::now(),
        };

        let envelope = event.to_envelope();

        assert_eq!(envelope.event_id.as_str(), "evt-9");
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.payload["type"], "student_waitlisted");
        assert_eq!(envelope.payload["position"], 1);
        assert_eq!(envelope.payload["course_code"], "CS101");

        let restored: RegistrationEvent = envelope.payload_as().unwrap();
        assert_eq!(restored, event);
    }
}
