//! Course lifecycle state machine.
//!
//! Each lifecycle stage decides on its own how enroll and waitlist requests
//! are handled, and which stages it may move to next.
//!
//! ```text
//!            ┌────────────────────────────────────────────┐
//!            ▼                                            │
//!  Draft ──▶ Open ──▶ Full ──▶ Closed ──▶ Open / Draft    │
//!    │        │  ▲      │        │                        │
//!    │        │  └──────┘ (automatic, on drop)            │
//!    └────────┴─────────┴────────┴──▶ Cancelled ──────────┘ (back to Draft only)
//! ```
//!
//! | State | enroll | waitlist | next states |
//! |-------|--------|----------|-------------|
//! | Draft | not visible | rejected | Open, Closed, Cancelled |
//! | Open | admit while seats remain | try enrolling | Closed, Draft, Cancelled, Full |
//! | Full | full, waitlist instead | append to tail | Closed, Cancelled |
//! | Closed | closed | rejected | Open, Draft, Cancelled |
//! | Cancelled | not visible | rejected | Draft |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{CourseCode, StateMachine};
use crate::domain::registration::RegistrationError;

/// Lifecycle stage of a course offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    /// Being prepared; hidden from students.
    #[default]
    Draft,
    /// Visible and accepting enrollments.
    Open,
    /// At capacity; accepting waitlist requests only.
    Full,
    /// No longer accepting enrollments or waitlist requests.
    Closed,
    /// Withdrawn; all students detached. Can only be reinstated as Draft.
    Cancelled,
}

/// Outcome of asking a lifecycle stage to admit one more student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollDecision {
    /// Take the seat. `fills_course` is set when this seat is the last one.
    Admit { fills_course: bool },
    /// Open course already at capacity: reject and correct the status to Full.
    RejectAndMarkFull,
    /// Reject without any change.
    Reject(RegistrationError),
}

impl CourseStatus {
    /// Every lifecycle stage, in declaration order.
    pub const ALL: [CourseStatus; 5] = [
        CourseStatus::Draft,
        CourseStatus::Open,
        CourseStatus::Full,
        CourseStatus::Closed,
        CourseStatus::Cancelled,
    ];

    /// Returns true if students may see the course and act on it.
    pub fn is_visible_to_students(&self) -> bool {
        !matches!(self, CourseStatus::Draft | CourseStatus::Cancelled)
    }

    /// Returns true if a seat freed by a drop may be refilled from the waitlist.
    pub fn accepts_promotion(&self) -> bool {
        matches!(self, CourseStatus::Open | CourseStatus::Full)
    }

    /// Decides whether one more student may enroll.
    pub fn enroll_decision(&self, code: &CourseCode, enrolled: usize, capacity: u32) -> EnrollDecision {
        match self {
            CourseStatus::Open => {
                let capacity = capacity as usize;
                if enrolled < capacity {
                    EnrollDecision::Admit {
                        fills_course: enrolled + 1 >= capacity,
                    }
                } else {
                    EnrollDecision::RejectAndMarkFull
                }
            }
            CourseStatus::Full | CourseStatus::Closed => {
                EnrollDecision::Reject(RegistrationError::course_full(code.clone(), *self))
            }
            CourseStatus::Draft | CourseStatus::Cancelled => {
                EnrollDecision::Reject(RegistrationError::not_visible(code.clone(), *self))
            }
        }
    }

    /// Decides whether a student may join the waitlist.
    pub fn waitlist_decision(&self, code: &CourseCode) -> Result<(), RegistrationError> {
        match self {
            CourseStatus::Full => Ok(()),
            other => Err(RegistrationError::not_accepting_waitlist(code.clone(), *other)),
        }
    }
}

impl StateMachine for CourseStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CourseStatus::*;
        matches!(
            (self, target),
            // From DRAFT
            (Draft, Open)
                | (Draft, Closed)
                | (Draft, Cancelled)
            // From OPEN
                | (Open, Closed)
                | (Open, Draft)
                | (Open, Cancelled)
                | (Open, Full)
            // From FULL (Full -> Open happens automatically on drop)
                | (Full, Closed)
                | (Full, Cancelled)
            // From CLOSED
                | (Closed, Open)
                | (Closed, Draft)
                | (Closed, Cancelled)
            // From CANCELLED
                | (Cancelled, Draft)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CourseStatus::*;
        match self {
            Draft => vec![Open, Closed, Cancelled],
            Open => vec![Closed, Draft, Cancelled, Full],
            Full => vec![Closed, Cancelled],
            Closed => vec![Open, Draft, Cancelled],
            Cancelled => vec![Draft],
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CourseStatus::Draft => "DRAFT",
            CourseStatus::Open => "OPEN",
            CourseStatus::Full => "FULL",
            CourseStatus::Closed => "CLOSED",
            CourseStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}
