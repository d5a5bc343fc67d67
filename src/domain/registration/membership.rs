//! Relationship between a student and a course.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of a course's two collections a student belongs to.
///
/// A student is in at most one of them for a given course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    Enrolled,
    Waitlisted,
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Membership::Enrolled => "enrolled",
            Membership::Waitlisted => "waitlisted",
        };
        write!(f, "{}", s)
    }
}
