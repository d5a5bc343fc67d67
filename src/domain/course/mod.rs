//! Course domain module.
//!
//! - `status` - CourseStatus lifecycle and per-stage decisions
//! - `aggregate` - Course aggregate with capacity and promotion

mod aggregate;
mod status;

pub use aggregate::{Admission, CapacityChange, Course, StatusChange};
pub use status::{CourseStatus, EnrollDecision};
