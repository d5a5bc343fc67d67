//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `course` - Course lifecycle state machine and aggregate
//! - `student` - Student aggregate and its course back-references
//! - `registration` - Errors, events and membership shared by both aggregates

pub mod course;
pub mod foundation;
pub mod registration;
pub mod student;
