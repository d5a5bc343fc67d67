//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types, the state machine
//! contract, and event infrastructure that form the vocabulary of the
//! registration domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent};
pub use ids::{CourseCode, StudentId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
