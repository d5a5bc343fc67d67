//! Registration domain module.
//!
//! Shared vocabulary for the course/student relationship:
//!
//! - `errors` - RegistrationError taxonomy
//! - `events` - RegistrationEvent emitted by successful operations
//! - `membership` - Enrolled vs waitlisted

mod errors;
mod events;
mod membership;

pub use errors::RegistrationError;
pub use events::{PromotionPolicy, RegistrationEvent};
pub use membership::Membership;
