//! EventPublisher port - Interface for publishing domain events.
//!
//! The registrar publishes envelopes through this port without knowing
//! whether they land in a test bus, a log stream, or a message broker.

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events of one `publish_all` call are delivered in order
/// - Errors are returned to the caller, never panicked on
///
/// # Example
///
/// ```ignore
/// let envelope = event.to_envelope();
/// publisher.publish(envelope)?;
/// ```
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events in order.
    ///
    /// Stops at the first failure; earlier events stay published.
    fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event)?;
        }
        Ok(())
    }
}
