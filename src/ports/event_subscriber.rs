//! EventSubscriber port - Interface for subscribing to domain events.
//!
//! A presentation layer registers handlers here to render registrar
//! outcomes however it likes.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// Implementations should be:
/// - **Idempotent** - Safe to call multiple times with same event
/// - **Quick** - Handlers run on the publishing thread
///
/// # Example
///
/// ```ignore
/// struct RosterPrinter;
///
/// impl EventHandler for RosterPrinter {
///     fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let event: RegistrationEvent = event.payload_as()?;
///         println!("{:?}", event);
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "RosterPrinter"
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Process an event.
    fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging and error messages.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// Handlers register interest in specific event types and are invoked
/// when matching events are published.
pub trait EventSubscriber: Send + Sync {
    /// Subscribe a handler to one event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe a handler to several event types.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);
}
