//! Ports - Interfaces between the application core and the outside world.
//!
//! - `EventPublisher` - Publishing registration events
//! - `EventSubscriber` / `EventHandler` - Reacting to published events

mod event_publisher;
mod event_subscriber;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventHandler, EventSubscriber};
