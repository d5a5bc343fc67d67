//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus with capture for tests
//! - `TracingEventPublisher` - Writes events to the tracing stream

mod in_memory;
mod tracing_publisher;

pub use in_memory::InMemoryEventBus;
pub use tracing_publisher::TracingEventPublisher;
