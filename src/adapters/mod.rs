//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the registrar to the outside world:
//! - `events` - Event publisher implementations (in-memory, tracing)
//! - `scenario` - YAML scenario loading and replay

pub mod events;
pub mod scenario;

pub use events::{InMemoryEventBus, TracingEventPublisher};
pub use scenario::{ScenarioFile, ScenarioRunner};
