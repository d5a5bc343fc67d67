//! Event publisher that writes every envelope to the tracing stream.
//!
//! This is the default sink for the command-line runner: registration
//! events become structured log records instead of console prints.

use tracing::info;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Publishes events as `info` records on the `registration_events` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            target: "registration_events",
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            payload = %event.payload,
            "event published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn publishing_never_fails() {
        let publisher = TracingEventPublisher::new();
        let events = vec![
            EventEnvelope::new("course.status_changed.v1", "CS101", "Course", json!({})),
            EventEnvelope::new("course.cancelled.v1", "CS101", "Course", json!({})),
        ];

        assert!(publisher.publish_all(events).is_ok());
    }
}
