//! In-memory event bus.
//!
//! Synchronous, deterministic delivery. Used by tests to assert on what the
//! registrar published, and by embedders that want in-process handlers.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-memory event bus.
///
/// Features:
/// - Synchronous delivery on the publishing thread
/// - Event capture for assertions
/// - Handler registration and invocation
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// let registrar = Registrar::with_lottery_seed(bus.clone(), 7);
///
/// registrar.register_student(cmd)?;
///
/// assert!(bus.has_event("registration.student_enrolled.v1"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all published events in publish order.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published.read().clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published
            .read()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published
            .read()
            .iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .cloned()
            .collect()
    }

    /// Returns the event types in publish order.
    pub fn event_types(&self) -> Vec<String> {
        self.published
            .read()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    /// Clears all published events.
    pub fn clear(&self) {
        self.published.write().clear();
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published.read().len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published.write().push(event.clone());

        // Clone handlers so no lock is held while they run
        let type_handlers: Vec<Arc<dyn EventHandler>> = self
            .handlers
            .read()
            .get(&event.event_type)
            .cloned()
            .unwrap_or_default();

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()) {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.handlers
            .write()
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self.handlers.write();
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Course", json!({}))
    }

    struct CountingHandler(Arc<AtomicUsize>);

    impl EventHandler for CountingHandler {
        fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    #[test]
    fn publish_stores_event() {
        let bus = InMemoryEventBus::new();

        bus.publish(test_envelope("course.status_changed.v1", "CS101"))
            .unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("course.status_changed.v1"));
    }

    #[test]
    fn filters_by_type_and_aggregate() {
        let bus = InMemoryEventBus::new();

        bus.publish(test_envelope("type.a", "CS101")).unwrap();
        bus.publish(test_envelope("type.b", "MATH200")).unwrap();
        bus.publish(test_envelope("type.a", "MATH200")).unwrap();

        assert_eq!(bus.events_of_type("type.a").len(), 2);
        assert_eq!(bus.events_for_aggregate("MATH200").len(), 2);
        assert_eq!(bus.event_types(), vec!["type.a", "type.b", "type.a"]);
    }

    #[test]
    fn subscribed_handlers_are_invoked() {
        let bus = InMemoryEventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));

        bus.subscribe("type.a", Arc::new(CountingHandler(counter.clone())));
        bus.subscribe_all(
            &["type.a", "type.b"],
            Arc::new(CountingHandler(counter.clone())),
        );

        bus.publish(test_envelope("type.a", "1")).unwrap();
        bus.publish(test_envelope("type.b", "2")).unwrap();
        bus.publish(test_envelope("type.c", "3")).unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn handler_error_is_propagated_after_capture() {
        let bus = InMemoryEventBus::new();

        struct FailingHandler;

        impl EventHandler for FailingHandler {
            fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
                Err(DomainError::new(ErrorCode::InternalError, "render failed"))
            }
            fn name(&self) -> &'static str {
                "FailingHandler"
            }
        }

        bus.subscribe("type.a", Arc::new(FailingHandler));
        let result = bus.publish(test_envelope("type.a", "1"));

        assert!(result.unwrap_err().message.contains("FailingHandler"));
        assert_eq!(bus.event_count(), 1);
    }

    #[test]
    fn clear_removes_all_events() {
        let bus = InMemoryEventBus::new();
        bus.publish_all(vec![test_envelope("a", "1"), test_envelope("b", "2")])
            .unwrap();
        assert_eq!(bus.event_count(), 2);

        bus.clear();

        assert_eq!(bus.event_count(), 0);
    }
}
