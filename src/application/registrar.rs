//! Registrar - mediator between Course and Student aggregates.
//!
//! Owns both registries and is the only writer of either aggregate, so the
//! course's enrolled/waitlist collections and each student's back-references
//! stay in step. Each operation lives in its own module under `handlers`.
//!
//! # Locking
//!
//! - One mutex per aggregate; the registry maps are only locked to fetch a
//!   handle.
//! - At most one course lock per operation, always taken first. Student
//!   locks are taken one at a time while it is held. Nothing locks a course
//!   while holding a student.
//! - The lottery generator is only locked under a course lock.
//! - Events are published after every aggregate lock is released.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::RegistrarConfig;
use crate::domain::course::Course;
use crate::domain::foundation::{CourseCode, EventId, SerializableDomainEvent, StudentId};
use crate::domain::registration::{RegistrationError, RegistrationEvent};
use crate::domain::student::Student;
use crate::ports::EventPublisher;

use super::registry::{Handle, Registry};

/// Thread-safe registration service.
pub struct Registrar {
    pub(super) students: Registry<StudentId, Student>,
    pub(super) courses: Registry<CourseCode, Course>,
    pub(super) lottery: Mutex<StdRng>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl Registrar {
    /// Creates a registrar whose closing lottery is seeded from OS entropy.
    pub fn new(event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self::with_rng(event_publisher, StdRng::from_entropy())
    }

    /// Creates a registrar with a reproducible closing lottery.
    pub fn with_lottery_seed(event_publisher: Arc<dyn EventPublisher>, seed: u64) -> Self {
        Self::with_rng(event_publisher, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &RegistrarConfig, event_publisher: Arc<dyn EventPublisher>) -> Self {
        match config.lottery_seed {
            Some(seed) => Self::with_lottery_seed(event_publisher, seed),
            None => Self::new(event_publisher),
        }
    }

    fn with_rng(event_publisher: Arc<dyn EventPublisher>, rng: StdRng) -> Self {
        Self {
            students: Registry::new(),
            courses: Registry::new(),
            lottery: Mutex::new(rng),
            event_publisher,
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Catalog
    // ════════════════════════════════════════════════════════════════════

    /// Adds a student. Identifiers must be unique.
    pub fn add_student(&self, student: Student) -> Result<(), RegistrationError> {
        let id = student.id().clone();
        if !self.students.insert_new(id.clone(), student) {
            return Err(RegistrationError::duplicate_student(id));
        }
        debug!(student_id = %id, "student added");
        Ok(())
    }

    /// Adds a course. Codes must be unique.
    pub fn add_course(&self, course: Course) -> Result<(), RegistrationError> {
        let code = course.code().clone();
        let status = course.status();
        let capacity = course.capacity();
        if !self.courses.insert_new(code.clone(), course) {
            return Err(RegistrationError::duplicate_course(code));
        }
        debug!(course_code = %code, %status, capacity, "course added");
        Ok(())
    }

    /// Snapshot of one student.
    pub fn student(&self, id: &StudentId) -> Option<Student> {
        self.students.get(id).map(|h| h.lock().clone())
    }

    /// Snapshot of one course.
    pub fn course(&self, code: &CourseCode) -> Option<Course> {
        self.courses.get(code).map(|h| h.lock().clone())
    }

    /// Snapshot of every student, ordered by id.
    pub fn list_students(&self) -> Vec<Student> {
        self.students
            .handles()
            .iter()
            .map(|h| h.lock().clone())
            .collect()
    }

    /// Snapshot of every course, ordered by code.
    pub fn list_courses(&self) -> Vec<Course> {
        self.courses
            .handles()
            .iter()
            .map(|h| h.lock().clone())
            .collect()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    // ════════════════════════════════════════════════════════════════════
    // Shared helpers for handlers
    // ════════════════════════════════════════════════════════════════════

    pub(super) fn student_handle(&self, id: &StudentId) -> Result<Handle<Student>, RegistrationError> {
        self.students
            .get(id)
            .ok_or_else(|| RegistrationError::student_not_found(id.clone()))
    }

    pub(super) fn course_handle(&self, code: &CourseCode) -> Result<Handle<Course>, RegistrationError> {
        self.courses
            .get(code)
            .ok_or_else(|| RegistrationError::course_not_found(code.clone()))
    }

    /// Publishes the events of one operation under a shared correlation id.
    ///
    /// Must be called with no aggregate lock held. Failures are logged and
    /// swallowed: the domain change has already happened.
    pub(super) fn publish(&self, actor: &str, events: Vec<RegistrationEvent>) {
        if events.is_empty() {
            return;
        }
        let correlation_id = EventId::new().to_string();
        let envelopes = events
            .iter()
            .map(|e| {
                e.to_envelope()
                    .with_correlation_id(correlation_id.clone())
                    .with_actor(actor)
            })
            .collect();

        if let Err(e) = self.event_publisher.publish_all(envelopes) {
            warn!(
                correlation_id = %correlation_id,
                error = %e,
                "failed to publish registration events"
            );
        }
    }
}
