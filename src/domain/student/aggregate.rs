//! Student aggregate entity.
//!
//! A Student only records which courses it is enrolled in or waitlisted
//! for. These sets answer membership queries; enrollment decisions are
//! always made by the course. The registrar is the only writer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseCode, StudentId};
use crate::domain::registration::Membership;

/// Student aggregate.
///
/// # Invariants
///
/// - A course code appears in at most one of `enrolled` and `waitlisted`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,
    name: String,
    enrolled: Vec<CourseCode>,
    waitlisted: Vec<CourseCode>,
}

impl Student {
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            enrolled: Vec::new(),
            waitlisted: Vec::new(),
        }
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Courses with a seat, in the order they were gained.
    pub fn enrolled_courses(&self) -> &[CourseCode] {
        &self.enrolled
    }

    /// Courses queued for, in the order they were joined.
    pub fn waitlisted_courses(&self) -> &[CourseCode] {
        &self.waitlisted
    }

    pub fn is_enrolled_in(&self, course: &CourseCode) -> bool {
        self.enrolled.contains(course)
    }

    pub fn is_waitlisted_in(&self, course: &CourseCode) -> bool {
        self.waitlisted.contains(course)
    }

    pub fn membership_in(&self, course: &CourseCode) -> Option<Membership> {
        if self.is_enrolled_in(course) {
            Some(Membership::Enrolled)
        } else if self.is_waitlisted_in(course) {
            Some(Membership::Waitlisted)
        } else {
            None
        }
    }

    /// Records a seat. Enrollment supersedes any waitlist entry.
    pub(crate) fn add_course_direct(&mut self, course: &CourseCode) {
        if !self.enrolled.contains(course) {
            self.enrolled.push(course.clone());
        }
        self.waitlisted.retain(|c| c != course);
    }

    /// Records a waitlist entry unless already enrolled.
    pub(crate) fn add_waitlist_direct(&mut self, course: &CourseCode) {
        if self.is_enrolled_in(course) || self.waitlisted.contains(course) {
            return;
        }
        self.waitlisted.push(course.clone());
    }

    /// Forgets the course entirely. Returns what was removed, if anything.
    pub(crate) fn remove_course_direct(&mut self, course: &CourseCode) -> Option<Membership> {
        let membership = self.membership_in(course);
        self.enrolled.retain(|c| c != course);
        self.waitlisted.retain(|c| c != course);
        membership
    }
}
