//! Course aggregate entity.
//!
//! A Course owns its capacity, its lifecycle status, the ordered list of
//! enrolled students and the FIFO waitlist. Student-facing behaviour is
//! delegated to [`CourseStatus`]; the aggregate applies the resulting
//! mutation.
//!
//! # Design Decisions
//!
//! - **Identifiers, not references**: students are held by `StudentId`; the
//!   registrar resolves them through its own index.
//! - **Crate-private mutators**: every method that changes membership is
//!   `pub(crate)` so only the registrar can keep both sides of the relation
//!   in sync.
//! - **Over-capacity is flagged, not corrected**: lowering capacity below the
//!   current enrollment keeps the course Full and evicts nobody.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CourseCode, StateMachine, StudentId};
use crate::domain::registration::{Membership, RegistrationError};

use super::status::{CourseStatus, EnrollDecision};

/// Course aggregate.
///
/// # Invariants
///
/// - A student appears at most once across `enrolled` and `waitlist`
/// - `enrolled.len() <= capacity` unless an administrator lowered capacity
/// - `waitlist` order is admission priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    code: CourseCode,
    title: String,
    capacity: u32,
    status: CourseStatus,
    enrolled: Vec<StudentId>,
    waitlist: VecDeque<StudentId>,
}

/// Result of an administrator capacity change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityChange {
    pub previous: u32,
    pub capacity: u32,
    pub previous_status: CourseStatus,
    pub status: CourseStatus,
    /// Requested value was negative and stored as zero.
    pub clamped: bool,
    /// More students are enrolled than the new capacity allows.
    pub over_capacity: bool,
}

/// Result of an administrator status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub from: CourseStatus,
    pub to: CourseStatus,
    pub capacity: u32,
    /// Students moved from the waitlist by the closing lottery.
    pub promoted: Vec<StudentId>,
    /// Students removed from the course by cancellation, enrolled first.
    pub detached: Vec<StudentId>,
}

/// Result of a successful enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub enrolled_count: usize,
    /// This seat was the last one and the course is now Full.
    pub filled_course: bool,
    /// The student was queued on this course before taking the seat.
    pub left_waitlist: bool,
}

/// Clamps an administrator-supplied capacity into range.
///
/// Returns the stored value and whether the input was negative.
pub(crate) fn clamp_capacity(requested: i64) -> (u32, bool) {
    let clamped = requested < 0;
    let capacity = u32::try_from(requested.max(0)).unwrap_or(u32::MAX);
    (capacity, clamped)
}

impl Course {
    /// Creates a course. Negative capacity is stored as zero.
    pub fn new(code: CourseCode, title: impl Into<String>, capacity: i64, status: CourseStatus) -> Self {
        let (capacity, _) = clamp_capacity(capacity);
        Self {
            code,
            title: title.into(),
            capacity,
            status,
            enrolled: Vec::new(),
            waitlist: VecDeque::new(),
        }
    }

    pub fn code(&self) -> &CourseCode {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn status(&self) -> CourseStatus {
        self.status
    }

    /// Enrolled students in enrollment order.
    pub fn enrolled(&self) -> &[StudentId] {
        &self.enrolled
    }

    /// Waitlisted students, head first.
    pub fn waitlist(&self) -> Vec<StudentId> {
        self.waitlist.iter().cloned().collect()
    }

    pub fn enrolled_count(&self) -> usize {
        self.enrolled.len()
    }

    pub fn waitlist_count(&self) -> usize {
        self.waitlist.len()
    }

    pub fn has_space(&self) -> bool {
        self.enrolled.len() < self.capacity as usize
    }

    pub fn has_waitlist(&self) -> bool {
        !self.waitlist.is_empty()
    }

    pub fn is_over_capacity(&self) -> bool {
        self.enrolled.len() > self.capacity as usize
    }

    pub fn is_visible_to_students(&self) -> bool {
        self.status.is_visible_to_students()
    }

    pub fn is_enrolled(&self, student: &StudentId) -> bool {
        self.enrolled.contains(student)
    }

    pub fn is_waitlisted(&self, student: &StudentId) -> bool {
        self.waitlist.contains(student)
    }

    /// Returns which collection holds the student, if any.
    pub fn membership_of(&self, student: &StudentId) -> Option<Membership> {
        if self.is_enrolled(student) {
            Some(Membership::Enrolled)
        } else if self.is_waitlisted(student) {
            Some(Membership::Waitlisted)
        } else {
            None
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Student-facing operations (registrar only)
    // ════════════════════════════════════════════════════════════════════

    /// Asks the current status to admit the student.
    ///
    /// An Open course already at capacity is switched to Full and the
    /// request is rejected, so the caller may waitlist instead.
    pub(crate) fn try_enroll(&mut self, student: &StudentId) -> Result<Admission, RegistrationError> {
        if self.is_enrolled(student) {
            return Err(RegistrationError::already_enrolled(
                student.clone(),
                self.code.clone(),
            ));
        }

        match self
            .status
            .enroll_decision(&self.code, self.enrolled.len(), self.capacity)
        {
            EnrollDecision::Admit { fills_course } => {
                let left_waitlist = self.remove_from_waitlist(student);
                self.enrolled.push(student.clone());
                if fills_course {
                    self.status = CourseStatus::Full;
                }
                Ok(Admission {
                    enrolled_count: self.enrolled.len(),
                    filled_course: fills_course,
                    left_waitlist,
                })
            }
            EnrollDecision::RejectAndMarkFull => {
                self.status = CourseStatus::Full;
                Err(RegistrationError::course_full(
                    self.code.clone(),
                    CourseStatus::Full,
                ))
            }
            EnrollDecision::Reject(err) => Err(err),
        }
    }

    /// Appends the student to the waitlist tail.
    ///
    /// Returns the 1-based queue position.
    pub(crate) fn try_waitlist(&mut self, student: &StudentId) -> Result<usize, RegistrationError> {
        if self.is_waitlisted(student) {
            return Err(RegistrationError::already_waitlisted(
                student.clone(),
                self.code.clone(),
            ));
        }
        if self.is_enrolled(student) {
            return Err(RegistrationError::already_enrolled(
                student.clone(),
                self.code.clone(),
            ));
        }

        self.status.waitlist_decision(&self.code)?;
        self.waitlist.push_back(student.clone());
        Ok(self.waitlist.len())
    }

    /// Removes the student from both collections.
    ///
    /// A Full course that regains space becomes Open. Does not promote.
    pub(crate) fn remove_student(&mut self, student: &StudentId) -> Option<Membership> {
        let removed = if let Some(pos) = self.enrolled.iter().position(|s| s == student) {
            self.enrolled.remove(pos);
            Some(Membership::Enrolled)
        } else if self.remove_from_waitlist(student) {
            Some(Membership::Waitlisted)
        } else {
            None
        };

        if self.status == CourseStatus::Full && self.has_space() {
            self.status = CourseStatus::Open;
        }
        removed
    }

    /// Pops the head of the waitlist.
    pub(crate) fn pop_next_waitlisted(&mut self) -> Option<StudentId> {
        self.waitlist.pop_front()
    }

    /// Enrolls without consulting the status. Used for promotion.
    pub(crate) fn add_student_direct(&mut self, student: StudentId) {
        self.remove_from_waitlist(&student);
        if !self.enrolled.contains(&student) {
            self.enrolled.push(student);
        }
        if self.status == CourseStatus::Open && !self.has_space() {
            self.status = CourseStatus::Full;
        }
    }

    fn remove_from_waitlist(&mut self, student: &StudentId) -> bool {
        match self.waitlist.iter().position(|s| s == student) {
            Some(pos) => {
                self.waitlist.remove(pos);
                true
            }
            None => false,
        }
    }

    // ════════════════════════════════════════════════════════════════════
    // Administrator operations
    // ════════════════════════════════════════════════════════════════════

    /// Stores a new capacity and recomputes the status.
    ///
    /// Cancelled courses keep their status. Otherwise spare seats make the
    /// course Open (Draft stays Draft) and no spare seats make it Full.
    pub(crate) fn set_capacity(&mut self, requested: i64) -> CapacityChange {
        let (capacity, clamped) = clamp_capacity(requested);
        let previous = self.capacity;
        let previous_status = self.status;
        self.capacity = capacity;

        if self.status != CourseStatus::Cancelled {
            let enrolled = self.enrolled.len();
            let capacity = capacity as usize;
            if enrolled < capacity {
                if self.status != CourseStatus::Draft {
                    self.status = CourseStatus::Open;
                }
            } else {
                self.status = CourseStatus::Full;
            }
        }

        CapacityChange {
            previous,
            capacity,
            previous_status,
            status: self.status,
            clamped,
            over_capacity: self.is_over_capacity(),
        }
    }

    /// Applies an administrator status transition.
    ///
    /// Full -> Closed first runs the closing lottery against the current
    /// capacity, or against `capacity_increase` when it is larger (the new
    /// capacity is kept). Any transition to Cancelled empties both
    /// collections and reports every detached student.
    pub(crate) fn apply_status_change<R: Rng + ?Sized>(
        &mut self,
        target: CourseStatus,
        capacity_increase: Option<i64>,
        rng: &mut R,
    ) -> Result<StatusChange, RegistrationError> {
        let from = self.status;
        from.transition_to(target)
            .map_err(|_| RegistrationError::invalid_transition(self.code.clone(), from, target))?;

        let mut promoted = Vec::new();
        let mut detached = Vec::new();

        if from == CourseStatus::Full && target == CourseStatus::Closed {
            if let Some(requested) = capacity_increase {
                let (increased, _) = clamp_capacity(requested);
                if increased > self.capacity {
                    self.capacity = increased;
                }
            }
            promoted = self.promote_by_lottery(self.capacity, rng);
        } else if target == CourseStatus::Cancelled {
            detached.extend(self.enrolled.drain(..));
            detached.extend(self.waitlist.drain(..));
        }

        self.status = target;

        Ok(StatusChange {
            from,
            to: target,
            capacity: self.capacity,
            promoted,
            detached,
        })
    }

    /// Promotes waitlisted students uniformly at random, without replacement.
    ///
    /// Fills up to `target_capacity`. Unselected students stay queued in
    /// their original order. Returns the promoted students in draw order.
    pub(crate) fn promote_by_lottery<R: Rng + ?Sized>(
        &mut self,
        target_capacity: u32,
        rng: &mut R,
    ) -> Vec<StudentId> {
        let slots = (target_capacity as usize).saturating_sub(self.enrolled.len());
        let count = slots.min(self.waitlist.len());
        if count == 0 {
            return Vec::new();
        }

        let candidates: Vec<StudentId> = self.waitlist.iter().cloned().collect();
        let picked: Vec<StudentId> = rand::seq::index::sample(rng, candidates.len(), count)
            .into_iter()
            .map(|i| candidates[i].clone())
            .collect();

        self.waitlist.retain(|s| !picked.contains(s));
        self.enrolled.extend(picked.iter().cloned());
        picked
    }
}
