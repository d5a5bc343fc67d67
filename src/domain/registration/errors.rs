//! Registration error types.
//!
//! Every condition in this subsystem is a recoverable, reported outcome.
//! Callers receive the first failed validation and can rely on the registrar
//! having performed no partial mutation.
//!
//! # Code Mapping
//!
//! | Error | Code |
//! |-------|------|
//! | StudentNotFound | STUDENT_NOT_FOUND |
//! | CourseNotFound | COURSE_NOT_FOUND |
//! | DuplicateStudent | DUPLICATE_STUDENT |
//! | DuplicateCourse | DUPLICATE_COURSE |
//! | NotVisible | COURSE_NOT_VISIBLE |
//! | AlreadyEnrolled | ALREADY_ENROLLED |
//! | AlreadyWaitlisted | ALREADY_WAITLISTED |
//! | NotRegistered | NOT_REGISTERED |
//! | CourseFull | COURSE_FULL |
//! | NotAcceptingWaitlist | NOT_ACCEPTING_WAITLIST |
//! | InvalidTransition | INVALID_STATE_TRANSITION |
//! | ValidationFailed | VALIDATION_FAILED |
//! | Internal | INTERNAL_ERROR |

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, DomainError, ErrorCode, StudentId, ValidationError};

/// Registration-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// No student is registered under this identifier.
    StudentNotFound(StudentId),

    /// No course is registered under this code.
    CourseNotFound(CourseCode),

    /// A student with this identifier already exists.
    DuplicateStudent(StudentId),

    /// A course with this code already exists.
    DuplicateCourse(CourseCode),

    /// Course is in Draft or Cancelled and hidden from students.
    NotVisible {
        course: CourseCode,
        status: CourseStatus,
    },

    /// Student already holds a seat in the course.
    AlreadyEnrolled {
        student: StudentId,
        course: CourseCode,
    },

    /// Student is already queued for the course.
    AlreadyWaitlisted {
        student: StudentId,
        course: CourseCode,
    },

    /// Student is neither enrolled nor waitlisted for the course.
    NotRegistered {
        student: StudentId,
        course: CourseCode,
    },

    /// Enrollment attempted against a Full or Closed course.
    CourseFull {
        course: CourseCode,
        status: CourseStatus,
    },

    /// Waitlist attempted against a course that is not Full.
    NotAcceptingWaitlist {
        course: CourseCode,
        status: CourseStatus,
    },

    /// Administrator requested a status change the transition table forbids.
    InvalidTransition {
        course: CourseCode,
        from: CourseStatus,
        to: CourseStatus,
    },

    /// Input failed validation.
    ValidationFailed { field: String, message: String },

    /// Unexpected failure outside the domain rules.
    Internal(String),
}

impl RegistrationError {
    pub fn student_not_found(id: StudentId) -> Self {
        RegistrationError::StudentNotFound(id)
    }

    pub fn course_not_found(code: CourseCode) -> Self {
        RegistrationError::CourseNotFound(code)
    }

    pub fn duplicate_student(id: StudentId) -> Self {
        RegistrationError::DuplicateStudent(id)
    }

    pub fn duplicate_course(code: CourseCode) -> Self {
        RegistrationError::DuplicateCourse(code)
    }

    pub fn not_visible(course: CourseCode, status: CourseStatus) -> Self {
        RegistrationError::NotVisible { course, status }
    }

    pub fn already_enrolled(student: StudentId, course: CourseCode) -> Self {
        RegistrationError::AlreadyEnrolled { student, course }
    }

    pub fn already_waitlisted(student: StudentId, course: CourseCode) -> Self {
        RegistrationError::AlreadyWaitlisted { student, course }
    }

    pub fn not_registered(student: StudentId, course: CourseCode) -> Self {
        RegistrationError::NotRegistered { student, course }
    }

    pub fn course_full(course: CourseCode, status: CourseStatus) -> Self {
        RegistrationError::CourseFull { course, status }
    }

    pub fn not_accepting_waitlist(course: CourseCode, status: CourseStatus) -> Self {
        RegistrationError::NotAcceptingWaitlist { course, status }
    }

    pub fn invalid_transition(course: CourseCode, from: CourseStatus, to: CourseStatus) -> Self {
        RegistrationError::InvalidTransition { course, from, to }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RegistrationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        RegistrationError::Internal(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::StudentNotFound(_) => ErrorCode::StudentNotFound,
            RegistrationError::CourseNotFound(_) => ErrorCode::CourseNotFound,
            RegistrationError::DuplicateStudent(_) => ErrorCode::DuplicateStudent,
            RegistrationError::DuplicateCourse(_) => ErrorCode::DuplicateCourse,
            RegistrationError::NotVisible { .. } => ErrorCode::CourseNotVisible,
            RegistrationError::AlreadyEnrolled { .. } => ErrorCode::AlreadyEnrolled,
            RegistrationError::AlreadyWaitlisted { .. } => ErrorCode::AlreadyWaitlisted,
            RegistrationError::NotRegistered { .. } => ErrorCode::NotRegistered,
            RegistrationError::CourseFull { .. } => ErrorCode::CourseFull,
            RegistrationError::NotAcceptingWaitlist { .. } => ErrorCode::NotAcceptingWaitlist,
            RegistrationError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            RegistrationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            RegistrationError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        match self {
            RegistrationError::StudentNotFound(id) => format!("Student not found: {}", id),
            RegistrationError::CourseNotFound(code) => format!("Course not found: {}", code),
            RegistrationError::DuplicateStudent(id) => format!("Student {} already exists", id),
            RegistrationError::DuplicateCourse(code) => format!("Course {} already exists", code),
            RegistrationError::NotVisible { course, status } => {
                format!("Course {} is not available to students ({})", course, status)
            }
            RegistrationError::AlreadyEnrolled { student, course } => {
                format!("Student {} is already enrolled in {}", student, course)
            }
            RegistrationError::AlreadyWaitlisted { student, course } => {
                format!("Student {} is already waitlisted for {}", student, course)
            }
            RegistrationError::NotRegistered { student, course } => format!(
                "Student {} is neither enrolled nor waitlisted for {}",
                student, course
            ),
            RegistrationError::CourseFull { course, status } => match status {
                CourseStatus::Closed => format!("Cannot enroll; course {} is closed", course),
                _ => format!("Cannot enroll; course {} is full, waitlist instead", course),
            },
            RegistrationError::NotAcceptingWaitlist { course, status } => match status {
                CourseStatus::Open => {
                    format!("Course {} is open; try enrolling instead", course)
                }
                _ => format!("Course {} is not accepting waitlist requests", course),
            },
            RegistrationError::InvalidTransition { course, from, to } => {
                format!("Invalid transition for {}: {} -> {}", course, from, to)
            }
            RegistrationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            RegistrationError::Internal(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RegistrationError {}

impl From<ValidationError> for RegistrationError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                RegistrationError::validation(field.clone(), err.to_string())
            }
        }
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => RegistrationError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => RegistrationError::Internal(err.to_string()),
        }
    }
}
