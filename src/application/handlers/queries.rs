//! Read-only queries: course roster, course waitlist, student schedule.
//!
//! Views are plain snapshots. They carry names and titles resolved through
//! the registries so a presentation layer needs no further lookups.

use serde::Serialize;

use crate::domain::course::CourseStatus;
use crate::domain::foundation::{CourseCode, StudentId};
use crate::domain::registration::RegistrationError;

use crate::application::Registrar;

/// One student line in a roster or waitlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentEntry {
    pub student_id: StudentId,
    pub name: String,
}

/// Enrolled students of a course, in enrollment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub course_code: CourseCode,
    pub title: String,
    pub status: CourseStatus,
    pub capacity: u32,
    pub enrolled: Vec<StudentEntry>,
}

/// Waitlisted students of a course, head first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistView {
    pub course_code: CourseCode,
    pub status: CourseStatus,
    pub waitlisted: Vec<StudentEntry>,
}

/// One course line in a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseEntry {
    pub course_code: CourseCode,
    pub title: String,
    pub status: CourseStatus,
}

/// Courses a student holds a seat in or is queued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleView {
    pub student_id: StudentId,
    pub name: String,
    pub enrolled: Vec<CourseEntry>,
    pub waitlisted: Vec<CourseEntry>,
}

impl RosterView {
    pub fn student_ids(&self) -> Vec<StudentId> {
        self.enrolled.iter().map(|e| e.student_id.clone()).collect()
    }
}

impl WaitlistView {
    pub fn student_ids(&self) -> Vec<StudentId> {
        self.waitlisted.iter().map(|e| e.student_id.clone()).collect()
    }
}

impl ScheduleView {
    pub fn enrolled_codes(&self) -> Vec<CourseCode> {
        self.enrolled.iter().map(|e| e.course_code.clone()).collect()
    }

    pub fn waitlisted_codes(&self) -> Vec<CourseCode> {
        self.waitlisted.iter().map(|e| e.course_code.clone()).collect()
    }
}

impl Registrar {
    pub fn course_roster(&self, code: &CourseCode) -> Result<RosterView, RegistrationError> {
        let course_handle = self.course_handle(code)?;
        let course = course_handle.lock();
        Ok(RosterView {
            course_code: code.clone(),
            title: course.title().to_string(),
            status: course.status(),
            capacity: course.capacity(),
            enrolled: course
                .enrolled()
                .iter()
                .map(|id| self.student_entry(id))
                .collect(),
        })
    }

    pub fn course_waitlist(&self, code: &CourseCode) -> Result<WaitlistView, RegistrationError> {
        let course_handle = self.course_handle(code)?;
        let course = course_handle.lock();
        Ok(WaitlistView {
            course_code: code.clone(),
            status: course.status(),
            waitlisted: course
                .waitlist()
                .iter()
                .map(|id| self.student_entry(id))
                .collect(),
        })
    }

    pub fn student_schedule(&self, id: &StudentId) -> Result<ScheduleView, RegistrationError> {
        // Copy out and release the student before touching any course lock.
        let (name, enrolled, waitlisted) = {
            let student_handle = self.student_handle(id)?;
            let student = student_handle.lock();
            (
                student.name().to_string(),
                student.enrolled_courses().to_vec(),
                student.waitlisted_courses().to_vec(),
            )
        };

        Ok(ScheduleView {
            student_id: id.clone(),
            name,
            enrolled: enrolled.iter().map(|c| self.course_entry(c)).collect(),
            waitlisted: waitlisted.iter().map(|c| self.course_entry(c)).collect(),
        })
    }

    /// Caller may hold a course lock.
    fn student_entry(&self, id: &StudentId) -> StudentEntry {
        let name = self
            .students
            .get(id)
            .map(|h| h.lock().name().to_string())
            .unwrap_or_default();
        StudentEntry {
            student_id: id.clone(),
            name,
        }
    }

    /// Caller must not hold any lock.
    fn course_entry(&self, code: &CourseCode) -> CourseEntry {
        match self.courses.get(code) {
            Some(handle) => {
                let course = handle.lock();
                CourseEntry {
                    course_code: code.clone(),
                    title: course.title().to_string(),
                    status: course.status(),
                }
            }
            None => CourseEntry {
                course_code: code.clone(),
                title: String::new(),
                status: CourseStatus::default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn roster_lists_enrolled_in_order_with_names() {
        let (r, _) = fixture();
        course(&r, "CS101", 3, CourseStatus::Open);
        r.register_student(register("S2", "CS101")).unwrap();
        r.register_student(register("S1", "CS101")).unwrap();

        let roster = r.course_roster(&code("CS101")).unwrap();

        assert_eq!(roster.student_ids(), vec![sid("S2"), sid("S1")]);
        assert_eq!(roster.enrolled[0].name, "Student S2");
        assert_eq!(roster.capacity, 3);
        assert_eq!(roster.status, CourseStatus::Open);
    }

    #[test]
    fn waitlist_view_is_fifo() {
        let (r, _) = fixture();
        course(&r, "CS101", 0, CourseStatus::Full);
        for s in ["S3", "S1", "S2"] {
            r.waitlist_student(waitlist(s, "CS101")).unwrap();
        }

        let view = r.course_waitlist(&code("CS101")).unwrap();

        assert_eq!(view.student_ids(), vec![sid("S3"), sid("S1"), sid("S2")]);
    }

    #[test]
    fn schedule_splits_enrolled_and_waitlisted() {
        let (r, _) = fixture();
        course(&r, "CS101", 5, CourseStatus::Open);
        course(&r, "MATH200", 0, CourseStatus::Full);
        r.register_student(register("S1", "CS101")).unwrap();
        r.waitlist_student(waitlist("S1", "MATH200")).unwrap();

        let schedule = r.student_schedule(&sid("S1")).unwrap();

        assert_eq!(schedule.enrolled_codes(), vec![code("CS101")]);
        assert_eq!(schedule.waitlisted_codes(), vec![code("MATH200")]);
        assert_eq!(schedule.enrolled[0].title, "Course CS101");
        assert_eq!(schedule.waitlisted[0].status, CourseStatus::Full);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (r, _) = fixture();
        assert_eq!(
            r.course_roster(&code("NOPE1")).unwrap_err().code(),
            ErrorCode::CourseNotFound
        );
        assert_eq!(
            r.course_waitlist(&code("NOPE1")).unwrap_err().code(),
            ErrorCode::CourseNotFound
        );
        assert_eq!(
            r.student_schedule(&sid("ghost")).unwrap_err().code(),
            ErrorCode::StudentNotFound
        );
    }
}
