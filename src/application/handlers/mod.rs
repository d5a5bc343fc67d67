//! Registrar operations.
//!
//! Each command module defines its Command and Result types next to the
//! `Registrar` method that executes it.

mod queries;
mod register_student;
mod set_course_capacity;
mod set_course_status;
mod unregister_student;
mod waitlist_student;

pub use queries::{CourseEntry, RosterView, ScheduleView, StudentEntry, WaitlistView};
pub use register_student::{RegisterStudentCommand, RegisterStudentResult};
pub use set_course_capacity::{SetCourseCapacityCommand, SetCourseCapacityResult};
pub use set_course_status::{SetCourseStatusCommand, SetCourseStatusResult};
pub use unregister_student::{UnregisterStudentCommand, UnregisterStudentResult};
pub use waitlist_student::{WaitlistStudentCommand, WaitlistStudentResult};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::application::Registrar;
    use crate::domain::course::{Course, CourseStatus};
    use crate::domain::foundation::{CourseCode, StudentId};
    use crate::domain::student::Student;

    pub fn sid(s: &str) -> StudentId {
        StudentId::new(s).unwrap()
    }

    pub fn code(s: &str) -> CourseCode {
        CourseCode::new(s).unwrap()
    }

    /// Seeded registrar with students S1..S12 and a capturing bus.
    pub fn fixture() -> (Registrar, Arc<InMemoryEventBus>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let registrar = Registrar::with_lottery_seed(bus.clone(), 17);
        for i in 1..=12 {
            let id = format!("S{}", i);
            registrar
                .add_student(Student::new(sid(&id), format!("Student {}", id)))
                .unwrap();
        }
        (registrar, bus)
    }

    pub fn course(r: &Registrar, c: &str, capacity: i64, status: CourseStatus) {
        r.add_course(Course::new(code(c), format!("Course {}", c), capacity, status))
            .unwrap();
    }

    pub fn register(s: &str, c: &str) -> RegisterStudentCommand {
        RegisterStudentCommand {
            student_id: sid(s),
            course_code: code(c),
        }
    }

    pub fn waitlist(s: &str, c: &str) -> WaitlistStudentCommand {
        WaitlistStudentCommand {
            student_id: sid(s),
            course_code: code(c),
        }
    }

    pub fn unregister(s: &str, c: &str) -> UnregisterStudentCommand {
        UnregisterStudentCommand {
            student_id: sid(s),
            course_code: code(c),
        }
    }

    pub fn capacity(c: &str, capacity: i64) -> SetCourseCapacityCommand {
        SetCourseCapacityCommand {
            course_code: code(c),
            capacity,
        }
    }

    pub fn status(c: &str, status: CourseStatus, capacity_increase: Option<i64>) -> SetCourseStatusCommand {
        SetCourseStatusCommand {
            course_code: code(c),
            status,
            capacity_increase,
        }
    }
}
