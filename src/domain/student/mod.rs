//! Student domain module.

mod aggregate;

pub use aggregate::Student;
