//! Course Registrar - course registration with waitlist admission control
//!
//! A course moves through a lifecycle (draft, open, full, closed, cancelled)
//! that decides whether students may enroll or queue. The [`Registrar`]
//! keeps courses and students consistent, refills dropped seats from the
//! waitlist in order, and runs a lottery among waitlisted students when a
//! full course is closed.
//!
//! [`Registrar`]: application::Registrar

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
