//! Domain model for internship mentor/evaluator assignment.
//!
//! # Responsibility
//! - Define directory records (students, faculty) and assignment rows.
//! - Keep one variant-tagged shape for mentor and evaluator pairings.
//!
//! # Invariants
//! - Students and faculty are read-only inputs to assignment.
//! - Assignment rows are created only by an assignment run.

pub mod assignment;
pub mod person;
