//! Assignment engine: pure allocation of students to faculty.
//!
//! # Responsibility
//! - Compute balanced pairings without touching storage.
//! - Expose the two legacy conventions as named policies.
//!
//! # Invariants
//! - No I/O and no logging; callers own persistence and diagnostics.

pub mod distribution;
