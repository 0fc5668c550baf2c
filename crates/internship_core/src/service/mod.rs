//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate directory reads, engine runs, and pairing-store writes.
//! - Keep CLI/HTTP callers decoupled from storage details.

pub mod assignment_service;
