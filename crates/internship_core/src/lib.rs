//! Mentor/evaluator assignment core for the internship portal.
//! This crate owns the allocation rules and the storage contracts they need.

pub mod db;
pub mod engine;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use engine::distribution::{
    distribute, distribute_department, share_sizes, DepartmentAllocation, DistributionPlan,
    DistributionPolicy, ExtraShare, FacultyOrder, SkippedDepartment, StudentOrder,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::assignment::{
    AssignmentOutcome, AssignmentRecord, AssignmentVariant, FacultyLoad, Pairing,
};
pub use model::person::{Faculty, FacultyId, PersonValidationError, Student, StudentId};
pub use repo::directory_repo::{DirectoryRepository, SqliteDirectoryRepository};
pub use repo::pairing_repo::{PairingStore, SqlitePairingStore};
pub use repo::{RepoError, RepoResult};
pub use service::assignment_service::{AssignmentService, AssignmentServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
