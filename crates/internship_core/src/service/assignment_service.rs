//! Mentor/evaluator assignment use-case service.
//!
//! # Responsibility
//! - Read eligible students and faculty from the directory.
//! - Run the distribution engine with the policy of the requested scope.
//! - Persist the resulting batch in one pairing-store call.
//!
//! # Invariants
//! - No eligible students means no write and an `allAssigned` outcome.
//! - Departments without faculty are logged and skipped, never fatal.
//! - A store uniqueness violation is reported as `alreadyAssigned`; the
//!   batch is rolled back by the store.
//! - Store failures propagate to the caller unchanged.

use crate::engine::distribution::{distribute, distribute_department, DistributionPolicy};
use crate::model::assignment::{AssignmentOutcome, AssignmentRecord, AssignmentVariant, FacultyLoad};
use crate::model::person::StudentId;
use crate::repo::directory_repo::DirectoryRepository;
use crate::repo::pairing_repo::PairingStore;
use crate::repo::{RepoError, RepoResult};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Errors from assignment service operations.
///
/// Only store failures are errors; empty runs, coverage gaps and
/// pre-existing assignments are reported through [`AssignmentOutcome`].
#[derive(Debug)]
pub enum AssignmentServiceError {
    /// Directory or pairing-store failure.
    Repo(RepoError),
}

impl Display for AssignmentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AssignmentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for AssignmentServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Assignment service facade over directory and pairing-store implementations.
pub struct AssignmentService<D: DirectoryRepository, P: PairingStore> {
    directory: D,
    store: P,
}

impl<D: DirectoryRepository, P: PairingStore> AssignmentService<D, P> {
    /// Creates a service from directory and store implementations.
    pub fn new(directory: D, store: P) -> Self {
        Self { directory, store }
    }

    /// Assigns every student lacking a `variant` assignment, across all
    /// departments.
    ///
    /// # Contract
    /// - Students sorted by department, roll number, id; faculty by id.
    /// - The first `n % k` faculty of a department get the larger share.
    /// - One batch insert per run.
    pub fn run_assignment(
        &self,
        variant: AssignmentVariant,
    ) -> Result<AssignmentOutcome, AssignmentServiceError> {
        let started_at = Instant::now();
        info!("event=assignment_run module=service status=start variant={variant} scope=all");

        let students = self.directory.list_unassigned_students(variant)?;
        if students.is_empty() {
            info!(
                "event=assignment_run module=service status=ok variant={variant} scope=all all_assigned=true assigned=0"
            );
            return Ok(AssignmentOutcome::all_assigned(variant));
        }

        let faculty = self.directory.list_faculty()?;
        let plan = distribute(&students, &faculty, DistributionPolicy::GLOBAL);

        for allocation in &plan.allocations {
            debug!(
                "event=department_allocated module=service variant={variant} department={} students={} faculty={} base={} extra={}",
                department_label(allocation.department.as_deref()),
                allocation.student_count,
                allocation.faculty_count,
                allocation.base,
                allocation.extra
            );
        }
        for gap in &plan.skipped {
            warn!(
                "event=department_skipped module=service status=skip variant={variant} department={} students={} reason=no_faculty",
                department_label(gap.department.as_deref()),
                gap.student_count
            );
        }

        let inserted = match self.store.insert_assignments(variant, &plan.pairs) {
            Ok(count) => count,
            Err(RepoError::DuplicateAssignment) => {
                warn!(
                    "event=assignment_run module=service status=error variant={variant} scope=all error_code=already_assigned"
                );
                return Ok(AssignmentOutcome::already_assigned(variant, "all departments"));
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            "event=assignment_run module=service status=ok variant={variant} scope=all assigned={} unplaced={} duration_ms={}",
            inserted,
            plan.unplaced_count(),
            started_at.elapsed().as_millis()
        );
        Ok(AssignmentOutcome::assigned(variant, inserted))
    }

    /// Assigns all students of one department to that department's faculty.
    ///
    /// # Contract
    /// - Rejects with `alreadyAssigned` when any department student already
    ///   has a `variant` assignment; nothing is written.
    /// - Students and faculty are used in directory order.
    /// - The last `n % k` faculty get the larger share.
    pub fn run_assignment_for_department(
        &self,
        variant: AssignmentVariant,
        department: Option<&str>,
    ) -> Result<AssignmentOutcome, AssignmentServiceError> {
        let scope = format!("department {}", department_label(department));
        info!(
            "event=assignment_run module=service status=start variant={variant} scope=department department={}",
            department_label(department)
        );

        let students = self.directory.list_students_in_department(department)?;
        if students.is_empty() {
            return Ok(AssignmentOutcome::all_assigned(variant));
        }

        let student_ids: Vec<StudentId> = students.iter().map(|s| s.id.clone()).collect();
        if self.store.exists_assignment_for_any(&student_ids, variant)? {
            info!(
                "event=assignment_run module=service status=skip variant={variant} scope=department department={} already_assigned=true",
                department_label(department)
            );
            return Ok(AssignmentOutcome::already_assigned(variant, &scope));
        }

        let faculty = self.directory.list_faculty_in_department(department)?;
        if faculty.is_empty() {
            warn!(
                "event=department_skipped module=service status=skip variant={variant} department={} students={} reason=no_faculty",
                department_label(department),
                students.len()
            );
            return Ok(AssignmentOutcome::no_faculty(variant, &scope));
        }

        let pairs = distribute_department(&students, &faculty, DistributionPolicy::DEPARTMENT_SCOPED);
        let inserted = match self.store.insert_assignments(variant, &pairs) {
            Ok(count) => count,
            Err(RepoError::DuplicateAssignment) => {
                return Ok(AssignmentOutcome::already_assigned(variant, &scope));
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            "event=assignment_run module=service status=ok variant={variant} scope=department department={} assigned={}",
            department_label(department),
            inserted
        );
        Ok(AssignmentOutcome::assigned(variant, inserted))
    }

    /// Deletes every `variant` assignment so a new run can take place.
    pub fn reset_assignments(&self, variant: AssignmentVariant) -> RepoResult<usize> {
        let deleted = self.store.delete_all_assignments(variant)?;
        info!("event=assignment_reset module=service status=ok variant={variant} deleted={deleted}");
        Ok(deleted)
    }

    /// Counts students still lacking a `variant` assignment.
    pub fn unassigned_count(&self, variant: AssignmentVariant) -> RepoResult<usize> {
        self.directory.count_unassigned_students(variant)
    }

    /// Lists per-faculty assigned counts.
    pub fn faculty_load(&self, variant: AssignmentVariant) -> RepoResult<Vec<FacultyLoad>> {
        self.store.faculty_load(variant)
    }

    /// Lists persisted `variant` assignments.
    pub fn list_assignments(
        &self,
        variant: AssignmentVariant,
    ) -> RepoResult<Vec<AssignmentRecord>> {
        self.store.list_assignments(variant)
    }
}

fn department_label(department: Option<&str>) -> &str {
    department.unwrap_or("<none>")
}
