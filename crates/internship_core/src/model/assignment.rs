//! Assignment domain model.
//!
//! # Responsibility
//! - Name the relationship kinds the engine assigns (mentor, evaluator).
//! - Define pairing rows and the caller-facing run outcome.
//!
//! # Invariants
//! - At most one assignment per `(student, variant)`.
//! - Assignment rows are immutable once written; revocation is bulk delete.

use crate::model::person::{FacultyId, StudentId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Relationship kind being assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentVariant {
    /// Faculty mentor supervising the internship.
    Mentor,
    /// Faculty evaluator grading the internship.
    Evaluator,
}

impl AssignmentVariant {
    /// All variants in stable order.
    pub const ALL: [AssignmentVariant; 2] = [Self::Mentor, Self::Evaluator];

    /// Stable string id used in logs and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mentor => "mentor",
            Self::Evaluator => "evaluator",
        }
    }

    /// Parses a variant from its stable string id.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mentor" => Some(Self::Mentor),
            "evaluator" => Some(Self::Evaluator),
            _ => None,
        }
    }
}

impl Display for AssignmentVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One student-to-faculty pairing produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub student_id: StudentId,
    pub faculty_id: FacultyId,
}

impl Pairing {
    pub fn new(student_id: impl Into<String>, faculty_id: impl Into<String>) -> Self {
        Self {
            student_id: student_id.into(),
            faculty_id: faculty_id.into(),
        }
    }
}

/// Persisted assignment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Generated row id.
    pub uuid: Uuid,
    pub variant: AssignmentVariant,
    pub student_id: StudentId,
    pub faculty_id: FacultyId,
    /// Insert timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Assigned-student count for one faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyLoad {
    pub faculty_id: FacultyId,
    pub department: Option<String>,
    pub assigned: usize,
}

/// Caller-facing result of an assignment run.
///
/// Serialized as `{ success, allAssigned?, alreadyAssigned?, message,
/// assignedCount? }` for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_assigned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub already_assigned: Option<bool>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_count: Option<usize>,
}

impl AssignmentOutcome {
    /// Rows were written.
    pub fn assigned(variant: AssignmentVariant, count: usize) -> Self {
        Self {
            success: true,
            all_assigned: None,
            already_assigned: None,
            message: format!("{variant}s assigned successfully to {count} students"),
            assigned_count: Some(count),
        }
    }

    /// No eligible students; nothing written.
    pub fn all_assigned(variant: AssignmentVariant) -> Self {
        Self {
            success: true,
            all_assigned: Some(true),
            already_assigned: None,
            message: format!("all students already have {variant}s assigned"),
            assigned_count: Some(0),
        }
    }

    /// Eligible students exist but the scope has no faculty; nothing written.
    pub fn no_faculty(variant: AssignmentVariant, scope: &str) -> Self {
        Self {
            success: true,
            all_assigned: None,
            already_assigned: None,
            message: format!("no faculty available to assign {variant}s for {scope}"),
            assigned_count: Some(0),
        }
    }

    /// Pre-existing assignment detected; nothing written.
    pub fn already_assigned(variant: AssignmentVariant, scope: &str) -> Self {
        Self {
            success: false,
            all_assigned: None,
            already_assigned: Some(true),
            message: format!("{variant}s are already assigned for {scope}"),
            assigned_count: None,
        }
    }
}
