//! Directory records consumed by the assignment engine.
//!
//! # Responsibility
//! - Define the student/faculty shapes read from the directory.
//! - Normalize identifiers and departments before they reach storage.
//!
//! # Invariants
//! - `id` values are non-blank after trim.
//! - A blank department is stored as `None`, never as an empty string.
//! - Records are immutable for the duration of one assignment run.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Institution identifier for a student (enrollment id).
pub type StudentId = String;

/// Institution identifier for a faculty member (staff id).
pub type FacultyId = String;

/// Student record as provided by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    /// Owning department. `None` groups with faculty that also have none.
    pub department: Option<String>,
    /// Natural sort key used for deterministic ordering within a department.
    pub roll_number: String,
}

/// Faculty record as provided by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub department: Option<String>,
}

/// Validation errors for directory records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    /// Identifier is empty after trim.
    EmptyId,
    /// Student roll number is empty after trim.
    EmptyRollNumber(StudentId),
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "id must not be blank"),
            Self::EmptyRollNumber(id) => write!(f, "roll number must not be blank: {id}"),
        }
    }
}

impl Error for PersonValidationError {}

impl Student {
    /// Creates a normalized student record.
    pub fn new(
        id: impl Into<String>,
        department: Option<&str>,
        roll_number: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into().trim().to_string(),
            department: normalize_department(department),
            roll_number: roll_number.into().trim().to_string(),
        }
    }

    /// Validates identifier and sort-key invariants.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.id.trim().is_empty() {
            return Err(PersonValidationError::EmptyId);
        }
        if self.roll_number.trim().is_empty() {
            return Err(PersonValidationError::EmptyRollNumber(self.id.clone()));
        }
        Ok(())
    }
}

impl Faculty {
    /// Creates a normalized faculty record.
    pub fn new(id: impl Into<String>, department: Option<&str>) -> Self {
        Self {
            id: id.into().trim().to_string(),
            department: normalize_department(department),
        }
    }

    /// Validates identifier invariants.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.id.trim().is_empty() {
            return Err(PersonValidationError::EmptyId);
        }
        Ok(())
    }
}

/// Trims a department name and maps blank values to `None`.
pub fn normalize_department(department: Option<&str>) -> Option<String> {
    department
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::{normalize_department, Faculty, PersonValidationError, Student};

    #[test]
    fn blank_department_normalizes_to_none() {
        assert_eq!(normalize_department(Some("   ")), None);
        assert_eq!(normalize_department(None), None);
        assert_eq!(normalize_department(Some(" CS ")).as_deref(), Some("CS"));
    }

    #[test]
    fn student_validation_rejects_blank_roll_number() {
        let student = Student::new("s-1", Some("CS"), "  ");
        assert_eq!(
            student.validate(),
            Err(PersonValidationError::EmptyRollNumber("s-1".to_string()))
        );
    }

    #[test]
    fn faculty_validation_rejects_blank_id() {
        let faculty = Faculty::new(" ", Some("CS"));
        assert_eq!(faculty.validate(), Err(PersonValidationError::EmptyId));
    }
}
