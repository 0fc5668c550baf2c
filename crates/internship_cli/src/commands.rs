//! Subcommand implementations.
//!
//! Every command prints one JSON document to stdout.

use anyhow::{Context, Result};
use internship_core::{
    AssignmentService, AssignmentVariant, DirectoryRepository, Faculty, FacultyLoad,
    SqliteDirectoryRepository, SqlitePairingStore, Student,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Directory export accepted by `seed`.
#[derive(Debug, Deserialize)]
pub struct DirectoryExport {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub faculty: Vec<Faculty>,
}

#[derive(Debug, Serialize)]
struct SeedSummary {
    students: usize,
    faculty: usize,
}

#[derive(Debug, Serialize)]
struct VariantStatus {
    variant: AssignmentVariant,
    unassigned: usize,
    load: Vec<FacultyLoad>,
}

pub fn run_seed(conn: &Connection, file: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read `{}`", file.display()))?;
    let export: DirectoryExport = serde_json::from_str(&raw)
        .with_context(|| format!("invalid directory export `{}`", file.display()))?;

    let tx = conn.unchecked_transaction()?;
    {
        let directory = SqliteDirectoryRepository::try_new(&tx)?;
        for member in &export.faculty {
            directory.upsert_faculty(&Faculty::new(member.id.as_str(), member.department.as_deref()))?;
        }
        for student in &export.students {
            directory.upsert_student(&Student::new(
                student.id.as_str(),
                student.department.as_deref(),
                student.roll_number.as_str(),
            ))?;
        }
    }
    tx.commit()?;

    Ok(serde_json::to_value(SeedSummary {
        students: export.students.len(),
        faculty: export.faculty.len(),
    })?)
}

pub fn run_assign(conn: &Connection, variant: AssignmentVariant) -> Result<Value> {
    let outcome = service(conn)?.run_assignment(variant)?;
    Ok(serde_json::to_value(outcome)?)
}

pub fn run_assign_department(
    conn: &Connection,
    variant: AssignmentVariant,
    department: Option<&str>,
) -> Result<Value> {
    let outcome = service(conn)?.run_assignment_for_department(variant, department)?;
    Ok(serde_json::to_value(outcome)?)
}

pub fn run_reset(conn: &Connection, variant: AssignmentVariant) -> Result<Value> {
    let deleted = service(conn)?.reset_assignments(variant)?;
    Ok(serde_json::json!({ "variant": variant, "deleted": deleted }))
}

pub fn run_status(conn: &Connection, variant: Option<AssignmentVariant>) -> Result<Value> {
    let service = service(conn)?;
    let variants = match variant {
        Some(variant) => vec![variant],
        None => AssignmentVariant::ALL.to_vec(),
    };

    let mut statuses = Vec::with_capacity(variants.len());
    for variant in variants {
        statuses.push(VariantStatus {
            variant,
            unassigned: service.unassigned_count(variant)?,
            load: service.faculty_load(variant)?,
        });
    }
    Ok(serde_json::to_value(statuses)?)
}

fn service(
    conn: &Connection,
) -> Result<AssignmentService<SqliteDirectoryRepository<'_>, SqlitePairingStore<'_>>> {
    Ok(AssignmentService::new(
        SqliteDirectoryRepository::try_new(conn)?,
        SqlitePairingStore::try_new(conn)?,
    ))
}
