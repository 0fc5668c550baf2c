//! Pairing store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist mentor/evaluator pairings, one table per variant.
//! - Answer batched "already assigned" lookups for caller-side guards.
//! - Provide the administrative bulk reset.
//!
//! # Invariants
//! - Each variant table holds at most one row per student (`UNIQUE`).
//! - `insert_assignments` is all-or-nothing: one `IMMEDIATE` transaction per
//!   batch, rolled back on any failure.

use crate::model::assignment::{AssignmentRecord, AssignmentVariant, FacultyLoad, Pairing};
use crate::model::person::StudentId;
use crate::repo::{ensure_tables, is_unique_violation, RepoError, RepoResult};
use log::warn;
use rusqlite::{params, params_from_iter, Connection, Transaction, TransactionBehavior};
use uuid::Uuid;

/// Upper bound on bound parameters per `IN (...)` lookup.
const EXISTS_CHUNK_SIZE: usize = 500;

/// Write/read contract of the pairing store.
pub trait PairingStore {
    /// Returns whether any of `student_ids` already has a `variant` assignment.
    fn exists_assignment_for_any(
        &self,
        student_ids: &[StudentId],
        variant: AssignmentVariant,
    ) -> RepoResult<bool>;
    /// Inserts the whole batch atomically and returns the inserted row count.
    fn insert_assignments(&self, variant: AssignmentVariant, pairs: &[Pairing])
        -> RepoResult<usize>;
    /// Deletes every `variant` assignment and returns the deleted row count.
    fn delete_all_assignments(&self, variant: AssignmentVariant) -> RepoResult<usize>;
    /// Lists persisted rows ordered by faculty then student.
    fn list_assignments(&self, variant: AssignmentVariant) -> RepoResult<Vec<AssignmentRecord>>;
    /// Per-faculty assigned counts, including faculty with none.
    fn faculty_load(&self, variant: AssignmentVariant) -> RepoResult<Vec<FacultyLoad>>;
}

/// SQLite-backed pairing store.
pub struct SqlitePairingStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePairingStore<'conn> {
    /// Constructs a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(
            conn,
            &[
                "faculty",
                assignment_table(AssignmentVariant::Mentor),
                assignment_table(AssignmentVariant::Evaluator),
            ],
        )?;
        Ok(Self { conn })
    }
}

impl PairingStore for SqlitePairingStore<'_> {
    fn exists_assignment_for_any(
        &self,
        student_ids: &[StudentId],
        variant: AssignmentVariant,
    ) -> RepoResult<bool> {
        let table = assignment_table(variant);
        for chunk in student_ids.chunks(EXISTS_CHUNK_SIZE) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let exists: i64 = self.conn.query_row(
                &format!(
                    "SELECT EXISTS(
                        SELECT 1 FROM {table} WHERE student_id IN ({placeholders})
                    );"
                ),
                params_from_iter(chunk.iter()),
                |row| row.get(0),
            )?;
            if exists == 1 {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn insert_assignments(
        &self,
        variant: AssignmentVariant,
        pairs: &[Pairing],
    ) -> RepoResult<usize> {
        if pairs.is_empty() {
            return Ok(0);
        }

        let table = assignment_table(variant);
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {table} (uuid, student_id, faculty_id) VALUES (?1, ?2, ?3);"
            ))?;
            for pair in pairs {
                let inserted = stmt.execute(params![
                    Uuid::new_v4().to_string(),
                    pair.student_id.as_str(),
                    pair.faculty_id.as_str(),
                ]);
                match inserted {
                    Ok(_) => {}
                    Err(err) if is_unique_violation(&err) => {
                        warn!(
                            "event=pairing_insert module=repo status=error variant={} error_code=duplicate_assignment student_id={}",
                            variant, pair.student_id
                        );
                        return Err(RepoError::DuplicateAssignment);
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }
        tx.commit()?;

        Ok(pairs.len())
    }

    fn delete_all_assignments(&self, variant: AssignmentVariant) -> RepoResult<usize> {
        let table = assignment_table(variant);
        let deleted = self.conn.execute(&format!("DELETE FROM {table};"), [])?;
        Ok(deleted)
    }

    fn list_assignments(&self, variant: AssignmentVariant) -> RepoResult<Vec<AssignmentRecord>> {
        let table = assignment_table(variant);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT uuid, student_id, faculty_id, created_at
             FROM {table}
             ORDER BY faculty_id ASC, student_id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
                RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in {table}.uuid"))
            })?;
            records.push(AssignmentRecord {
                uuid,
                variant,
                student_id: row.get("student_id")?,
                faculty_id: row.get("faculty_id")?,
                created_at: row.get("created_at")?,
            });
        }
        Ok(records)
    }

    fn faculty_load(&self, variant: AssignmentVariant) -> RepoResult<Vec<FacultyLoad>> {
        let table = assignment_table(variant);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT f.id AS id, f.department AS department, COUNT(a.student_id) AS assigned
             FROM faculty f
             LEFT JOIN {table} a ON a.faculty_id = f.id
             GROUP BY f.id, f.department
             ORDER BY f.department ASC, f.id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut loads = Vec::new();
        while let Some(row) = rows.next()? {
            let assigned: i64 = row.get("assigned")?;
            loads.push(FacultyLoad {
                faculty_id: row.get("id")?,
                department: row.get("department")?,
                assigned: usize::try_from(assigned).map_err(|_| {
                    RepoError::InvalidData(format!("negative assignment count {assigned}"))
                })?,
            });
        }
        Ok(loads)
    }
}

/// Maps an assignment variant to its backing table.
pub(crate) fn assignment_table(variant: AssignmentVariant) -> &'static str {
    match variant {
        AssignmentVariant::Mentor => "mentor_assignments",
        AssignmentVariant::Evaluator => "evaluator_assignments",
    }
}

#[cfg(test)]
mod tests {
    use super::assignment_table;
    use crate::model::assignment::AssignmentVariant;

    #[test]
    fn each_variant_has_its_own_table() {
        assert_ne!(
            assignment_table(AssignmentVariant::Mentor),
            assignment_table(AssignmentVariant::Evaluator)
        );
    }
}
