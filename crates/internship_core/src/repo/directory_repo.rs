//! Directory repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Serve student/faculty records to the assignment engine.
//! - Filter students by department and by "already assigned" status.
//! - Provide seeding writes for directory records.
//!
//! # Invariants
//! - Global listings are explicitly ordered (`department, roll_number, id`
//!   for students; `department, id` for faculty).
//! - Department-scoped listings return directory insertion order.
//! - `NULL` departments compare equal to each other (`IS` semantics).

use crate::model::assignment::AssignmentVariant;
use crate::model::person::{Faculty, Student};
use crate::repo::pairing_repo::assignment_table;
use crate::repo::{ensure_tables, RepoResult};
use rusqlite::{params, Connection, Row};

const STUDENT_COLUMNS: &str = "s.id AS id, s.department AS department, s.roll_number AS roll_number";

/// Read contract of the directory service, plus seeding writes.
pub trait DirectoryRepository {
    /// Inserts or replaces one student record.
    fn upsert_student(&self, student: &Student) -> RepoResult<()>;
    /// Inserts or replaces one faculty record.
    fn upsert_faculty(&self, faculty: &Faculty) -> RepoResult<()>;
    /// Students lacking an assignment of `variant`.
    fn list_unassigned_students(&self, variant: AssignmentVariant) -> RepoResult<Vec<Student>>;
    /// All faculty members.
    fn list_faculty(&self) -> RepoResult<Vec<Faculty>>;
    /// All students of one department, in directory order.
    fn list_students_in_department(&self, department: Option<&str>) -> RepoResult<Vec<Student>>;
    /// All faculty of one department, in directory order.
    fn list_faculty_in_department(&self, department: Option<&str>) -> RepoResult<Vec<Faculty>>;
    /// Number of students lacking an assignment of `variant`.
    fn count_unassigned_students(&self, variant: AssignmentVariant) -> RepoResult<usize>;
}

/// SQLite-backed directory repository.
pub struct SqliteDirectoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDirectoryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_tables(conn, &["students", "faculty"])?;
        Ok(Self { conn })
    }
}

impl DirectoryRepository for SqliteDirectoryRepository<'_> {
    fn upsert_student(&self, student: &Student) -> RepoResult<()> {
        student.validate()?;
        self.conn.execute(
            "INSERT INTO students (id, department, roll_number)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                department = excluded.department,
                roll_number = excluded.roll_number;",
            params![
                student.id.as_str(),
                student.department.as_deref(),
                student.roll_number.as_str(),
            ],
        )?;
        Ok(())
    }

    fn upsert_faculty(&self, faculty: &Faculty) -> RepoResult<()> {
        faculty.validate()?;
        self.conn.execute(
            "INSERT INTO faculty (id, department)
             VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET department = excluded.department;",
            params![faculty.id.as_str(), faculty.department.as_deref()],
        )?;
        Ok(())
    }

    fn list_unassigned_students(&self, variant: AssignmentVariant) -> RepoResult<Vec<Student>> {
        let table = assignment_table(variant);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {STUDENT_COLUMNS}
             FROM students s
             WHERE NOT EXISTS (
                SELECT 1 FROM {table} a WHERE a.student_id = s.id
             )
             ORDER BY s.department ASC, s.roll_number ASC, s.id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }

    fn list_faculty(&self) -> RepoResult<Vec<Faculty>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, department
             FROM faculty
             ORDER BY department ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut faculty = Vec::new();
        while let Some(row) = rows.next()? {
            faculty.push(parse_faculty_row(row)?);
        }
        Ok(faculty)
    }

    fn list_students_in_department(&self, department: Option<&str>) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {STUDENT_COLUMNS}
             FROM students s
             WHERE s.department IS ?1
             ORDER BY s.rowid ASC;"
        ))?;
        let mut rows = stmt.query([department])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }
        Ok(students)
    }

    fn list_faculty_in_department(&self, department: Option<&str>) -> RepoResult<Vec<Faculty>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, department
             FROM faculty
             WHERE department IS ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([department])?;
        let mut faculty = Vec::new();
        while let Some(row) = rows.next()? {
            faculty.push(parse_faculty_row(row)?);
        }
        Ok(faculty)
    }

    fn count_unassigned_students(&self, variant: AssignmentVariant) -> RepoResult<usize> {
        let table = assignment_table(variant);
        let count: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(*)
                 FROM students s
                 WHERE NOT EXISTS (
                    SELECT 1 FROM {table} a WHERE a.student_id = s.id
                 );"
            ),
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let student = Student {
        id: row.get("id")?,
        department: row.get("department")?,
        roll_number: row.get("roll_number")?,
    };
    student.validate()?;
    Ok(student)
}

fn parse_faculty_row(row: &Row<'_>) -> RepoResult<Faculty> {
    let faculty = Faculty {
        id: row.get("id")?,
        department: row.get("department")?,
    };
    faculty.validate()?;
    Ok(faculty)
}
