#![allow(dead_code)]

use internship_core::{DirectoryRepository, Faculty, SqliteDirectoryRepository, Student};
use rusqlite::Connection;

/// Seeds `count` students `{prefix}1..` in `department` with zero-padded roll numbers.
pub fn seed_students(conn: &Connection, prefix: &str, department: Option<&str>, count: usize) {
    let directory = SqliteDirectoryRepository::try_new(conn).unwrap();
    for index in 1..=count {
        directory
            .upsert_student(&Student::new(
                format!("{prefix}{index}"),
                department,
                format!("{prefix}-{index:03}"),
            ))
            .unwrap();
    }
}

pub fn seed_faculty(conn: &Connection, department: Option<&str>, ids: &[&str]) {
    let directory = SqliteDirectoryRepository::try_new(conn).unwrap();
    for id in ids {
        directory
            .upsert_faculty(&Faculty::new(*id, department))
            .unwrap();
    }
}
