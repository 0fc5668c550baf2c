mod common;

use common::{seed_faculty, seed_students};
use internship_core::db::open_db_in_memory;
use internship_core::{
    AssignmentVariant, DirectoryRepository, Pairing, PairingStore, PersonValidationError,
    RepoError, SqliteDirectoryRepository, SqlitePairingStore, Student,
};
use rusqlite::Connection;

#[test]
fn unassigned_students_are_ordered_by_department_then_roll_number() {
    let conn = open_db_in_memory().unwrap();
    let directory = SqliteDirectoryRepository::try_new(&conn).unwrap();
    directory
        .upsert_student(&Student::new("s-3", Some("EE"), "001"))
        .unwrap();
    directory
        .upsert_student(&Student::new("s-2", Some("CS"), "010"))
        .unwrap();
    directory
        .upsert_student(&Student::new("s-1", Some("CS"), "002"))
        .unwrap();

    let students = directory
        .list_unassigned_students(AssignmentVariant::Mentor)
        .unwrap();
    let ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s-1", "s-2", "s-3"]);
}

#[test]
fn unassigned_listing_is_per_variant() {
    let conn = open_db_in_memory().unwrap();
    seed_students(&conn, "S", Some("CS"), 2);
    seed_faculty(&conn, Some("CS"), &["F1"]);
    let store = SqlitePairingStore::try_new(&conn).unwrap();
    store
        .insert_assignments(AssignmentVariant::Mentor, &[Pairing::new("S1", "F1")])
        .unwrap();

    let directory = SqliteDirectoryRepository::try_new(&conn).unwrap();
    assert_eq!(
        directory
            .count_unassigned_students(AssignmentVariant::Mentor)
            .unwrap(),
        1
    );
    assert_eq!(
        directory
            .count_unassigned_students(AssignmentVariant::Evaluator)
            .unwrap(),
        2
    );
    let remaining = directory
        .list_unassigned_students(AssignmentVariant::Mentor)
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, "S2");
}

#[test]
fn department_listings_keep_directory_order_and_match_missing_department() {
    let conn = open_db_in_memory().unwrap();
    seed_faculty(&conn, Some("CS"), &["F9", "F1"]);
    seed_faculty(&conn, None, &["F0"]);
    let directory = SqliteDirectoryRepository::try_new(&conn).unwrap();
    directory
        .upsert_student(&Student::new("z", Some("CS"), "001"))
        .unwrap();
    directory
        .upsert_student(&Student::new("a", Some("CS"), "002"))
        .unwrap();
    directory
        .upsert_student(&Student::new("n", None, "003"))
        .unwrap();

    let cs_faculty = directory.list_faculty_in_department(Some("CS")).unwrap();
    let ids: Vec<&str> = cs_faculty.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["F9", "F1"]);

    let cs_students = directory.list_students_in_department(Some("CS")).unwrap();
    let ids: Vec<&str> = cs_students.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["z", "a"]);

    let orphans = directory.list_students_in_department(None).unwrap();
    assert_eq!(orphans.len(), 1);
    assert_eq!(orphans[0].id, "n");
    assert_eq!(directory.list_faculty_in_department(None).unwrap()[0].id, "F0");
}

#[test]
fn upsert_student_updates_existing_record() {
    let conn = open_db_in_memory().unwrap();
    let directory = SqliteDirectoryRepository::try_new(&conn).unwrap();
    directory
        .upsert_student(&Student::new("s-1", Some("CS"), "001"))
        .unwrap();
    directory
        .upsert_student(&Student::new("s-1", Some("ME"), "042"))
        .unwrap();

    let students = directory.list_students_in_department(Some("ME")).unwrap();
    assert_eq!(students, vec![Student::new("s-1", Some("ME"), "042")]);
    assert!(directory
        .list_students_in_department(Some("CS"))
        .unwrap()
        .is_empty());
}

#[test]
fn upsert_rejects_invalid_records() {
    let conn = open_db_in_memory().unwrap();
    let directory = SqliteDirectoryRepository::try_new(&conn).unwrap();
    let err = directory
        .upsert_student(&Student::new("s-1", Some("CS"), " "))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(PersonValidationError::EmptyRollNumber(_))
    ));
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteDirectoryRepository::try_new(&conn)
        .err()
        .expect("unmigrated connection should be rejected");
    assert!(matches!(err, RepoError::MissingRequiredTable("students")));
}
