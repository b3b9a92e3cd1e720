//! Repository layer — entity-scoped database operations.
//!
//! Every function borrows the caller's connection. Column lists are exported
//! with fixed table aliases (`h`, `d`, `p`, `w`, `pt`, `e`) so the census
//! queries can join on them and reuse the row mappers.

mod examination;
mod hospital;
mod person;
mod staff;

use chrono::{Datelike, NaiveDateTime};
use rusqlite::{params, Connection};

use super::DatabaseError;

pub use examination::*;
pub use hospital::*;
pub use person::*;
pub use staff::*;

/// Storage format for examination timestamps. Fixed width down to the
/// nanosecond, so lexical order is chronological.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";

/// Latest year `TIME_FORMAT` writes with four digits.
pub const MAX_YEAR: i32 = 9999;

pub(crate) fn format_time(time: &NaiveDateTime) -> Result<String, DatabaseError> {
    if !(0..=MAX_YEAR).contains(&time.year()) {
        tracing::warn!(%time, "Rejected out-of-range timestamp");
        return Err(DatabaseError::ConstraintViolation(format!(
            "timestamp year must be within 0..={MAX_YEAR}, got {}",
            time.year()
        )));
    }
    Ok(time.format(TIME_FORMAT).to_string())
}

pub(crate) fn parse_time(raw: &str) -> Result<NaiveDateTime, DatabaseError> {
    // `%.f` also accepts rows written without a fraction.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad timestamp {raw:?}: {e}")))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DatabaseError> {
    if value.trim().is_empty() {
        tracing::warn!(field, "Rejected blank value");
        return Err(DatabaseError::ConstraintViolation(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}

/// Delete one row by id; cascades are left to the foreign keys.
fn delete_by_id(
    conn: &Connection,
    table: &'static str,
    entity_type: &str,
    id: i64,
) -> Result<(), DatabaseError> {
    let affected = conn.execute(&format!("DELETE FROM {table} WHERE id = ?1"), params![id])?;
    if affected == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: entity_type.into(),
            id,
        });
    }
    tracing::debug!(table, id, "Deleted row");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use crate::models::enums::*;
    use chrono::NaiveDate;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 4, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn hospital_insert_and_retrieve() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        let fetched = get_hospital(&conn, hospital.id).unwrap().unwrap();
        assert_eq!(fetched, hospital);
        assert_eq!(fetched.city, "Jerusalem");
    }

    #[test]
    fn blank_name_rejected() {
        let conn = test_db();
        let err = insert_hospital(&conn, "  ", "Jerusalem").unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
        let err = insert_person(&conn, "", 30, Gender::Male).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
    }

    #[test]
    fn dangling_department_reference_fails() {
        let conn = test_db();
        let err = insert_department(&conn, "Critical Care", 999).unwrap_err();
        assert!(matches!(err, DatabaseError::Sqlite(_)));
    }

    #[test]
    fn unknown_enum_in_storage_is_reported() {
        let conn = test_db();
        // Bypass the CHECK constraint to simulate a corrupted row.
        conn.execute_batch(
            "PRAGMA ignore_check_constraints = ON;
             INSERT INTO persons (name, age, gender) VALUES ('Ghost', 40, 'Robot');",
        )
        .unwrap();
        let err = list_persons(&conn).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }

    #[test]
    fn check_constraint_guards_enum_columns() {
        let conn = test_db();
        let result = conn.execute(
            "INSERT INTO persons (name, age, gender) VALUES ('Ghost', 40, 'Robot')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn person_with_many_roles() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        let department = insert_department(&conn, "Critical Care", hospital.id).unwrap();
        let ron = insert_person(&conn, "Ron", 60, Gender::Male).unwrap();
        insert_hospital_worker(&conn, ron.id, department.id, Position::Doctor).unwrap();
        insert_hospital_worker(&conn, ron.id, department.id, Position::Nurse).unwrap();
        insert_patient(&conn, ron.id, department.id).unwrap();

        let jobs = get_jobs_of_person(&conn, ron.id).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].position, Position::Nurse);
        assert_eq!(list_patients(&conn).unwrap().len(), 1);
    }

    #[test]
    fn examination_history_newest_first() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        let department = insert_department(&conn, "Critical Care", hospital.id).unwrap();
        let doctor = insert_person(&conn, "Ron", 60, Gender::Male).unwrap();
        let worker = insert_hospital_worker(&conn, doctor.id, department.id, Position::Doctor).unwrap();
        let lea = insert_person(&conn, "Lea", 90, Gender::Female).unwrap();
        let patient = insert_patient(&conn, lea.id, department.id).unwrap();

        assert_eq!(get_latest_result(&conn, patient.id).unwrap(), None);

        // Inserted out of order on purpose.
        insert_examination_result(&conn, patient.id, worker.id, at(28, 18, 1), ExamResult::Dead).unwrap();
        insert_examination_result(&conn, patient.id, worker.id, at(26, 18, 1), ExamResult::Corona).unwrap();
        insert_examination_result(&conn, patient.id, worker.id, at(27, 18, 1), ExamResult::Corona).unwrap();

        let history = get_examination_history(&conn, patient.id).unwrap();
        let results: Vec<_> = history.iter().map(|e| e.result).collect();
        assert_eq!(results, vec![ExamResult::Dead, ExamResult::Corona, ExamResult::Corona]);
        assert_eq!(history[0].time, at(28, 18, 1));
        assert_eq!(get_latest_result(&conn, patient.id).unwrap(), Some(ExamResult::Dead));
    }

    #[test]
    fn same_timestamp_latest_insert_wins() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        let department = insert_department(&conn, "Critical Care", hospital.id).unwrap();
        let person = insert_person(&conn, "Dana", 25, Gender::Female).unwrap();
        let worker = insert_hospital_worker(&conn, person.id, department.id, Position::Doctor).unwrap();
        let patient = insert_patient(&conn, person.id, department.id).unwrap();

        insert_examination_result(&conn, patient.id, worker.id, at(1, 9, 0), ExamResult::Corona).unwrap();
        insert_examination_result(&conn, patient.id, worker.id, at(1, 9, 0), ExamResult::Healthy).unwrap();

        assert_eq!(get_latest_result(&conn, patient.id).unwrap(), Some(ExamResult::Healthy));
    }

    #[test]
    fn sub_second_order_decides_latest() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        let department = insert_department(&conn, "Critical Care", hospital.id).unwrap();
        let doctor = insert_person(&conn, "Ron", 60, Gender::Male).unwrap();
        let worker = insert_hospital_worker(&conn, doctor.id, department.id, Position::Doctor).unwrap();
        let lea = insert_person(&conn, "Lea", 90, Gender::Female).unwrap();
        let patient = insert_patient(&conn, lea.id, department.id).unwrap();

        let second = at(28, 18, 1);
        let late = second + chrono::Duration::milliseconds(900);
        let early = second + chrono::Duration::milliseconds(100);
        // Later exam inserted first.
        let dead = insert_examination_result(&conn, patient.id, worker.id, late, ExamResult::Dead).unwrap();
        insert_examination_result(&conn, patient.id, worker.id, early, ExamResult::Corona).unwrap();

        let fetched = get_examination_result(&conn, dead.id).unwrap().unwrap();
        assert_eq!(fetched.time, dead.time);
        assert_eq!(get_latest_result(&conn, patient.id).unwrap(), Some(ExamResult::Dead));
        let history = get_examination_history(&conn, patient.id).unwrap();
        assert_eq!(history[0].time, late);
        assert_eq!(history[1].time, early);
    }

    #[test]
    fn nanoseconds_survive_storage() {
        let time = at(1, 9, 0) + chrono::Duration::nanoseconds(5);
        let raw = format_time(&time).unwrap();
        assert_eq!(raw, "2020-04-01 09:00:00.000000005");
        assert_eq!(parse_time(&raw).unwrap(), time);
        assert_eq!(parse_time("2020-04-01 09:00:00").unwrap(), at(1, 9, 0));
    }

    #[test]
    fn five_digit_year_rejected() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        let department = insert_department(&conn, "Critical Care", hospital.id).unwrap();
        let person = insert_person(&conn, "Dana", 25, Gender::Female).unwrap();
        let worker = insert_hospital_worker(&conn, person.id, department.id, Position::Doctor).unwrap();
        let patient = insert_patient(&conn, person.id, department.id).unwrap();

        let far = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let err = insert_examination_result(&conn, patient.id, worker.id, far, ExamResult::Healthy).unwrap_err();
        assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
        assert_eq!(count_examination_results(&conn).unwrap(), 0);
    }

    #[test]
    fn deleting_department_cascades() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        let department = insert_department(&conn, "Critical Care", hospital.id).unwrap();
        let other = insert_department(&conn, "Oncology", hospital.id).unwrap();
        let nurse = insert_person(&conn, "Abdul", 29, Gender::Male).unwrap();
        let worker = insert_hospital_worker(&conn, nurse.id, department.id, Position::Nurse).unwrap();
        let other_worker = insert_hospital_worker(&conn, nurse.id, other.id, Position::Nurse).unwrap();
        let sick = insert_person(&conn, "Daniel", 3, Gender::Male).unwrap();
        let patient = insert_patient(&conn, sick.id, department.id).unwrap();
        let exam = insert_examination_result(&conn, patient.id, worker.id, at(26, 15, 15), ExamResult::Botism).unwrap();

        delete_department(&conn, department.id).unwrap();

        assert!(get_department(&conn, department.id).unwrap().is_none());
        assert!(get_patient(&conn, patient.id).unwrap().is_none());
        assert!(get_hospital_worker(&conn, worker.id).unwrap().is_none());
        assert!(get_examination_result(&conn, exam.id).unwrap().is_none());
        // Persons are not owned by departments.
        assert!(get_person(&conn, sick.id).unwrap().is_some());
        assert!(get_hospital_worker(&conn, other_worker.id).unwrap().is_some());
    }

    #[test]
    fn deleting_hospital_cascades_to_departments() {
        let conn = test_db();
        let hospital = insert_hospital(&conn, "Hadassah", "Jerusalem").unwrap();
        insert_department(&conn, "Critical Care", hospital.id).unwrap();
        delete_hospital(&conn, hospital.id).unwrap();
        assert!(list_departments(&conn).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let conn = test_db();
        let err = delete_person(&conn, 42).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { id: 42, .. }));
    }
}
