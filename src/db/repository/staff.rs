use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use super::delete_by_id;
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

pub const WORKER_COLUMNS: &str = "w.id, w.person_id, w.department_id, w.position";
pub const PATIENT_COLUMNS: &str = "pt.id, pt.person_id, pt.department_id";

// Internal row type for HospitalWorker mapping
pub(crate) struct WorkerRow {
    id: i64,
    person_id: i64,
    department_id: i64,
    position: String,
}

pub(crate) fn worker_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<WorkerRow, rusqlite::Error> {
    Ok(WorkerRow {
        id: row.get(0)?,
        person_id: row.get(1)?,
        department_id: row.get(2)?,
        position: row.get(3)?,
    })
}

pub(crate) fn worker_from_row(row: WorkerRow) -> Result<HospitalWorker, DatabaseError> {
    Ok(HospitalWorker {
        id: row.id,
        person_id: row.person_id,
        department_id: row.department_id,
        position: Position::from_str(&row.position)?,
    })
}

pub(crate) fn patient_from_row(row: &rusqlite::Row<'_>) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: row.get(0)?,
        person_id: row.get(1)?,
        department_id: row.get(2)?,
    })
}

/// Run a worker query whose select list starts with `WORKER_COLUMNS`.
pub(crate) fn query_workers(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<HospitalWorker>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, worker_row_from_rusqlite)?;

    let mut workers = Vec::new();
    for row in rows {
        workers.push(worker_from_row(row?)?);
    }
    Ok(workers)
}

/// Run a patient query whose select list starts with `PATIENT_COLUMNS`.
pub(crate) fn query_patients(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn insert_hospital_worker(
    conn: &Connection,
    person_id: i64,
    department_id: i64,
    position: Position,
) -> Result<HospitalWorker, DatabaseError> {
    conn.execute(
        "INSERT INTO hospital_workers (person_id, department_id, position) VALUES (?1, ?2, ?3)",
        params![person_id, department_id, position.as_str()],
    )?;
    Ok(HospitalWorker {
        id: conn.last_insert_rowid(),
        person_id,
        department_id,
        position,
    })
}

pub fn get_hospital_worker(conn: &Connection, id: i64) -> Result<Option<HospitalWorker>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {WORKER_COLUMNS} FROM hospital_workers w WHERE w.id = ?1"),
            params![id],
            worker_row_from_rusqlite,
        )
        .optional()?;
    row.map(worker_from_row).transpose()
}

pub fn list_hospital_workers(conn: &Connection) -> Result<Vec<HospitalWorker>, DatabaseError> {
    query_workers(
        conn,
        &format!("SELECT {WORKER_COLUMNS} FROM hospital_workers w ORDER BY w.id"),
        &[],
    )
}

/// All staff roles held by one person, oldest first.
pub fn get_jobs_of_person(conn: &Connection, person_id: i64) -> Result<Vec<HospitalWorker>, DatabaseError> {
    query_workers(
        conn,
        &format!("SELECT {WORKER_COLUMNS} FROM hospital_workers w WHERE w.person_id = ?1 ORDER BY w.id"),
        &[&person_id],
    )
}

pub fn delete_hospital_worker(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    delete_by_id(conn, "hospital_workers", "hospital_worker", id)
}

pub fn insert_patient(
    conn: &Connection,
    person_id: i64,
    department_id: i64,
) -> Result<Patient, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (person_id, department_id) VALUES (?1, ?2)",
        params![person_id, department_id],
    )?;
    Ok(Patient {
        id: conn.last_insert_rowid(),
        person_id,
        department_id,
    })
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients pt WHERE pt.id = ?1"),
            params![id],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    query_patients(
        conn,
        &format!("SELECT {PATIENT_COLUMNS} FROM patients pt ORDER BY pt.id"),
        &[],
    )
}

pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    delete_by_id(conn, "patients", "patient", id)
}
