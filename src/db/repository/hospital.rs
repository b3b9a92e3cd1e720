use rusqlite::{params, Connection, OptionalExtension};

use super::{delete_by_id, require_non_empty};
use crate::db::DatabaseError;
use crate::models::*;

pub const HOSPITAL_COLUMNS: &str = "h.id, h.name, h.city";
pub const DEPARTMENT_COLUMNS: &str = "d.id, d.name, d.hospital_id";

pub(crate) fn hospital_from_row(row: &rusqlite::Row<'_>) -> Result<Hospital, rusqlite::Error> {
    Ok(Hospital {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
    })
}

pub(crate) fn department_from_row(row: &rusqlite::Row<'_>) -> Result<Department, rusqlite::Error> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
        hospital_id: row.get(2)?,
    })
}

pub fn insert_hospital(conn: &Connection, name: &str, city: &str) -> Result<Hospital, DatabaseError> {
    require_non_empty("hospital.name", name)?;
    require_non_empty("hospital.city", city)?;
    conn.execute(
        "INSERT INTO hospitals (name, city) VALUES (?1, ?2)",
        params![name, city],
    )?;
    Ok(Hospital {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        city: city.to_string(),
    })
}

pub fn get_hospital(conn: &Connection, id: i64) -> Result<Option<Hospital>, DatabaseError> {
    let hospital = conn
        .query_row(
            &format!("SELECT {HOSPITAL_COLUMNS} FROM hospitals h WHERE h.id = ?1"),
            params![id],
            hospital_from_row,
        )
        .optional()?;
    Ok(hospital)
}

pub fn list_hospitals(conn: &Connection) -> Result<Vec<Hospital>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {HOSPITAL_COLUMNS} FROM hospitals h ORDER BY h.id"
    ))?;
    let rows = stmt.query_map([], hospital_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn delete_hospital(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    delete_by_id(conn, "hospitals", "hospital", id)
}

pub fn insert_department(
    conn: &Connection,
    name: &str,
    hospital_id: i64,
) -> Result<Department, DatabaseError> {
    require_non_empty("department.name", name)?;
    conn.execute(
        "INSERT INTO departments (name, hospital_id) VALUES (?1, ?2)",
        params![name, hospital_id],
    )?;
    Ok(Department {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        hospital_id,
    })
}

pub fn get_department(conn: &Connection, id: i64) -> Result<Option<Department>, DatabaseError> {
    let department = conn
        .query_row(
            &format!("SELECT {DEPARTMENT_COLUMNS} FROM departments d WHERE d.id = ?1"),
            params![id],
            department_from_row,
        )
        .optional()?;
    Ok(department)
}

pub fn list_departments(conn: &Connection) -> Result<Vec<Department>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DEPARTMENT_COLUMNS} FROM departments d ORDER BY d.id"
    ))?;
    let rows = stmt.query_map([], department_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn delete_department(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    delete_by_id(conn, "departments", "department", id)
}
