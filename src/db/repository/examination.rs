use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use super::{delete_by_id, format_time, parse_time};
use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

const EXAM_COLUMNS: &str = "e.id, e.time, e.examined_by_id, e.patient_id, e.result";

// Internal row type for MedicalExaminationResult mapping
struct ExamRow {
    id: i64,
    time: String,
    examined_by_id: i64,
    patient_id: i64,
    result: String,
}

fn exam_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<ExamRow, rusqlite::Error> {
    Ok(ExamRow {
        id: row.get(0)?,
        time: row.get(1)?,
        examined_by_id: row.get(2)?,
        patient_id: row.get(3)?,
        result: row.get(4)?,
    })
}

fn exam_from_row(row: ExamRow) -> Result<MedicalExaminationResult, DatabaseError> {
    Ok(MedicalExaminationResult {
        id: row.id,
        time: parse_time(&row.time)?,
        examined_by_id: row.examined_by_id,
        patient_id: row.patient_id,
        result: ExamResult::from_str(&row.result)?,
    })
}

pub fn insert_examination_result(
    conn: &Connection,
    patient_id: i64,
    examined_by_id: i64,
    time: NaiveDateTime,
    result: ExamResult,
) -> Result<MedicalExaminationResult, DatabaseError> {
    let stored = format_time(&time)?;
    conn.execute(
        "INSERT INTO examination_results (time, examined_by_id, patient_id, result)
         VALUES (?1, ?2, ?3, ?4)",
        params![stored, examined_by_id, patient_id, result.as_str()],
    )?;
    Ok(MedicalExaminationResult {
        id: conn.last_insert_rowid(),
        time,
        examined_by_id,
        patient_id,
        result,
    })
}

pub fn get_examination_result(
    conn: &Connection,
    id: i64,
) -> Result<Option<MedicalExaminationResult>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {EXAM_COLUMNS} FROM examination_results e WHERE e.id = ?1"),
            params![id],
            exam_row_from_rusqlite,
        )
        .optional()?;
    row.map(exam_from_row).transpose()
}

/// Examination history of one patient, newest first.
pub fn get_examination_history(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<MedicalExaminationResult>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EXAM_COLUMNS} FROM examination_results e
         WHERE e.patient_id = ?1 ORDER BY e.time DESC, e.id DESC"
    ))?;
    let rows = stmt.query_map(params![patient_id], exam_row_from_rusqlite)?;

    let mut exams = Vec::new();
    for row in rows {
        exams.push(exam_from_row(row?)?);
    }
    Ok(exams)
}

/// Result of the latest examination of a patient, if any exists.
pub fn get_latest_result(conn: &Connection, patient_id: i64) -> Result<Option<ExamResult>, DatabaseError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT e.result FROM examination_results e
             WHERE e.patient_id = ?1 ORDER BY e.time DESC, e.id DESC LIMIT 1",
            params![patient_id],
            |row| row.get(0),
        )
        .optional()?;
    raw.map(|r| ExamResult::from_str(&r)).transpose()
}

pub fn count_examination_results(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM examination_results", [], |row| row.get(0))?;
    Ok(count)
}

pub fn delete_examination_result(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    delete_by_id(conn, "examination_results", "examination_result", id)
}
