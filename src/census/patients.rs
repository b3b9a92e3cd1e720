use rusqlite::Connection;

use super::predicate::{nth_latest_result_sql, sick_condition_sql, LatestScope, PredicateQuery};
use crate::db::{query_patients, DatabaseError, PATIENT_COLUMNS};
use crate::models::enums::ExamResult;
use crate::models::*;

/// Patients with at least one examination whose result is in `results`,
/// narrowed by `filter`. Each patient appears once.
pub fn patients_by_result_set(
    conn: &Connection,
    results: &[ExamResult],
    filter: &PatientFilter,
) -> Result<Vec<Patient>, DatabaseError> {
    if results.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = PredicateQuery::new();
    let names: Vec<&'static str> = results.iter().map(|r| r.as_str()).collect();
    let in_list = query.bind_list(&names);
    let suffix = query.patient_suffix(filter);

    let sql = format!(
        "SELECT {PATIENT_COLUMNS} FROM patients pt
         WHERE EXISTS (SELECT 1 FROM examination_results e
                       WHERE e.patient_id = pt.id AND e.result IN ({in_list})){suffix}
         ORDER BY pt.id"
    );
    let patients = query_patients(conn, &sql, &query.param_refs())?;
    tracing::debug!(count = patients.len(), ?results, "patients_by_result_set");
    Ok(patients)
}

/// Highest number of examinations recorded for a single patient.
/// `None` when there are no patients at all.
pub fn max_exams_for_any_patient(conn: &Connection) -> Result<Option<i64>, DatabaseError> {
    let max = conn.query_row(
        "SELECT MAX(exam_count) FROM (
             SELECT COUNT(e.id) AS exam_count
             FROM patients pt
             LEFT JOIN examination_results e ON e.patient_id = pt.id
             GROUP BY pt.id
         )",
        [],
        |row| row.get::<_, Option<i64>>(0),
    )?;
    Ok(max)
}

/// Admissions whose own latest examination is neither Healthy nor Dead.
pub fn sick_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let sql = format!(
        "SELECT {PATIENT_COLUMNS} FROM patients pt
         WHERE {} ORDER BY pt.id",
        sick_condition_sql(LatestScope::Patient("pt.id"))
    );
    query_patients(conn, &sql, &[])
}

/// Patients examined at least once by any of the given workers.
pub fn patients_examined_by(
    conn: &Connection,
    worker_ids: &[i64],
) -> Result<Vec<Patient>, DatabaseError> {
    if worker_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = PredicateQuery::new();
    let in_list = query.bind_list(worker_ids);
    let sql = format!(
        "SELECT {PATIENT_COLUMNS} FROM patients pt
         WHERE EXISTS (SELECT 1 FROM examination_results e
                       WHERE e.patient_id = pt.id AND e.examined_by_id IN ({in_list}))
         ORDER BY pt.id"
    );
    query_patients(conn, &sql, &query.param_refs())
}

/// Patients examined at least once by a worker who is currently sick.
/// Evaluated as a single statement.
pub fn patients_examined_by_sick_workers(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let sql = format!(
        "SELECT {PATIENT_COLUMNS} FROM patients pt
         WHERE EXISTS (SELECT 1 FROM examination_results e
                       JOIN hospital_workers w ON w.id = e.examined_by_id
                       WHERE e.patient_id = pt.id AND {})
         ORDER BY pt.id",
        sick_condition_sql(LatestScope::Person("w.person_id"))
    );
    let patients = query_patients(conn, &sql, &[])?;
    tracing::debug!(count = patients.len(), "patients_examined_by_sick_workers");
    Ok(patients)
}

/// Condition over `pt` that holds when the two latest examinations are
/// (Dead, reason). Binds two parameters on `query`.
pub(super) fn dead_from_reason_condition(query: &mut PredicateQuery, reason: ExamResult) -> String {
    let scope = LatestScope::Patient("pt.id");
    let dead = query.bind(ExamResult::Dead.as_str());
    let reason = query.bind(reason.as_str());
    format!(
        "{} = {dead} AND {} = {reason}",
        nth_latest_result_sql(scope, 0),
        nth_latest_result_sql(scope, 1),
    )
}

/// Patients whose latest examination is Dead and the one before it is `reason`.
pub fn patients_dead_from_reason(
    conn: &Connection,
    reason: ExamResult,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut query = PredicateQuery::new();
    let condition = dead_from_reason_condition(&mut query, reason);
    let sql = format!(
        "SELECT {PATIENT_COLUMNS} FROM patients pt WHERE {condition} ORDER BY pt.id"
    );
    query_patients(conn, &sql, &query.param_refs())
}
