use rusqlite::Connection;

use super::patients::dead_from_reason_condition;
use super::predicate::PredicateQuery;
use super::types::*;
use crate::config::AT_RISK_AGE;
use crate::db::{
    department_from_row, hospital_from_row, parse_time, DatabaseError, DEPARTMENT_COLUMNS,
    HOSPITAL_COLUMNS,
};
use crate::models::enums::ExamResult;

/// Average age of the persons admitted to each department, one entry per
/// department ordered by id. Re-admissions count once per admission.
pub fn avg_patient_age_per_department(
    conn: &Connection,
) -> Result<Vec<DepartmentAgeAverage>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DEPARTMENT_COLUMNS}, AVG(p.age)
         FROM departments d
         LEFT JOIN patients pt ON pt.department_id = d.id
         LEFT JOIN persons p ON p.id = pt.person_id
         GROUP BY d.id
         ORDER BY d.id"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(DepartmentAgeAverage {
            department: department_from_row(row)?,
            avg_age: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Run a per-hospital count query whose select list is `HOSPITAL_COLUMNS, <count>`.
fn query_hospital_counts(
    conn: &Connection,
    sql: &str,
    query: &PredicateQuery,
) -> Result<Vec<HospitalCount>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(query.param_refs().as_slice(), |row| {
        Ok(HospitalCount {
            hospital: hospital_from_row(row)?,
            count: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Number of distinct persons aged `AT_RISK_AGE` or more working anywhere in
/// each hospital. A person with several roles counts once.
pub fn workers_at_risk_count_per_hospital(
    conn: &Connection,
) -> Result<Vec<HospitalCount>, DatabaseError> {
    let mut query = PredicateQuery::new();
    let min_age = query.bind(AT_RISK_AGE);
    let sql = format!(
        "SELECT {HOSPITAL_COLUMNS}, COUNT(DISTINCT p.id)
         FROM hospitals h
         LEFT JOIN departments d ON d.hospital_id = h.id
         LEFT JOIN hospital_workers w ON w.department_id = d.id
         LEFT JOIN persons p ON p.id = w.person_id AND p.age >= {min_age}
         GROUP BY h.id
         ORDER BY h.id"
    );
    query_hospital_counts(conn, &sql, &query)
}

fn dead_from_reason_counts(
    conn: &Connection,
    reason: ExamResult,
    at_least: Option<i64>,
) -> Result<Vec<HospitalCount>, DatabaseError> {
    let mut query = PredicateQuery::new();
    let condition = dead_from_reason_condition(&mut query, reason);
    let having = match at_least {
        Some(min) => format!("HAVING COUNT(pt.id) >= {}", query.bind(min)),
        None => String::new(),
    };
    let sql = format!(
        "SELECT {HOSPITAL_COLUMNS}, COUNT(pt.id)
         FROM hospitals h
         LEFT JOIN departments d ON d.hospital_id = h.id
         LEFT JOIN patients pt ON pt.department_id = d.id AND {condition}
         GROUP BY h.id
         {having}
         ORDER BY h.id"
    );
    let counts = query_hospital_counts(conn, &sql, &query)?;
    tracing::debug!(hospitals = counts.len(), %reason, "dead_from_reason_counts");
    Ok(counts)
}

/// Per hospital, the number of patients whose latest examination is Dead
/// and whose previous one is `reason`. Hospitals without any count 0.
pub fn dead_from_reason_count_per_hospital(
    conn: &Connection,
    reason: ExamResult,
) -> Result<Vec<HospitalCount>, DatabaseError> {
    dead_from_reason_counts(conn, reason, None)
}

/// Hospitals with at least `min` patients dead from `reason`.
pub fn hospitals_with_dead_from_reason_at_least(
    conn: &Connection,
    reason: ExamResult,
    min: i64,
) -> Result<Vec<HospitalCount>, DatabaseError> {
    dead_from_reason_counts(conn, reason, Some(min))
}

/// Earliest examination with `result` among each hospital's patients.
pub fn earliest_result_time_per_hospital(
    conn: &Connection,
    result: ExamResult,
) -> Result<Vec<HospitalFirstResult>, DatabaseError> {
    let mut query = PredicateQuery::new();
    let wanted = query.bind(result.as_str());
    let sql = format!(
        "SELECT {HOSPITAL_COLUMNS}, MIN(e.time)
         FROM hospitals h
         LEFT JOIN departments d ON d.hospital_id = h.id
         LEFT JOIN patients pt ON pt.department_id = d.id
         LEFT JOIN examination_results e ON e.patient_id = pt.id AND e.result = {wanted}
         GROUP BY h.id
         ORDER BY h.id"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(query.param_refs().as_slice(), |row| {
        Ok((hospital_from_row(row)?, row.get::<_, Option<String>>(3)?))
    })?;

    let mut firsts = Vec::new();
    for row in rows {
        let (hospital, raw) = row?;
        firsts.push(HospitalFirstResult {
            hospital,
            first_time: raw.as_deref().map(parse_time).transpose()?,
        });
    }
    Ok(firsts)
}

pub fn earliest_corona_time_per_hospital(
    conn: &Connection,
) -> Result<Vec<HospitalFirstResult>, DatabaseError> {
    earliest_result_time_per_hospital(conn, ExamResult::Corona)
}
