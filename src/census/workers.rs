use rusqlite::{Connection, OptionalExtension};

use super::predicate::{sick_condition_sql, LatestScope, PredicateQuery};
use super::types::WorkerExamCount;
use crate::db::{query_workers, worker_from_row, worker_row_from_rusqlite, DatabaseError, WORKER_COLUMNS};
use crate::models::*;

/// Worker with the most examinations among those matching `filter` and not
/// matching `exclude`. Ties go to the lowest worker id. Workers without any
/// examination still compete with a count of zero.
pub fn busiest_examiner(
    conn: &Connection,
    filter: &WorkerFilter,
    exclude: &WorkerFilter,
) -> Result<Option<WorkerExamCount>, DatabaseError> {
    let mut query = PredicateQuery::new();
    let mut clauses = Vec::new();
    if let Some(included) = query.worker_conjunction(filter) {
        clauses.push(included);
    }
    if let Some(excluded) = query.worker_conjunction(exclude) {
        clauses.push(format!("NOT ({excluded})"));
    }
    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };

    let sql = format!(
        "SELECT {WORKER_COLUMNS}, COUNT(e.id) AS exam_count
         FROM hospital_workers w
         LEFT JOIN examination_results e ON e.examined_by_id = w.id
         {where_sql}
         GROUP BY w.id
         ORDER BY exam_count DESC, w.id ASC
         LIMIT 1"
    );

    let row = conn
        .query_row(&sql, query.param_refs().as_slice(), |row| {
            Ok((worker_row_from_rusqlite(row)?, row.get::<_, i64>(4)?))
        })
        .optional()?;

    match row {
        Some((worker, examination_count)) => Ok(Some(WorkerExamCount {
            worker: worker_from_row(worker)?,
            examination_count,
        })),
        None => Ok(None),
    }
}

/// Staff roles held by sick persons.
pub fn sick_workers(conn: &Connection) -> Result<Vec<HospitalWorker>, DatabaseError> {
    let sql = format!(
        "SELECT {WORKER_COLUMNS} FROM hospital_workers w WHERE {} ORDER BY w.id",
        sick_condition_sql(LatestScope::Person("w.person_id"))
    );
    let workers = query_workers(conn, &sql, &[])?;
    tracing::debug!(count = workers.len(), "sick_workers");
    Ok(workers)
}
