use std::collections::BTreeSet;

use rusqlite::Connection;

use super::predicate::{sick_condition_sql, LatestScope, PredicateQuery};
use crate::db::{query_persons, DatabaseError, PERSON_COLUMNS};
use crate::models::enums::Position;
use crate::models::*;

/// Persons whose most recent examination, across all of their admissions,
/// is neither Healthy nor Dead. Persons never examined are not sick.
pub fn sick_persons(conn: &Connection) -> Result<Vec<Person>, DatabaseError> {
    let sql = format!(
        "SELECT {PERSON_COLUMNS} FROM persons p WHERE {} ORDER BY p.id",
        sick_condition_sql(LatestScope::Person("p.id"))
    );
    let persons = query_persons(conn, &sql, &[])?;
    tracing::debug!(count = persons.len(), "sick_persons");
    Ok(persons)
}

/// Persons holding at least two staff roles.
///
/// With `Some(jobs)`, only persons whose distinct positions are exactly the
/// given set: holding an extra position or missing one disqualifies. An empty
/// set is treated like `None`.
pub fn persons_with_exact_job_set(
    conn: &Connection,
    jobs: Option<&[Position]>,
) -> Result<Vec<Person>, DatabaseError> {
    let wanted: BTreeSet<Position> = jobs.unwrap_or_default().iter().copied().collect();

    let mut query = PredicateQuery::new();
    let mut having = "COUNT(w.id) >= 2".to_string();
    if !wanted.is_empty() {
        let names: Vec<&'static str> = wanted.iter().map(|p| p.as_str()).collect();
        let in_list = query.bind_list(&names);
        let distinct = query.bind(wanted.len() as i64);
        having.push_str(&format!(
            " AND COUNT(DISTINCT w.position) = {distinct}
              AND SUM(CASE WHEN w.position IN ({in_list}) THEN 0 ELSE 1 END) = 0"
        ));
    }

    let sql = format!(
        "SELECT {PERSON_COLUMNS} FROM persons p
         JOIN hospital_workers w ON w.person_id = p.id
         GROUP BY p.id
         HAVING {having}
         ORDER BY p.id"
    );
    let persons = query_persons(conn, &sql, &query.param_refs())?;
    tracing::debug!(count = persons.len(), ?wanted, "persons_with_exact_job_set");
    Ok(persons)
}
