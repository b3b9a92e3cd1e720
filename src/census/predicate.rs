use rusqlite::types::ToSql;

use crate::models::enums::ExamResult;
use crate::models::{PatientFilter, WorkerFilter};

/// Helper: builds dynamic WHERE fragments with numbered parameters.
///
/// Placeholders are numbered in bind order, so fragments from several
/// filters can share one statement.
#[derive(Default)]
pub(super) struct PredicateQuery {
    params: Vec<Box<dyn ToSql>>,
}

impl PredicateQuery {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Bind a value and return its placeholder.
    pub(super) fn bind<T: ToSql + 'static>(&mut self, value: T) -> String {
        self.params.push(Box::new(value));
        format!("?{}", self.params.len())
    }

    /// Bind each value and return a comma separated placeholder list.
    pub(super) fn bind_list<T: ToSql + Clone + 'static>(&mut self, values: &[T]) -> String {
        values
            .iter()
            .map(|v| self.bind(v.clone()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// AND-joined clauses over the `w` alias; `None` for an empty filter.
    pub(super) fn worker_conjunction(&mut self, filter: &WorkerFilter) -> Option<String> {
        if filter.is_empty() {
            return None;
        }
        let mut clauses = Vec::new();
        if let Some(position) = filter.position {
            clauses.push(format!("w.position = {}", self.bind(position.as_str())));
        }
        if let Some(department_id) = filter.department_id {
            clauses.push(format!("w.department_id = {}", self.bind(department_id)));
        }
        if let Some(hospital_id) = filter.hospital_id {
            clauses.push(format!(
                "w.department_id IN (SELECT fd.id FROM departments fd WHERE fd.hospital_id = {})",
                self.bind(hospital_id)
            ));
        }
        if let Some(person_id) = filter.person_id {
            clauses.push(format!("w.person_id = {}", self.bind(person_id)));
        }
        if let Some(min_age) = filter.min_age {
            clauses.push(format!(
                "w.person_id IN (SELECT fp.id FROM persons fp WHERE fp.age >= {})",
                self.bind(min_age)
            ));
        }
        Some(clauses.join(" AND "))
    }

    /// Clauses over the `pt` alias, each prefixed with ` AND `.
    pub(super) fn patient_suffix(&mut self, filter: &PatientFilter) -> String {
        let mut sql = String::new();
        if let Some(department_id) = filter.department_id {
            sql.push_str(&format!(" AND pt.department_id = {}", self.bind(department_id)));
        }
        if let Some(hospital_id) = filter.hospital_id {
            sql.push_str(&format!(
                " AND pt.department_id IN (SELECT fd.id FROM departments fd WHERE fd.hospital_id = {})",
                self.bind(hospital_id)
            ));
        }
        if let Some(person_id) = filter.person_id {
            sql.push_str(&format!(" AND pt.person_id = {}", self.bind(person_id)));
        }
        sql
    }

    pub(super) fn param_refs(&self) -> Vec<&dyn ToSql> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }
}

/// Which row a "latest examination" lookup is anchored on.
#[derive(Debug, Clone, Copy)]
pub(super) enum LatestScope<'a> {
    /// One admission: the column holds a `patients.id`.
    Patient(&'a str),
    /// Every admission of a person: the column holds a `persons.id`.
    Person(&'a str),
}

/// Correlated subquery yielding the result of the `offset`-th most recent
/// examination (0 = latest) in `scope`, or NULL when there is none.
pub(super) fn nth_latest_result_sql(scope: LatestScope<'_>, offset: u32) -> String {
    let (join, anchor) = match scope {
        LatestScope::Patient(column) => (String::new(), format!("le.patient_id = {column}")),
        LatestScope::Person(column) => (
            " JOIN patients lp ON lp.id = le.patient_id".to_string(),
            format!("lp.person_id = {column}"),
        ),
    };
    format!(
        "(SELECT le.result FROM examination_results le{join}
          WHERE {anchor} ORDER BY le.time DESC, le.id DESC LIMIT 1 OFFSET {offset})"
    )
}

/// Condition true when the latest result in `scope` exists and is a sick one.
///
/// A NULL latest result (no examinations) makes `NOT IN` yield NULL, so
/// unexamined rows never count as sick.
pub(super) fn sick_condition_sql(scope: LatestScope<'_>) -> String {
    let not_sick = ExamResult::ALL
        .iter()
        .filter(|r| !r.is_sick())
        .map(|r| format!("'{}'", r.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} NOT IN ({not_sick})", nth_latest_result_sql(scope, 0))
}
