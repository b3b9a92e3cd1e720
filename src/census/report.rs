use rusqlite::Connection;

use super::*;
use crate::db::DatabaseError;
use crate::models::enums::{ExamResult, Position};
use crate::models::WorkerFilter;

/// Runs every census query and bundles the answers.
pub fn build_report(conn: &Connection) -> Result<CensusReport, DatabaseError> {
    let none = WorkerFilter::default();
    let report = CensusReport {
        avg_patient_age_per_department: avg_patient_age_per_department(conn)?,
        max_exams_for_any_patient: max_exams_for_any_patient(conn)?,
        busiest_doctor: busiest_examiner(conn, &WorkerFilter::position(Position::Doctor), &none)?,
        busiest_nurse: busiest_examiner(conn, &WorkerFilter::position(Position::Nurse), &none)?,
        sick_persons: sick_persons(conn)?,
        sick_workers: sick_workers(conn)?,
        patients_examined_by_sick_workers: patients_examined_by_sick_workers(conn)?,
        workers_at_risk_per_hospital: workers_at_risk_count_per_hospital(conn)?,
        dead_from_corona_per_hospital: dead_from_reason_count_per_hospital(conn, ExamResult::Corona)?,
        earliest_corona_per_hospital: earliest_corona_time_per_hospital(conn)?,
        multi_job_persons: persons_with_exact_job_set(conn, None)?,
    };
    tracing::info!(
        departments = report.avg_patient_age_per_department.len(),
        sick = report.sick_persons.len(),
        "Census report built"
    );
    Ok(report)
}
