use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentAgeAverage {
    pub department: Department,
    /// `None` when the department has no patients.
    pub avg_age: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalCount {
    pub hospital: Hospital,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalFirstResult {
    pub hospital: Hospital,
    pub first_time: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerExamCount {
    pub worker: HospitalWorker,
    pub examination_count: i64,
}

/// Every census figure in one serializable payload.
#[derive(Debug, Clone, Serialize)]
pub struct CensusReport {
    pub avg_patient_age_per_department: Vec<DepartmentAgeAverage>,
    pub max_exams_for_any_patient: Option<i64>,
    pub busiest_doctor: Option<WorkerExamCount>,
    pub busiest_nurse: Option<WorkerExamCount>,
    pub sick_persons: Vec<Person>,
    pub sick_workers: Vec<HospitalWorker>,
    pub patients_examined_by_sick_workers: Vec<Patient>,
    pub workers_at_risk_per_hospital: Vec<HospitalCount>,
    pub dead_from_corona_per_hospital: Vec<HospitalCount>,
    pub earliest_corona_per_hospital: Vec<HospitalFirstResult>,
    pub multi_job_persons: Vec<Person>,
}
