use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::enums::{ExamResult, Position};

/// A staff role: one person may hold several, across departments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalWorker {
    pub id: i64,
    pub person_id: i64,
    pub department_id: i64,
    pub position: Position,
}

/// An admission of a person to a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub person_id: i64,
    pub department_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalExaminationResult {
    pub id: i64,
    pub time: NaiveDateTime,
    pub examined_by_id: i64,
    pub patient_id: i64,
    pub result: ExamResult,
}
