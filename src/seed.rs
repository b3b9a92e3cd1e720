//! Demo census: two hospitals with a handful of staff, admissions and
//! examination histories. Used by the binary on an empty database and as
//! the shared fixture of the census tests.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;

use crate::db::*;
use crate::models::enums::*;

/// Ids of the demo rows that tests and callers refer to.
#[derive(Debug, Clone)]
pub struct DemoIds {
    pub asaf_harofeh: i64,
    pub hadassah: i64,
    pub asaf_critical_care: i64,
    pub hadassah_critical_care: i64,
    /// Alon (65), Doctor at Asaf Harofeh, also admitted there.
    pub alon: i64,
    /// Ron (60), two Doctor roles and one Nurse role at Hadassah.
    pub ron: i64,
    /// Ruby (15), Corona, Healthy, Botism, then Dead.
    pub ruby: i64,
    /// Abdul (29), two Nurse roles at Hadassah.
    pub abdul: i64,
    pub worker_alon: i64,
    pub worker_ahmed: i64,
    pub worker_ron_doctor: i64,
    pub patient_rony: i64,
    pub patient_alon: i64,
    pub patient_shalom: i64,
    pub patient_lea: i64,
    pub patient_ruby: i64,
}

fn at(month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

/// True when no hospital has been recorded yet.
pub fn is_empty(conn: &Connection) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM hospitals", [], |row| row.get(0))?;
    Ok(count == 0)
}

/// Insert the demo census in a single transaction.
pub fn seed_demo(conn: &Connection) -> Result<DemoIds, DatabaseError> {
    let tx = conn.unchecked_transaction()?;

    // Asaf Harofeh Medical Center
    let asaf = insert_hospital(&tx, "Asaf Harofeh Medical Center", "Be'er Ya'akov")?;
    let asaf_cc = insert_department(&tx, "Critical Care", asaf.id)?;

    let alon = insert_person(&tx, "Alon", 65, Gender::Male)?;
    let worker_alon = insert_hospital_worker(&tx, alon.id, asaf_cc.id, Position::Doctor)?;
    let ahmed = insert_person(&tx, "Ahmed", 34, Gender::Male)?;
    let worker_ahmed = insert_hospital_worker(&tx, ahmed.id, asaf_cc.id, Position::Nurse)?;

    let rony = insert_person(&tx, "Rony", 33, Gender::Female)?;
    let patient_rony = insert_patient(&tx, rony.id, asaf_cc.id)?;
    insert_examination_result(&tx, patient_rony.id, worker_alon.id, at(3, 21, 14, 3), ExamResult::Corona)?;
    insert_examination_result(&tx, patient_rony.id, worker_alon.id, at(3, 21, 14, 13), ExamResult::Botism)?;

    let patient_alon = insert_patient(&tx, alon.id, asaf_cc.id)?;
    insert_examination_result(&tx, patient_alon.id, worker_ahmed.id, at(3, 21, 16, 13), ExamResult::Corona)?;

    let dana = insert_person(&tx, "Dana", 25, Gender::Female)?;
    insert_hospital_worker(&tx, dana.id, asaf_cc.id, Position::Doctor)?;
    let patient_dana = insert_patient(&tx, dana.id, asaf_cc.id)?;
    insert_examination_result(&tx, patient_dana.id, worker_ahmed.id, at(3, 21, 17, 54), ExamResult::Healthy)?;

    let yoav = insert_person(&tx, "Yoav", 21, Gender::Other)?;
    let patient_yoav = insert_patient(&tx, yoav.id, asaf_cc.id)?;
    insert_examination_result(&tx, patient_yoav.id, worker_ahmed.id, at(3, 20, 12, 13), ExamResult::Corona)?;
    insert_examination_result(&tx, patient_yoav.id, worker_ahmed.id, at(3, 26, 18, 1), ExamResult::Healthy)?;
    insert_examination_result(&tx, patient_yoav.id, worker_ahmed.id, at(4, 26, 18, 1), ExamResult::Healthy)?;

    // Hadassah
    let hadassah = insert_hospital(&tx, "Hadassah", "Jerusalem")?;
    let hadassah_cc = insert_department(&tx, "Critical Care", hadassah.id)?;

    let ron = insert_person(&tx, "Ron", 60, Gender::Male)?;
    let ron_doctor = insert_hospital_worker(&tx, ron.id, hadassah_cc.id, Position::Doctor)?;
    insert_hospital_worker(&tx, ron.id, hadassah_cc.id, Position::Doctor)?;
    insert_hospital_worker(&tx, ron.id, hadassah_cc.id, Position::Nurse)?;

    let shalom = insert_person(&tx, "Shalom", 87, Gender::Male)?;
    let patient_shalom = insert_patient(&tx, shalom.id, hadassah_cc.id)?;
    insert_examination_result(&tx, patient_shalom.id, ron_doctor.id, at(4, 26, 18, 1), ExamResult::Corona)?;
    insert_examination_result(&tx, patient_shalom.id, ron_doctor.id, at(4, 27, 18, 1), ExamResult::Dead)?;

    let lea = insert_person(&tx, "Lea", 90, Gender::Female)?;
    let patient_lea = insert_patient(&tx, lea.id, hadassah_cc.id)?;
    insert_examination_result(&tx, patient_lea.id, ron_doctor.id, at(4, 26, 18, 1), ExamResult::Corona)?;
    insert_examination_result(&tx, patient_lea.id, ron_doctor.id, at(4, 27, 18, 1), ExamResult::Corona)?;
    insert_examination_result(&tx, patient_lea.id, ron_doctor.id, at(4, 28, 18, 1), ExamResult::Dead)?;

    let daniel = insert_person(&tx, "Daniel", 3, Gender::Male)?;
    let patient_daniel = insert_patient(&tx, daniel.id, hadassah_cc.id)?;
    insert_examination_result(&tx, patient_daniel.id, ron_doctor.id, at(4, 26, 15, 15), ExamResult::Healthy)?;
    insert_examination_result(&tx, patient_daniel.id, ron_doctor.id, at(4, 27, 21, 53), ExamResult::Botism)?;

    let ruby = insert_person(&tx, "Ruby", 15, Gender::Male)?;
    let patient_ruby = insert_patient(&tx, ruby.id, hadassah_cc.id)?;
    insert_examination_result(&tx, patient_ruby.id, ron_doctor.id, at(4, 26, 16, 10), ExamResult::Corona)?;
    insert_examination_result(&tx, patient_ruby.id, ron_doctor.id, at(4, 27, 22, 12), ExamResult::Healthy)?;
    insert_examination_result(&tx, patient_ruby.id, ron_doctor.id, at(4, 28, 11, 1), ExamResult::Botism)?;
    insert_examination_result(&tx, patient_ruby.id, ron_doctor.id, at(4, 28, 11, 10), ExamResult::Dead)?;

    let abdul = insert_person(&tx, "Abdul", 29, Gender::Male)?;
    insert_hospital_worker(&tx, abdul.id, hadassah_cc.id, Position::Nurse)?;
    insert_hospital_worker(&tx, abdul.id, hadassah_cc.id, Position::Nurse)?;

    tx.commit()?;
    tracing::info!("Seeded demo census (2 hospitals)");

    Ok(DemoIds {
        asaf_harofeh: asaf.id,
        hadassah: hadassah.id,
        asaf_critical_care: asaf_cc.id,
        hadassah_critical_care: hadassah_cc.id,
        alon: alon.id,
        ron: ron.id,
        ruby: ruby.id,
        abdul: abdul.id,
        worker_alon: worker_alon.id,
        worker_ahmed: worker_ahmed.id,
        worker_ron_doctor: ron_doctor.id,
        patient_rony: patient_rony.id,
        patient_alon: patient_alon.id,
        patient_shalom: patient_shalom.id,
        patient_lea: patient_lea.id,
        patient_ruby: patient_ruby.id,
    })
}
