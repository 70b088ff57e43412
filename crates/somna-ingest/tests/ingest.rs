//! Integration tests for CSV ingestion and the store lifecycle.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use somna_ingest::{
    APPOINTMENTS_FILE, DataPaths, DataStore, LoadStatus, SLEEP_FILE, read_appointments_csv,
    read_sleep_csv,
};
use somna_model::{FollowUp, Gender, InsuranceCoverage, SleepDisorder, SomnaError};

const SLEEP_HEADER: &str = "Person_ID,Gender,Age,Occupation,Sleep_Duration,Quality_of_Sleep,\
Physical_Activity_Level,Stress_Level,BMI_Category,Blood_Pressure,Heart_Rate,Daily_Steps,\
Sleep_Disorder";

const APPOINTMENT_HEADER: &str = "Appointment_ID,Person_ID,Appointment_Date,Doctor_Type,\
Diagnosis,Treatment_Prescribed,Follow_Up_Required,Appointment_Cost,Insurance_Coverage";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn sample_sleep_csv() -> String {
    format!(
        "{SLEEP_HEADER}\n\
         P0001,Male,30,Doctor,7.2,8,60,4,Normal,120/80,70,8000,None\n\
         P0002,Female,45,Nurse,6.1,5,45,7,Overweight,135/88,78,5200,Insomnia\n\
         P0003,Female,52,Engineer,6.8,6,50,5,Normal,126/83,72,6100,Sleep Apnea\n"
    )
}

fn sample_appointments_csv() -> String {
    format!(
        "{APPOINTMENT_HEADER}\n\
         A0001,P0001,2023-10-05,Cardiologist,Hypertension,Medication,Yes,220.50,Full\n\
         A0002,P0002,2023-11-14,Sleep Specialist,Insomnia,CBT,No,180.00,Partial\n\
         A0003,P0002,2023-11-28,General,Checkup,None,No,95.00,None\n"
    )
}

#[test]
fn sleep_csv_parses_typed_records() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, SLEEP_FILE, &sample_sleep_csv());

    let table = read_sleep_csv(&path).expect("parse sleep csv");
    assert_eq!(table.records.len(), 3);
    assert!(table.issues.is_empty());

    let first = &table.records[0];
    assert_eq!(first.person_id, "P0001");
    assert_eq!(first.gender, Gender::Male);
    assert_eq!(first.age, 30);
    assert_eq!(first.sleep_duration, 7.2);
    assert_eq!(first.disorder, SleepDisorder::None);
    assert_eq!(table.records[2].disorder, SleepDisorder::SleepApnea);
}

#[test]
fn appointment_csv_parses_dates_and_enums() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, APPOINTMENTS_FILE, &sample_appointments_csv());

    let table = read_appointments_csv(&path).expect("parse appointments csv");
    assert_eq!(table.records.len(), 3);

    let first = &table.records[0];
    assert_eq!(first.appointment_id, "A0001");
    assert_eq!(first.date.to_string(), "2023-10-05");
    assert_eq!(first.follow_up, FollowUp::Yes);
    assert_eq!(first.insurance, InsuranceCoverage::Full);
    assert_eq!(first.cost, 220.5);
}

#[test]
fn blank_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let content = format!(
        "{SLEEP_HEADER}\n\
         P0001,Male,30,Doctor,7.2,8,60,4,Normal,120/80,70,8000,None\n\
         \n\
         P0002,Female,45,Nurse,6.1,5,45,7,Overweight,135/88,78,5200,Insomnia\n\
         \n"
    );
    let path = write_file(&dir, SLEEP_FILE, &content);

    let table = read_sleep_csv(&path).expect("parse sleep csv");
    assert_eq!(table.records.len(), 2);
    assert!(table.issues.is_empty());
}

#[test]
fn malformed_rows_are_quarantined_not_fatal() {
    let dir = TempDir::new().unwrap();
    let content = format!(
        "{SLEEP_HEADER}\n\
         P0001,Male,30,Doctor,7.2,8,60,4,Normal,120/80,70,8000,None\n\
         P0002,Female,not-a-number,Nurse,6.1,5,45,7,Overweight,135/88,78,5200,Insomnia\n\
         P0003,Martian,52,Engineer,6.8,6,50,5,Normal,126/83,72,6100,None\n\
         P0004,Female,41,Teacher,7.5,7,55,4,Normal,118/76,68,7400,Sleep Apnea\n"
    );
    let path = write_file(&dir, SLEEP_FILE, &content);

    let table = read_sleep_csv(&path).expect("parse sleep csv");
    // Bad age and unknown gender drop; the surrounding rows survive.
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.issues.len(), 2);
    assert_eq!(table.records[0].person_id, "P0001");
    assert_eq!(table.records[1].person_id, "P0004");
    assert!(table.issues.iter().all(|issue| issue.line > 1));
}

#[test]
fn missing_required_column_fails_the_dataset() {
    let dir = TempDir::new().unwrap();
    let content = "Person_ID,Gender,Age\nP0001,Male,30\n";
    let path = write_file(&dir, SLEEP_FILE, content);

    let error = read_sleep_csv(&path).expect_err("should fail");
    match error {
        SomnaError::MissingColumn { column, .. } => assert_eq!(column, "Occupation"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bom_on_first_header_is_tolerated() {
    let dir = TempDir::new().unwrap();
    let content = format!("\u{feff}{}", sample_sleep_csv());
    let path = write_file(&dir, SLEEP_FILE, &content);

    let table = read_sleep_csv(&path).expect("parse sleep csv");
    assert_eq!(table.records.len(), 3);
}

#[test]
fn store_load_success_exposes_both_datasets() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, SLEEP_FILE, &sample_sleep_csv());
    write_file(&dir, APPOINTMENTS_FILE, &sample_appointments_csv());

    let mut store = DataStore::new();
    let summary = store.load(&DataPaths::from_dir(dir.path())).expect("load");

    assert!(store.is_loaded());
    assert_eq!(summary.sleep_rows, 3);
    assert_eq!(summary.appointment_rows, 3);
    assert_eq!(summary.quarantined, 0);
    assert_eq!(store.sleep().len(), 3);
    assert_eq!(store.appointments().len(), 3);
}

#[test]
fn store_failure_keeps_no_partial_data_and_retry_recovers() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, SLEEP_FILE, &sample_sleep_csv());
    // Appointments file is missing: the whole load fails even though the
    // sleep dataset parsed.
    let mut store = DataStore::new();
    let paths = DataPaths::from_dir(dir.path());
    assert!(store.load(&paths).is_err());

    assert!(matches!(store.status(), LoadStatus::Failed(_)));
    assert!(store.error().is_some());
    assert!(store.sleep().is_empty());
    assert!(store.appointments().is_empty());

    // Retry re-runs both reads from scratch.
    write_file(&dir, APPOINTMENTS_FILE, &sample_appointments_csv());
    store.load(&paths).expect("retry succeeds");
    assert!(store.is_loaded());
    assert_eq!(store.sleep().len(), 3);
}
