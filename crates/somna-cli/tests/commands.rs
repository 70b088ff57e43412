//! Integration tests for the report and table commands, driven through the
//! same argument structs the binary builds from the command line.

use std::fs;
use std::path::Path;

use chrono::Local;
use tempfile::TempDir;

use somna_cli::cli::{DatasetArg, FilterArgs, GenderArg, ReportArgs, TableArgs};
use somna_cli::commands::{run_report, run_table};

const SLEEP_CSV: &str = "\
Person_ID,Gender,Age,Occupation,Sleep_Duration,Quality_of_Sleep,Physical_Activity_Level,Stress_Level,BMI_Category,Blood_Pressure,Heart_Rate,Daily_Steps,Sleep_Disorder
P1,Male,30,Engineer,7.5,8,60,4,Normal,120/80,68,8000,None
P2,Female,42,Nurse,6.1,6,45,7,Overweight,132/87,74,5600,Insomnia
P3,Female,55,Teacher,6.8,7,30,5,Normal,126/83,70,6400,Sleep Apnea
";

const APPOINTMENTS_CSV: &str = "\
Appointment_ID,Person_ID,Appointment_Date,Doctor_Type,Diagnosis,Treatment_Prescribed,Follow_Up_Required,Appointment_Cost,Insurance_Coverage
A1,P2,2023-10-05,Psychiatrist,Insomnia,CBT,Yes,200,Full
A2,P2,2023-11-12,General Practitioner,Checkup,Rest,No,100,Partial
A3,P9,2024-01-02,Cardiologist,Hypertension,Medication,Yes,50,None
";

fn write_fixture(dir: &Path) {
    fs::write(dir.join("sleep_health.csv"), SLEEP_CSV).unwrap();
    fs::write(dir.join("medical_appointments.csv"), APPOINTMENTS_CSV).unwrap();
}

#[test]
fn report_with_default_filters_covers_joined_rows() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let args = ReportArgs {
        data_folder: dir.path().to_path_buf(),
        filters: FilterArgs::default(),
    };
    let output = run_report(&args).unwrap();

    assert_eq!(output.load.sleep_rows, 3);
    assert_eq!(output.load.appointment_rows, 3);
    assert_eq!(output.kpis.total_people, 3);
    assert_eq!(output.kpis.avg_sleep_quality, "7.00");
    assert_eq!(output.kpis.disorder_rate, "66.7");
    // A3 references an unknown person and never joins.
    assert_eq!(output.kpis.total_appointments, 2);
    assert_eq!(output.kpis.avg_cost, "150");

    let labels: Vec<&str> = output
        .trend
        .iter()
        .map(|point| point.label.as_str())
        .collect();
    assert_eq!(labels, ["Oct '23", "Nov '23"]);
}

#[test]
fn report_filters_narrow_both_datasets() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let args = ReportArgs {
        data_folder: dir.path().to_path_buf(),
        filters: FilterArgs {
            gender: vec![GenderArg::Female],
            ..FilterArgs::default()
        },
    };
    let output = run_report(&args).unwrap();

    assert_eq!(output.kpis.total_people, 2);
    assert_eq!(output.kpis.avg_sleep_quality, "6.50");
    assert_eq!(output.kpis.disorder_rate, "100.0");
    assert_eq!(output.kpis.total_appointments, 2);

    let occupations: Vec<&str> = output
        .occupations
        .iter()
        .map(|entry| entry.occupation.as_str())
        .collect();
    assert_eq!(occupations, ["Nurse", "Teacher"]);

    // The per-person rollup covers exactly the filtered people, with their
    // joined appointments and spend attached.
    assert_eq!(output.rollup.len(), 2);
    assert_eq!(output.rollup[0].person.person_id, "P2");
    assert_eq!(output.rollup[0].total_appointments, 2);
    assert_eq!(output.rollup[0].total_cost, 300.0);
    assert_eq!(output.rollup[1].total_appointments, 0);
}

#[test]
fn report_fails_with_context_when_a_file_is_missing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sleep_health.csv"), SLEEP_CSV).unwrap();

    let args = ReportArgs {
        data_folder: dir.path().to_path_buf(),
        filters: FilterArgs::default(),
    };
    let error = run_report(&args).unwrap_err();
    assert!(
        format!("{error:#}").contains("load datasets"),
        "unexpected error: {error:#}"
    );
}

#[test]
fn table_search_and_pagination_flow() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let args = TableArgs {
        data_folder: dir.path().to_path_buf(),
        filters: FilterArgs::default(),
        dataset: DatasetArg::Sleep,
        search: Some("nurse".to_string()),
        page: 1,
        export: None,
    };
    let output = run_table(&args).unwrap();

    assert_eq!(output.headers[0], "Person_ID");
    assert_eq!(output.rows.len(), 1);
    assert_eq!(output.rows[0][0], "P2");
    assert_eq!(output.total_pages, 1);
    assert_eq!(output.bounds.total, 1);
    assert!(output.export_path.is_none());
}

#[test]
fn table_page_is_clamped_into_range() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let args = TableArgs {
        data_folder: dir.path().to_path_buf(),
        filters: FilterArgs::default(),
        dataset: DatasetArg::Appointments,
        search: None,
        page: 99,
        export: None,
    };
    let output = run_table(&args).unwrap();

    assert_eq!(output.page, 1);
    // A3 belongs to P9, who has no sleep record, so only A1 and A2 survive
    // the join into the browsable appointment set.
    assert_eq!(output.rows.len(), 2);
    assert!(output.rows.iter().all(|row| row[0] != "A3"));
}

#[test]
fn table_export_writes_the_dated_json_file() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    let export_dir = TempDir::new().unwrap();

    let args = TableArgs {
        data_folder: dir.path().to_path_buf(),
        filters: FilterArgs::default(),
        dataset: DatasetArg::Sleep,
        search: Some("female".to_string()),
        page: 1,
        export: Some(Some(export_dir.path().to_path_buf())),
    };
    let output = run_table(&args).unwrap();

    let path = output.export_path.unwrap();
    let expected_name = format!(
        "sleep_data_{}.json",
        Local::now().date_naive().format("%Y-%m-%d")
    );
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), expected_name);

    let parsed: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let rows = parsed.as_array().unwrap();
    // Export covers every search-filtered row, not just the visible page.
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Person_ID"], "P2");
}

#[test]
fn table_export_without_directory_lands_next_to_the_data() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let args = TableArgs {
        data_folder: dir.path().to_path_buf(),
        filters: FilterArgs::default(),
        dataset: DatasetArg::Appointments,
        search: None,
        page: 1,
        export: Some(None),
    };
    let output = run_table(&args).unwrap();

    let path = output.export_path.unwrap();
    assert_eq!(path.parent().unwrap(), dir.path());
    assert!(path.is_file());
}
