//! Header-mapped CSV readers for the two datasets.
//!
//! Columns are located by header name, not position. Fields are coerced to
//! their typed form (numbers, dates, closed enums) during deserialization.
//! A malformed row never aborts the parse: it is recorded as a [`RowIssue`]
//! and skipped, matching the resilient bulk-load contract. Only a missing
//! required column or an unreadable file fails the whole dataset.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;

use somna_model::{AppointmentRecord, Result, SleepRecord, SomnaError};

/// Header columns required in `sleep_health.csv`.
pub const SLEEP_COLUMNS: [&str; 13] = [
    "Person_ID",
    "Gender",
    "Age",
    "Occupation",
    "Sleep_Duration",
    "Quality_of_Sleep",
    "Physical_Activity_Level",
    "Stress_Level",
    "BMI_Category",
    "Blood_Pressure",
    "Heart_Rate",
    "Daily_Steps",
    "Sleep_Disorder",
];

/// Header columns required in `medical_appointments.csv`.
pub const APPOINTMENT_COLUMNS: [&str; 9] = [
    "Appointment_ID",
    "Person_ID",
    "Appointment_Date",
    "Doctor_Type",
    "Diagnosis",
    "Treatment_Prescribed",
    "Follow_Up_Required",
    "Appointment_Cost",
    "Insurance_Coverage",
];

/// One quarantined row: the 1-based line it came from and why it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub line: u64,
    pub message: String,
}

/// Parse outcome for one dataset: the typed rows plus the quarantined ones.
#[derive(Debug, Clone)]
pub struct ParsedTable<T> {
    pub records: Vec<T>,
    pub issues: Vec<RowIssue>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

fn check_required_columns(path: &Path, headers: &StringRecord, required: &[&str]) -> Result<()> {
    let present: Vec<String> = headers.iter().map(normalize_header).collect();
    for column in required {
        if !present.iter().any(|header| header == column) {
            return Err(SomnaError::MissingColumn {
                path: path.to_path_buf(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}

fn read_typed_csv<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<ParsedTable<T>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|error| SomnaError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    let headers = reader
        .headers()
        .map(StringRecord::clone)
        .map_err(|error| SomnaError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    let mut normalized = StringRecord::new();
    for header in headers.iter() {
        normalized.push_field(&normalize_header(header));
    }
    check_required_columns(path, &normalized, required)?;

    let mut records = Vec::new();
    let mut issues = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(error) => {
                issues.push(RowIssue {
                    line: error.position().map_or(0, csv::Position::line),
                    message: error.to_string(),
                });
                continue;
            }
        };
        // Blank lines arrive as all-empty records; skip them silently.
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        match record.deserialize::<T>(Some(&normalized)) {
            Ok(row) => records.push(row),
            Err(error) => {
                tracing::warn!(path = %path.display(), line, %error, "quarantined row");
                issues.push(RowIssue {
                    line,
                    message: error.to_string(),
                });
            }
        }
    }
    Ok(ParsedTable { records, issues })
}

/// Reads and types the sleep-health dataset.
pub fn read_sleep_csv(path: &Path) -> Result<ParsedTable<SleepRecord>> {
    read_typed_csv(path, &SLEEP_COLUMNS)
}

/// Reads and types the medical-appointments dataset.
pub fn read_appointments_csv(path: &Path) -> Result<ParsedTable<AppointmentRecord>> {
    read_typed_csv(path, &APPOINTMENT_COLUMNS)
}
