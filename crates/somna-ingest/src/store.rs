//! The dataset store: owns the two raw collections and their load lifecycle.
//!
//! Both datasets are loaded together and held immutable until the next
//! `load`. A failure leaves no partial data behind; every derived view is
//! unavailable until a retry succeeds. `load` stages its results locally
//! and commits them in one step, so a repeated call while an earlier one is
//! abandoned mid-way is simply last-write-wins.

use std::path::{Path, PathBuf};

use tracing::{info, info_span};

use somna_model::{AppointmentRecord, Result, SleepRecord};

use crate::reader::{read_appointments_csv, read_sleep_csv};

/// Default file name of the sleep-health dataset.
pub const SLEEP_FILE: &str = "sleep_health.csv";
/// Default file name of the medical-appointments dataset.
pub const APPOINTMENTS_FILE: &str = "medical_appointments.csv";

/// Locations of the two source files.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub sleep: PathBuf,
    pub appointments: PathBuf,
}

impl DataPaths {
    /// Standard layout: both files directly inside one data folder.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            sleep: dir.join(SLEEP_FILE),
            appointments: dir.join(APPOINTMENTS_FILE),
        }
    }
}

/// Load lifecycle of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Carries the human-readable message shown with the retry affordance.
    Failed(String),
}

/// Counts reported after a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub sleep_rows: usize,
    pub appointment_rows: usize,
    /// Rows dropped by row-level quarantine across both files.
    pub quarantined: usize,
}

/// Holds the raw datasets, read-only once loaded.
#[derive(Debug, Default)]
pub struct DataStore {
    sleep: Vec<SleepRecord>,
    appointments: Vec<AppointmentRecord>,
    status: LoadStatus,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads (or reloads) both datasets from scratch.
    ///
    /// There is no partial retry: a reload always re-reads both files. On
    /// any failure the store enters [`LoadStatus::Failed`] with both
    /// collections cleared.
    pub fn load(&mut self, paths: &DataPaths) -> Result<LoadSummary> {
        let span = info_span!(
            "load",
            sleep = %paths.sleep.display(),
            appointments = %paths.appointments.display()
        );
        let _guard = span.enter();
        self.status = LoadStatus::Loading;

        // Stage everything before touching the stored collections so a
        // failure cannot leave one dataset from the old load and one from
        // the new.
        let staged = read_sleep_csv(&paths.sleep)
            .and_then(|sleep| read_appointments_csv(&paths.appointments).map(|appts| (sleep, appts)));
        let (sleep, appointments) = match staged {
            Ok(tables) => tables,
            Err(error) => {
                self.sleep.clear();
                self.appointments.clear();
                self.status = LoadStatus::Failed(error.to_string());
                return Err(error);
            }
        };

        let summary = LoadSummary {
            sleep_rows: sleep.records.len(),
            appointment_rows: appointments.records.len(),
            quarantined: sleep.issues.len() + appointments.issues.len(),
        };
        self.sleep = sleep.records;
        self.appointments = appointments.records;
        self.status = LoadStatus::Loaded;
        info!(
            sleep_rows = summary.sleep_rows,
            appointment_rows = summary.appointment_rows,
            quarantined = summary.quarantined,
            "datasets loaded"
        );
        Ok(summary)
    }

    pub fn sleep(&self) -> &[SleepRecord] {
        &self.sleep
    }

    pub fn appointments(&self) -> &[AppointmentRecord] {
        &self.appointments
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    /// The load failure message, if the store is in the failed state.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
