//! The data-explorer table: dataset selection, free-text search, and
//! fixed-size pagination over a filtered snapshot.
//!
//! State is (dataset, search term, current page). Switching dataset clears
//! the search and returns to page 1; changing the search also returns to
//! page 1. The page index is always clamped into `1..=total_pages`, so it
//! can never dangle after a narrower search shrinks the result set.

use chrono::NaiveDate;

use somna_model::{Dataset, Result, SomnaError};

use crate::filter::FilteredData;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 10;

/// Column headers of the sleep table, in display order.
pub const SLEEP_HEADERS: [&str; 13] = [
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

/// Column headers of the appointments table, in display order.
pub const APPOINTMENT_HEADERS: [&str; 9] = [
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

/// Inclusive/exclusive bounds of the visible page, for the
/// "showing X to Y of Z" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// 1-based index of the first visible row (0 when there are none).
    pub start: usize,
    /// 1-based index of the last visible row.
    pub end: usize,
    /// Total rows matching the current search.
    pub total: usize,
}

/// Searchable, paginated view over one of the two filtered datasets.
#[derive(Debug, Clone)]
pub struct TableView {
    data: FilteredData,
    dataset: Dataset,
    search: String,
    page: usize,
    page_size: usize,
}

impl TableView {
    pub fn new(data: FilteredData) -> Self {
        Self {
            data,
            dataset: Dataset::Sleep,
            search: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Switches the active dataset, clearing the search and returning to
    /// page 1.
    pub fn select_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.search.clear();
        self.page = 1;
    }

    /// Replaces the search term and returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Jumps to a page, clamped into `1..=total_pages`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Headers of the active dataset.
    pub fn headers(&self) -> &'static [&'static str] {
        match self.dataset {
            Dataset::Sleep => &SLEEP_HEADERS,
            Dataset::Appointments => &APPOINTMENT_HEADERS,
        }
    }

    fn all_rows(&self) -> Vec<Vec<String>> {
        match self.dataset {
            Dataset::Sleep => self.data.sleep.iter().map(sleep_row).collect(),
            Dataset::Appointments => self.data.appointments.iter().map(appointment_row).collect(),
        }
    }

    /// Rows of the active dataset that match the search term
    /// (case-insensitive substring over every column).
    pub fn matching_rows(&self) -> Vec<Vec<String>> {
        let rows = self.all_rows();
        if self.search.is_empty() {
            return rows;
        }
        let needle = self.search.to_lowercase();
        rows.into_iter()
            .filter(|row| {
                row.iter()
                    .any(|cell| cell.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Number of pages over the search-filtered rows. At least 1, so the
    /// current page index is always valid.
    pub fn total_pages(&self) -> usize {
        self.matching_rows().len().div_ceil(self.page_size).max(1)
    }

    /// The rows visible on the current page.
    pub fn page_rows(&self) -> Vec<Vec<String>> {
        let rows = self.matching_rows();
        let start = (self.page - 1) * self.page_size;
        rows.into_iter().skip(start).take(self.page_size).collect()
    }

    pub fn page_bounds(&self) -> PageBounds {
        let total = self.matching_rows().len();
        if total == 0 {
            return PageBounds {
                start: 0,
                end: 0,
                total: 0,
            };
        }
        let start = (self.page - 1) * self.page_size + 1;
        let end = (start + self.page_size - 1).min(total);
        PageBounds { start, end, total }
    }

    /// Serializes every search-filtered row of the active dataset (not just
    /// the visible page) to a pretty-printed JSON document. Returns the
    /// download file name and the document body.
    pub fn export_json(&self, today: NaiveDate) -> Result<(String, String)> {
        let document = match self.dataset {
            Dataset::Sleep => {
                let rows: Vec<_> = self
                    .data
                    .sleep
                    .iter()
                    .filter(|record| self.search_matches(&sleep_row(record)))
                    .collect();
                serde_json::to_string_pretty(&rows)
            }
            Dataset::Appointments => {
                let rows: Vec<_> = self
                    .data
                    .appointments
                    .iter()
                    .filter(|record| self.search_matches(&appointment_row(record)))
                    .collect();
                serde_json::to_string_pretty(&rows)
            }
        }
        .map_err(|error| SomnaError::Message(format!("export failed: {error}")))?;
        let name = format!(
            "{}_data_{}.json",
            self.dataset.as_str(),
            today.format("%Y-%m-%d")
        );
        Ok((name, document))
    }

    fn search_matches(&self, row: &[String]) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        row.iter().any(|cell| cell.to_lowercase().contains(&needle))
    }
}

fn sleep_row(record: &somna_model::SleepRecord) -> Vec<String> {
    vec![
        record.person_id.clone(),
        record.gender.to_string(),
        record.age.to_string(),
        record.occupation.clone(),
        record.sleep_duration.to_string(),
        record.sleep_quality.to_string(),
        record.physical_activity.to_string(),
        record.stress_level.to_string(),
        record.bmi_category.clone(),
        record.blood_pressure.clone(),
        record.heart_rate.to_string(),
        record.daily_steps.to_string(),
        record.disorder.to_string(),
    ]
}

fn appointment_row(record: &somna_model::AppointmentRecord) -> Vec<String> {
    vec![
        record.appointment_id.clone(),
        record.person_id.clone(),
        record.date.to_string(),
        record.doctor_type.clone(),
        record.diagnosis.clone(),
        record.treatment.clone(),
        record.follow_up.to_string(),
        record.cost.to_string(),
        record.insurance.to_string(),
    ]
}
