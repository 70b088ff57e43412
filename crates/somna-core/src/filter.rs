//! The filtering engine: one shared selection, one consistent pair of
//! filtered collections.
//!
//! All criteria are AND-combined. An empty categorical set filters nothing
//! on that dimension. Appointments are never filtered on their own fields:
//! they pass exactly when their person passed, so every consumer of
//! [`FilteredData`] sees the same join.

use std::collections::HashSet;

use tracing::debug;

use somna_model::{AppointmentRecord, FilterSelection, SleepRecord};

/// The filtered snapshot every card, chart, and table derives from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredData {
    pub sleep: Vec<SleepRecord>,
    pub appointments: Vec<AppointmentRecord>,
}

fn passes(record: &SleepRecord, selection: &FilterSelection) -> bool {
    if !selection.genders.is_empty() && !selection.genders.contains(&record.gender) {
        return false;
    }
    if !selection.occupations.is_empty() && !selection.occupations.contains(&record.occupation) {
        return false;
    }
    if !selection.disorders.is_empty() && !selection.disorders.contains(&record.disorder) {
        return false;
    }
    let (low, high) = selection.age_range;
    record.age >= low && record.age <= high
}

/// Applies the selection to the sleep records, then joins appointments to
/// the passing people by person id. Input order is preserved; orphan
/// appointments (no matching sleep record) drop out of the join.
pub fn apply_filters(
    sleep: &[SleepRecord],
    appointments: &[AppointmentRecord],
    selection: &FilterSelection,
) -> FilteredData {
    let filtered_sleep: Vec<SleepRecord> = sleep
        .iter()
        .filter(|record| passes(record, selection))
        .cloned()
        .collect();

    let person_ids: HashSet<&str> = filtered_sleep
        .iter()
        .map(|record| record.person_id.as_str())
        .collect();
    let filtered_appointments: Vec<AppointmentRecord> = appointments
        .iter()
        .filter(|appointment| person_ids.contains(appointment.person_id.as_str()))
        .cloned()
        .collect();

    debug!(
        people = filtered_sleep.len(),
        appointments = filtered_appointments.len(),
        "filters applied"
    );
    FilteredData {
        sleep: filtered_sleep,
        appointments: filtered_appointments,
    }
}
