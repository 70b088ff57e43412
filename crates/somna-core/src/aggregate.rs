//! Aggregation adapters: pure functions from filtered data to the exact
//! summary shape one view needs.
//!
//! Every adapter is total over its input. Empty filtered sets produce
//! zero-valued, fully formatted outputs; nothing here can fail for any
//! selection. The formatted KPI strings ("0.00", "0.0", "0") are part of
//! the contract, not presentation detail.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::Serialize;

use somna_model::{AppointmentRecord, SleepDisorder, SleepRecord};

use crate::filter::FilteredData;

/// The five headline figures shown as summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiSummary {
    pub total_people: usize,
    /// Mean sleep quality, two decimals ("0.00" when empty).
    pub avg_sleep_quality: String,
    /// Share of people with a disorder, percent, one decimal ("0.0" when empty).
    pub disorder_rate: String,
    pub total_appointments: usize,
    /// Mean appointment cost, whole currency units ("0" when empty).
    pub avg_cost: String,
}

pub fn kpi_summary(data: &FilteredData) -> KpiSummary {
    let total_people = data.sleep.len();
    let avg_sleep_quality = if total_people == 0 {
        "0.00".to_string()
    } else {
        let sum: u32 = data.sleep.iter().map(|record| record.sleep_quality).sum();
        format!("{:.2}", f64::from(sum) / total_people as f64)
    };
    let disorder_rate = if total_people == 0 {
        "0.0".to_string()
    } else {
        let with_disorder = data
            .sleep
            .iter()
            .filter(|record| record.disorder.is_disorder())
            .count();
        format!("{:.1}", with_disorder as f64 / total_people as f64 * 100.0)
    };
    let total_appointments = data.appointments.len();
    let avg_cost = if total_appointments == 0 {
        "0".to_string()
    } else {
        let sum: f64 = data.appointments.iter().map(|appt| appt.cost).sum();
        format!("{:.0}", sum / total_appointments as f64)
    };
    KpiSummary {
        total_people,
        avg_sleep_quality,
        disorder_rate,
        total_appointments,
        avg_cost,
    }
}

/// Mean sleep quality per occupation, sorted by occupation name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupationQuality {
    pub occupation: String,
    /// Rounded to two decimals.
    pub avg_quality: f64,
}

pub fn quality_by_occupation(sleep: &[SleepRecord]) -> Vec<OccupationQuality> {
    let mut groups: BTreeMap<&str, (u32, usize)> = BTreeMap::new();
    for record in sleep {
        let entry = groups.entry(record.occupation.as_str()).or_insert((0, 0));
        entry.0 += record.sleep_quality;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(occupation, (sum, count))| OccupationQuality {
            occupation: occupation.to_string(),
            avg_quality: (f64::from(sum) / count as f64 * 100.0).round() / 100.0,
        })
        .collect()
}

/// Appointment volume for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    /// Sortable key, e.g. `"2023-10"`.
    pub month: String,
    /// Display label, e.g. `"Oct '23"`.
    pub label: String,
    pub count: usize,
}

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Appointments per year-month, chronologically ascending.
pub fn monthly_trend(appointments: &[AppointmentRecord]) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for appointment in appointments {
        let key = (appointment.date.year(), appointment.date.month());
        *buckets.entry(key).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|((year, month), count)| MonthlyCount {
            month: format!("{year:04}-{month:02}"),
            label: format!("{} '{:02}", MONTH_ABBR[(month - 1) as usize], year % 100),
            count,
        })
        .collect()
}

/// One slice of the disorder distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisorderSlice {
    pub label: String,
    pub count: usize,
}

/// Counts people per disorder value. Only observed values are emitted,
/// in the enum's display order.
pub fn disorder_distribution(sleep: &[SleepRecord]) -> Vec<DisorderSlice> {
    SleepDisorder::ALL
        .iter()
        .filter_map(|disorder| {
            let count = sleep
                .iter()
                .filter(|record| record.disorder == *disorder)
                .count();
            (count > 0).then(|| DisorderSlice {
                label: disorder.to_string(),
                count,
            })
        })
        .collect()
}

/// Scatter points of (appointment count, sleep quality), one series per
/// disorder value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScatterSeries {
    pub none: Vec<(usize, u32)>,
    pub insomnia: Vec<(usize, u32)>,
    pub sleep_apnea: Vec<(usize, u32)>,
}

impl ScatterSeries {
    pub fn total_points(&self) -> usize {
        self.none.len() + self.insomnia.len() + self.sleep_apnea.len()
    }
}

/// For each filtered person, counts their appointments in the filtered
/// appointment set and buckets the point by disorder.
pub fn quality_vs_appointments(data: &FilteredData) -> ScatterSeries {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for appointment in &data.appointments {
        *counts.entry(appointment.person_id.as_str()).or_insert(0) += 1;
    }
    let mut series = ScatterSeries::default();
    for record in &data.sleep {
        let count = counts.get(record.person_id.as_str()).copied().unwrap_or(0);
        let point = (count, record.sleep_quality);
        match record.disorder {
            SleepDisorder::None => series.none.push(point),
            SleepDisorder::Insomnia => series.insomnia.push(point),
            SleepDisorder::SleepApnea => series.sleep_apnea.push(point),
        }
    }
    series
}

/// A filtered person together with their filtered appointments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonAppointments {
    #[serde(flatten)]
    pub person: SleepRecord,
    pub appointments: Vec<AppointmentRecord>,
    pub total_appointments: usize,
    pub total_cost: f64,
}

/// Per-person rollup of appointment volume and spend, in filtered order.
pub fn person_rollup(data: &FilteredData) -> Vec<PersonAppointments> {
    let mut by_person: HashMap<&str, Vec<&AppointmentRecord>> = HashMap::new();
    for appointment in &data.appointments {
        by_person
            .entry(appointment.person_id.as_str())
            .or_default()
            .push(appointment);
    }
    data.sleep
        .iter()
        .map(|record| {
            let appointments: Vec<AppointmentRecord> = by_person
                .get(record.person_id.as_str())
                .map(|list| list.iter().map(|appt| (*appt).clone()).collect())
                .unwrap_or_default();
            let total_cost = appointments.iter().map(|appt| appt.cost).sum();
            PersonAppointments {
                person: record.clone(),
                total_appointments: appointments.len(),
                total_cost,
                appointments,
            }
        })
        .collect()
}
