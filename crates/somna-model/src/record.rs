use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{FollowUp, Gender, InsuranceCoverage, SleepDisorder};

/// One person's sleep-health record.
///
/// Field names are renamed to the source CSV headers so serialized output
/// (the table export) keeps the original column spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    #[serde(rename = "Person_ID")]
    pub person_id: String,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Sleep_Duration")]
    pub sleep_duration: f64,
    #[serde(rename = "Quality_of_Sleep")]
    pub sleep_quality: u32,
    #[serde(rename = "Physical_Activity_Level")]
    pub physical_activity: u32,
    #[serde(rename = "Stress_Level")]
    pub stress_level: u32,
    #[serde(rename = "BMI_Category")]
    pub bmi_category: String,
    /// Stored as the source string, e.g. `"126/83"`.
    #[serde(rename = "Blood_Pressure")]
    pub blood_pressure: String,
    #[serde(rename = "Heart_Rate")]
    pub heart_rate: u32,
    #[serde(rename = "Daily_Steps")]
    pub daily_steps: u32,
    #[serde(rename = "Sleep_Disorder")]
    pub disorder: SleepDisorder,
}

/// One medical appointment, keyed back to a person by `person_id`.
///
/// Referential integrity is not enforced: an appointment whose `person_id`
/// has no sleep record simply never joins to any filtered person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    #[serde(rename = "Appointment_ID")]
    pub appointment_id: String,
    #[serde(rename = "Person_ID")]
    pub person_id: String,
    #[serde(rename = "Appointment_Date")]
    pub date: NaiveDate,
    #[serde(rename = "Doctor_Type")]
    pub doctor_type: String,
    #[serde(rename = "Diagnosis")]
    pub diagnosis: String,
    #[serde(rename = "Treatment_Prescribed")]
    pub treatment: String,
    #[serde(rename = "Follow_Up_Required")]
    pub follow_up: FollowUp,
    #[serde(rename = "Appointment_Cost")]
    pub cost: f64,
    #[serde(rename = "Insurance_Coverage")]
    pub insurance: InsuranceCoverage,
}
