use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gender as recorded in the sleep-health dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            value if value.eq_ignore_ascii_case("male") => Ok(Gender::Male),
            value if value.eq_ignore_ascii_case("female") => Ok(Gender::Female),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Sleep disorder classification.
///
/// The wire spelling of the apnea variant contains a space
/// (`"Sleep Apnea"`); `Display` and serde both preserve it so the JSON
/// export mirrors the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SleepDisorder {
    None,
    Insomnia,
    #[serde(rename = "Sleep Apnea")]
    SleepApnea,
}

impl SleepDisorder {
    /// All variants in display order (used for the distribution chart).
    pub const ALL: [SleepDisorder; 3] = [
        SleepDisorder::None,
        SleepDisorder::Insomnia,
        SleepDisorder::SleepApnea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepDisorder::None => "None",
            SleepDisorder::Insomnia => "Insomnia",
            SleepDisorder::SleepApnea => "Sleep Apnea",
        }
    }

    /// Returns true when the person has a diagnosed disorder.
    pub fn is_disorder(&self) -> bool {
        !matches!(self, SleepDisorder::None)
    }
}

impl fmt::Display for SleepDisorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SleepDisorder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            value if value.eq_ignore_ascii_case("none") => Ok(SleepDisorder::None),
            value if value.eq_ignore_ascii_case("insomnia") => Ok(SleepDisorder::Insomnia),
            value if value.eq_ignore_ascii_case("sleep apnea") => Ok(SleepDisorder::SleepApnea),
            other => Err(format!("unknown sleep disorder: {other}")),
        }
    }
}

/// Whether an appointment requires a follow-up visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FollowUp {
    Yes,
    No,
}

impl FollowUp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUp::Yes => "Yes",
            FollowUp::No => "No",
        }
    }
}

impl fmt::Display for FollowUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FollowUp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            value if value.eq_ignore_ascii_case("yes") => Ok(FollowUp::Yes),
            value if value.eq_ignore_ascii_case("no") => Ok(FollowUp::No),
            other => Err(format!("unknown follow-up flag: {other}")),
        }
    }
}

/// Insurance coverage level for an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsuranceCoverage {
    Full,
    Partial,
    None,
}

impl InsuranceCoverage {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceCoverage::Full => "Full",
            InsuranceCoverage::Partial => "Partial",
            InsuranceCoverage::None => "None",
        }
    }
}

impl fmt::Display for InsuranceCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsuranceCoverage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            value if value.eq_ignore_ascii_case("full") => Ok(InsuranceCoverage::Full),
            value if value.eq_ignore_ascii_case("partial") => Ok(InsuranceCoverage::Partial),
            value if value.eq_ignore_ascii_case("none") => Ok(InsuranceCoverage::None),
            other => Err(format!("unknown insurance coverage: {other}")),
        }
    }
}

/// Which of the two datasets a table or export operation targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    #[default]
    Sleep,
    Appointments,
}

impl Dataset {
    /// Stem used in export file names (`sleep_data_...`, `appointments_data_...`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::Sleep => "sleep",
            Dataset::Appointments => "appointments",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            value if value.eq_ignore_ascii_case("sleep") => Ok(Dataset::Sleep),
            value if value.eq_ignore_ascii_case("appointments") => Ok(Dataset::Appointments),
            other => Err(format!("unknown dataset: {other}")),
        }
    }
}
