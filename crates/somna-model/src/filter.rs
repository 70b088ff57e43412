use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::{Gender, SleepDisorder};

/// Default age interval, matching the observed domain of the dataset.
pub const DEFAULT_AGE_RANGE: (u32, u32) = (27, 60);

/// The current filter selections, shared by every view.
///
/// An empty categorical set means "no restriction on that dimension":
/// all records pass, never none.
///
/// Each setter replaces its whole field; toggling a single value is the
/// caller's job (read, modify, set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub genders: BTreeSet<Gender>,
    pub occupations: BTreeSet<String>,
    pub disorders: BTreeSet<SleepDisorder>,
    /// Inclusive `(low, high)` age bounds. Always normalized so low <= high.
    pub age_range: (u32, u32),
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            genders: BTreeSet::new(),
            occupations: BTreeSet::new(),
            disorders: BTreeSet::new(),
            age_range: DEFAULT_AGE_RANGE,
        }
    }
}

impl FilterSelection {
    pub fn set_genders(&mut self, genders: BTreeSet<Gender>) {
        self.genders = genders;
    }

    pub fn set_occupations(&mut self, occupations: BTreeSet<String>) {
        self.occupations = occupations;
    }

    pub fn set_disorders(&mut self, disorders: BTreeSet<SleepDisorder>) {
        self.disorders = disorders;
    }

    /// Sets the inclusive age interval. An inverted pair is swapped rather
    /// than rejected; out-of-domain ages simply match no records downstream.
    pub fn set_age_range(&mut self, low: u32, high: u32) {
        self.age_range = if low <= high { (low, high) } else { (high, low) };
    }

    /// Restores every dimension to its "no restriction" default atomically.
    pub fn reset(&mut self) {
        *self = FilterSelection::default();
    }

    /// Returns true when no dimension restricts anything.
    pub fn is_default(&self) -> bool {
        *self == FilterSelection::default()
    }
}
