pub mod enums;
pub mod error;
pub mod filter;
pub mod record;

pub use enums::{Dataset, FollowUp, Gender, InsuranceCoverage, SleepDisorder};
pub use error::{Result, SomnaError};
pub use filter::{DEFAULT_AGE_RANGE, FilterSelection};
pub use record::{AppointmentRecord, SleepRecord};
