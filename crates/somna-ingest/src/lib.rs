pub mod reader;
pub mod store;

pub use reader::{
    APPOINTMENT_COLUMNS, ParsedTable, RowIssue, SLEEP_COLUMNS, read_appointments_csv,
    read_sleep_csv,
};
pub use store::{APPOINTMENTS_FILE, DataPaths, DataStore, LoadStatus, LoadSummary, SLEEP_FILE};
