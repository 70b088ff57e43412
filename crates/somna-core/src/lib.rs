pub mod aggregate;
pub mod filter;
pub mod table;

pub use aggregate::{
    DisorderSlice, KpiSummary, MonthlyCount, OccupationQuality, PersonAppointments,
    ScatterSeries, disorder_distribution, kpi_summary, monthly_trend, person_rollup,
    quality_by_occupation, quality_vs_appointments,
};
pub use filter::{FilteredData, apply_filters};
pub use table::{APPOINTMENT_HEADERS, PAGE_SIZE, PageBounds, SLEEP_HEADERS, TableView};
