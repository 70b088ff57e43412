//! CLI argument definitions for the Somna dashboard.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use somna_model::{Dataset, FilterSelection, Gender, SleepDisorder};

#[derive(Parser)]
#[command(
    name = "somna",
    version,
    about = "Somna - sleep health & appointment analytics in the terminal",
    long_about = "Load the sleep-health and medical-appointments datasets, apply\n\
                  interactive-style filters from the command line, and render KPI\n\
                  cards, chart aggregates, and a searchable paginated data table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the full dashboard: KPI cards and all chart aggregates.
    Report(ReportArgs),

    /// Browse one dataset as a searchable, paginated table.
    Table(TableArgs),
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Folder containing sleep_health.csv and medical_appointments.csv.
    #[arg(value_name = "DATA_FOLDER")]
    pub data_folder: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Parser)]
pub struct TableArgs {
    /// Folder containing sleep_health.csv and medical_appointments.csv.
    #[arg(value_name = "DATA_FOLDER")]
    pub data_folder: PathBuf,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Which dataset to browse.
    #[arg(long = "dataset", value_enum, default_value = "sleep")]
    pub dataset: DatasetArg,

    /// Case-insensitive search across every column.
    #[arg(long = "search", value_name = "TERM")]
    pub search: Option<String>,

    /// Page to show (clamped to the available range).
    #[arg(long = "page", default_value_t = 1)]
    pub page: usize,

    /// Write the search-filtered rows as JSON into this directory.
    ///
    /// With no value the file lands next to the data, in DATA_FOLDER.
    /// The file is named `<dataset>_data_<date>.json`.
    #[arg(long = "export", value_name = "DIR", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

/// The four filter dimensions, shared by both subcommands.
///
/// Omitting a categorical flag leaves that dimension unrestricted; the
/// flags are repeatable to select several values.
#[derive(Args, Default)]
pub struct FilterArgs {
    /// Restrict to one or more genders.
    #[arg(long = "gender", value_enum)]
    pub gender: Vec<GenderArg>,

    /// Restrict to one or more occupations (exact name, e.g. "Nurse").
    #[arg(long = "occupation", value_name = "NAME")]
    pub occupation: Vec<String>,

    /// Restrict to one or more sleep disorders.
    #[arg(long = "disorder", value_enum)]
    pub disorder: Vec<DisorderArg>,

    /// Inclusive age interval, e.g. 30-45.
    #[arg(long = "age-range", value_name = "LOW-HIGH", value_parser = parse_age_range)]
    pub age_range: Option<(u32, u32)>,
}

impl FilterArgs {
    /// Builds the shared filter selection from the flags.
    pub fn to_selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::default();
        selection.set_genders(self.gender.iter().map(|arg| Gender::from(*arg)).collect());
        selection.set_occupations(self.occupation.iter().cloned().collect::<BTreeSet<_>>());
        selection.set_disorders(
            self.disorder
                .iter()
                .map(|arg| SleepDisorder::from(*arg))
                .collect(),
        );
        if let Some((low, high)) = self.age_range {
            selection.set_age_range(low, high);
        }
        selection
    }
}

fn parse_age_range(value: &str) -> Result<(u32, u32), String> {
    let (low, high) = value
        .split_once('-')
        .ok_or_else(|| format!("expected LOW-HIGH, got {value}"))?;
    let low: u32 = low
        .trim()
        .parse()
        .map_err(|_| format!("invalid lower age bound: {low}"))?;
    let high: u32 = high
        .trim()
        .parse()
        .map_err(|_| format!("invalid upper age bound: {high}"))?;
    Ok((low, high))
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DisorderArg {
    None,
    Insomnia,
    SleepApnea,
}

impl From<DisorderArg> for SleepDisorder {
    fn from(arg: DisorderArg) -> Self {
        match arg {
            DisorderArg::None => SleepDisorder::None,
            DisorderArg::Insomnia => SleepDisorder::Insomnia,
            DisorderArg::SleepApnea => SleepDisorder::SleepApnea,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DatasetArg {
    Sleep,
    Appointments,
}

impl From<DatasetArg> for Dataset {
    fn from(arg: DatasetArg) -> Self {
        match arg {
            DatasetArg::Sleep => Dataset::Sleep,
            DatasetArg::Appointments => Dataset::Appointments,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
