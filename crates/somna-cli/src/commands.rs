//! Subcommand implementations: load, filter, derive, and hand the results
//! to the renderer.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span};

use somna_core::{
    DisorderSlice, FilteredData, KpiSummary, MonthlyCount, OccupationQuality, PageBounds,
    PersonAppointments, ScatterSeries, TableView, apply_filters, disorder_distribution,
    kpi_summary, monthly_trend, person_rollup, quality_by_occupation, quality_vs_appointments,
};
use somna_ingest::{DataPaths, DataStore, LoadSummary};
use somna_model::Dataset;

use crate::cli::{ReportArgs, TableArgs};

/// Everything the `report` command derives, ready for rendering.
#[derive(Debug)]
pub struct ReportOutput {
    pub load: LoadSummary,
    pub kpis: KpiSummary,
    pub occupations: Vec<OccupationQuality>,
    pub trend: Vec<MonthlyCount>,
    pub disorders: Vec<DisorderSlice>,
    pub scatter: ScatterSeries,
    pub rollup: Vec<PersonAppointments>,
}

/// One rendered page of the data explorer.
#[derive(Debug)]
pub struct TableOutput {
    pub dataset: Dataset,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub page: usize,
    pub total_pages: usize,
    pub bounds: PageBounds,
    pub export_path: Option<PathBuf>,
}

fn load_filtered(data_folder: &std::path::Path, args: &crate::cli::FilterArgs) -> Result<(LoadSummary, FilteredData)> {
    let paths = DataPaths::from_dir(data_folder);
    let mut store = DataStore::new();
    let load = store
        .load(&paths)
        .with_context(|| format!("load datasets from {}", data_folder.display()))?;
    let selection = args.to_selection();
    let filtered = apply_filters(store.sleep(), store.appointments(), &selection);
    Ok((load, filtered))
}

pub fn run_report(args: &ReportArgs) -> Result<ReportOutput> {
    let span = info_span!("report", folder = %args.data_folder.display());
    let _guard = span.enter();

    let (load, filtered) = load_filtered(&args.data_folder, &args.filters)?;
    let output = ReportOutput {
        load,
        kpis: kpi_summary(&filtered),
        occupations: quality_by_occupation(&filtered.sleep),
        trend: monthly_trend(&filtered.appointments),
        disorders: disorder_distribution(&filtered.sleep),
        scatter: quality_vs_appointments(&filtered),
        rollup: person_rollup(&filtered),
    };
    info!(
        people = output.kpis.total_people,
        appointments = output.kpis.total_appointments,
        "report derived"
    );
    Ok(output)
}

pub fn run_table(args: &TableArgs) -> Result<TableOutput> {
    let span = info_span!("table", folder = %args.data_folder.display());
    let _guard = span.enter();

    let (_, filtered) = load_filtered(&args.data_folder, &args.filters)?;
    let mut view = TableView::new(filtered);
    view.select_dataset(args.dataset.into());
    if let Some(term) = &args.search {
        view.set_search(term.clone());
    }
    view.set_page(args.page);

    let export_path = match &args.export {
        Some(dir) => {
            let (name, body) = view
                .export_json(Local::now().date_naive())
                .context("serialize export")?;
            // No explicit directory means the export lands next to the data.
            let target = dir.as_deref().unwrap_or(args.data_folder.as_path());
            let path = target.join(name);
            fs::write(&path, body)
                .with_context(|| format!("write export to {}", path.display()))?;
            info!(path = %path.display(), "export written");
            Some(path)
        }
        None => None,
    };

    Ok(TableOutput {
        dataset: view.dataset(),
        headers: view.headers().to_vec(),
        rows: view.page_rows(),
        page: view.page(),
        total_pages: view.total_pages(),
        bounds: view.page_bounds(),
        export_path,
    })
}
