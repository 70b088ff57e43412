//! Terminal rendering of the derived views with `comfy-table`.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::{ReportOutput, TableOutput};

pub fn print_report(output: &ReportOutput) {
    println!("{}", kpi_table(output));
    println!();
    println!("Average sleep quality by occupation");
    println!("{}", occupation_table(&output.occupations));
    println!();
    println!("Appointments over time");
    println!("{}", trend_table(&output.trend));
    println!();
    println!("Sleep disorder distribution");
    println!("{}", disorder_table(&output.disorders));
    println!();
    println!("Sleep quality vs appointment volume");
    println!("{}", scatter_table(output));
    println!();
    println!("Appointments per person");
    println!("{}", rollup_table(&output.rollup));
    println!();
    println!(
        "{} people | {} appointments | {} rows quarantined at load",
        output.kpis.total_people, output.kpis.total_appointments, output.load.quarantined
    );
}

pub fn print_table(output: &TableOutput) {
    let mut table = Table::new();
    table.set_header(output.headers.iter().map(|name| header_cell(name)));
    apply_table_style(&mut table);
    for row in &output.rows {
        table.add_row(row.clone());
    }
    println!("{table}");
    if output.bounds.total == 0 {
        println!("No matching rows in the {} dataset", output.dataset);
    } else {
        println!(
            "Showing {} to {} of {} rows | page {} of {}",
            output.bounds.start,
            output.bounds.end,
            output.bounds.total,
            output.page,
            output.total_pages
        );
    }
    if let Some(path) = &output.export_path {
        println!("Exported to {}", path.display());
    }
}

fn kpi_table(output: &ReportOutput) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Total People"),
        header_cell("Avg Sleep Quality"),
        header_cell("Disorder Rate"),
        header_cell("Total Appointments"),
        header_cell("Avg Appointment Cost"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(output.kpis.total_people).add_attribute(Attribute::Bold),
        Cell::new(format!("{} / 10", output.kpis.avg_sleep_quality)),
        Cell::new(format!("{}%", output.kpis.disorder_rate)),
        Cell::new(output.kpis.total_appointments).add_attribute(Attribute::Bold),
        Cell::new(format!("${}", output.kpis.avg_cost)),
    ]);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Center);
    }
    table
}

fn occupation_table(rows: &[somna_core::OccupationQuality]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Occupation"), header_cell("Avg Quality")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.occupation),
            Cell::new(format!("{:.2}", row.avg_quality)),
        ]);
    }
    table
}

fn trend_table(rows: &[somna_core::MonthlyCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Month"), header_cell("Appointments")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![Cell::new(&row.label), Cell::new(row.count)]);
    }
    table
}

fn disorder_table(rows: &[somna_core::DisorderSlice]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Disorder"), header_cell("People")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        let label = if row.label == "None" {
            Cell::new(&row.label).fg(Color::DarkGrey)
        } else {
            Cell::new(&row.label).fg(Color::Yellow)
        };
        table.add_row(vec![label, Cell::new(row.count)]);
    }
    table
}

fn rollup_table(rows: &[somna_core::PersonAppointments]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Person"),
        header_cell("Occupation"),
        header_cell("Disorder"),
        header_cell("Appointments"),
        header_cell("Total Cost"),
    ]);
    apply_table_style(&mut table);
    for index in 3..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in rows {
        let cost = if row.total_appointments == 0 {
            dim_cell("-")
        } else {
            Cell::new(format!("${:.2}", row.total_cost))
        };
        table.add_row(vec![
            Cell::new(&row.person.person_id),
            Cell::new(&row.person.occupation),
            Cell::new(row.person.disorder.to_string()),
            Cell::new(row.total_appointments),
            cost,
        ]);
    }
    table
}

fn scatter_table(output: &ReportOutput) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Series"),
        header_cell("Points"),
        header_cell("Avg Appointments"),
        header_cell("Avg Quality"),
    ]);
    apply_table_style(&mut table);
    for index in 1..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (label, points) in [
        ("None", &output.scatter.none),
        ("Insomnia", &output.scatter.insomnia),
        ("Sleep Apnea", &output.scatter.sleep_apnea),
    ] {
        table.add_row(series_row(label, points));
    }
    table
}

fn series_row(label: &str, points: &[(usize, u32)]) -> Vec<Cell> {
    if points.is_empty() {
        return vec![
            Cell::new(label),
            dim_cell(0),
            dim_cell("-"),
            dim_cell("-"),
        ];
    }
    let count = points.len() as f64;
    let avg_appointments: f64 = points.iter().map(|(volume, _)| *volume as f64).sum::<f64>() / count;
    let avg_quality: f64 =
        points.iter().map(|(_, quality)| f64::from(*quality)).sum::<f64>() / count;
    vec![
        Cell::new(label),
        Cell::new(points.len()),
        Cell::new(format!("{avg_appointments:.1}")),
        Cell::new(format!("{avg_quality:.1}")),
    ]
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
