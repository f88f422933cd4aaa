//! Terminal and JSON summaries of a pipeline run.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use recruit_report::ExportedTable;
use serde::Serialize;

use crate::pipeline::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!("Database: {}", result.load.database.display());
    println!("{}", table_summary(result));
    println!("{}", run_statistics(result));
    if !result.exported.is_empty() {
        println!("{}", export_summary(&result.exported));
    }
    if result.integrity_flagged() {
        eprintln!("Integrity: {}", result.integrity);
    }
}

/// Rows per warehouse table with a total row.
pub fn table_summary(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let mut total = 0usize;
    for (name, rows) in &result.load.tables {
        total += rows;
        table.add_row(vec![
            Cell::new(name.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Extract, cleanse, hiring, and integrity figures.
pub fn run_statistics(result: &RunResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Extracted rows"), Cell::new(result.extracted_rows)]);
    table.add_row(vec![
        Cell::new("Dropped rows"),
        count_cell(result.cleanse.dropped_rows, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Hired"), Cell::new(result.hiring.hired)]);
    table.add_row(vec![
        Cell::new("Hired %"),
        Cell::new(format!("{:.2}", result.hiring.hired_pct())),
    ]);
    table.add_row(vec![Cell::new("Integrity"), integrity_cell(result)]);
    table
}

fn export_summary(exported: &[ExportedTable]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Exported"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for file in exported {
        table.add_row(vec![
            Cell::new(file.path.display()),
            Cell::new(file.rows),
        ]);
    }
    table
}

/// Dimension and fact tables loaded, plus run statistics, as JSON.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub input: String,
    pub database: String,
    pub tables: Vec<TableRows<'a>>,
    pub extracted_rows: usize,
    pub dropped_rows: usize,
    pub hired: usize,
    pub rejected: usize,
    pub integrity_flagged: bool,
    pub unresolved_keys: usize,
}

#[derive(Debug, Serialize)]
pub struct TableRows<'a> {
    pub table: &'a str,
    pub rows: usize,
}

impl<'a> RunSummary<'a> {
    pub fn from_result(result: &'a RunResult) -> Self {
        Self {
            input: result.input.display().to_string(),
            database: result.load.database.display().to_string(),
            tables: result
                .load
                .tables
                .iter()
                .map(|(table, rows)| TableRows {
                    table: table.as_str(),
                    rows: *rows,
                })
                .collect(),
            extracted_rows: result.extracted_rows,
            dropped_rows: result.cleanse.dropped_rows,
            hired: result.hiring.hired,
            rejected: result.hiring.rejected,
            integrity_flagged: result.integrity_flagged(),
            unresolved_keys: result.integrity.total_violations(),
        }
    }
}

pub fn print_summary_json(result: &RunResult) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(&RunSummary::from_result(result))?);
    Ok(())
}

fn integrity_cell(result: &RunResult) -> Cell {
    if result.integrity_flagged() {
        Cell::new(format!("{} unresolved", result.integrity.total_violations()))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Disabled);
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
