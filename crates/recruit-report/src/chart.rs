//! Text charts for KPI tables.
//!
//! Bars are scaled to the largest value of the chart. The hires-over-time KPI
//! is a country by year grid with a sparkline per country.

use std::collections::{BTreeMap, BTreeSet};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::kpi::{CountryYearHires, KpiTable, SeniorityScores, TechnologyHiringRate};

/// Width of a full-length bar, in characters.
pub const BAR_WIDTH: usize = 30;

const BAR: char = '█';
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// A bar for `value` relative to `max`.
///
/// Any positive value gets at least one block.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if value.is_nan() || max.is_nan() || value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let scaled = (value / max * width as f64).round() as usize;
    BAR.to_string().repeat(scaled.clamp(1, width))
}

/// One spark per value, scaled to the largest value; gaps are spaces.
pub fn sparkline(values: &[Option<i64>]) -> String {
    let max = values.iter().flatten().copied().max().unwrap_or(0);
    values
        .iter()
        .map(|value| match value {
            Some(v) if max > 0 => {
                let level = (*v as f64 / max as f64 * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[level.min(SPARKS.len() - 1)]
            }
            Some(_) => SPARKS[0],
            None => ' ',
        })
        .collect()
}

/// Render one KPI as a titled chart.
///
/// `styled` keeps colors and attributes; file output passes `false`.
pub fn render_chart(kpi: &KpiTable, styled: bool) -> String {
    let kind = kpi.kind();
    let mut table = match kpi {
        KpiTable::HiresByTechnology(rows) => count_chart(
            "Technology",
            rows.iter().map(|r| (r.technology_name.clone(), r.total_hires)),
            Color::Green,
        ),
        KpiTable::HiresByYear(rows) => count_chart(
            "Year",
            rows.iter().map(|r| (r.year.to_string(), r.total_hires)),
            Color::Blue,
        ),
        KpiTable::HiresBySeniority(rows) => count_chart(
            "Seniority",
            rows.iter().map(|r| (r.seniority_level.clone(), r.total_hires)),
            Color::Magenta,
        ),
        KpiTable::HiresByCountryYear(rows) => country_year_chart(rows),
        KpiTable::HiringRateByTechnology(rows) => hiring_rate_chart(rows),
        KpiTable::AvgScoresBySeniority(rows) => scores_chart(rows),
    };
    apply_chart_style(&mut table, styled);
    let title = format!("KPI {}: {}", kind.number(), kind.title());
    if kpi.is_empty() {
        format!("{title}\n(no rows)")
    } else {
        format!("{title}\n{table}")
    }
}

fn count_chart(label: &str, rows: impl Iterator<Item = (String, i64)>, color: Color) -> Table {
    let rows: Vec<(String, i64)> = rows.collect();
    let max = rows.iter().map(|(_, hires)| *hires).max().unwrap_or(0) as f64;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(label),
        header_cell("Hires"),
        header_cell(""),
    ]);
    for (name, hires) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(hires),
            Cell::new(bar(hires as f64, max, BAR_WIDTH)).fg(color),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

fn country_year_chart(rows: &[CountryYearHires]) -> Table {
    let years: BTreeSet<i64> = rows.iter().map(|r| r.year).collect();
    let mut grid: BTreeMap<&str, BTreeMap<i64, i64>> = BTreeMap::new();
    for row in rows {
        grid.entry(row.country_name.as_str())
            .or_default()
            .insert(row.year, row.total_hires);
    }

    let mut table = Table::new();
    let mut header = vec![header_cell("Country")];
    header.extend(years.iter().map(|year| header_cell(&year.to_string())));
    header.push(header_cell("Trend"));
    table.set_header(header);

    for (country, by_year) in &grid {
        let values: Vec<Option<i64>> = years.iter().map(|year| by_year.get(year).copied()).collect();
        let mut cells = vec![Cell::new(*country)];
        cells.extend(values.iter().map(|value| match value {
            Some(v) => Cell::new(v),
            None => dim_cell("-"),
        }));
        cells.push(Cell::new(sparkline(&values)).fg(Color::Cyan));
        table.add_row(cells);
    }
    for index in 1..=years.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

fn hiring_rate_chart(rows: &[TechnologyHiringRate]) -> Table {
    let max = rows
        .iter()
        .map(|r| r.hiring_rate_pct)
        .fold(0.0_f64, f64::max);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Technology"),
        header_cell("Applications"),
        header_cell("Hires"),
        header_cell("Rate %"),
        header_cell(""),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.technology_name),
            Cell::new(row.total_applications),
            Cell::new(row.total_hires),
            Cell::new(format!("{:.2}", row.hiring_rate_pct)),
            Cell::new(bar(row.hiring_rate_pct, max, BAR_WIDTH)).fg(rate_color(row.hiring_rate_pct)),
        ]);
    }
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table
}

/// Green from 15 %, red below 10 %, yellow in between.
fn rate_color(rate: f64) -> Color {
    if rate >= 15.0 {
        Color::Green
    } else if rate < 10.0 {
        Color::Red
    } else {
        Color::Yellow
    }
}

fn scores_chart(rows: &[SeniorityScores]) -> Table {
    let max = rows
        .iter()
        .flat_map(|r| [r.avg_code_challenge, r.avg_technical_interview])
        .fold(0.0_f64, f64::max);
    let half = BAR_WIDTH / 2;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Seniority"),
        header_cell("Avg Code Challenge"),
        header_cell(""),
        header_cell("Avg Technical Interview"),
        header_cell(""),
    ]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.seniority_level),
            Cell::new(format!("{:.2}", row.avg_code_challenge)),
            Cell::new(bar(row.avg_code_challenge, max, half)).fg(Color::Magenta),
            Cell::new(format!("{:.2}", row.avg_technical_interview)),
            Cell::new(bar(row.avg_technical_interview, max, half)).fg(Color::Yellow),
        ]);
    }
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    table
}

fn apply_chart_style(table: &mut Table, styled: bool) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Disabled);
    if styled {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
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
