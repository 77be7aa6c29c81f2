//! Result display: terminal tables or JSON.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use tdx_cli::pipeline::RunOutput;
use tdx_model::{Palette, QueryType};
use tdx_query::{GroupCounts, QueryResult, WeeklyCounts};

use crate::cli::OutputFormatArg;

/// Longest bar drawn in the weekly table.
const BAR_WIDTH: usize = 40;

pub fn print_result(output: &RunOutput, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Table => {
            print_table(output);
            Ok(())
        }
        OutputFormatArg::Json => print_json(output),
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: String,
    query: QueryType,
    color: Palette,
    #[serde(skip_serializing_if = "Option::is_none")]
    building: Option<&'a str>,
    result: &'a QueryResult,
}

fn print_json(output: &RunOutput) -> Result<()> {
    let document = JsonDocument {
        title: output.title(),
        query: output.options.query_type,
        color: output.options.color,
        building: output.building_name.as_deref(),
        result: &output.result,
    };
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn print_table(output: &RunOutput) {
    println!("{}", output.title());
    let table = match &output.result {
        QueryResult::Weekly(weekly) => weekly_table(weekly, output.options.color),
        QueryResult::Grouped(counts) => {
            let key = match output.options.query_type {
                QueryType::PerRoom => "Room",
                _ => "Building",
            };
            grouped_table(key, counts)
        }
    };
    println!("{table}");
}

fn weekly_table(weekly: &WeeklyCounts, color: Palette) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Week"),
        header_cell("Starting"),
        header_cell("Tickets"),
        header_cell(""),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let max = weekly.weeks.iter().map(|w| w.count).max().unwrap_or(0);
    let bar_color = palette_color(color);
    for week in &weekly.weeks {
        table.add_row(vec![
            Cell::new(week.week),
            Cell::new(week.start.format("%Y-%m-%d")),
            count_cell(week.count),
            Cell::new(bar(week.count, max)).fg(bar_color),
        ]);
    }
    table.add_row(vec![
        total_cell("TOTAL"),
        dim_cell("-"),
        total_cell(weekly.total()),
        Cell::new(""),
    ]);
    table
}

fn grouped_table(key: &str, counts: &GroupCounts) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(key), header_cell("Tickets")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, count) in counts.iter() {
        table.add_row(vec![Cell::new(name), count_cell(count)]);
    }
    table.add_row(vec![total_cell("TOTAL"), total_cell(counts.total())]);
    table
}

/// Bar scaled so the busiest week spans [`BAR_WIDTH`] cells.
fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH).div_ceil(max);
    "█".repeat(width)
}

fn palette_color(color: Palette) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb { r, g, b }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn total_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
