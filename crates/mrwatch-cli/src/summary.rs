//! Iteration summary rendering for the `once` command.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

/// What one iteration fetched and published.
#[derive(Debug, Clone)]
pub struct IterationSummary {
    pub task_count: usize,
    pub merge_request_count: usize,
    pub tables: Vec<TableSummary>,
}

/// One published table and its data row count.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
}

pub fn print_summary(summary: &IterationSummary) {
    println!("Merge requests: {}", summary.merge_request_count);
    println!("Graded tasks: {}", summary.task_count);
    println!("{}", render_tables(summary));
}

fn render_tables(summary: &IterationSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Rows"]);
    apply_table_style(&mut table);
    for entry in &summary.tables {
        table.add_row(vec![
            Cell::new(&entry.name),
            Cell::new(entry.rows).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}
