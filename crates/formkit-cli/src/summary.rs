//! Table rendering for command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use formkit_typeahead::{NO_RESULTS_LABEL, RenderList, TagChip};

use crate::script::{StepOutcome, StepReport};

/// Ranked results, or a single no-results row.
pub fn rank_table(list: &RenderList) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Title"),
        header_cell("Value"),
        header_cell("Chip"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    if list.is_empty() {
        table.add_row(vec![
            dim_cell("-"),
            dim_cell(NO_RESULTS_LABEL),
            dim_cell("-"),
            dim_cell("-"),
        ]);
        return table;
    }
    for (index, option) in list.items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&option.title).add_attribute(Attribute::Bold),
            Cell::new(&option.value),
            Cell::new(option.chip_label()),
        ]);
    }
    table
}

/// One row per replayed step.
pub fn replay_table(reports: &[StepReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Event"),
        header_cell("Outcome"),
        header_cell("Results"),
        header_cell("Tags"),
        header_cell("Form value"),
        header_cell("Error"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for report in reports {
        let results = if report.view.is_empty {
            dim_cell(NO_RESULTS_LABEL)
        } else {
            Cell::new(report.view.results.join(", "))
        };
        table.add_row(vec![
            Cell::new(report.step),
            Cell::new(&report.event),
            outcome_cell(report),
            results,
            tags_cell(&report.view.tags),
            Cell::new(&report.view.form_value),
            match &report.view.error {
                Some(message) => Cell::new(message).fg(Color::Red),
                None => dim_cell("-"),
            },
        ]);
    }
    table
}

fn outcome_cell(report: &StepReport) -> Cell {
    let mut text = match &report.outcome {
        StepOutcome::Applied => "applied".to_string(),
        StepOutcome::Deferred => "deferred".to_string(),
        StepOutcome::Failed { error } => format!("failed: {error}"),
    };
    if report.replayed > 0 {
        text.push_str(&format!(" (+{} replayed)", report.replayed));
    }
    for failure in &report.replay_failures {
        text.push_str(&format!("\nreplay failed: {failure}"));
    }
    let color = match report.outcome {
        StepOutcome::Applied if report.replay_failures.is_empty() => Color::Green,
        StepOutcome::Applied | StepOutcome::Deferred => Color::Yellow,
        StepOutcome::Failed { .. } => Color::Red,
    };
    Cell::new(text).fg(color)
}

fn tags_cell(tags: &[TagChip]) -> Cell {
    if tags.is_empty() {
        return dim_cell("-");
    }
    let chips: Vec<String> = tags
        .iter()
        .map(|chip| {
            if chip.active {
                chip.chip.clone()
            } else {
                format!("({})", chip.chip)
            }
        })
        .collect();
    Cell::new(chips.join(" "))
}

pub fn apply_table_style(table: &mut Table) {
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
