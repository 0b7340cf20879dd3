use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use linkform_cli::types::{LayoutPlan, TransformResult};
use linkform_transform::JobOutcome;

pub fn print_summary(result: &TransformResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run)"),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Status"),
        header_cell("Destination"),
        header_cell("Result"),
        header_cell("Form"),
        header_cell("Fields"),
        header_cell("Sections"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for outcome in &result.report.outcomes {
        table.add_row(outcome_row(outcome));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        Cell::new(format!(
            "{} ok / {} failed",
            result.report.succeeded(),
            result.report.failed()
        ))
        .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    if !result.report.hidden_skipped.is_empty() {
        println!(
            "Hidden sections not found: {}",
            result.report.hidden_skipped.join(", ")
        );
    }
    let failures: Vec<_> = result
        .report
        .outcomes
        .iter()
        .filter_map(|outcome| outcome.result.as_ref().err().map(|error| (outcome, error)))
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (outcome, error) in failures {
            eprintln!("- {}: {error}", outcome.source_table_id);
        }
    }
}

fn outcome_row(outcome: &JobOutcome) -> Vec<Cell> {
    let identity = vec![
        Cell::new(&outcome.source_table_id).add_attribute(Attribute::Bold),
        Cell::new(outcome.status.to_string()),
        Cell::new(&outcome.destination_container_id),
    ];
    let detail = match &outcome.result {
        Ok(summary) => vec![
            Cell::new("mounted").fg(Color::Green),
            Cell::new(&summary.form_id),
            Cell::new(summary.fields),
            count_cell(summary.sections),
        ],
        Err(error) => vec![
            Cell::new(error.kind()).fg(Color::Red),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ],
    };
    identity.into_iter().chain(detail).collect()
}

pub fn print_layout(plans: &[LayoutPlan]) {
    for plan in plans {
        println!("{} (status {})", plan.source_table_id, plan.status);
        let steps = match &plan.steps {
            Ok(steps) => steps,
            Err(error) => {
                eprintln!("  invalid layout: {error}");
                continue;
            }
        };
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Column"),
            header_cell("Position"),
            header_cell("Width"),
            header_cell("Section"),
            header_cell("Field"),
            header_cell("Options"),
        ]);
        apply_table_style(&mut table);
        for index in 0..3 {
            align_column(&mut table, index, CellAlignment::Right);
        }
        for step in steps {
            table.add_row(vec![
                Cell::new(step.column),
                Cell::new(step.position),
                Cell::new(step.width),
                step.section
                    .as_deref()
                    .map_or_else(|| dim_cell("-"), |label| Cell::new(label).fg(Color::Cyan)),
                Cell::new(&step.field),
                step.options
                    .map_or_else(|| dim_cell("-"), Cell::new),
            ]);
        }
        println!("{table}");
    }
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

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
