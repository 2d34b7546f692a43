use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nametag::{FileStatus, MatchResult, PatternSet, RunReport};

pub fn print_report(report: &RunReport, dry_run: bool) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Pattern"),
        header_cell("Changes"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);

    for file in &report.files {
        let changes = if file.changes.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(
                file.changes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            )
        };
        table.add_row(vec![
            Cell::new(file.path.display()),
            match &file.pattern {
                Some(label) => Cell::new(label),
                None => dim_cell("-"),
            },
            changes,
            status_cell(&file.status),
        ]);
    }
    println!("{table}");

    let verb = if dry_run { "would write" } else { "written" };
    println!(
        "{} files: {} {verb}, {} unchanged, {} no match, {} failed",
        report.files.len(),
        report.written(),
        report.unchanged(),
        report.no_match(),
        report.failed()
    );
    if report.aborted {
        eprintln!("Stopped after the first failure (--fail-fast).");
    }

    let failures: Vec<_> = report
        .files
        .iter()
        .filter_map(|f| match &f.status {
            FileStatus::Failed(msg) => Some((f.path.display(), msg)),
            _ => None,
        })
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (path, msg) in failures {
            eprintln!("- {path}: {msg}");
        }
    }
}

pub fn print_check(results: &[(String, MatchResult)]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Pattern"),
        header_cell("Tags"),
    ]);
    apply_table_style(&mut table);

    for (name, result) in results {
        let row = match result {
            MatchResult::Matched { label, tags, .. } => vec![
                Cell::new(name),
                Cell::new(label),
                Cell::new(
                    tags.iter()
                        .map(|(field, value)| format!("{field}: {value}"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                ),
            ],
            MatchResult::NoMatch => vec![
                Cell::new(name),
                dim_cell("-"),
                Cell::new("no match").fg(Color::Yellow),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_patterns(patterns: &PatternSet) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Fields"),
        header_cell("Regex"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    for (i, pattern) in patterns.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            match pattern.name() {
                Some(name) => Cell::new(name),
                None => dim_cell("-"),
            },
            Cell::new(
                pattern
                    .fields()
                    .map(|f| f.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Cell::new(pattern.source()),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn status_cell(status: &FileStatus) -> Cell {
    let cell = Cell::new(status.label());
    match status {
        FileStatus::Written => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        FileStatus::WouldWrite => cell.fg(Color::Cyan),
        FileStatus::Unchanged => cell.add_attribute(Attribute::Dim),
        FileStatus::NoMatch => cell.fg(Color::Yellow),
        FileStatus::Failed(_) => cell.fg(Color::Red).add_attribute(Attribute::Bold),
    }
}
