use std::borrow::Cow;
use std::fmt::Write as _;

use crate::table::Table;

/// Renders headers and rows as left-aligned columns separated by two spaces.
pub fn render(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(flatten(cell).chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", format_line(headers.iter().map(String::as_str), &widths));
    let rule = widths
        .iter()
        .map(|w| "-".repeat((*w).max(3)))
        .collect::<Vec<_>>();
    let rule_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", format_line(rule.iter().map(String::as_str), &rule_widths));
    for row in rows {
        let cells = row.iter().map(|cell| flatten(cell)).collect::<Vec<_>>();
        let _ = writeln!(output, "{}", format_line(cells.iter().map(|c| &**c), &widths));
    }
    output
}

/// Renders the first `limit` rows of `table`.
pub fn render_head(table: &Table, limit: usize) -> String {
    let end = limit.min(table.rows.len());
    render(&table.headers, &table.rows[..end])
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    line.truncate(line.trim_end().len());
    line
}

// Embedded line breaks and tabs would break column alignment.
fn flatten(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
