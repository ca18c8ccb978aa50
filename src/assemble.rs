use crate::{
    join::NAME_COLUMN,
    resolver::{DNS_NAME_COLUMN, NOTES_COLUMN, OS_VERSION_COLUMN, Resolution},
    table::Table,
};

pub const REAL_APP_COLUMN: &str = "Real App Name";
pub const RESOLUTION_SOURCE_COLUMN: &str = "Resolution Source";

/// Columns used only for matching and resolution; they never reach the output.
pub const INTERMEDIATE_COLUMNS: &[&str] =
    &[NAME_COLUMN, NOTES_COLUMN, OS_VERSION_COLUMN, DNS_NAME_COLUMN];

/// Drops the intermediate columns (and any stale label column) and appends the
/// resolved label, one resolution per row.
///
/// With `with_source` a `Resolution Source` column naming the deciding signal follows the label.
pub fn assemble(merged: &Table, resolutions: &[Resolution], with_source: bool) -> Table {
    let kept = merged
        .headers
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            !INTERMEDIATE_COLUMNS.contains(&name.as_str()) && name.as_str() != REAL_APP_COLUMN
        })
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    let mut headers = kept
        .iter()
        .map(|idx| merged.headers[*idx].clone())
        .collect::<Vec<_>>();
    headers.push(REAL_APP_COLUMN.to_string());
    if with_source {
        headers.push(RESOLUTION_SOURCE_COLUMN.to_string());
    }

    let rows = merged
        .rows
        .iter()
        .zip(resolutions)
        .map(|(row, resolution)| {
            let mut out = kept
                .iter()
                .map(|idx| row.get(*idx).cloned().unwrap_or_default())
                .collect::<Vec<_>>();
            out.push(resolution.label.clone());
            if with_source {
                out.push(resolution.tier.to_string());
            }
            out
        })
        .collect();

    Table { headers, rows }
}
