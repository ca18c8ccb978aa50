use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow};
use log::{debug, info};

use crate::table::Table;

pub const HOST_COLUMN: &str = "Host";
pub const NAME_COLUMN: &str = "Name";

/// Join key for a discovery `Host` value: everything before the first colon.
pub fn derive_join_key(host: &str) -> &str {
    host.split_once(':').map_or(host, |(name, _)| name)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    pub output_rows: usize,
}

/// Left outer join of `discovery` against `inventory` on the derived host name.
///
/// Keys compare exactly. Every discovery row appears at least once; duplicate
/// inventory names multiply the matching discovery row.
pub fn merge(discovery: &Table, inventory: &Table) -> Result<(Table, JoinStats)> {
    let host_idx = discovery
        .column_index(HOST_COLUMN)
        .ok_or_else(|| anyhow!("Column '{HOST_COLUMN}' not found in discovery table"))?;
    let name_idx = inventory
        .column_index(NAME_COLUMN)
        .ok_or_else(|| anyhow!("Column '{NAME_COLUMN}' not found in inventory table"))?;

    // Discovery may already carry a `Name` column; the derived key replaces it.
    let existing_name_idx = discovery.column_index(NAME_COLUMN);
    let mut left_headers = discovery.headers.clone();
    if existing_name_idx.is_none() {
        left_headers.push(NAME_COLUMN.to_string());
    }

    let lookup = build_inventory_lookup(inventory, name_idx);
    let (headers, right_columns) = build_output_headers(&left_headers, &inventory.headers, name_idx);

    let mut merged = Table::new(headers);
    let mut stats = JoinStats::default();
    for row in &discovery.rows {
        let host = row.get(host_idx).map(String::as_str).unwrap_or("");
        let key = derive_join_key(host);
        let mut left = row.clone();
        match existing_name_idx {
            Some(idx) => left[idx] = key.to_string(),
            None => left.push(key.to_string()),
        }

        match lookup.get(key) {
            Some(bucket) => {
                stats.matched_rows += 1;
                for inventory_row in bucket {
                    let mut combined = left.clone();
                    combined.extend(
                        right_columns
                            .iter()
                            .map(|idx| inventory_row.get(*idx).cloned().unwrap_or_default()),
                    );
                    merged.push_row(combined)?;
                }
            }
            None => {
                debug!("No inventory record for host '{host}'");
                stats.unmatched_rows += 1;
                let mut combined = left;
                combined.extend(right_columns.iter().map(|_| String::new()));
                merged.push_row(combined)?;
            }
        }
    }
    stats.output_rows = merged.row_count();
    info!(
        "Join complete: {} output row(s), {} matched and {} unmatched discovery row(s)",
        stats.output_rows, stats.matched_rows, stats.unmatched_rows
    );
    Ok((merged, stats))
}

fn build_inventory_lookup(inventory: &Table, name_idx: usize) -> HashMap<&str, Vec<&Vec<String>>> {
    let mut map: HashMap<&str, Vec<&Vec<String>>> = HashMap::new();
    for row in &inventory.rows {
        let key = row.get(name_idx).map(String::as_str).unwrap_or("");
        map.entry(key).or_default().push(row);
    }
    map
}

/// Merged header list plus the inventory column indices that follow the discovery columns.
fn build_output_headers(
    left_headers: &[String],
    right_headers: &[String],
    right_key_idx: usize,
) -> (Vec<String>, Vec<usize>) {
    let mut headers = left_headers.to_vec();
    let mut seen: HashSet<String> = headers.iter().cloned().collect();
    let mut right_columns = Vec::new();

    for (idx, name) in right_headers.iter().enumerate() {
        if idx == right_key_idx {
            continue;
        }
        let mut candidate = name.clone();
        let mut counter = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("right_{name}_{counter}");
            counter += 1;
        }
        seen.insert(candidate.clone());
        headers.push(candidate);
        right_columns.push(idx);
    }

    (headers, right_columns)
}
