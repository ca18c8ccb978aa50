//! Required-column validation tolerant of naming variance.
//!
//! Column names are compared after trimming, lower-casing and dropping spaces
//! and underscores, so `DNS Name`, `dns_name` and ` DnsName ` all satisfy a
//! required `DNS Name`. When a required column is missing, any actual column
//! whose normalized name contains the required one is offered as a suggestion.
//!
//! The first missing column that has suggestions aborts validation right
//! away; missing columns without suggestions are collected and reported
//! together once every required column has been checked.

use std::collections::HashSet;

use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::table::Table;

pub const INVENTORY_SOURCE: &str = "Inventory";
pub const DISCOVERY_SOURCE: &str = "Discovery";

pub const INVENTORY_REQUIRED: &[&str] = &["Name", "Notes", "OS Version", "DNS Name"];
pub const DISCOVERY_REQUIRED: &[&str] = &["Host", "Discovered App", "Feature Ports"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error(
        "{table} missing '{column}' column. Similar columns found: {}\nPlease rename to '{column}' or update the code.",
        .similar.join(", ")
    )]
    MissingWithSuggestions {
        table: String,
        column: String,
        similar: Vec<String>,
    },

    #[error(
        "{table} missing required columns: {}\nRequired columns for {table}:\n- {}",
        .missing.join(", "),
        .required.join("\n- ")
    )]
    MissingColumns {
        table: String,
        missing: Vec<String>,
        required: Vec<String>,
    },
}

impl SchemaError {
    /// Name of the table the error refers to.
    pub fn source_label(&self) -> &str {
        match self {
            SchemaError::MissingWithSuggestions { table, .. }
            | SchemaError::MissingColumns { table, .. } => table,
        }
    }
}

pub fn normalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|ch| *ch != ' ' && *ch != '_')
        .collect()
}

/// Checks `headers` against `required`, in the order `required` lists them.
pub fn validate_headers(
    headers: &[String],
    required: &[&str],
    source: &str,
) -> Result<(), SchemaError> {
    let normalized = headers
        .iter()
        .map(|header| normalize_column_name(header))
        .collect::<Vec<_>>();
    let present: HashSet<&str> = normalized.iter().map(String::as_str).collect();
    let mut missing = Vec::new();

    for column in required {
        let wanted = normalize_column_name(column);
        if present.contains(wanted.as_str()) {
            continue;
        }
        let similar = headers
            .iter()
            .zip(&normalized)
            .filter(|(_, candidate)| candidate.contains(wanted.as_str()))
            .map(|(original, _)| original.clone())
            .collect::<Vec<_>>();
        if !similar.is_empty() {
            return Err(SchemaError::MissingWithSuggestions {
                table: source.to_string(),
                column: column.to_string(),
                similar,
            });
        }
        debug!("{source} has no column resembling '{column}'");
        missing.push(column.to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns {
            table: source.to_string(),
            missing,
            required: required.iter().map(|c| c.to_string()).collect_vec(),
        })
    }
}

pub fn validate_table(table: &Table, required: &[&str], source: &str) -> Result<(), SchemaError> {
    validate_headers(&table.headers, required, source)
}
