//! The three boundary operations of a reconciliation run.
//!
//! A caller validates both source tables, merges discovery against inventory,
//! then resolves the merged table into the final output. [`run`] chains the
//! three and stops at the first failure.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::{
    assemble,
    error::Result,
    join::{self, JoinStats},
    resolver::{RecordSignals, Resolution, Resolver, SignalColumns, Tier},
    schema::{
        self, DISCOVERY_REQUIRED, DISCOVERY_SOURCE, INVENTORY_REQUIRED, INVENTORY_SOURCE,
        SchemaError,
    },
    table::Table,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Append a `Resolution Source` column after `Real App Name`.
    pub with_source: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub join: JoinStats,
    pub tiers: BTreeMap<Tier, usize>,
}

impl RunSummary {
    pub fn count(&self, tier: Tier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or(0)
    }

    pub fn needs_review(&self) -> usize {
        self.count(Tier::Fallback)
    }
}

pub fn validate(
    table: &Table,
    required: &[&str],
    source: &str,
) -> std::result::Result<(), SchemaError> {
    schema::validate_table(table, required, source)
}

pub fn merge(discovery: &Table, inventory: &Table) -> Result<(Table, JoinStats)> {
    info!("Matching records across files");
    Ok(join::merge(discovery, inventory)?)
}

/// Resolves every merged row independently and assembles the output table.
pub fn resolve(
    merged: &Table,
    resolver: &Resolver,
    options: RunOptions,
) -> (Table, BTreeMap<Tier, usize>) {
    info!("Analyzing multiple intelligence sources");
    let columns = SignalColumns::locate(merged);
    let resolutions = (0..merged.row_count())
        .map(|row| {
            let signals = RecordSignals::from_table(merged, &columns, row);
            let resolution = resolver.resolve(&signals);
            debug!("Row {}: '{}' via {}", row + 1, resolution.label, resolution.tier);
            resolution
        })
        .collect::<Vec<Resolution>>();

    let mut tiers = BTreeMap::new();
    for resolution in &resolutions {
        *tiers.entry(resolution.tier).or_insert(0) += 1;
    }
    let breakdown = Tier::ALL
        .iter()
        .map(|tier| format!("{}={}", tier, tiers.get(tier).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(", ");
    info!("Resolved {} row(s): {}", resolutions.len(), breakdown);

    (assemble::assemble(merged, &resolutions, options.with_source), tiers)
}

/// Validates, merges and resolves. Schema problems abort before any join happens.
pub fn run(
    inventory: &Table,
    discovery: &Table,
    resolver: &Resolver,
    options: RunOptions,
) -> Result<(Table, RunSummary)> {
    validate(inventory, INVENTORY_REQUIRED, INVENTORY_SOURCE)?;
    validate(discovery, DISCOVERY_REQUIRED, DISCOVERY_SOURCE)?;
    let (merged, join) = merge(discovery, inventory)?;
    let (output, tiers) = resolve(&merged, resolver, options);
    Ok((output, RunSummary { join, tiers }))
}
