use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::MergeArgs,
    io_utils, mappings,
    pipeline::{self, RunOptions},
    preview,
    resolver::Resolver,
};

/// Loads both exports, runs the pipeline and writes the cross-referenced table.
pub fn execute(args: &MergeArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let resolver = Resolver::new(mappings::load_or_default(args.mappings.as_deref())?);

    info!("Loading inventory {:?}", args.inventory);
    let inventory_delimiter = io_utils::resolve_delimiter(&args.inventory, args.delimiter);
    let inventory = io_utils::read_table(&args.inventory, inventory_delimiter, encoding)
        .with_context(|| format!("Loading inventory from {:?}", args.inventory))?;

    info!("Loading discovery {:?}", args.discovery);
    let discovery_delimiter = io_utils::resolve_delimiter(&args.discovery, args.delimiter);
    let discovery = io_utils::read_table(&args.discovery, discovery_delimiter, encoding)
        .with_context(|| format!("Loading discovery from {:?}", args.discovery))?;

    let options = RunOptions {
        with_source: args.with_source,
    };
    let (output, summary) = pipeline::run(&inventory, &discovery, &resolver, options)?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| io_utils::default_output_path(&args.discovery));
    info!("Generating final output {:?}", output_path);
    let output_delimiter = io_utils::resolve_delimiter(&output_path, None);
    io_utils::write_table(&output_path, output_delimiter, &output)?;

    info!(
        "Enhanced file saved: {:?} ({} row(s), {} need manual review)",
        output_path,
        output.row_count(),
        summary.needs_review()
    );
    if let Some(limit) = args.preview {
        print!("{}", preview::render_head(&output, limit));
    }
    Ok(())
}
