pub mod assemble;
pub mod cli;
pub mod error;
pub mod io_utils;
pub mod join;
pub mod mappings;
pub mod notes;
pub mod pipeline;
pub mod preview;
pub mod process;
pub mod resolver;
pub mod schema;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

pub use crate::error::MergeError;
pub use crate::notes::normalize_notes;
pub use crate::pipeline::{merge, resolve, run as run_pipeline, validate};
pub use crate::resolver::{Resolver, ResolverConfig};
pub use crate::table::Table;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("vm_intel_merge", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Merge(args) => process::execute(&args),
        Commands::Mappings(args) => mappings::execute(&args),
    }
}
