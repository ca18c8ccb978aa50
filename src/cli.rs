use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Cross-reference VM inventory notes with discovery results to name each host's application",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge an inventory export with a discovery export and resolve application names
    Merge(MergeArgs),
    /// Print the port and OS tables used to name applications, or export them as YAML
    Mappings(MappingsArgs),
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Inventory export (Iteration 0) with Name, Notes, OS Version and DNS Name columns
    pub inventory: PathBuf,
    /// Discovery export (Iteration 1) with Host, Discovered App and Feature Ports columns
    pub discovery: PathBuf,
    /// Output file (defaults to `<discovery>_crossreferenced.<ext>` next to the discovery file)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// Delimiter for both input files (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input files (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file overriding the built-in port and OS tables
    #[arg(short = 'm', long = "mappings")]
    pub mappings: Option<PathBuf>,
    /// Print the first N output rows as a table after writing
    #[arg(long)]
    pub preview: Option<usize>,
    /// Add a `Resolution Source` column naming the signal that decided each row
    #[arg(long = "with-source")]
    pub with_source: bool,
}

#[derive(Debug, Args)]
pub struct MappingsArgs {
    /// YAML file overriding the built-in tables
    #[arg(short = 'm', long = "mappings")]
    pub mappings: Option<PathBuf>,
    /// Write the effective tables as YAML instead of printing them
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
