//! YAML persistence for the resolver's port and OS tables.
//!
//! ```yaml
//! ports:
//!   80: Web Server
//!   8443: Admin Console
//! os:
//!   - fragment: CentOS
//!     label: Nutanix
//! ```
//!
//! Either key may be omitted, in which case the built-in table is kept.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;

use crate::{cli::MappingsArgs, preview, resolver::ResolverConfig};

pub fn load(path: &Path) -> Result<ResolverConfig> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Opening mappings file {path:?}"))?;
    parse(&raw).with_context(|| format!("Parsing mappings file {path:?}"))
}

pub fn parse(input: &str) -> Result<ResolverConfig> {
    if input.trim().is_empty() {
        return Ok(ResolverConfig::default());
    }
    Ok(serde_yaml::from_str(input)?)
}

pub fn to_string(config: &ResolverConfig) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

pub fn save(path: &Path, config: &ResolverConfig) -> Result<()> {
    let serialized = to_string(config)?;
    fs::write(path, serialized).with_context(|| format!("Writing mappings file {path:?}"))
}

/// Loads the configured tables, or the built-in ones when no file is given.
pub fn load_or_default(path: Option<&Path>) -> Result<ResolverConfig> {
    match path {
        Some(path) => {
            let config = load(path)?;
            info!(
                "Loaded {} port and {} OS mapping(s) from {:?}",
                config.ports.len(),
                config.os.len(),
                path
            );
            Ok(config)
        }
        None => Ok(ResolverConfig::default()),
    }
}

pub fn execute(args: &MappingsArgs) -> Result<()> {
    let config = load_or_default(args.mappings.as_deref())?;
    if let Some(output) = &args.output {
        save(output, &config)?;
        info!("Mapping tables written to {:?}", output);
        return Ok(());
    }

    let headers = vec!["port".to_string(), "application".to_string()];
    let rows = config
        .ports
        .iter()
        .map(|(port, label)| vec![port.to_string(), label.clone()])
        .collect::<Vec<_>>();
    print!("{}", preview::render(&headers, &rows));
    println!();

    let headers = vec![
        "#".to_string(),
        "os fragment".to_string(),
        "application".to_string(),
    ];
    let rows = config
        .os
        .iter()
        .enumerate()
        .map(|(idx, rule)| {
            vec![
                (idx + 1).to_string(),
                rule.fragment.clone(),
                rule.label.clone(),
            ]
        })
        .collect::<Vec<_>>();
    print!("{}", preview::render(&headers, &rows));
    Ok(())
}
