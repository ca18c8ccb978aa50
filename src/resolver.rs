//! Application name resolution for a single merged VM record.
//!
//! Signals are consulted in a fixed order and the first one that yields a
//! label wins:
//!
//! 1. inventory notes, with any `RITM<digits>` ticket token removed
//! 2. a discovery classification tagged `_Recognized`
//! 3. the first open port with a known application
//! 4. the first OS fragment found in the OS version string
//! 5. DNS naming hints (`sql`, then `web`/`http`)
//!
//! Records with no usable signal get [`MANUAL_REVIEW_LABEL`].
//!
//! The port and OS tables live in [`ResolverConfig`], which the [`Resolver`]
//! owns and never mutates.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{notes::normalize_notes, table::Table};

pub const MANUAL_REVIEW_LABEL: &str = "UNKNOWN - Needs Manual Review";
pub const RECOGNIZED_SUFFIX: &str = "_Recognized";

pub const NOTES_COLUMN: &str = "Notes";
pub const DISCOVERED_APP_COLUMN: &str = "Discovered App";
pub const FEATURE_PORTS_COLUMN: &str = "Feature Ports";
pub const OS_VERSION_COLUMN: &str = "OS Version";
pub const DNS_NAME_COLUMN: &str = "DNS Name";

const DEFAULT_PORTS: &[(i64, &str)] = &[
    (53, "DNS Server"),
    (80, "Web Server"),
    (443, "Secure Web Server"),
    (22, "SSH Server"),
    (3306, "MySQL Database"),
    (1433, "Microsoft SQL Server"),
    (3389, "Remote Desktop"),
    (5007, "Palo Alto"),
    (67, "DHCP Server"),
    (445, "SMB/File Services"),
    (8530, "Custom Application"),
    (647, "Custom Service"),
];

const DEFAULT_OS_RULES: &[(&str, &str)] = &[
    ("CentOS", "Nutanix"),
    ("PanOS", "Palo Alto"),
    ("Windows Server", "Windows Server"),
    ("ESXi", "VMware Hypervisor"),
    ("Nutanix", "Nutanix CVM"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OsRule {
    pub fragment: String,
    pub label: String,
}

/// Immutable lookup data consulted by the port and OS tiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolverConfig {
    #[serde(default = "default_ports")]
    pub ports: BTreeMap<i64, String>,
    /// Checked in declaration order; the first fragment contained in the OS version wins.
    #[serde(default = "default_os_rules")]
    pub os: Vec<OsRule>,
}

fn default_ports() -> BTreeMap<i64, String> {
    DEFAULT_PORTS
        .iter()
        .map(|(port, label)| (*port, label.to_string()))
        .collect()
}

fn default_os_rules() -> Vec<OsRule> {
    DEFAULT_OS_RULES
        .iter()
        .map(|(fragment, label)| OsRule {
            fragment: fragment.to_string(),
            label: label.to_string(),
        })
        .collect()
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ports: default_ports(),
            os: default_os_rules(),
        }
    }
}

/// Which signal produced a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Notes,
    DiscoveredApp,
    Ports,
    Os,
    Dns,
    Fallback,
}

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Notes,
        Tier::DiscoveredApp,
        Tier::Ports,
        Tier::Os,
        Tier::Dns,
        Tier::Fallback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Notes => "notes",
            Tier::DiscoveredApp => "discovered-app",
            Tier::Ports => "ports",
            Tier::Os => "os",
            Tier::Dns => "dns",
            Tier::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub label: String,
    pub tier: Tier,
}

impl Resolution {
    fn new(label: impl Into<String>, tier: Tier) -> Self {
        Self {
            label: label.into(),
            tier,
        }
    }
}

/// The fields of one merged record the resolver looks at. `None` means the column is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSignals<'a> {
    pub notes: Option<&'a str>,
    pub discovered_app: Option<&'a str>,
    pub feature_ports: Option<&'a str>,
    pub os_version: Option<&'a str>,
    pub dns_name: Option<&'a str>,
}

impl<'a> RecordSignals<'a> {
    /// Reads the signal columns of row `row` by exact header name.
    pub fn from_table(table: &'a Table, columns: &SignalColumns, row: usize) -> Self {
        let cells = &table.rows[row];
        let cell = move |idx: Option<usize>| idx.and_then(|i| cells.get(i)).map(String::as_str);
        Self {
            notes: cell(columns.notes),
            discovered_app: cell(columns.discovered_app),
            feature_ports: cell(columns.feature_ports),
            os_version: cell(columns.os_version),
            dns_name: cell(columns.dns_name),
        }
    }
}

/// Header positions of the signal columns, looked up once per table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalColumns {
    notes: Option<usize>,
    discovered_app: Option<usize>,
    feature_ports: Option<usize>,
    os_version: Option<usize>,
    dns_name: Option<usize>,
}

impl SignalColumns {
    pub fn locate(table: &Table) -> Self {
        Self {
            notes: table.column_index(NOTES_COLUMN),
            discovered_app: table.column_index(DISCOVERED_APP_COLUMN),
            feature_ports: table.column_index(FEATURE_PORTS_COLUMN),
            os_version: table.column_index(OS_VERSION_COLUMN),
            dns_name: table.column_index(DNS_NAME_COLUMN),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn resolve_label(&self, record: &RecordSignals<'_>) -> String {
        self.resolve(record).label
    }

    pub fn resolve(&self, record: &RecordSignals<'_>) -> Resolution {
        let notes = normalize_notes(record.notes);
        if !notes.trim().is_empty() {
            return Resolution::new(notes.into_owned(), Tier::Notes);
        }
        if let Some(label) = recognized_app(record.discovered_app.unwrap_or("")) {
            return Resolution::new(label, Tier::DiscoveredApp);
        }
        if let Some(label) = self.port_label(record.feature_ports.unwrap_or("")) {
            return Resolution::new(label, Tier::Ports);
        }
        if let Some(label) = self.os_label(record.os_version.unwrap_or("")) {
            return Resolution::new(label, Tier::Os);
        }
        if let Some(label) = dns_label(record.dns_name.unwrap_or("")) {
            return Resolution::new(label, Tier::Dns);
        }
        Resolution::new(MANUAL_REVIEW_LABEL, Tier::Fallback)
    }

    fn port_label(&self, ports: &str) -> Option<&str> {
        if ports.trim().is_empty() {
            return None;
        }
        ports
            .split(',')
            .filter_map(|token| token.trim().parse::<i64>().ok())
            .find_map(|port| self.config.ports.get(&port))
            .map(String::as_str)
    }

    fn os_label(&self, os_version: &str) -> Option<&str> {
        let os_version = os_version.trim();
        self.config
            .os
            .iter()
            .find(|rule| os_version.contains(rule.fragment.as_str()))
            .map(|rule| rule.label.as_str())
    }
}

// Every occurrence of the tag is removed, not just the trailing one.
fn recognized_app(discovered: &str) -> Option<String> {
    if !discovered.ends_with(RECOGNIZED_SUFFIX) {
        return None;
    }
    let name = discovered.replace(RECOGNIZED_SUFFIX, "");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn dns_label(dns_name: &str) -> Option<&'static str> {
    let dns_name = dns_name.to_lowercase();
    if dns_name.contains("sql") {
        Some("SQL Server")
    } else if dns_name.contains("web") || dns_name.contains("http") {
        Some("Web Server")
    } else {
        None
    }
}
