#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};
use vm_intel_merge::table::Table;

pub const INVENTORY_HEADERS: [&str; 4] = ["Name", "Notes", "OS Version", "DNS Name"];
pub const DISCOVERY_HEADERS: [&str; 3] = ["Host", "Discovered App", "Feature Ports"];

/// Scratch directory for input exports and generated output, removed on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("read workspace file")
    }
}

pub fn inventory(rows: &[[&'static str; 4]]) -> Table {
    Table::from_rows(&INVENTORY_HEADERS, rows).expect("inventory table")
}

pub fn discovery(rows: &[[&'static str; 3]]) -> Table {
    Table::from_rows(&DISCOVERY_HEADERS, rows).expect("discovery table")
}
