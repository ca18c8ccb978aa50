//! Logical in-memory table shared by every pipeline stage.
//!
//! Both source exports are fully materialized into a [`Table`] before any
//! matching happens. Cells are plain strings; an empty cell stands for a
//! missing value, which is also what unmatched join rows carry.

use anyhow::{Result, ensure};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a table from string-like cells, checking every row has one cell per header.
    pub fn from_rows<H, R, C>(headers: &[H], rows: &[R]) -> Result<Self>
    where
        H: AsRef<str>,
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let mut table = Self::new(headers.iter().map(|h| h.as_ref().to_string()).collect());
        for row in rows {
            table.push_row(row.as_ref().iter().map(|cell| cell.as_ref().to_string()).collect())?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        ensure!(
            row.len() == self.headers.len(),
            "Row {} has {} field(s) but the header declares {}",
            self.rows.len() + 1,
            row.len(),
            self.headers.len()
        );
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell for `column` in row `row`, or `None` when either is out of range.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Collects every value of `column`, in row order.
    pub fn column_values(&self, column: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(column)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }
}
