//! Row-source types and classified batch errors.

use thiserror::Error;

/// Input shapes the row sources understand. The CLI sniffs this from the
/// file extension; callers embedding the library pick it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFormat {
    /// Comma-separated text, first row = headers.
    Delimited,
    /// Whitespace-delimited lines from a table-extraction collaborator.
    ExtractedTable,
}

/// Terminal batch-level failures. Row-level problems never surface here;
/// a bad row is dropped silently and only the aggregate count is visible.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("statement input is empty")]
    EmptyInput,

    #[error("unsupported statement format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read delimited rows")]
    Csv(#[from] csv::Error),

    #[error("no rows detected in statement")]
    NoRows,

    #[error("no valid transactions could be extracted from {rows} rows")]
    NoTransactions { rows: usize },
}

/// One raw statement row: `(original header, raw cell)` pairs in original
/// column order. Order matters — ambiguous headers resolve to the first
/// column position, and that is part of the contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut row = Self::new();
        for (header, value) in pairs {
            row.push(header, value);
        }
        row
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Exact-header lookup (first occurrence).
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Columns in original order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell value is empty (such rows are discarded at the
    /// source boundary).
    pub fn all_values_empty(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }
}
