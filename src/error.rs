use std::fmt;

use thiserror::Error;

/// A record whose year token is not base-10 integer text.
///
/// The chart renderer collects these instead of aborting; the record is
/// left out of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearParseError {
    pub category: String,
    pub subcategory: String,
    pub year: String,
}

impl fmt::Display for YearParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year '{}' of {} - {} is not an integer",
            self.year, self.category, self.subcategory
        )
    }
}

impl std::error::Error for YearParseError {}

#[derive(Debug, Error)]
pub enum Error {
    #[error("table has {rows} rows and {cols} columns, need at least 3 rows and 2 columns")]
    EmptyTable { rows: usize, cols: usize },

    #[error("column {column}: header '{label}' does not split into year and subcategory")]
    MalformedHeader { column: usize, label: String },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("row {row}, column {column}: amount '{value}' is not a number")]
    InvalidAmount {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("no records match the current filter ({skipped} skipped for unparseable years)")]
    EmptyFilterResult { skipped: usize },

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
