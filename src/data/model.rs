use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Cell – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A typed spreadsheet cell. Workbooks and CSV files are both mapped onto
/// these three cases at the loading boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            // Shortest round-trip form: 2020.0 renders as "2020".
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl Cell {
    /// Guess a cell type from raw text: blank → `Empty`, finite numeric →
    /// `Number`. Spellings like "NaN" or "inf" stay text.
    pub fn guess(s: &str) -> Self {
        if s.trim().is_empty() {
            return Cell::Empty;
        }
        match parse_finite(s) {
            Some(v) => Cell::Number(v),
            None => Cell::Text(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – the wide input grid
// ---------------------------------------------------------------------------

/// A rectangular grid of cells. Rows 0 and 1 carry the compound column
/// headers; column 0 of every later row carries the category.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawTable {
    /// Build a table, rejecting rows whose width differs from the first row.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::RaggedRow {
                    row: i,
                    found: row.len(),
                    expected: width,
                });
            }
        }
        Ok(RawTable { rows, width })
    }

    /// Build a table from rows of unequal length, filling the short ones
    /// with `Cell::Empty`.
    pub fn padded(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        RawTable { rows, width }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.width
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.rows[row][col]
    }
}

// ---------------------------------------------------------------------------
// LongRecord – one row of the reshaped table
// ---------------------------------------------------------------------------

/// One (category, year, subcategory, amount) observation.
///
/// `year` keeps the header token exactly as it appeared; the renderer
/// parses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Subcategory")]
    pub subcategory: String,
    #[serde(rename = "Amount")]
    pub amount: Option<f64>,
}

/// Identifies one chart trace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SeriesKey {
    pub category: String,
    pub subcategory: String,
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.category, self.subcategory)
    }
}

// ---------------------------------------------------------------------------
// LongTable – reshaped records plus distinct-value indices
// ---------------------------------------------------------------------------

/// The reshaped dataset with the distinct values the filter widgets need.
#[derive(Debug, Clone, Default)]
pub struct LongTable {
    pub records: Vec<LongRecord>,
    /// Distinct categories in first-encounter order.
    pub categories: Vec<String>,
    /// Distinct subcategories in first-encounter order.
    pub subcategories: Vec<String>,
    /// Smallest and largest year among tokens that parse as integers.
    pub year_bounds: Option<(i64, i64)>,
}

impl LongTable {
    pub fn from_records(records: Vec<LongRecord>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        let mut subcategories: Vec<String> = Vec::new();
        let mut year_bounds: Option<(i64, i64)> = None;

        for rec in &records {
            if !categories.contains(&rec.category) {
                categories.push(rec.category.clone());
            }
            if !subcategories.contains(&rec.subcategory) {
                subcategories.push(rec.subcategory.clone());
            }
            if let Ok(year) = parse_year(&rec.year) {
                year_bounds = Some(match year_bounds {
                    Some((lo, hi)) => (lo.min(year), hi.max(year)),
                    None => (year, year),
                });
            }
        }

        LongTable {
            records,
            categories,
            subcategories,
            year_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse trimmed text as a finite `f64`.
pub fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a year token as base-10 integer text, ignoring surrounding spaces.
pub fn parse_year(token: &str) -> std::result::Result<i64, std::num::ParseIntError> {
    token.trim().parse::<i64>()
}
