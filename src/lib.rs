//! Reshape two-row-header spreadsheets into long-form
//! `(Category, Year, Subcategory, Amount)` tables, export them, and build
//! filtered line charts from them.

pub mod chart;
pub mod color;
pub mod data;
pub mod error;
pub mod export;

pub use chart::{ChartOptions, ChartSpec, Rendered, Trace, render};
pub use data::filter::FilterSelection;
pub use data::model::{Cell, LongRecord, LongTable, RawTable, SeriesKey};
pub use data::reshape::reshape;
pub use error::{Error, Result, YearParseError};
pub use export::{to_csv, to_parquet};
