/// Data layer: typed grid, loading, reshaping and filtering.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .ods / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  two header rows → Vec<LongRecord>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection: years, categories, subcategories
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod reshape;
pub mod filter;
