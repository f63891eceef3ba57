//! Long-table export: CSV bytes for download, Parquet for analytics.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::data::model::LongRecord;
use crate::error::Result;

/// Suggested attachment name for [`to_csv`] output.
pub const CSV_FILE_NAME: &str = "transformed_data.csv";

/// Suggested file name for [`write_parquet`] output.
pub const PARQUET_FILE_NAME: &str = "transformed_data.parquet";

pub const COLUMNS: [&str; 4] = ["Category", "Year", "Subcategory", "Amount"];

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Encode records as UTF-8 CSV with a `Category,Year,Subcategory,Amount`
/// header. Empty amounts become empty fields.
pub fn to_csv(records: &[LongRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for rec in records {
        let amount = rec.amount.map(|a| a.to_string()).unwrap_or_default();
        writer.write_record([
            rec.category.as_str(),
            rec.year.as_str(),
            rec.subcategory.as_str(),
            amount.as_str(),
        ])?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| crate::error::Error::Io(e.into_error()))
}

/// Write [`to_csv`] output to `path`.
pub fn write_csv(path: &Path, records: &[LongRecord]) -> Result<()> {
    let bytes = to_csv(records)?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

fn long_schema() -> Schema {
    Schema::new(vec![
        Field::new(COLUMNS[0], DataType::Utf8, false),
        Field::new(COLUMNS[1], DataType::Utf8, false),
        Field::new(COLUMNS[2], DataType::Utf8, false),
        Field::new(COLUMNS[3], DataType::Float64, true),
    ])
}

/// Write records as a single-batch Parquet file to `writer`.
pub fn to_parquet<W: Write + Send>(records: &[LongRecord], writer: W) -> Result<()> {
    let schema = Arc::new(long_schema());

    let category = StringArray::from(records.iter().map(|r| r.category.as_str()).collect::<Vec<_>>());
    let year = StringArray::from(records.iter().map(|r| r.year.as_str()).collect::<Vec<_>>());
    let subcategory =
        StringArray::from(records.iter().map(|r| r.subcategory.as_str()).collect::<Vec<_>>());
    let amount = Float64Array::from(records.iter().map(|r| r.amount).collect::<Vec<_>>());

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(category),
            Arc::new(year),
            Arc::new(subcategory),
            Arc::new(amount),
        ],
    )?;

    let mut writer = ArrowWriter::try_new(writer, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

/// Write [`to_parquet`] output to `path`.
pub fn write_parquet(path: &Path, records: &[LongRecord]) -> Result<()> {
    let file = File::create(path)?;
    to_parquet(records, file)?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
