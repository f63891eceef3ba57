use crate::error::{Error, Result};

use super::model::{Cell, LongRecord, RawTable, parse_finite};

/// Label of column 0 once the header rows are folded into one.
pub const CATEGORY_LABEL: &str = "Category";

/// Joins the year row and the subcategory row into one label.
pub const LABEL_SEPARATOR: char = '_';

/// Fold the two header rows into one label per column.
///
/// The first entry is always [`CATEGORY_LABEL`]; entry `c` for `c >= 1` is
/// `row0 + "_" + row1` with leading and trailing separators stripped, so an
/// empty cell on either row leaves just the other value.
pub fn compound_labels(table: &RawTable) -> Vec<String> {
    let mut labels = Vec::with_capacity(table.n_cols());
    labels.push(CATEGORY_LABEL.to_string());
    for col in 1..table.n_cols() {
        let joined = format!(
            "{}{LABEL_SEPARATOR}{}",
            table.cell(0, col),
            table.cell(1, col)
        );
        labels.push(joined.trim_matches(LABEL_SEPARATOR).to_string());
    }
    labels
}

/// Split a compound label into its (year, subcategory) tokens.
///
/// Anything other than exactly two tokens is a malformed header; extra
/// separators are never assigned to either side.
pub fn split_label(column: usize, label: &str) -> Result<(String, String)> {
    let mut parts = label.split(LABEL_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(subcategory), None) => Ok((year.to_string(), subcategory.to_string())),
        _ => Err(Error::MalformedHeader {
            column,
            label: label.to_string(),
        }),
    }
}

/// Reshape a wide two-header-row table into long records.
///
/// Emits one record per (data column, data row), columns outermost, in
/// input order. Any structural problem fails the whole call.
pub fn reshape(table: &RawTable) -> Result<Vec<LongRecord>> {
    if table.n_rows() < 3 || table.n_cols() < 2 {
        return Err(Error::EmptyTable {
            rows: table.n_rows(),
            cols: table.n_cols(),
        });
    }

    let labels = compound_labels(table);
    let headers: Vec<(String, String)> = labels
        .iter()
        .enumerate()
        .skip(1)
        .map(|(col, label)| split_label(col, label))
        .collect::<Result<_>>()?;

    let data_rows = 2..table.n_rows();
    let mut records = Vec::with_capacity(data_rows.len() * headers.len());

    for (offset, (year, subcategory)) in headers.iter().enumerate() {
        let col = offset + 1;
        for row in data_rows.clone() {
            records.push(LongRecord {
                category: table.cell(row, 0).to_string(),
                year: year.clone(),
                subcategory: subcategory.clone(),
                amount: amount_of(table.cell(row, col), row, col)?,
            });
        }
    }

    log::debug!(
        "Reshaped {}x{} table into {} records",
        table.n_rows(),
        table.n_cols(),
        records.len()
    );
    Ok(records)
}

/// Amounts must be finite; NaN and infinities are rejected like any other
/// non-numeric text.
fn amount_of(cell: &Cell, row: usize, column: usize) -> Result<Option<f64>> {
    let invalid = || Error::InvalidAmount {
        row,
        column,
        value: cell.to_string(),
    };
    match cell {
        Cell::Number(v) if v.is_finite() => Ok(Some(*v)),
        Cell::Number(_) => Err(invalid()),
        Cell::Empty => Ok(None),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        Cell::Text(s) => parse_finite(s).map(Some).ok_or_else(invalid),
    }
}
