use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};

use super::model::{Cell, RawTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the wide table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xls` / `.ods` – first worksheet of the workbook
/// * `.csv` – no header handling; every line is a row of the grid
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => load_workbook(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };
    log::info!(
        "Loaded {}x{} grid from {}",
        table.n_rows(),
        table.n_cols(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    // A range starting below or right of A1 still maps to row 0 / column 0
    // of the grid, the same way a dataframe reader would skip the blanks.
    let rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    RawTable::new(rows).context("worksheet is not rectangular")
}

fn workbook_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout mirrors the worksheet: two header lines, then one line per
/// category. Header cells stay text so year tokens keep their spelling;
/// data cells are typed by [`Cell::guess`]. Short lines are padded.
fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Vec<Cell> = record
            .iter()
            .map(|value| {
                if row_no < 2 {
                    header_cell(value)
                } else {
                    Cell::guess(value)
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(RawTable::padded(rows))
}

fn header_cell(value: &str) -> Cell {
    if value.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::reshape::reshape;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_grid_loads_and_reshapes() {
        let file = write_temp(
            ".csv",
            ",2020,2020,2021\n,Online,Retail,Online\nToys,10,11,12\nBooks,20,,22\n",
        );
        let table = load_file(file.path()).unwrap();
        assert_eq!((table.n_rows(), table.n_cols()), (4, 4));
        assert_eq!(table.cell(0, 1), &Cell::Text("2020".into()));
        assert_eq!(table.cell(3, 2), &Cell::Empty);

        let records = reshape(&table).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[3].amount, None);
    }

    #[test]
    fn xlsx_grid_loads_and_reshapes() {
        // Two sheets; only the first ("Sales") is read. Its year row holds
        // numeric cells and C4 is missing.
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sales.xlsx");
        let table = load_file(&path).unwrap();
        assert_eq!((table.n_rows(), table.n_cols()), (4, 4));
        assert_eq!(table.cell(0, 0), &Cell::Empty);
        assert_eq!(table.cell(0, 1), &Cell::Number(2020.0));
        assert_eq!(table.cell(1, 2), &Cell::Text("Retail".into()));
        assert_eq!(table.cell(3, 2), &Cell::Empty);

        let records = reshape(&table).unwrap();
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].year, "2020");
        assert_eq!(records[0].category, "Toys");
        assert_eq!(records[3].subcategory, "Retail");
        assert_eq!(records[3].category, "Books");
        assert_eq!(records[3].amount, None);
        assert_eq!(records[5].year, "2021");
        assert_eq!(records[5].amount, Some(22.5));
    }

    #[test]
    fn csv_header_cells_keep_their_spelling() {
        let file = write_temp(".csv", ",02020\n,A\nToys,1\n");
        let table = load_file(file.path()).unwrap();
        let records = reshape(&table).unwrap();
        assert_eq!(records[0].year, "02020");
    }

    #[test]
    fn short_csv_lines_are_padded() {
        let file = write_temp(".csv", ",2020,2021\n,A,A\nToys,1\n");
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.n_cols(), 3);
        assert_eq!(table.cell(2, 2), &Cell::Empty);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp(".txt", "whatever");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn workbook_cells_map_to_typed_cells() {
        assert_eq!(workbook_cell(&Data::Empty), Cell::Empty);
        assert_eq!(workbook_cell(&Data::Int(2020)), Cell::Number(2020.0));
        assert_eq!(workbook_cell(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(workbook_cell(&Data::String(" ".into())), Cell::Empty);
        assert_eq!(
            workbook_cell(&Data::String("Online".into())),
            Cell::Text("Online".into())
        );
        assert_eq!(workbook_cell(&Data::Bool(true)), Cell::Text("true".into()));
    }
}
