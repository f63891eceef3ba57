use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tidysheet::data::loader::load_file;
use tidysheet::export::{write_csv, write_parquet};
use tidysheet::{ChartOptions, Error, FilterSelection, LongTable, Rendered, render, reshape};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Table,
    Chart,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// File the current table was loaded from.
    pub source: Option<PathBuf>,

    /// Reshaped data (None until user loads a file).
    pub table: Option<LongTable>,

    /// Current filter widgets' selection.
    pub filter: Option<FilterSelection>,

    /// Chart labels.
    pub options: ChartOptions,

    /// Last chart produced by "Plot Data".
    pub rendered: Option<Rendered>,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load and reshape a spreadsheet, replacing the current table.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let raw = load_file(path)?;
        let records = reshape(&raw).with_context(|| format!("reshaping {}", path.display()))?;
        log::info!("Reshaped {} into {} records", path.display(), records.len());
        self.set_table(LongTable::from_records(records));
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Ingest a newly reshaped table and select everything in it.
    pub fn set_table(&mut self, table: LongTable) {
        self.filter = Some(FilterSelection::all(&table));
        self.table = Some(table);
        self.rendered = None;
        self.view = View::Table;
        self.status_message = None;
    }

    /// Render the chart for the current selection.
    pub fn plot(&mut self) {
        let (Some(table), Some(filter)) = (&self.table, &self.filter) else {
            return;
        };

        match render(&table.records, filter, &self.options) {
            Ok(rendered) => {
                self.status_message = (!rendered.skipped.is_empty()).then(|| {
                    format!(
                        "Skipped {} records with non-integer years",
                        rendered.skipped.len()
                    )
                });
                self.rendered = Some(rendered);
            }
            Err(Error::EmptyFilterResult { .. }) => {
                self.rendered = None;
                self.status_message = Some("No data matches the selection".to_string());
            }
            Err(e) => {
                log::error!("Failed to render chart: {e}");
                self.rendered = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
        self.view = View::Chart;
    }

    pub fn save_csv(&self, path: &Path) -> Result<()> {
        let table = self.table.as_ref().context("no table loaded")?;
        write_csv(path, &table.records).context("writing CSV")
    }

    pub fn save_parquet(&self, path: &Path) -> Result<()> {
        let table = self.table.as_ref().context("no table loaded")?;
        write_parquet(path, &table.records).context("writing Parquet")
    }

    /// Write the last plotted chart as plotly figure JSON.
    pub fn save_chart_json(&self, path: &Path) -> Result<()> {
        let rendered = self.rendered.as_ref().context("no chart plotted")?;
        let json = rendered.chart.to_plotly_string()?;
        std::fs::write(path, json).context("writing chart JSON")?;
        log::info!("Wrote chart to {}", path.display());
        Ok(())
    }

    /// Select every category, or none.
    pub fn select_all_categories(&mut self, on: bool) {
        if let (Some(table), Some(filter)) = (&self.table, &mut self.filter) {
            filter.categories = if on {
                table.categories.iter().cloned().collect()
            } else {
                Default::default()
            };
        }
    }

    /// Select every subcategory, or none.
    pub fn select_all_subcategories(&mut self, on: bool) {
        if let (Some(table), Some(filter)) = (&self.table, &mut self.filter) {
            filter.subcategories = if on {
                table.subcategories.iter().cloned().collect()
            } else {
                Default::default()
            };
        }
    }
}
