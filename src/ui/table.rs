use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use tidysheet::export::COLUMNS;

use crate::state::AppState;

/// Render the reshaped long table.
pub fn long_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to transform it  (File → Open…)");
        });
        return;
    };

    if let Some(source) = &state.source {
        ui.label(source.display().to_string());
    }

    let row_height = ui.text_style_height(&eframe::egui::TextStyle::Body) + 4.0;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(row_height + 2.0, |mut header| {
            for name in COLUMNS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, table.len(), |mut row| {
                let rec = &table.records[row.index()];
                row.col(|ui| {
                    ui.label(rec.category.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.year.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.subcategory.as_str());
                });
                row.col(|ui| {
                    ui.label(rec.amount.map(|a| a.to_string()).unwrap_or_default());
                });
            });
        });
}
