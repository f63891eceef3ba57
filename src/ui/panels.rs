use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use tidysheet::export::{CSV_FILE_NAME, PARQUET_FILE_NAME};

use crate::state::{AppState, View};
use crate::ui::to_color32;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Data Visualization");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No table loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let categories = table.categories.clone();
    let subcategories = table.subcategories.clone();
    let (min_year, max_year) = table.year_bounds.unwrap_or((0, 0));
    let legend = state.rendered.as_ref().map(|r| r.chart.colors.clone());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Select Year Range");
            if let Some(filter) = &mut state.filter {
                let mut lo = *filter.years.start();
                let mut hi = *filter.years.end();
                ui.add(egui::Slider::new(&mut lo, min_year..=max_year).text("from"));
                ui.add(egui::Slider::new(&mut hi, min_year..=max_year).text("to"));
                if lo > hi {
                    std::mem::swap(&mut lo, &mut hi);
                }
                filter.years = lo..=hi;
            }
            ui.separator();

            // ---- Categories ----
            let n_selected = state.filter.as_ref().map_or(0, |f| f.categories.len());
            egui::CollapsingHeader::new(
                RichText::new(format!("Categories  ({n_selected}/{})", categories.len())).strong(),
            )
            .id_salt("categories")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.select_all_categories(true);
                    }
                    if ui.small_button("None").clicked() {
                        state.select_all_categories(false);
                    }
                });

                let Some(filter) = &mut state.filter else {
                    return;
                };
                for category in &categories {
                    let mut text = RichText::new(category);
                    // Swatch from the last plotted chart
                    if let Some(base) = legend.as_ref().and_then(|m| m.base_for(category)) {
                        text = text.color(to_color32(base));
                    }
                    let mut checked = filter.categories.contains(category);
                    if ui.checkbox(&mut checked, text).changed() {
                        filter.toggle_category(category);
                    }
                }
            });

            // ---- Subcategories ----
            let n_selected = state.filter.as_ref().map_or(0, |f| f.subcategories.len());
            egui::CollapsingHeader::new(
                RichText::new(format!(
                    "Subcategories  ({n_selected}/{})",
                    subcategories.len()
                ))
                .strong(),
            )
            .id_salt("subcategories")
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("All").clicked() {
                        state.select_all_subcategories(true);
                    }
                    if ui.small_button("None").clicked() {
                        state.select_all_subcategories(false);
                    }
                });

                let Some(filter) = &mut state.filter else {
                    return;
                };
                for subcategory in &subcategories {
                    let mut checked = filter.subcategories.contains(subcategory);
                    if ui.checkbox(&mut checked, subcategory.as_str()).changed() {
                        filter.toggle_subcategory(subcategory);
                    }
                }
            });

            ui.separator();
            if ui.button("Plot Data").clicked() {
                state.plot();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let loaded = state.table.is_some();
            if ui.add_enabled(loaded, egui::Button::new("Save CSV…")).clicked() {
                save_file_dialog(state, Export::Csv);
                ui.close_menu();
            }
            if ui
                .add_enabled(loaded, egui::Button::new("Save Parquet…"))
                .clicked()
            {
                save_file_dialog(state, Export::Parquet);
                ui.close_menu();
            }
            let plotted = state.rendered.is_some();
            if ui
                .add_enabled(plotted, egui::Button::new("Save Chart JSON…"))
                .clicked()
            {
                save_file_dialog(state, Export::ChartJson);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} records, {} categories, {} subcategories",
                table.len(),
                table.categories.len(),
                table.subcategories.len()
            ));
            ui.separator();
            ui.selectable_value(&mut state.view, View::Table, "Table");
            ui.selectable_value(&mut state.view, View::Chart, "Chart");
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload your input Excel file")
        .add_filter("Supported files", &["xlsx", "xlsm", "xls", "xlsb", "ods", "csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls", "xlsb"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Export {
    Csv,
    Parquet,
    ChartJson,
}

fn save_file_dialog(state: &mut AppState, export: Export) {
    let (name, label, ext) = match export {
        Export::Csv => (CSV_FILE_NAME, "CSV", "csv"),
        Export::Parquet => (PARQUET_FILE_NAME, "Parquet", "parquet"),
        Export::ChartJson => ("chart.json", "JSON", "json"),
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save")
        .set_file_name(name)
        .add_filter(label, &[ext])
        .save_file()
    else {
        return;
    };

    let result = match export {
        Export::Csv => state.save_csv(&path),
        Export::Parquet => state.save_parquet(&path),
        Export::ChartJson => state.save_chart_json(&path),
    };
    match result {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Failed to save file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
