use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use tidysheet::Trace;

use crate::state::AppState;
use crate::ui::to_color32;

// ---------------------------------------------------------------------------
// Line chart (central panel)
// ---------------------------------------------------------------------------

/// Render the last plotted chart in the central panel.
pub fn line_chart(ui: &mut Ui, state: &AppState) {
    let Some(rendered) = &state.rendered else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Choose filters and press \"Plot Data\"");
        });
        return;
    };
    let chart = &rendered.chart;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.layout.title.as_str());
    });
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(RichText::new(chart.layout.legend_title.as_str()).weak());
        for (category, base) in chart.colors.legend_entries() {
            ui.label(RichText::new(category.as_str()).color(to_color32(*base)).strong());
        }
    });

    Plot::new("line_chart")
        .legend(Legend::default())
        .x_axis_label(chart.layout.x_axis_title.clone())
        .y_axis_label(chart.layout.y_axis_title.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for trace in &chart.traces {
                let color = chart
                    .colors
                    .color_for(&trace.key)
                    .map(to_color32)
                    .unwrap_or(Color32::LIGHT_BLUE);

                // Empty amounts break the line, as a gap.
                for segment in segments(trace) {
                    let line = Line::new(PlotPoints::from(segment.clone()))
                        .name(&trace.name)
                        .color(color)
                        .width(1.5);
                    plot_ui.line(line);

                    let markers = Points::new(PlotPoints::from(segment))
                        .name(&trace.name)
                        .color(color)
                        .radius(3.0);
                    plot_ui.points(markers);
                }
            }
        });
}

/// Split a trace into runs of consecutive points with an amount.
fn segments(trace: &Trace) -> Vec<Vec<[f64; 2]>> {
    let mut out: Vec<Vec<[f64; 2]>> = Vec::new();
    let mut current = Vec::new();
    for (&x, y) in trace.x.iter().zip(&trace.y) {
        match y {
            Some(y) => current.push([x as f64, *y]),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}
