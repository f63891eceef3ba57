//! Line-chart construction from long records.
//!
//! ```text
//!  &[LongRecord] + FilterSelection
//!        │  parse years, filter
//!        ▼
//!   categories → subcategories   (first-encounter order)
//!        │  ColorMap
//!        ▼
//!   ChartSpec { traces, layout }
//! ```

use serde::Serialize;
use serde_json::{Value, json};

use crate::color::{ColorMap, category_color, shades, to_hex};
use crate::data::filter::FilterSelection;
use crate::data::model::{LongRecord, SeriesKey, parse_year};
use crate::error::{Error, Result, YearParseError};

// ---------------------------------------------------------------------------
// Chart types
// ---------------------------------------------------------------------------

/// Caller-chosen chart labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    pub title: String,
    pub y_axis_title: String,
    pub legend_title: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Sales by Category and Subcategory".to_string(),
            y_axis_title: "Sales".to_string(),
            legend_title: "Category - Subcategory".to_string(),
        }
    }
}

/// One line-with-markers series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(skip)]
    pub key: SeriesKey,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
    pub x: Vec<i64>,
    /// `None` where the source cell was empty.
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub legend_title: String,
}

/// Everything a rendering surface needs to draw the chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub traces: Vec<Trace>,
    pub layout: Layout,
    #[serde(skip)]
    pub colors: ColorMap,
}

impl ChartSpec {
    /// Plotly figure JSON (`data` + `layout`).
    pub fn to_plotly(&self) -> Value {
        let data: Vec<Value> = self
            .traces
            .iter()
            .map(|t| {
                json!({
                    "type": "scatter",
                    "mode": "lines+markers",
                    "name": t.name,
                    "x": t.x,
                    "y": t.y,
                    "line": { "color": t.color },
                    "marker": { "color": t.color },
                })
            })
            .collect();

        json!({
            "data": data,
            "layout": {
                "title": { "text": self.layout.title },
                "xaxis": { "title": { "text": self.layout.x_axis_title } },
                "yaxis": { "title": { "text": self.layout.y_axis_title } },
                "legend": { "title": { "text": self.layout.legend_title } },
            },
        })
    }

    pub fn to_plotly_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_plotly())?)
    }
}

/// A rendered chart plus the records left out because their year did not
/// parse.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub chart: ChartSpec,
    pub skipped: Vec<YearParseError>,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Build the chart for the records selected by `filter`.
///
/// Records with an unparseable year are skipped and reported in
/// [`Rendered::skipped`]. Fails with [`Error::EmptyFilterResult`] when nothing
/// is left to draw.
pub fn render(
    records: &[LongRecord],
    filter: &FilterSelection,
    options: &ChartOptions,
) -> Result<Rendered> {
    let mut skipped = Vec::new();
    // category → [(subcategory, points)], both in first-encounter order
    let mut groups: Vec<(String, Vec<(String, Vec<(i64, Option<f64>)>)>)> = Vec::new();

    for rec in records.iter().filter(|r| filter.selects_series(r)) {
        let year = match parse_year(&rec.year) {
            Ok(year) => year,
            Err(_) => {
                skipped.push(YearParseError {
                    category: rec.category.clone(),
                    subcategory: rec.subcategory.clone(),
                    year: rec.year.clone(),
                });
                continue;
            }
        };
        if !filter.selects_year(year) {
            continue;
        }

        let gi = match groups.iter().position(|(c, _)| *c == rec.category) {
            Some(i) => i,
            None => {
                groups.push((rec.category.clone(), Vec::new()));
                groups.len() - 1
            }
        };
        let subs = &mut groups[gi].1;
        let si = match subs.iter().position(|(s, _)| *s == rec.subcategory) {
            Some(i) => i,
            None => {
                subs.push((rec.subcategory.clone(), Vec::new()));
                subs.len() - 1
            }
        };
        subs[si].1.push((year, rec.amount));
    }

    if !skipped.is_empty() {
        log::warn!("Skipped {} records with non-integer years", skipped.len());
    }
    if groups.is_empty() {
        return Err(Error::EmptyFilterResult {
            skipped: skipped.len(),
        });
    }

    let order: Vec<(String, Vec<String>)> = groups
        .iter()
        .map(|(c, subs)| (c.clone(), subs.iter().map(|(s, _)| s.clone()).collect()))
        .collect();
    let colors = ColorMap::new(&order);

    let mut traces = Vec::new();
    for (ordinal, (category, subs)) in groups.into_iter().enumerate() {
        let family = shades(category_color(ordinal), subs.len());
        for ((subcategory, mut points), shade) in subs.into_iter().zip(family) {
            points.sort_by_key(|(year, _)| *year);
            let key = SeriesKey {
                category: category.clone(),
                subcategory,
            };
            traces.push(Trace {
                name: key.to_string(),
                color: to_hex(shade),
                x: points.iter().map(|(x, _)| *x).collect(),
                y: points.iter().map(|(_, y)| *y).collect(),
                key,
            });
        }
    }
    log::debug!("Rendered {} traces", traces.len());

    Ok(Rendered {
        chart: ChartSpec {
            traces,
            layout: Layout {
                title: options.title.clone(),
                x_axis_title: "Year".to_string(),
                y_axis_title: options.y_axis_title.clone(),
                legend_title: options.legend_title.clone(),
            },
            colors,
        },
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use crate::color::PALETTE;
    use crate::data::model::LongTable;

    fn rec(category: &str, year: &str, subcategory: &str, amount: f64) -> LongRecord {
        LongRecord {
            category: category.into(),
            year: year.into(),
            subcategory: subcategory.into(),
            amount: Some(amount),
        }
    }

    fn sample() -> Vec<LongRecord> {
        vec![
            rec("Toys", "2021", "Online", 3.0),
            rec("Toys", "2019", "Online", 1.0),
            rec("Books", "2019", "Retail", 5.0),
            rec("Toys", "2020", "Retail", 2.0),
            rec("Toys", "2020", "Online", 2.0),
            rec("Books", "2022", "Retail", 6.0),
        ]
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn select_all(records: &[LongRecord]) -> FilterSelection {
        FilterSelection::all(&LongTable::from_records(records.to_vec()))
    }

    #[test]
    fn traces_follow_first_encounter_order() {
        let records = sample();
        let rendered = render(&records, &select_all(&records), &ChartOptions::default()).unwrap();
        let names: Vec<&str> = rendered.chart.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Toys - Online", "Toys - Retail", "Books - Retail"]);
        assert!(rendered.skipped.is_empty());
    }

    #[test]
    fn points_are_sorted_by_year() {
        let records = sample();
        let rendered = render(&records, &select_all(&records), &ChartOptions::default()).unwrap();
        let online = &rendered.chart.traces[0];
        assert_eq!(online.x, vec![2019, 2020, 2021]);
        assert_eq!(online.y, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn every_point_satisfies_the_filter() {
        let records = sample();
        let filter = FilterSelection {
            years: 2020..=2021,
            categories: set(&["Toys", "Books"]),
            subcategories: set(&["Online"]),
        };
        let rendered = render(&records, &filter, &ChartOptions::default()).unwrap();
        assert_eq!(rendered.chart.traces.len(), 1);
        for trace in &rendered.chart.traces {
            assert!(filter.categories.contains(&trace.key.category));
            assert!(filter.subcategories.contains(&trace.key.subcategory));
            assert!(trace.x.iter().all(|year| filter.years.contains(year)));
        }
        assert_eq!(rendered.chart.traces[0].x, vec![2020, 2021]);
    }

    #[test]
    fn empty_category_set_is_an_empty_result() {
        let records = sample();
        let mut filter = select_all(&records);
        filter.categories.clear();
        assert!(matches!(
            render(&records, &filter, &ChartOptions::default()),
            Err(Error::EmptyFilterResult { skipped: 0 })
        ));
    }

    #[test]
    fn year_range_outside_data_is_an_empty_result() {
        let records = sample();
        let mut filter = select_all(&records);
        filter.years = 1990..=1995;
        assert!(matches!(
            render(&records, &filter, &ChartOptions::default()),
            Err(Error::EmptyFilterResult { .. })
        ));
    }

    #[test]
    fn unparseable_years_are_skipped_and_reported() {
        let mut records = sample();
        records.push(rec("Toys", "FY20", "Online", 9.0));
        let rendered = render(&records, &select_all(&records), &ChartOptions::default()).unwrap();

        assert_eq!(rendered.skipped.len(), 1);
        assert_eq!(rendered.skipped[0].year, "FY20");
        let points: usize = rendered.chart.traces.iter().map(|t| t.x.len()).sum();
        assert_eq!(points, records.len() - 1);
    }

    #[test]
    fn unselected_records_are_not_reported_as_skipped() {
        let records = vec![rec("Toys", "2020", "Online", 1.0), rec("Books", "bad", "Online", 1.0)];
        let filter = FilterSelection {
            years: 2020..=2020,
            categories: set(&["Toys"]),
            subcategories: set(&["Online"]),
        };
        let rendered = render(&records, &filter, &ChartOptions::default()).unwrap();
        assert!(rendered.skipped.is_empty());
    }

    #[test]
    fn categories_get_distinct_bases_until_palette_runs_out() {
        let records: Vec<LongRecord> = (0..PALETTE.len() + 2)
            .map(|i| rec(&format!("C{i}"), "2020", "A", i as f64))
            .collect();
        let rendered = render(&records, &select_all(&records), &ChartOptions::default()).unwrap();
        let colors = &rendered.chart.colors;

        let bases: Vec<_> = (0..PALETTE.len())
            .map(|i| colors.base_for(&format!("C{i}")).unwrap())
            .collect();
        let unique: HashSet<_> = bases.iter().map(|c| to_hex(*c)).collect();
        assert_eq!(unique.len(), PALETTE.len());
        assert_eq!(colors.base_for(&format!("C{}", PALETTE.len())), Some(category_color(0)));
    }

    #[test]
    fn subcategories_share_hue_with_distinct_shades() {
        let records = sample();
        let rendered = render(&records, &select_all(&records), &ChartOptions::default()).unwrap();
        let traces = &rendered.chart.traces;
        assert_ne!(traces[0].color, traces[1].color);
        // lone subcategory gets a lightened shade, not the pure base
        assert_ne!(traces[2].color, to_hex(category_color(1)));
        assert!(traces.iter().all(|t| t.color.starts_with('#') && t.color.len() == 7));
    }

    #[test]
    fn trace_colors_are_category_shades_in_order() {
        let records = sample();
        let rendered = render(&records, &select_all(&records), &ChartOptions::default()).unwrap();
        let chart = &rendered.chart;

        let toys = shades(category_color(0), 2);
        let books = shades(category_color(1), 1);
        let colors: Vec<&str> = chart.traces.iter().map(|t| t.color.as_str()).collect();
        assert_eq!(colors, vec![to_hex(toys[0]), to_hex(toys[1]), to_hex(books[0])]);

        for trace in &chart.traces {
            assert_eq!(chart.colors.color_for(&trace.key).map(to_hex), Some(trace.color.clone()));
        }
    }

    #[test]
    fn layout_uses_options() {
        let records = sample();
        let options = ChartOptions {
            y_axis_title: "Amount".into(),
            ..ChartOptions::default()
        };
        let rendered = render(&records, &select_all(&records), &options).unwrap();
        let layout = &rendered.chart.layout;
        assert_eq!(layout.x_axis_title, "Year");
        assert_eq!(layout.y_axis_title, "Amount");
        assert_eq!(layout.title, "Sales by Category and Subcategory");
    }

    #[test]
    fn plotly_json_has_one_entry_per_trace() {
        let records = sample();
        let rendered = render(&records, &select_all(&records), &ChartOptions::default()).unwrap();
        let fig = rendered.chart.to_plotly();
        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[0]["mode"], "lines+markers");
        assert_eq!(data[0]["name"], "Toys - Online");
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "Year");
        assert!(rendered.chart.to_plotly_string().unwrap().contains("\"scatter\""));
    }
}
