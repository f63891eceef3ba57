use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use super::model::{LongRecord, LongTable};

// ---------------------------------------------------------------------------
// Filter selection: which years, categories and subcategories to chart
// ---------------------------------------------------------------------------

/// A render request's filter. An empty set selects nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: RangeInclusive<i64>,
    pub categories: BTreeSet<String>,
    pub subcategories: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every year, category and subcategory present in the table.
    pub fn all(table: &LongTable) -> Self {
        let (lo, hi) = table.year_bounds.unwrap_or((0, 0));
        FilterSelection {
            years: lo..=hi,
            categories: table.categories.iter().cloned().collect(),
            subcategories: table.subcategories.iter().cloned().collect(),
        }
    }

    /// Whether a record's category and subcategory are both selected.
    pub fn selects_series(&self, record: &LongRecord) -> bool {
        self.categories.contains(&record.category) && self.subcategories.contains(&record.subcategory)
    }

    pub fn selects_year(&self, year: i64) -> bool {
        self.years.contains(&year)
    }

    /// Toggle one category in or out of the selection.
    pub fn toggle_category(&mut self, category: &str) {
        toggle(&mut self.categories, category);
    }

    /// Toggle one subcategory in or out of the selection.
    pub fn toggle_subcategory(&mut self, subcategory: &str) {
        toggle(&mut self.subcategories, subcategory);
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
