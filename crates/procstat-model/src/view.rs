//! Render-ready shapes consumed by chart and table views.
//!
//! Field names follow the view layer's contract: year points carry
//! `name`/`conteo`, total points carry `name`/`value`, and the top-level keys
//! are camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One bar of a per-procedure year chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearPoint {
    /// Year label.
    pub name: String,
    pub conteo: u64,
}

/// One bar of the totals chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalPoint {
    /// Procedure name.
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Procedure name to one point per year, in year domain order.
    pub per_procedure_series: BTreeMap<String, Vec<YearPoint>>,
    /// One entry per procedure, sorted by name.
    pub totals: Vec<TotalPoint>,
    pub grand_total: u64,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn procedure_count(&self) -> usize {
        self.totals.len()
    }

    pub fn series(&self, procedure: &str) -> Option<&[YearPoint]> {
        self.per_procedure_series.get(procedure).map(Vec::as_slice)
    }

    /// Largest per-procedure total, used to scale bars.
    pub fn max_total(&self) -> u64 {
        self.totals.iter().map(|point| point.value).max().unwrap_or(0)
    }

    /// Totals restricted to procedures whose name contains `keyword`,
    /// ignoring case. Order follows [`ViewModel::totals`].
    pub fn comparison(&self, keyword: &str) -> Vec<TotalPoint> {
        let needle = keyword.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.totals
            .iter()
            .filter(|point| point.name.to_uppercase().contains(&needle))
            .cloned()
            .collect()
    }
}
