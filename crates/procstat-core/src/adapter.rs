//! Reshapes aggregation output into the view layer's point arrays.

use std::collections::BTreeMap;

use procstat_model::{AggregationResult, TotalPoint, ViewModel, YearPoint};

/// Builds the render-ready [`ViewModel`].
///
/// Procedures come out sorted by name; each series holds one point per year
/// of the year domain, in domain order.
pub fn to_view_model(result: &AggregationResult) -> ViewModel {
    let mut per_procedure_series = BTreeMap::new();
    let mut totals = Vec::with_capacity(result.counters.len());
    for (name, counter) in &result.counters {
        let points = counter
            .years()
            .map(|(year, conteo)| YearPoint {
                name: year.to_string(),
                conteo,
            })
            .collect();
        per_procedure_series.insert(name.clone(), points);
        totals.push(TotalPoint {
            name: name.clone(),
            value: counter.total,
        });
    }
    ViewModel {
        per_procedure_series,
        totals,
        grand_total: result.grand_total,
    }
}
