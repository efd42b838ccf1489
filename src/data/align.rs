use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::price::{PricePoint, PriceTable};

/// Inner-join two dated close series, keeping only dates where both legs have
/// a finite price. Output is sorted by date; a repeated date keeps its last value.
pub fn align_closes(
    label_a: &str,
    label_b: &str,
    closes_a: &[(NaiveDate, Option<f64>)],
    closes_b: &[(NaiveDate, Option<f64>)],
) -> PriceTable {
    let index_b: BTreeMap<NaiveDate, Option<f64>> = closes_b.iter().copied().collect();
    let index_a: BTreeMap<NaiveDate, Option<f64>> = closes_a.iter().copied().collect();

    let points = index_a
        .into_iter()
        .filter_map(|(date, a)| {
            let a = a.filter(|v| v.is_finite())?;
            let b = index_b.get(&date).copied().flatten().filter(|v| v.is_finite())?;
            Some(PricePoint {
                date,
                price_a: a,
                price_b: b,
            })
        })
        .collect();

    PriceTable::new(label_a, label_b).with_points(points)
}
