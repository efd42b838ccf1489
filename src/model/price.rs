use chrono::NaiveDate;
use serde::Serialize;

use crate::error::BacktestError;

/// Closing prices of both legs on one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price_a: f64,
    pub price_b: f64,
}

/// Two labeled close series aligned on date.
///
/// Asset A is the dependent ("target") leg, asset B the hedge leg.
/// An empty table is the acquisition layer's marker for a failed fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    pub label_a: String,
    pub label_b: String,
    pub points: Vec<PricePoint>,
}

impl PriceTable {
    pub fn new(label_a: impl Into<String>, label_b: impl Into<String>) -> Self {
        Self {
            label_a: label_a.into(),
            label_b: label_b.into(),
            points: Vec::new(),
        }
    }

    /// Empty table carrying the requested labels, returned when a fetch fails.
    pub fn empty(label_a: &str, label_b: &str) -> Self {
        Self::new(display_label(label_a), display_label(label_b))
    }

    pub fn with_points(mut self, points: Vec<PricePoint>) -> Self {
        self.points = points;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices_a(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price_a).collect()
    }

    pub fn prices_b(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price_b).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Check the ordering and finiteness the core relies on.
    pub fn validate(&self) -> Result<(), BacktestError> {
        for (index, p) in self.points.iter().enumerate() {
            if !p.price_a.is_finite() {
                return Err(BacktestError::NonFinite {
                    series: "price_a",
                    index,
                });
            }
            if !p.price_b.is_finite() {
                return Err(BacktestError::NonFinite {
                    series: "price_b",
                    index,
                });
            }
        }
        if let Some(pos) = self
            .points
            .windows(2)
            .position(|w| w[1].date <= w[0].date)
        {
            return Err(BacktestError::invalid(
                "dates",
                format!("not strictly increasing at index {}", pos + 1),
            ));
        }
        Ok(())
    }
}

/// Strip an exchange suffix from a ticker ("GLD.US" -> "GLD").
pub fn display_label(ticker: &str) -> String {
    let trimmed = ticker.trim();
    match trimmed.rsplit_once('.') {
        Some((base, _)) if !base.is_empty() => base.to_ascii_uppercase(),
        _ => trimmed.to_ascii_uppercase(),
    }
}
