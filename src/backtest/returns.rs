use crate::error::BacktestError;

/// Per-period simple returns; the first period has no predecessor and returns 0.
pub fn simple_returns(prices: &[f64], series: &'static str) -> Result<Vec<f64>, BacktestError> {
    let mut out = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return Ok(out);
    }
    out.push(0.0);
    for (i, w) in prices.windows(2).enumerate() {
        let r = w[1] / w[0] - 1.0;
        if !r.is_finite() {
            return Err(BacktestError::NonFinite {
                series,
                index: i + 1,
            });
        }
        out.push(r);
    }
    Ok(out)
}

/// Returns of both legs, computed once and shared by the strategy and benchmarks.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReturns {
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl AssetReturns {
    pub fn from_prices(prices_a: &[f64], prices_b: &[f64]) -> Result<Self, BacktestError> {
        if prices_a.len() != prices_b.len() {
            return Err(BacktestError::ShapeMismatch {
                left: prices_a.len(),
                right: prices_b.len(),
            });
        }
        Ok(Self {
            a: simple_returns(prices_a, "returns_a")?,
            b: simple_returns(prices_b, "returns_b")?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}
