use crate::error::BacktestError;

use super::returns::AssetReturns;
use super::simulator::compound;

/// Equity of holding one asset outright for the whole history.
pub fn buy_and_hold(initial_capital: f64, returns: &[f64]) -> Result<Vec<f64>, BacktestError> {
    compound(initial_capital, returns)
}

/// Buy-and-hold curves for both legs, for comparison against the strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Benchmarks {
    pub equity_a: Vec<f64>,
    pub equity_b: Vec<f64>,
}

impl Benchmarks {
    pub fn run(returns: &AssetReturns, initial_capital: f64) -> Result<Self, BacktestError> {
        Ok(Self {
            equity_a: buy_and_hold(initial_capital, &returns.a)?,
            equity_b: buy_and_hold(initial_capital, &returns.b)?,
        })
    }
}
