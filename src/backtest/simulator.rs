use crate::error::BacktestError;
use crate::model::signal::Signal;

use super::returns::AssetReturns;

/// Outcome of running the switcher over one price history.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub positions: Vec<Signal>,
    pub strategy_returns: Vec<f64>,
    pub equity: Vec<f64>,
}

impl Simulation {
    pub fn run(
        signals: &[Signal],
        returns: &AssetReturns,
        initial_capital: f64,
    ) -> Result<Self, BacktestError> {
        let positions = lag_positions(signals);
        let strategy_returns = realized_returns(&positions, &returns.a, &returns.b)?;
        let equity = compound(initial_capital, &strategy_returns)?;
        Ok(Self {
            positions,
            strategy_returns,
            equity,
        })
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.equity.last().copied()
    }
}

/// Shift signals one bar forward: a signal seen at t-1 is held during t.
pub fn lag_positions(signals: &[Signal]) -> Vec<Signal> {
    if signals.is_empty() {
        return Vec::new();
    }
    std::iter::once(Signal::None)
        .chain(signals[..signals.len() - 1].iter().copied())
        .collect()
}

/// Return earned each bar given the leg held; flat bars earn nothing.
pub fn realized_returns(
    positions: &[Signal],
    returns_a: &[f64],
    returns_b: &[f64],
) -> Result<Vec<f64>, BacktestError> {
    if positions.len() != returns_a.len() {
        return Err(BacktestError::ShapeMismatch {
            left: positions.len(),
            right: returns_a.len(),
        });
    }
    if returns_a.len() != returns_b.len() {
        return Err(BacktestError::ShapeMismatch {
            left: returns_a.len(),
            right: returns_b.len(),
        });
    }
    Ok(positions
        .iter()
        .zip(returns_a.iter().zip(returns_b))
        .map(|(pos, (&ra, &rb))| match pos {
            Signal::FavorA => ra,
            Signal::FavorB => rb,
            Signal::None => 0.0,
        })
        .collect())
}

/// Compound per-bar returns into an equity curve starting at `initial_capital`.
///
/// The first bar has no prior period, so its equity is the starting capital.
pub fn compound(initial_capital: f64, returns: &[f64]) -> Result<Vec<f64>, BacktestError> {
    if !(initial_capital.is_finite() && initial_capital > 0.0) {
        return Err(BacktestError::invalid("initial_capital", initial_capital));
    }
    let mut equity = Vec::with_capacity(returns.len());
    let mut value = initial_capital;
    for (t, &r) in returns.iter().enumerate() {
        if t > 0 {
            value *= 1.0 + r;
        }
        equity.push(value);
    }
    Ok(equity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_position_is_always_flat() {
        let positions = lag_positions(&[Signal::FavorA, Signal::FavorB, Signal::FavorA]);
        assert_eq!(
            positions,
            vec![Signal::None, Signal::FavorA, Signal::FavorB]
        );
        assert!(lag_positions(&[]).is_empty());
    }

    #[test]
    fn compound_matches_worked_example() {
        let eq = compound(10_000.0, &[0.0, 0.01, -0.02]).unwrap();
        assert_eq!(eq.len(), 3);
        assert_eq!(eq[0], 10_000.0);
        assert!((eq[1] - 10_100.0).abs() < 1e-9);
        assert!((eq[2] - 9_898.0).abs() < 1e-9);
    }

    #[test]
    fn realized_returns_pick_the_held_leg() {
        let positions = [Signal::None, Signal::FavorA, Signal::FavorB];
        let r = realized_returns(&positions, &[0.0, 0.1, 0.2], &[0.0, -0.1, -0.2]).unwrap();
        assert_eq!(r, vec![0.0, 0.1, -0.2]);
    }

    #[test]
    fn non_positive_capital_is_rejected() {
        assert!(compound(0.0, &[0.0]).is_err());
        assert!(compound(-5.0, &[0.0]).is_err());
    }
}
