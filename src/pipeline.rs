//! End-to-end run: aligned prices in, full backtest table out.
//!
//! Every stage reads only the output of the previous one, front to back:
//! prices → β → fast/slow lines → signal → lagged position → returns → equity.

use crate::backtest::benchmark::Benchmarks;
use crate::backtest::report::{BacktestReport, BacktestRow};
use crate::backtest::returns::AssetReturns;
use crate::backtest::simulator::Simulation;
use crate::error::BacktestError;
use crate::estimator::kalman::{KalmanHedge, DEFAULT_DELTA, DEFAULT_MEASUREMENT_NOISE};
use crate::model::price::PriceTable;
use crate::model::signal::Signal;
use crate::strategy::hedge_crossover::{self, DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW};

pub const DEFAULT_INITIAL_CAPITAL: f64 = 10_000.0;

/// Numeric knobs of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestParams {
    pub delta: f64,
    pub measurement_noise: f64,
    pub fast_window: usize,
    pub slow_window: usize,
    pub initial_capital: f64,
}

impl Default for BacktestParams {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
            initial_capital: DEFAULT_INITIAL_CAPITAL,
        }
    }
}

impl BacktestParams {
    pub fn validate(&self) -> Result<(), BacktestError> {
        KalmanHedge::new(self.delta, self.measurement_noise)?;
        if self.fast_window == 0 {
            return Err(BacktestError::invalid("fast_window", self.fast_window));
        }
        if self.slow_window == 0 {
            return Err(BacktestError::invalid("slow_window", self.slow_window));
        }
        if !(self.initial_capital.is_finite() && self.initial_capital > 0.0) {
            return Err(BacktestError::invalid(
                "initial_capital",
                self.initial_capital,
            ));
        }
        Ok(())
    }
}

/// Run the switcher over `table`.
///
/// An empty table means acquisition failed upstream; the run is skipped and
/// `Ok(None)` returned. Parameters are checked before anything else.
pub fn run(
    table: &PriceTable,
    params: &BacktestParams,
) -> Result<Option<BacktestReport>, BacktestError> {
    params.validate()?;
    if table.is_empty() {
        tracing::info!(
            asset_a = %table.label_a,
            asset_b = %table.label_b,
            "Empty price table, skipping run"
        );
        return Ok(None);
    }
    table.validate()?;

    let prices_a = table.prices_a();
    let prices_b = table.prices_b();

    let kf = KalmanHedge::new(params.delta, params.measurement_noise)?;
    let (betas, state) = kf.estimate_with_state(&prices_a, &prices_b)?;
    tracing::debug!(
        bars = betas.len(),
        updates = state.update_count(),
        final_beta = state.beta(),
        final_variance = state.variance(),
        "Hedge ratio estimated"
    );

    let crossover = hedge_crossover::generate(&betas, params.fast_window, params.slow_window)?;
    let signals: Vec<Signal> = crossover.iter().map(|p| p.signal).collect();

    let returns = AssetReturns::from_prices(&prices_a, &prices_b)?;
    let sim = Simulation::run(&signals, &returns, params.initial_capital)?;
    let bench = Benchmarks::run(&returns, params.initial_capital)?;

    let rows = table
        .points
        .iter()
        .enumerate()
        .map(|(t, p)| BacktestRow {
            date: p.date,
            price_a: p.price_a,
            price_b: p.price_b,
            beta: betas[t],
            beta_fast: crossover[t].fast,
            beta_slow: crossover[t].slow,
            signal: signals[t],
            position: sim.positions[t],
            ret_a: returns.a[t],
            ret_b: returns.b[t],
            strategy_ret: sim.strategy_returns[t],
            equity: sim.equity[t],
            benchmark_a: bench.equity_a[t],
            benchmark_b: bench.equity_b[t],
        })
        .collect::<Vec<_>>();

    tracing::info!(
        bars = rows.len(),
        final_equity = sim.final_equity().unwrap_or(params.initial_capital),
        "Backtest complete"
    );

    Ok(Some(BacktestReport {
        label_a: table.label_a.clone(),
        label_b: table.label_b.clone(),
        initial_capital: params.initial_capital,
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::price::PricePoint;
    use chrono::NaiveDate;

    fn table(n: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let points = (0..n)
            .map(|i| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                price_a: 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1,
                price_b: 50.0 + (i as f64 * 0.2).cos() * 2.0,
            })
            .collect();
        PriceTable::new("GLD", "SLV").with_points(points)
    }

    #[test]
    fn empty_table_is_a_no_op() {
        let out = run(&PriceTable::new("GLD", "SLV"), &BacktestParams::default()).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn invalid_params_fail_even_on_empty_table() {
        let params = BacktestParams {
            delta: 0.0,
            ..BacktestParams::default()
        };
        assert!(run(&PriceTable::new("A", "B"), &params).is_err());
    }

    #[test]
    fn report_covers_every_bar() {
        let report = run(&table(60), &BacktestParams::default()).unwrap().unwrap();
        assert_eq!(report.rows.len(), 60);
        assert_eq!(report.rows[0].equity, DEFAULT_INITIAL_CAPITAL);
        assert_eq!(report.rows[0].position, Signal::None);
        assert!(report.summary().is_some());
    }
}
