use std::cmp::Ordering;

use serde::Serialize;

use crate::error::BacktestError;
use crate::indicator::sma::Sma;
use crate::model::signal::Signal;

pub const DEFAULT_FAST_WINDOW: usize = 6;
pub const DEFAULT_SLOW_WINDOW: usize = 21;

/// Smoothed hedge-ratio lines and the regime they imply at one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrossoverPoint {
    pub fast: Option<f64>,
    pub slow: Option<f64>,
    pub signal: Signal,
}

/// Fast/slow crossover on the hedge ratio.
///
/// The fast line is a trailing mean of β; the slow line is a trailing mean of
/// the fast line, so its warm-up stacks on top of the fast one.
#[derive(Debug, Clone)]
pub struct HedgeRatioCrossover {
    fast_sma: Sma,
    slow_sma: Sma,
}

impl HedgeRatioCrossover {
    pub fn new(fast_window: usize, slow_window: usize) -> Result<Self, BacktestError> {
        if fast_window == 0 {
            return Err(BacktestError::invalid("fast_window", fast_window));
        }
        if slow_window == 0 {
            return Err(BacktestError::invalid("slow_window", slow_window));
        }
        Ok(Self {
            fast_sma: Sma::new(fast_window)?,
            slow_sma: Sma::new(slow_window)?,
        })
    }

    /// Feed the next hedge ratio and classify the regime as of this bar.
    pub fn on_beta(&mut self, beta: f64) -> CrossoverPoint {
        let fast = self.fast_sma.push(beta);
        let slow = self.slow_sma.push_opt(fast);
        CrossoverPoint {
            fast,
            slow,
            signal: classify(fast, slow),
        }
    }

    /// Bars consumed before both lines are defined.
    pub fn warmup_len(&self) -> usize {
        self.fast_sma.period() + self.slow_sma.period() - 2
    }
}

/// Strict crossover: equal or undefined lines (including NaN) give no signal.
pub fn classify(fast: Option<f64>, slow: Option<f64>) -> Signal {
    match (fast, slow) {
        (Some(f), Some(s)) => match f.partial_cmp(&s) {
            Some(Ordering::Greater) => Signal::FavorA,
            Some(Ordering::Less) => Signal::FavorB,
            Some(Ordering::Equal) | None => Signal::None,
        },
        _ => Signal::None,
    }
}

/// Run the crossover over a whole hedge-ratio series.
pub fn generate(
    betas: &[f64],
    fast_window: usize,
    slow_window: usize,
) -> Result<Vec<CrossoverPoint>, BacktestError> {
    let mut strat = HedgeRatioCrossover::new(fast_window, slow_window)?;
    Ok(betas.iter().map(|&b| strat.on_beta(b)).collect())
}
