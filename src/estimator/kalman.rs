//! Kalman filter for the time-varying hedge ratio between two price series.
//!
//! **State equation** (random walk):
//! ```text
//! β[t] = β[t-1] + w,  w ~ N(0, δ)
//! ```
//!
//! **Observation equation**:
//! ```text
//! y[t] = β[t] · x[t] + v,  v ~ N(0, R)
//! ```
//!
//! `y` is the dependent (target) asset price, `x` the hedge asset price.
//!
//! ```rust
//! use hedge_switcher::estimator::KalmanHedge;
//!
//! let kf = KalmanHedge::new(1e-4, 1e-3).unwrap();
//! let betas = kf.estimate(&[100.0, 101.0, 102.0], &[50.0, 50.5, 51.0]).unwrap();
//! assert_eq!(betas.len(), 3);
//! ```

use crate::error::BacktestError;

pub const DEFAULT_DELTA: f64 = 1e-4;
pub const DEFAULT_MEASUREMENT_NOISE: f64 = 1e-3;

/// Working state of a single filter pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterState {
    /// Estimation error variance (P)
    variance: f64,
    /// Current hedge ratio estimate (β)
    beta: f64,
    update_count: u64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            variance: 1.0,
            beta: 0.0,
            update_count: 0,
        }
    }
}

impl FilterState {
    /// Advance the filter by one observation and return the new β.
    ///
    /// `index` only labels the error if the step fails.
    pub fn update(
        &mut self,
        y: f64,
        x: f64,
        delta: f64,
        measurement_noise: f64,
        index: usize,
    ) -> Result<f64, BacktestError> {
        // Predict: β carries over, uncertainty grows.
        let p_predicted = self.variance + delta;
        let y_pred = self.beta * x;
        let innovation = y - y_pred;

        let s = x * x * p_predicted + measurement_noise;
        if s == 0.0 || !s.is_finite() {
            return Err(BacktestError::Numerical { index });
        }
        let gain = p_predicted * x / s;

        let beta = self.beta + gain * innovation;
        let variance = (1.0 - gain * x) * p_predicted;
        if !beta.is_finite() || !variance.is_finite() {
            return Err(BacktestError::Numerical { index });
        }

        self.beta = beta;
        self.variance = variance;
        self.update_count += 1;
        Ok(beta)
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Lower values mean higher confidence in the estimate.
    #[inline]
    pub fn variance(&self) -> f64 {
        self.variance
    }

    #[inline]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

/// Hedge-ratio estimator parameterised by process noise δ and measurement noise R.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanHedge {
    /// Process noise. Higher values track regime changes faster but noisier.
    delta: f64,
    /// Measurement noise. Higher values trust each new observation less.
    measurement_noise: f64,
}

impl Default for KalmanHedge {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
        }
    }
}

impl KalmanHedge {
    pub fn new(delta: f64, measurement_noise: f64) -> Result<Self, BacktestError> {
        if !(delta.is_finite() && delta > 0.0) {
            return Err(BacktestError::invalid("delta", delta));
        }
        if !(measurement_noise.is_finite() && measurement_noise > 0.0) {
            return Err(BacktestError::invalid("measurement_noise", measurement_noise));
        }
        Ok(Self {
            delta,
            measurement_noise,
        })
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn measurement_noise(&self) -> f64 {
        self.measurement_noise
    }

    /// Run one pass over aligned series and return β for every timestep.
    pub fn estimate(&self, y: &[f64], x: &[f64]) -> Result<Vec<f64>, BacktestError> {
        self.estimate_with_state(y, x).map(|(betas, _)| betas)
    }

    /// Same as [`estimate`](Self::estimate), also returning the final filter state.
    pub fn estimate_with_state(
        &self,
        y: &[f64],
        x: &[f64],
    ) -> Result<(Vec<f64>, FilterState), BacktestError> {
        if y.len() != x.len() {
            return Err(BacktestError::ShapeMismatch {
                left: y.len(),
                right: x.len(),
            });
        }
        if let Some(index) = y.iter().position(|v| !v.is_finite()) {
            return Err(BacktestError::NonFinite { series: "y", index });
        }
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(BacktestError::NonFinite { series: "x", index });
        }

        let mut state = FilterState::default();
        let mut betas = Vec::with_capacity(y.len());
        for (t, (&yt, &xt)) in y.iter().zip(x).enumerate() {
            betas.push(state.update(yt, xt, self.delta, self.measurement_noise, t)?);
        }
        Ok((betas, state))
    }
}
