//! Adaptive hedge-ratio estimation.
//!
//! A one-dimensional Kalman filter tracks the ratio β in `y ≈ β · x` as it
//! drifts over time, one observation at a time.

pub mod kalman;

pub use kalman::{FilterState, KalmanHedge};
