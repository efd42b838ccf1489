pub mod backtest;
#[cfg(feature = "chart")]
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod estimator;
pub mod indicator;
pub mod model;
pub mod pipeline;
pub mod strategy;
