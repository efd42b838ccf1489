//! Position simulation and equity accounting on top of the regime signal.

pub mod benchmark;
pub mod report;
pub mod returns;
pub mod simulator;

pub use benchmark::{buy_and_hold, Benchmarks};
pub use report::{pct_return, BacktestReport, BacktestRow, Summary};
pub use returns::{simple_returns, AssetReturns};
pub use simulator::{compound, lag_positions, realized_returns, Simulation};
