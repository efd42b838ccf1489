pub mod sma;

pub use sma::{rolling_mean, Sma};
