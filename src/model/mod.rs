pub mod price;
pub mod signal;

pub use price::{PricePoint, PriceTable};
pub use signal::Signal;
