//! Historical price acquisition.
//!
//! Any failure here is reported through logs and an empty [`PriceTable`],
//! which the pipeline treats as "nothing to run".
//!
//! [`PriceTable`]: crate::model::price::PriceTable

pub mod align;
pub mod stooq;

pub use align::align_closes;
pub use stooq::{parse_daily_csv, StooqClient};
