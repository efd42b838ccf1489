use thiserror::Error;

/// Failures of the estimation and simulation core.
///
/// None of these are transient; a run that hits one is aborted with no partial output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BacktestError {
    #[error("shape mismatch: {left} vs {right} observations")]
    ShapeMismatch { left: usize, right: usize },

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("non-finite value in {series} at index {index}")]
    NonFinite { series: &'static str, index: usize },

    #[error("numerical error at index {index}: gain denominator is zero or estimate diverged")]
    Numerical { index: usize },
}

impl BacktestError {
    pub fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("data source error for {ticker}: {msg}")]
    DataSource { ticker: String, msg: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}
