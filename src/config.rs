use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

use crate::error::BacktestError;
use crate::estimator::kalman::{DEFAULT_DELTA, DEFAULT_MEASUREMENT_NOISE};
use crate::pipeline::{BacktestParams, DEFAULT_INITIAL_CAPITAL};
use crate::strategy::hedge_crossover::{DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pair: PairConfig,
    pub filter: FilterConfig,
    pub strategy: StrategyConfig,
    pub backtest: BacktestConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PairConfig {
    /// Dependent leg, e.g. "GLD.US"
    pub asset_a: String,
    /// Hedge leg, e.g. "SLV.US"
    pub asset_b: String,
    pub start_date: NaiveDate,
    /// Defaults to today when omitted.
    pub end_date: Option<NaiveDate>,
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            asset_a: "GLD.US".to_string(),
            asset_b: "SLV.US".to_string(),
            start_date: NaiveDate::from_ymd_opt(2005, 1, 1).unwrap_or_default(),
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub delta: f64,
    pub measurement_noise: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
            measurement_noise: DEFAULT_MEASUREMENT_NOISE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub fast_window: usize,
    pub slow_window: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub initial_capital: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://stooq.com".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl PairConfig {
    pub fn resolved_end_date(&self) -> NaiveDate {
        self.end_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

impl Config {
    /// Load `config/default.toml` if present, otherwise built-in defaults.
    pub fn load() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load_from(path)
        } else {
            dotenvy::dotenv().ok();
            let mut config = Self::default();
            config.apply_env();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    fn apply_env(&mut self) {
        self.data.api_key = std::env::var("STOOQ_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
    }

    pub fn backtest_params(&self) -> BacktestParams {
        BacktestParams {
            delta: self.filter.delta,
            measurement_noise: self.filter.measurement_noise,
            fast_window: self.strategy.fast_window,
            slow_window: self.strategy.slow_window,
            initial_capital: self.backtest.initial_capital,
        }
    }

    /// Reject a config the run cannot use, naming the offending key.
    pub fn validate(&self) -> Result<(), BacktestError> {
        let a = self.pair.asset_a.trim();
        let b = self.pair.asset_b.trim();
        if a.is_empty() {
            return Err(BacktestError::invalid("pair.asset_a", "empty ticker"));
        }
        if b.is_empty() {
            return Err(BacktestError::invalid("pair.asset_b", "empty ticker"));
        }
        if a.eq_ignore_ascii_case(b) {
            return Err(BacktestError::invalid(
                "pair.asset_b",
                format!("'{}' is the same ticker as pair.asset_a", b),
            ));
        }
        let end = self.pair.resolved_end_date();
        if self.pair.start_date >= end {
            return Err(BacktestError::invalid(
                "pair.start_date",
                format!("{} is not before end date {}", self.pair.start_date, end),
            ));
        }
        if self.data.timeout_secs == 0 {
            return Err(BacktestError::invalid("data.timeout_secs", 0));
        }
        self.backtest_params().validate()
    }
}
