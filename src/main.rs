use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use hedge_switcher::config::{Config, DEFAULT_CONFIG_PATH};
use hedge_switcher::data::StooqClient;
use hedge_switcher::pipeline;

/// Kalman hedge-ratio switcher backtest for a pair of assets.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML config (built-in defaults when the default path is missing)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dependent leg ticker, e.g. "GLD.US"
    #[arg(long)]
    asset_a: Option<String>,

    /// Hedge leg ticker, e.g. "SLV.US"
    #[arg(long)]
    asset_b: Option<String>,

    /// First date of history (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last date of history (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Starting account value
    #[arg(long)]
    capital: Option<f64>,

    /// Write the full per-bar table as JSON
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write an equity chart PNG (requires the `chart` feature)
    #[arg(long)]
    chart: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()
                .with_context(|| format!("failed to load {}", DEFAULT_CONFIG_PATH))?,
        };
        if let Some(a) = &self.asset_a {
            config.pair.asset_a = a.clone();
        }
        if let Some(b) = &self.asset_b {
            config.pair.asset_b = b.clone();
        }
        if let Some(start) = self.start {
            config.pair.start_date = start;
        }
        if self.end.is_some() {
            config.pair.end_date = self.end;
        }
        if let Some(capital) = self.capital {
            config.backtest.initial_capital = capital;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        config
            .logging
            .level
            .parse()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    let start = config.pair.start_date;
    let end = config.pair.resolved_end_date();
    tracing::info!(
        asset_a = %config.pair.asset_a,
        asset_b = %config.pair.asset_b,
        %start,
        %end,
        "Starting hedge-switcher"
    );

    let client = StooqClient::new(&config.data).context("failed to build HTTP client")?;
    let table = client
        .fetch_pair(&config.pair.asset_a, &config.pair.asset_b, start, end)
        .await;

    let params = config.backtest_params();
    let Some(report) = pipeline::run(&table, &params).context("backtest aborted")? else {
        return Ok(());
    };

    println!(
        "Ran {} bars on {}/{} from ${:.0} starting capital",
        report.rows.len(),
        report.label_a,
        report.label_b,
        report.initial_capital
    );

    if let Some(path) = &cli.export {
        let json = report.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Backtest table exported");
    }

    if let Some(path) = &cli.chart {
        render_chart(&report, path)?;
    }

    if let Some(summary) = report.summary() {
        println!("{}", summary);
    }

    Ok(())
}

#[cfg(feature = "chart")]
fn render_chart(report: &hedge_switcher::backtest::BacktestReport, path: &std::path::Path) -> Result<()> {
    hedge_switcher::chart::render_equity_chart(report, path)
}

#[cfg(not(feature = "chart"))]
fn render_chart(_report: &hedge_switcher::backtest::BacktestReport, path: &std::path::Path) -> Result<()> {
    tracing::warn!(
        path = %path.display(),
        "Chart output requested but hedge-switcher was built without the `chart` feature"
    );
    Ok(())
}
