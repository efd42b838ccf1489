use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::signal::Signal;

/// One bar of the full backtest table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestRow {
    pub date: NaiveDate,
    pub price_a: f64,
    pub price_b: f64,
    pub beta: f64,
    pub beta_fast: Option<f64>,
    pub beta_slow: Option<f64>,
    pub signal: Signal,
    pub position: Signal,
    pub ret_a: f64,
    pub ret_b: f64,
    pub strategy_ret: f64,
    pub equity: f64,
    pub benchmark_a: f64,
    pub benchmark_b: f64,
}

/// Everything one run produces, owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub label_a: String,
    pub label_b: String,
    pub initial_capital: f64,
    pub rows: Vec<BacktestRow>,
}

impl BacktestReport {
    pub fn equity(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.equity).collect()
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.rows.iter().map(|r| r.signal).collect()
    }

    pub fn positions(&self) -> Vec<Signal> {
        self.rows.iter().map(|r| r.position).collect()
    }

    /// Headline figures; `None` for a report without rows.
    pub fn summary(&self) -> Option<Summary> {
        let last = self.rows.last()?;
        let initial = self.initial_capital;
        Some(Summary {
            label_a: self.label_a.clone(),
            label_b: self.label_b.clone(),
            initial_capital: initial,
            final_equity: last.equity,
            strategy_return_pct: pct_return(last.equity, initial),
            benchmark_a_return_pct: pct_return(last.benchmark_a, initial),
            benchmark_b_return_pct: pct_return(last.benchmark_b, initial),
            bars: self.rows.len(),
            bars_in_a: self.rows.iter().filter(|r| r.position == Signal::FavorA).count(),
            bars_in_b: self.rows.iter().filter(|r| r.position == Signal::FavorB).count(),
        })
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// (final - initial) / initial, as a percentage.
pub fn pct_return(final_value: f64, initial: f64) -> f64 {
    (final_value - initial) / initial * 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub label_a: String,
    pub label_b: String,
    pub initial_capital: f64,
    pub final_equity: f64,
    pub strategy_return_pct: f64,
    pub benchmark_a_return_pct: f64,
    pub benchmark_b_return_pct: f64,
    pub bars: usize,
    pub bars_in_a: usize,
    pub bars_in_b: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "Final Equity: {}", format_money(self.final_equity))?;
        writeln!(f, "Total Return (Strategy): {:.2}%", self.strategy_return_pct)?;
        writeln!(
            f,
            "Benchmark Return ({}): {:.2}%",
            self.label_a, self.benchmark_a_return_pct
        )?;
        write!(
            f,
            "Benchmark Return ({}): {:.2}%",
            self.label_b, self.benchmark_b_return_pct
        )
    }
}

/// Two decimals with thousands separators, e.g. `12,345.68`.
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_money_groups_thousands() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(-10000.0), "-10,000.00");
    }

    #[test]
    fn pct_return_of_doubling_is_100() {
        assert!((pct_return(20_000.0, 10_000.0) - 100.0).abs() < 1e-12);
        assert!((pct_return(9_898.0, 10_000.0) - (-1.02)).abs() < 1e-9);
    }

    #[test]
    fn empty_report_has_no_summary() {
        let report = BacktestReport {
            label_a: "A".to_string(),
            label_b: "B".to_string(),
            initial_capital: 1.0,
            rows: Vec::new(),
        };
        assert!(report.summary().is_none());
    }
}
