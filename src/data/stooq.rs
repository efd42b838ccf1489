use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

use crate::config::DataConfig;
use crate::error::AppError;
use crate::model::price::{display_label, PriceTable};

use super::align::align_closes;

#[derive(Debug, Deserialize)]
struct DailyRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Close", default)]
    close: Option<f64>,
}

/// Parse a Stooq daily CSV download into (date, close) pairs.
///
/// Stooq answers unknown tickers and quota errors with a plain-text body
/// instead of CSV; those come back as [`AppError::DataSource`].
pub fn parse_daily_csv(ticker: &str, body: &str) -> Result<Vec<(NaiveDate, Option<f64>)>, AppError> {
    let body = body.trim_start_matches('\u{feff}');
    let first_line = body.lines().next().unwrap_or_default().trim();
    if !first_line.starts_with("Date") {
        return Err(AppError::DataSource {
            ticker: ticker.to_string(),
            msg: if first_line.is_empty() {
                "empty response".to_string()
            } else {
                first_line.to_string()
            },
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());
    let mut out = Vec::new();
    for row in reader.deserialize() {
        let row: DailyRow = row?;
        out.push((row.date, row.close));
    }
    if out.is_empty() {
        return Err(AppError::DataSource {
            ticker: ticker.to_string(),
            msg: "no rows in range".to_string(),
        });
    }
    out.sort_by_key(|(date, _)| *date);
    Ok(out)
}

pub struct StooqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl StooqClient {
    pub fn new(config: &DataConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("hedge-switcher/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn daily_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("{}/q/d/l/", self.base_url))
            .map_err(|e| AppError::Config(format!("invalid data.base_url: {}", e)))?;
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("s", &ticker.to_ascii_lowercase())
                .append_pair("d1", &start.format("%Y%m%d").to_string())
                .append_pair("d2", &end.format("%Y%m%d").to_string())
                .append_pair("i", "d");
            if let Some(key) = &self.api_key {
                q.append_pair("apikey", key);
            }
        }
        Ok(url)
    }

    pub async fn fetch_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, Option<f64>)>, AppError> {
        let url = self.daily_url(ticker, start, end)?;
        tracing::debug!(ticker, %start, %end, "Requesting daily closes");
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let closes = parse_daily_csv(ticker, &body)?;
        tracing::info!(ticker, rows = closes.len(), "Fetched daily closes");
        Ok(closes)
    }

    /// Fetch both legs and align them on date.
    ///
    /// Never fails: any error is logged and an empty table returned.
    pub async fn fetch_pair(
        &self,
        ticker_a: &str,
        ticker_b: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PriceTable {
        let (a, b) = tokio::join!(
            self.fetch_closes(ticker_a, start, end),
            self.fetch_closes(ticker_b, start, end)
        );
        match (a, b) {
            (Ok(a), Ok(b)) => {
                let table = align_closes(&display_label(ticker_a), &display_label(ticker_b), &a, &b);
                tracing::info!(
                    asset_a = %table.label_a,
                    asset_b = %table.label_b,
                    rows = table.len(),
                    "Aligned price table"
                );
                table
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, ticker_a, ticker_b, "Data fetch failed");
                PriceTable::empty(ticker_a, ticker_b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Date,Open,High,Low,Close,Volume\n\
2024-01-03,190.1,191.0,189.5,190.4,1000\n\
2024-01-02,189.0,190.5,188.0,189.9,1200\n";

    #[test]
    fn parses_and_sorts_rows() {
        let rows = parse_daily_csv("gld.us", SAMPLE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(rows[0].1, Some(189.9));
    }

    #[test]
    fn plain_text_reply_is_data_source_error() {
        let err = parse_daily_csv("nope.us", "No data").unwrap_err();
        assert!(matches!(err, AppError::DataSource { ref msg, .. } if msg == "No data"));
    }

    #[test]
    fn daily_url_carries_range_and_interval() {
        let client = StooqClient::new(&DataConfig::default()).unwrap();
        let url = client
            .daily_url(
                "GLD.US",
                NaiveDate::from_ymd_opt(2005, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://stooq.com/q/d/l/?s=gld.us&d1=20050101&d2=20241231&i=d"
        );
    }
}
