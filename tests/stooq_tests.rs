use chrono::NaiveDate;

use hedge_switcher::config::DataConfig;
use hedge_switcher::data::{align_closes, parse_daily_csv, StooqClient};
use hedge_switcher::error::AppError;

const GLD: &str = "Date,Open,High,Low,Close,Volume
2024-01-02,190.0,191.0,189.0,190.5,100
2024-01-03,190.5,192.0,190.0,191.5,100
2024-01-04,191.5,192.0,190.0,,100
2024-01-05,191.0,193.0,190.5,192.0,100
";

const SLV: &str = "Date,Open,High,Low,Close,Volume
2024-01-02,22.0,22.5,21.8,22.1,100
2024-01-04,22.1,22.9,22.0,22.6,100
2024-01-05,22.6,23.0,22.4,22.8,100
";

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

#[test]
fn parsed_series_join_on_common_complete_dates() {
    let a = parse_daily_csv("gld.us", GLD).unwrap();
    let b = parse_daily_csv("slv.us", SLV).unwrap();
    assert_eq!(a[2], (d(4), None));

    let table = align_closes("GLD", "SLV", &a, &b);
    assert_eq!(table.dates(), vec![d(2), d(5)]);
    assert_eq!(table.prices_a(), vec![190.5, 192.0]);
    assert_eq!(table.prices_b(), vec![22.1, 22.8]);
}

#[test]
fn byte_order_mark_before_header_is_ignored() {
    let with_bom = format!("\u{feff}{}", GLD);
    assert_eq!(
        parse_daily_csv("gld.us", &with_bom).unwrap(),
        parse_daily_csv("gld.us", GLD).unwrap()
    );
    assert_eq!(parse_daily_csv("gld.us", &with_bom).unwrap().len(), 4);
}

#[test]
fn header_only_body_is_an_error() {
    let err = parse_daily_csv("gld.us", "Date,Open,High,Low,Close,Volume\n").unwrap_err();
    assert!(matches!(err, AppError::DataSource { .. }));
}

#[test]
fn quota_message_is_an_error() {
    let err = parse_daily_csv("gld.us", "Exceeded the daily hits limit").unwrap_err();
    assert_eq!(
        err.to_string(),
        "data source error for gld.us: Exceeded the daily hits limit"
    );
}

#[test]
fn unreachable_source_yields_empty_table() {
    let config = DataConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        api_key: None,
    };
    let client = StooqClient::new(&config).unwrap();
    let table = tokio_test::block_on(client.fetch_pair("GLD.US", "SLV.US", d(1), d(31)));
    assert!(table.is_empty());
    assert_eq!(table.label_a, "GLD");
    assert_eq!(table.label_b, "SLV");
}
