use chrono::NaiveDate;
use hedge_switcher::config::Config;
use hedge_switcher::error::BacktestError;

#[test]
fn parse_full_toml() {
    let toml_str = r#"
[pair]
asset_a = "GLD.US"
asset_b = "SLV.US"
start_date = "2005-01-01"
end_date = "2024-12-31"

[filter]
delta = 1e-4
measurement_noise = 1e-3

[strategy]
fast_window = 6
slow_window = 21

[backtest]
initial_capital = 10000.0

[data]
base_url = "https://stooq.com"
timeout_secs = 15

[logging]
level = "debug"
json = true
"#;
    let config = Config::from_toml_str(toml_str).unwrap();
    assert_eq!(config.pair.asset_a, "GLD.US");
    assert_eq!(
        config.pair.end_date,
        Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
    );
    assert!((config.filter.delta - 1e-4).abs() < f64::EPSILON);
    assert!((config.filter.measurement_noise - 1e-3).abs() < f64::EPSILON);
    assert_eq!(config.data.timeout_secs, 15);
    assert!(config.logging.json);
    assert!(config.validate().is_ok());

    let params = config.backtest_params();
    assert_eq!(params.fast_window, 6);
    assert_eq!(params.slow_window, 21);
    assert!((params.initial_capital - 10_000.0).abs() < f64::EPSILON);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = Config::from_toml_str("[strategy]\nfast_window = 4\n").unwrap();
    assert_eq!(config.strategy.fast_window, 4);
    assert_eq!(config.strategy.slow_window, 21);
    assert_eq!(config.pair.asset_b, "SLV.US");
    assert!(config.pair.end_date.is_none());
}

#[test]
fn validation_rejects_bad_values() {
    let cases = [
        ("[filter]\nmeasurement_noise = 0.0\n", "measurement_noise"),
        ("[strategy]\nslow_window = 0\n", "slow_window"),
        ("[backtest]\ninitial_capital = -1.0\n", "initial_capital"),
        ("[pair]\nasset_a = \"SLV.US\"\n", "pair.asset_b"),
        ("[pair]\nasset_b = \" \"\n", "pair.asset_b"),
        (
            "[pair]\nstart_date = \"2024-01-01\"\nend_date = \"2023-01-01\"\n",
            "pair.start_date",
        ),
        ("[data]\ntimeout_secs = 0\n", "data.timeout_secs"),
    ];
    for (case, key) in cases {
        let config = Config::from_toml_str(case).unwrap();
        match config.validate() {
            Err(BacktestError::InvalidParameter { name, .. }) => {
                assert_eq!(name, key, "wrong key for {:?}", case)
            }
            other => panic!("expected InvalidParameter for {:?}, got {:?}", case, other),
        }
    }
}

#[test]
fn unparsable_date_is_a_parse_error() {
    assert!(Config::from_toml_str("[pair]\nstart_date = \"yesterday\"\n").is_err());
}
