use rigprice::AppCommand;
use std::fs;
use tracing::info;

#[test_log::test]
fn test_price_command_with_builtin_data() {
    let result = rigprice::run_command(
        AppCommand::Price {
            model: "s9_135".to_string(),
            date: "2017-11-28".to_string(),
        },
        None,
    );
    assert!(result.is_ok(), "Price command failed: {:?}", result.err());
}

#[test_log::test]
fn test_price_command_rejects_malformed_date() {
    let result = rigprice::run_command(
        AppCommand::Price {
            model: "s9_135".to_string(),
            date: "Nov 2017".to_string(),
        },
        None,
    );
    assert!(result.is_err(), "Malformed date should be rejected");
}

#[test_log::test]
fn test_models_command() {
    let result = rigprice::run_command(
        AppCommand::Models {
            date: "2020-06".to_string(),
        },
        None,
    );
    assert!(result.is_ok(), "Models command failed: {:?}", result.err());
}

#[test_log::test]
fn test_history_command_writes_csv() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let csv_path = dir.path().join("s19_history.csv");

    let result = rigprice::run_command(
        AppCommand::History {
            model: "s19".to_string(),
            csv: Some(csv_path.clone()),
        },
        None,
    );
    assert!(result.is_ok(), "History command failed: {:?}", result.err());

    let content = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    info!(rows = content.lines().count(), "History CSV written");
    assert!(content.starts_with("date,price_usd,method"));
    assert!(content.contains("2020-05,"));
}

#[test_log::test]
fn test_compare_command_with_explicit_price() {
    let result = rigprice::run_command(
        AppCommand::Compare {
            model: "s19pro".to_string(),
            start: "2020-06".to_string(),
            btc_start: 9500.0,
            btc_end: 70000.0,
            price: Some(2600.0),
            csv: None,
        },
        None,
    );
    assert!(result.is_ok(), "Compare command failed: {:?}", result.err());
}

#[test_log::test]
fn test_config_overrides_flow_into_resolution() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = r#"
currency: "EUR"
overrides:
  s9_135:
    "2019-12": 725
"#;
    fs::write(config_file.path(), config_content).expect("Failed to write config file");

    let result = rigprice::run_command(
        AppCommand::Price {
            model: "s9_135".to_string(),
            date: "2019-12".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Price command with overrides failed: {:?}",
        result.err()
    );
}

#[test_log::test]
fn test_invalid_override_date_fails() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = r#"
overrides:
  s9_135:
    "December 2019": 725
"#;
    fs::write(config_file.path(), config_content).expect("Failed to write config file");

    let result = rigprice::run_command(
        AppCommand::Models {
            date: "2019-12".to_string(),
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(result.is_err(), "Malformed override date should be rejected");
}
