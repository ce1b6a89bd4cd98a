//! End-to-end tests for the fairval binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const COMPANIES: &str = r#"{
    "companies": [
        {
            "ticker": "AAPL",
            "free_cash_flow": 71706000000,
            "cash_and_equivalents": 93025000000,
            "total_debt": 112723000000,
            "shares_outstanding": 17250000000,
            "beta": 1.31,
            "short_term_growth": 0.1246,
            "spot_price": 42.0,
            "volatility": 0.2
        }
    ]
}"#;

/// Workspace with an empty (all defaults) config file.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fairval.toml"), "").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        self.cmd_with_config(&self.path("fairval.toml"))
    }

    fn cmd_with_config(&self, config: &Path) -> Command {
        let mut cmd = Command::cargo_bin("fairval").unwrap();
        cmd.env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(config);
        cmd
    }
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// DCF
// =============================================================================

#[test]
fn dcf_from_explicit_inputs() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["dcf", "--fcf", "71706e6", "--cash", "93025e6", "--debt", "112723e6"])
        .args(["--shares", "17250e6", "--beta", "1.31", "--short-growth", "0.1246"])
        .args(["-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::diff("84.8812\n"));
}

#[test]
fn dcf_table_shows_fair_value() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["dcf", "--fcf", "71706e6", "--cash", "93025e6", "--debt", "112723e6"])
        .args(["--shares", "17250e6", "--discount-rate", "0.08", "--short-growth", "0.1246"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fair Value / Share"))
        .stdout(predicate::str::contains("84.88"))
        .stdout(predicate::str::contains("8.0000%"));
}

#[test]
fn dcf_json_breakdown() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["dcf", "--fcf", "100", "--cash", "50", "--debt", "0", "--shares", "10"])
        .args(["--discount-rate", "0", "--short-growth", "0", "--long-growth", "0"])
        .args(["--breakdown", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["fair_value_per_share"].as_f64().unwrap(), 205.0);
    let projected = json["projected"].as_array().unwrap();
    assert_eq!(projected.len(), 20);
    assert_eq!(projected[10]["regime"], "long_term");
}

#[test]
fn dcf_from_data_file() {
    let ws = Workspace::new();
    let data = ws.write("companies.json", COMPANIES);
    ws.cmd()
        .args(["dcf", "--ticker", "aapl", "--data"])
        .arg(&data)
        .args(["--as-of", "2020-09-28", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::diff("84.8812\n"));
}

#[test]
fn dcf_unknown_ticker() {
    let ws = Workspace::new();
    let data = ws.write("companies.json", COMPANIES);
    ws.cmd()
        .args(["dcf", "--ticker", "MSFT", "--data"])
        .arg(&data)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record for MSFT"));
}

#[test]
fn dcf_missing_inputs() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["dcf", "--cash", "1", "--debt", "1", "--shares", "1"])
        .args(["--discount-rate", "0.08", "--short-growth", "0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required argument: --fcf"));
}

#[test]
fn dcf_rejects_zero_shares() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["dcf", "--fcf", "100", "--cash", "0", "--debt", "0", "--shares", "0"])
        .args(["--discount-rate", "0.08", "--short-growth", "0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shares_outstanding"));
}

// =============================================================================
// OPTIONS
// =============================================================================

#[test]
fn option_put_price() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["option", "--spot", "42", "--strike", "40", "--expiry-years", "0.5"])
        .args(["--vol", "0.2", "--rate", "0.1", "--type", "put", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.808599\n"));
}

#[test]
fn option_json_reports_greeks_and_parity() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["option", "--spot", "42", "--strike", "40", "--expiry-years", "0.5"])
        .args(["--vol", "0.2", "--rate", "0.1", "--market-price", "5.0", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    let price = json["price"].as_f64().unwrap();
    let parity = json["parity_price"].as_f64().unwrap();
    assert!((price - 4.759_422_392_871_535).abs() < 1e-9);
    assert!((parity - 0.808_599_372_900_095_8).abs() < 1e-9);
    assert!((json["delta"].as_f64().unwrap() - 0.779_131_290_942_669).abs() < 1e-9);
    assert_eq!(json["option_type"], "call");

    // P = C_market - S + K·e^(-rT)
    let implied = json["market_parity_price"].as_f64().unwrap();
    assert!((implied - (parity + 5.0 - price)).abs() < 1e-9);
}

#[test]
fn option_with_dividend_yield() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["option", "--spot", "100", "--strike", "95", "--expiry-years", "1"])
        .args(["--vol", "0.25", "--rate", "0.05", "--dividend-yield", "0.03", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert!((json["price"].as_f64().unwrap() - 14.982_827_836_602_574).abs() < 1e-9);
    assert!((json["delta"].as_f64().unwrap() - 0.659_160_542_322_182_9).abs() < 1e-9);
    assert!((json["parity_price"].as_f64().unwrap() - 5.349_623_164_170_41).abs() < 1e-9);
}

#[test]
fn option_from_expiry_date_and_data_file() {
    let ws = Workspace::new();
    let data = ws.write("companies.json", COMPANIES);
    let output = ws
        .cmd()
        .args(["option", "--ticker", "AAPL", "--data"])
        .arg(&data)
        .args(["--strike", "40", "--pricing-date", "2024-01-01"])
        .args(["--expiry-date", "2025-01-01", "--rate", "0.05", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert!((json["time_to_expiry"].as_f64().unwrap() - 366.0 / 365.0).abs() < 1e-12);
    assert_eq!(json["spot_price"].as_f64().unwrap(), 42.0);
}

#[test]
fn option_uses_configured_rate() {
    let ws = Workspace::new();
    let config = ws.write("rates.toml", "[options]\nrisk_free_rate = 0.1\n");
    ws.cmd_with_config(&config)
        .args(["option", "--spot", "42", "--strike", "40", "--expiry-years", "0.5"])
        .args(["--vol", "0.2", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::diff("4.759422\n"));
}

#[test]
fn option_american_is_unsupported() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["option", "--spot", "42", "--strike", "40", "--expiry-years", "0.5"])
        .args(["--vol", "0.2", "--style", "american"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("american options are not implemented"));
}

#[test]
fn option_invalid_type() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["option", "--spot", "42", "--strike", "40", "--expiry-years", "0.5"])
        .args(["--vol", "0.2", "--type", "straddle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid option type: 'straddle'"));
}

#[test]
fn option_zero_volatility() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["option", "--spot", "42", "--strike", "40", "--expiry-years", "0.5"])
        .args(["--vol", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("volatility"));
}

// =============================================================================
// WACC AND CONFIG
// =============================================================================

#[test]
fn wacc_lookup() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["wacc", "--beta", "1.31", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::diff("0.08\n"));
}

#[test]
fn wacc_table_json() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["wacc", "-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let rows = stdout_json(&output);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[6]["rate"], "8.5000%");
}

#[test]
fn config_init_and_show() {
    let ws = Workspace::new();
    let path = ws.path("nested").join("config.toml");

    ws.cmd_with_config(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(path.exists());

    ws.cmd_with_config(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let output = ws
        .cmd_with_config(&path)
        .args(["config", "show", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["options"]["risk_free_rate"].as_f64().unwrap(), 0.05);
    assert_eq!(json["dcf"]["medium_term_ratio"].as_f64().unwrap(), 0.5);
}

#[test]
fn invalid_config_is_reported() {
    let ws = Workspace::new();
    let config = ws.write("bad.toml", "[dcf]\nmedium_term_ratio = 2.0\n");
    ws.cmd_with_config(&config)
        .args(["wacc", "--beta", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dcf.medium_term_ratio"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let ws = Workspace::new();
    ws.cmd_with_config(&ws.path("absent.toml"))
        .args(["wacc", "--beta", "1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
}
