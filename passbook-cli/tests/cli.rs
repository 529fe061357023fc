use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("statement.csv")
}

/// Run the binary with an isolated HOME so no real config is picked up.
fn passbook(home: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_passbook"))
        .env("HOME", home)
        .args(args)
        .output()?;
    Ok(output)
}

#[test]
fn test_parse_json_output() -> Result<()> {
    let home = tempfile::tempdir()?;
    let file = fixture();
    let output = passbook(home.path(), &["parse", file.to_str().unwrap(), "--format", "json"])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let txns = doc["transactions"].as_array().unwrap();
    assert_eq!(txns.len(), 3);

    assert_eq!(txns[0]["date"], "2025-02-21");
    assert_eq!(txns[0]["direction"], "credit");
    assert_eq!(txns[0]["category"], "Income");
    assert_eq!(txns[0]["balance"], "82500.00");

    assert_eq!(txns[1]["direction"], "debit");
    assert_eq!(txns[1]["amount"], "850.50");
    assert_eq!(txns[1]["category"], "Food & Dining");
    assert_eq!(txns[2]["category"], "Transportation");
    Ok(())
}

#[test]
fn test_parse_sorted_csv_output() -> Result<()> {
    let home = tempfile::tempdir()?;
    let file = fixture();
    let output = passbook(
        home.path(),
        &["parse", file.to_str().unwrap(), "--bank", "generic", "--format", "csv", "--sort"],
    )?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("date,description,direction,amount,balance,category,bank,id")
    );
    let dates: Vec<&str> = lines.map(|l| l.split(',').next().unwrap_or("")).collect();
    assert_eq!(dates, vec!["2025-02-19", "2025-02-20", "2025-02-21"]);
    Ok(())
}

#[test]
fn test_unknown_bank_fails() -> Result<()> {
    let home = tempfile::tempdir()?;
    let file = fixture();
    let output = passbook(home.path(), &["parse", file.to_str().unwrap(), "--bank", "sbi"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("unsupported bank 'sbi'"), "{stderr}");
    assert!(stderr.contains("check the bank selection"), "{stderr}");
    Ok(())
}

#[test]
fn test_bad_file_reports_hint() -> Result<()> {
    let home = tempfile::tempdir()?;
    let bad = home.path().join("notes.csv");
    std::fs::write(&bad, "just,some\nrandom,text\n")?;
    let output = passbook(home.path(), &["parse", bad.to_str().unwrap()])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("check the file format"), "{stderr}");
    Ok(())
}

#[test]
fn test_summary_json() -> Result<()> {
    let home = tempfile::tempdir()?;
    let file = fixture();
    let output = passbook(home.path(), &["summary", file.to_str().unwrap(), "--json"])?;
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(summary["transaction_count"], 3);
    assert_eq!(summary["total_income"], "50000.00");
    assert_eq!(summary["total_expense"], "1060.50");
    assert_eq!(summary["by_category"][0]["category"], "Food & Dining");
    assert_eq!(summary["by_category"][1]["category"], "Transportation");
    Ok(())
}

#[test]
fn test_categorize() -> Result<()> {
    let home = tempfile::tempdir()?;
    let output = passbook(home.path(), &["categorize", "POS NETFLIX.COM MUMBAI"])?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "Entertainment");

    let output = passbook(home.path(), &["categorize", "XYZ 123"])?;
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "Other");
    Ok(())
}

#[test]
fn test_config_custom_categories_apply() -> Result<()> {
    let home = tempfile::tempdir()?;
    let cfg = home.path().join("custom.toml");
    std::fs::write(&cfg, "custom_categories = [\"Pets\"]\n")?;

    let output = passbook(
        home.path(),
        &["--config", cfg.to_str().unwrap(), "categorize", "SUPERTAILS PETS CARE"],
    )?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim(), "Pets");
    Ok(())
}

#[test]
fn test_config_init_then_show() -> Result<()> {
    let home = tempfile::tempdir()?;
    let output = passbook(home.path(), &["config", "init"])?;
    assert!(output.status.success());
    let written = home.path().join(".passbook").join("config.toml");
    assert!(written.exists());

    let output = passbook(home.path(), &["config", "show"])?;
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("format = \"table\""), "{stdout}");
    assert!(stdout.contains("parse_timeout_secs = 30"), "{stdout}");
    Ok(())
}

#[test]
fn test_banks_lists_adapters() -> Result<()> {
    let home = tempfile::tempdir()?;
    let output = passbook(home.path(), &["banks"])?;
    let stdout = String::from_utf8(output.stdout)?;
    for code in ["hdfc", "icici", "axis", "generic"] {
        assert!(stdout.lines().any(|l| l.starts_with(code)), "{stdout}");
    }
    Ok(())
}
