use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const WALMART: &str = "WALMART STORE #1234\n123 Main Street\nDate: 01/15/2024\nTAX 3.10\nTOTAL: $45.67\n";

fn receiptlens() -> Command {
    Command::cargo_bin("receiptlens").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn process_text_receipt_as_json() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "walmart.txt", WALMART);

    receiptlens()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"vendor\": \"WALMART STORE 1234\""))
        .stdout(predicate::str::contains("\"total_amount\": \"45.67\""))
        .stdout(predicate::str::contains("\"category\": \"groceries\""))
        .stdout(predicate::str::contains("Receipt from WALMART STORE 1234"));
}

#[test]
fn process_text_receipt_as_csv() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "walmart.txt", WALMART);

    receiptlens()
        .args(["process", "--format", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("vendor,purchase_date,total_amount"))
        .stdout(predicate::str::contains("WALMART STORE 1234,2024-01-15,45.67,3.10,USD,groceries"));
}

#[test]
fn process_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "walmart.txt", WALMART);
    let output = dir.path().join("out.txt");

    receiptlens()
        .args(["process", "--format", "text", "--output"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("Total: 45.67 USD"));
}

#[test]
fn process_missing_input_fails() {
    receiptlens()
        .args(["process", "/nonexistent/receipt.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn process_image_without_models_fails() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "receipt.jpg", "not an image");
    let models = TempDir::new().unwrap();

    receiptlens()
        .args(["process", "--model-dir"])
        .arg(models.path())
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OCR models not found"));
}

#[test]
fn batch_writes_outputs_summary_and_transactions() {
    let inputs = TempDir::new().unwrap();
    write(&inputs, "a_walmart.txt", WALMART);
    write(&inputs, "b_blank.txt", "nothing useful here");
    let out = TempDir::new().unwrap();
    let pattern = inputs.path().join("*.txt");

    receiptlens()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(out.path())
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files to process"));

    assert!(out.path().join("a_walmart.json").exists());
    assert!(out.path().join("b_blank.json").exists());

    let summary = fs::read_to_string(out.path().join("summary.csv")).unwrap();
    assert_eq!(summary.lines().count(), 3);
    assert!(summary.contains("a_walmart.txt,success,WALMART STORE 1234,2024-01-15,45.67"));

    let transactions: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(out.path().join("transactions.json")).unwrap())
            .unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["amount"], "45.67");
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();
    let pattern = dir.path().join("*.txt");

    receiptlens()
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn analytics_reports_budget_alerts() {
    let dir = TempDir::new().unwrap();
    let transactions = write(
        &dir,
        "transactions.json",
        r#"[
            {"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "amount": "90.00",
             "category": "groceries", "transaction_date": "2024-03-05T10:00:00"},
            {"id": "3f2b1c8e-8d4a-4b8e-9a51-2f0e6d1c7a10", "amount": "20.00",
             "category": "gas", "transaction_date": "2024-02-11T09:30:00"}
        ]"#,
    );
    let budgets = write(
        &dir,
        "budgets.json",
        r#"[{"category": "groceries", "monthly_limit": "100.00"},
            {"category": "gas", "monthly_limit": "100.00"}]"#,
    );

    let output = receiptlens()
        .args(["analytics", "--as-of", "2024-03-20", "--transactions"])
        .arg(&transactions)
        .arg("--budgets")
        .arg(&budgets)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["current_month_spend"], "90.00");
    assert_eq!(report["monthly_spend"].as_array().unwrap().len(), 2);
    assert_eq!(report["category_breakdown"][0]["category"], "groceries");

    let alerts = report["budget_alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["category"], "groceries");
}

#[test]
fn analytics_rejects_out_of_range_threshold() {
    let dir = TempDir::new().unwrap();
    let transactions = write(&dir, "transactions.json", "[]");

    receiptlens()
        .args(["analytics", "--threshold", "2.5", "--transactions"])
        .arg(&transactions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--threshold"));
}

#[test]
fn config_init_set_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    receiptlens()
        .args(["--config", config, "config", "init"])
        .assert()
        .success();

    receiptlens()
        .args(["--config", config, "config", "set", "ingest.currency", "EUR"])
        .assert()
        .success();

    receiptlens()
        .args(["--config", config, "config", "get", "ingest.currency"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"EUR\""));
}

#[test]
fn process_uses_configured_currency() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "walmart.txt", WALMART);
    let config = write(&dir, "config.json", r#"{"ingest": {"currency": "CAD"}}"#);

    receiptlens()
        .arg("--config")
        .arg(&config)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"currency\": \"CAD\""));
}
