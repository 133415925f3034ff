//! Analytics command - spending report over recorded transactions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Args;
use console::style;
use serde::de::DeserializeOwned;
use tracing::info;

use receiptlens_core::{Budget, SpendingReport, Transaction};

use super::load_config;

/// Arguments for the analytics command.
#[derive(Args)]
pub struct AnalyticsArgs {
    /// JSON array of transactions (e.g. batch `transactions.json`)
    #[arg(short, long)]
    transactions: PathBuf,

    /// JSON array of monthly budgets
    #[arg(short, long)]
    budgets: Option<PathBuf>,

    /// Look-back window in months (default from config)
    #[arg(long)]
    months: Option<u32>,

    /// Budget alert threshold, 0.0 - 1.0 (default from config)
    #[arg(long)]
    threshold: Option<f64>,

    /// Report date as YYYY-MM-DD (default: now)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: AnalyticsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let mut analytics = config.analytics.clone();
    if let Some(months) = args.months {
        analytics.months = months;
    }
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            anyhow::bail!("--threshold must be within 0.0 - 1.0, got {}", threshold);
        }
        analytics.alert_threshold = threshold;
    }

    let transactions: Vec<Transaction> = read_json(&args.transactions)?;
    let budgets: Vec<Budget> = match &args.budgets {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let now = report_time(args.as_of);
    info!(
        "Building report over {} transactions and {} budgets as of {}",
        transactions.len(),
        budgets.len(),
        now
    );

    let report = SpendingReport::build(&transactions, &budgets, now, &analytics);
    let output = serde_json::to_string_pretty(&report)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    for alert in &report.budget_alerts {
        eprintln!(
            "{} {}: spent {} of {} ({}%)",
            style("!").yellow(),
            alert.category,
            alert.spent,
            alert.limit,
            alert.percentage
        );
    }

    Ok(())
}

/// End of the given day, or the current local time.
fn report_time(as_of: Option<NaiveDate>) -> NaiveDateTime {
    as_of
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .unwrap_or_else(|| Local::now().naive_local())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid JSON in {}: {}", path.display(), e))
}
