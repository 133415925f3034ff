//! Process command - extract fields from a single receipt.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use receiptlens_core::{IngestedReceipt, ReceiptIngestor};

use super::{is_supported_input, load_config, DispatchEngine};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (receipt image, or .txt with OCR text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if !is_supported_input(&args.input) {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Loading OCR engine...");
    let engine =
        DispatchEngine::for_inputs(&[args.input.clone()], &config, args.model_dir.as_deref())?;

    pb.set_message("Extracting receipt fields...");
    let ingestor = ReceiptIngestor::new(engine).with_config(config.ingest.clone());
    let result = ingestor.ingest(&args.input)?;

    pb.finish_and_clear();

    let output = format_receipt(&result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_receipt(result: &IngestedReceipt, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &IngestedReceipt) -> anyhow::Result<String> {
    let receipt = &result.receipt;
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "vendor",
        "purchase_date",
        "total_amount",
        "tax_amount",
        "currency",
        "category",
        "image_path",
    ])?;

    wtr.write_record([
        receipt.vendor.clone().unwrap_or_default(),
        receipt.purchase_date.format("%Y-%m-%d").to_string(),
        receipt.total_amount.to_string(),
        receipt.tax_amount.to_string(),
        receipt.currency.clone(),
        receipt.category.to_string(),
        receipt.image_path.clone(),
    ])?;

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(result: &IngestedReceipt) -> String {
    let receipt = &result.receipt;
    let mut output = String::new();

    output.push_str(&format!(
        "Vendor:   {}\n",
        receipt.vendor.as_deref().unwrap_or("Unknown")
    ));
    output.push_str(&format!("Date:     {}\n", receipt.purchase_date.format("%Y-%m-%d")));
    output.push_str(&format!("Category: {}\n", receipt.category));
    output.push('\n');
    output.push_str(&format!("  Tax:   {} {}\n", receipt.tax_amount, receipt.currency));
    output.push_str(&format!("  Total: {} {}\n", receipt.total_amount, receipt.currency));

    match &result.transaction {
        Some(txn) => output.push_str(&format!("\nTransaction {} recorded\n", txn.id)),
        None => output.push_str("\nNo transaction recorded (zero total)\n"),
    }

    output
}
