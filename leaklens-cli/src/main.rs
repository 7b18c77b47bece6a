use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use leaklens_analytics::{compose_advice, compute_summary};
use leaklens_core::transaction::{Analysis, Summary};
use leaklens_core::{MerchantStyle, RulePreset};
use leaklens_ingest::{extract_transactions_with, IngestError, StatementFormat, Synthesizer};

mod advisor;

#[derive(Parser, Debug)]
#[command(name = "leaklens", version, about = "Statement-to-ledger analyzer and money-leak finder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement export and print the ledger + summary
    Analyze {
        /// Statement file (.csv, or .txt with extracted table text)
        input: PathBuf,

        /// Force the input format instead of sniffing the file extension
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Emit the full analysis as JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Merchant extraction strategy
        #[arg(long, value_enum, default_value_t = MerchantArg::Narration)]
        merchant: MerchantArg,

        /// Categorization rule preset
        #[arg(long, value_enum, default_value_t = RulesArg::Standard)]
        rules: RulesArg,
    },

    /// Generate budgeting advice from a summary (as printed by analyze --json)
    Advise {
        /// Summary JSON file, or a full analysis JSON containing one
        summary: PathBuf,

        /// Skip the remote advice service and use the local composer
        #[arg(long)]
        offline: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Table,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MerchantArg {
    Narration,
    Brand,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RulesArg {
    Standard,
    Legacy,
}

impl From<FormatArg> for StatementFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => StatementFormat::Delimited,
            FormatArg::Table => StatementFormat::ExtractedTable,
        }
    }
}

impl From<MerchantArg> for MerchantStyle {
    fn from(arg: MerchantArg) -> Self {
        match arg {
            MerchantArg::Narration => MerchantStyle::NarrationScrub,
            MerchantArg::Brand => MerchantStyle::BrandFirst,
        }
    }
}

impl From<RulesArg> for RulePreset {
    fn from(arg: RulesArg) -> Self {
        match arg {
            RulesArg::Standard => RulePreset::Standard,
            RulesArg::Legacy => RulePreset::Legacy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { input, format, json, merchant, rules } => {
            let format: StatementFormat = match format {
                Some(f) => f.into(),
                None => sniff_format(&input)?,
            };

            let bytes = std::fs::read(&input)
                .with_context(|| format!("reading {}", input.display()))?;

            let synth = Synthesizer::new(merchant.into(), rules.into());
            let transactions = extract_transactions_with(&bytes, format, &synth)
                .with_context(|| format!("analyzing {}", input.display()))?;
            let summary = compute_summary(&transactions);

            if json {
                let analysis = Analysis { transactions, summary };
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_report(&input, transactions.len(), &summary);
            }
        }

        Command::Advise { summary, offline } => {
            let bytes = std::fs::read(&summary)
                .with_context(|| format!("reading {}", summary.display()))?;
            let summary = parse_summary(&bytes)?;

            if offline {
                println!("{}", compose_advice(&summary));
            } else {
                let response = advisor::advise(&summary).await;
                println!("{}", response.advice);
                if response.degraded {
                    eprintln!("\n(note: advice service unavailable; showing offline advice)");
                }
            }
        }
    }

    Ok(())
}

fn sniff_format(path: &Path) -> Result<StatementFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "csv" => Ok(StatementFormat::Delimited),
        "txt" | "text" => Ok(StatementFormat::ExtractedTable),
        other => Err(IngestError::UnsupportedFormat(other.to_string()).into()),
    }
}

/// Accept either a bare summary or a full analysis envelope.
fn parse_summary(bytes: &[u8]) -> Result<Summary> {
    if let Ok(summary) = serde_json::from_slice::<Summary>(bytes) {
        return Ok(summary);
    }
    let analysis: Analysis =
        serde_json::from_slice(bytes).context("input is neither a summary nor an analysis JSON")?;
    Ok(analysis.summary)
}

fn print_report(input: &Path, count: usize, summary: &Summary) {
    println!("Parsed {} transactions from {}", count, input.display());
    println!(
        "Income ₹{:.2} | Spending ₹{:.2} | Net ₹{:.2}",
        summary.total_income, summary.total_spending, summary.net
    );

    println!(
        "Leaks: bank fees ₹{:.2}, subscriptions ₹{:.2}, food delivery ₹{:.2}",
        summary.leaks.bank_fees, summary.leaks.subscriptions, summary.leaks.food_delivery
    );

    if !summary.by_category.is_empty() {
        println!("\nSpending by category:");
        for (category, amount) in &summary.by_category {
            println!("  {:?}: ₹{:.2}", category, amount);
        }
    }

    if !summary.top_merchants.is_empty() {
        println!("\nTop merchants:");
        for m in &summary.top_merchants {
            println!("  {}: ₹{:.2}", m.merchant, m.amount);
        }
    }

    if !summary.monthly.is_empty() {
        println!("\nMonthly trend:");
        for (month, flow) in &summary.monthly {
            println!("  {}: income ₹{:.2}, spending ₹{:.2}", month, flow.income, flow.spending);
        }
    }
}
