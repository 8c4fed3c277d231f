//! centinel CLI - convert amounts and inspect exchange rates
//!
//! ## Example Usage
//!
//! ```bash
//! # Convert with the live rate table
//! centinel convert 100 USD EUR
//!
//! # Convert with a rate stored for a date
//! centinel convert 100 USD EUR --date 2024-01-31 --history rates.csv
//!
//! # Show the live rate table as JSON
//! centinel rates --json
//!
//! # Walk through the library features
//! centinel demo
//! ```

use anyhow::{Context, Result};
use centinel::advanced::{self, BatchOp};
use centinel::prelude::*;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

/// centinel: fixed-point money and currency conversion
#[derive(Parser)]
#[command(name = "centinel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fixed-point money and currency conversion", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between currencies
    Convert {
        /// Amount in major units (e.g. 12.34)
        #[arg(value_name = "AMOUNT", allow_hyphen_values = true)]
        amount: String,

        /// Source currency code
        #[arg(value_name = "FROM")]
        from: Currency,

        /// Target currency code
        #[arg(value_name = "TO")]
        to: Currency,

        /// Use the rate stored for this date (YYYY-MM-DD)
        #[arg(short = 'd', long)]
        date: Option<NaiveDate>,

        /// CSV of historical rates (date,from,to,rate)
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Show the live rate table
    Rates {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List supported currencies
    Currencies,

    /// Demonstrate arithmetic, conversion and batch operations
    Demo,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(config_path) = path {
        return Config::load(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()));
    }

    // Try default location
    if let Some(home) = dirs::home_dir() {
        let default_config = home.join(".centinel").join("config.toml");
        if default_config.exists() {
            return Config::load(&default_config)
                .with_context(|| format!("Failed to load config {}", default_config.display()));
        }
    }

    Ok(Config::default())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let manager = Arc::new(ExchangeRateManager::from_config(&config)?);

    if cli.verbose {
        println!(
            "{} v{}",
            "centinel".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
        println!(
            "Seed quotes: {}",
            manager.known_pairs().len().to_string().dimmed()
        );
    }

    match cli.command {
        Commands::Convert {
            amount,
            from,
            to,
            date,
            history,
        } => convert_command(&manager, &amount, from, to, date, history.as_deref()),
        Commands::Rates { json } => show_rates(&manager, json),
        Commands::Currencies => {
            for currency in Currency::ALL {
                println!("{}  {}", currency.code().cyan(), currency.symbol());
            }
            Ok(())
        }
        Commands::Demo => run_demo(manager, &config),
    }
}

fn convert_command(
    manager: &ExchangeRateManager,
    amount: &str,
    from: Currency,
    to: Currency,
    date: Option<NaiveDate>,
    history: Option<&Path>,
) -> Result<()> {
    if let Some(path) = history {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let count = manager.load_historical_csv(file)?;
        log::info!("Loaded {} historical rates from {}", count, path.display());
    }

    let money = Money::parse(amount, from)?;
    let converted = convert(manager, &money, to, date)?;
    println!("{} = {}", money, converted.to_string().green().bold());
    Ok(())
}

fn show_rates(manager: &ExchangeRateManager, json: bool) -> Result<()> {
    let quotes = manager.known_pairs();
    if json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
        return Ok(());
    }

    println!("{:<10} {:>12}", "Pair".bold(), "Rate".bold());
    for quote in quotes {
        let pair = CurrencyPair::new(quote.from, quote.to);
        println!("{:<10} {:>12.4}", pair.to_string().cyan(), quote.rate);
    }
    Ok(())
}

fn run_demo(manager: Arc<ExchangeRateManager>, config: &Config) -> Result<()> {
    println!("{}", "Basic Money Operations".green().bold());
    let m1 = Money::new(100, Currency::USD)?;
    let m2 = Money::new(50, Currency::USD)?;
    println!("Addition: {} + {} = {}", m1, m2, m1.checked_add(&m2)?);
    println!("Subtraction: {} - {} = {}", m1, m2, m1.checked_sub(&m2)?);
    println!("Multiplication: {} * 2 = {}", m1, m1.checked_mul(2)?);
    println!("Division: {} / 2 = {}", m1, m1.checked_div(2)?);

    println!("\n{}", "Currency Conversion".green().bold());
    for currency in Currency::ALL.into_iter().filter(|c| *c != Currency::USD) {
        let converted = convert(manager.as_ref(), &m1, currency, None)?;
        println!("{:>12} -> {:<4} {}", m1.to_string(), currency.code().magenta(), converted);
    }

    println!("\n{}", "Advanced Financial Operations".green().bold());
    let principal = Money::new(1000, Currency::USD)?;
    let grown = advanced::compound_interest(&principal, 0.05, 1.0, 12)?;
    println!("Compound Interest (5% for 1 year): {} -> {}", principal, grown);

    let amount = Money::new(200, Currency::USD)?;
    println!("15% of {} = {}", amount, advanced::percentage_of(&amount, 15.0)?);

    let margin = advanced::profit_margin(&principal, &Money::new(600, Currency::USD)?)?;
    println!("Profit Margin: {:.2}%", margin * 100.0);
    let ratio = advanced::debt_to_equity(&Money::new(500, Currency::USD)?, &principal)?;
    println!("Debt to Equity Ratio: {:.2}", ratio);

    let amounts = [
        Money::new(100, Currency::USD)?,
        Money::new(200, Currency::USD)?,
        Money::new(300, Currency::USD)?,
    ];
    for op in [BatchOp::Sum, BatchOp::Average, BatchOp::Max, BatchOp::Min] {
        println!("{:<8} {}", op.to_string(), advanced::batch_operation(&amounts, op)?);
    }

    println!("\n{}", "Batch Processing".green().bold());
    let processor = BatchProcessor::from_config(manager, config);
    let batch: Vec<Money> = (1..=10_000)
        .map(|i| Money::from_minor_units(i, Currency::USD))
        .collect();
    let total = processor.batch_add(&batch)?;
    let converted = processor.batch_convert(&batch, Currency::EUR)?;
    println!("Sum of {} amounts: {}", batch.len(), total);
    println!("Converted {} amounts to EUR", converted.len());

    for (op, stats) in processor.performance_metrics() {
        println!(
            "{:<14} avg {:.6}s  min {:.6}s  max {:.6}s  runs {}",
            op.cyan(),
            stats.avg_time,
            stats.min_time,
            stats.max_time,
            stats.count
        );
    }

    Ok(())
}
