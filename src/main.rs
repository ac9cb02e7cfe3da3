#![warn(clippy::unwrap_used)]
#![doc = include_str!("../README.md")]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use statement_categorizer::{CategorySet, PageSource, ParserRegistry, PdfDocument, Transaction};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Converts a bank statement PDF export file to a categorized CSV file
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Bank which issued the statement, e.g. "GTBank" (see --list-banks)
    #[arg(short, long, required_unless_present = "list_banks")]
    bank: Option<String>,
    /// A bank statement PDF file
    #[arg(required_unless_present = "list_banks")]
    input: Option<PathBuf>,
    /// CSV destination file
    #[arg(required_unless_present = "list_banks")]
    output: Option<PathBuf>,
    /// User whose custom categories are applied on top of the system ones
    #[arg(short, long)]
    user: Option<String>,
    /// TOML file with the custom categories of --user
    #[arg(short, long, requires = "user")]
    categories: Option<PathBuf>,
    /// Prints the raw lines found in the PDF
    #[arg(long)]
    print_lines: bool,
    /// Prints the supported banks and exits
    #[arg(long)]
    list_banks: bool,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: NaiveDate,
    description: &'a str,
    amount: Decimal,
    balance: Decimal,
    parse_category: &'a str,
    category: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn new(transaction: &'a Transaction, categories: &'a CategorySet, user: Option<&str>) -> Self {
        Self {
            date: transaction.date,
            description: &transaction.description,
            amount: transaction.amount,
            balance: transaction.balance,
            parse_category: &transaction.category,
            category: categories
                .resolve(user, &transaction.description)
                .map(|category| category.name()),
        }
    }
}

fn write_to_csv<'a>(rows: impl Iterator<Item = CsvRow<'a>>, file: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(file)?;
    for row in rows {
        writer.serialize(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn load_categories(user: Option<&str>, file: Option<&Path>) -> Result<CategorySet> {
    let mut categories = CategorySet::system_defaults();
    if let (Some(user), Some(file)) = (user, file) {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Could not read category file {file:?}"))?;
        let added = categories
            .load_custom_toml(user, &text)
            .with_context(|| format!("Could not load categories from {file:?}"))?;
        info!(user, added, "Loaded custom categories");
    }
    Ok(categories)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Args {
        bank,
        input,
        output,
        user,
        categories,
        print_lines,
        list_banks,
    } = Args::parse();

    let registry = ParserRegistry::new();
    if list_banks {
        for bank in registry.banks() {
            println!("{bank}");
        }
        return Ok(());
    }
    let (Some(bank), Some(input), Some(output)) = (bank, input, output) else {
        return Err(eyre!("A bank, an input file and an output file are required"));
    };

    let parser = registry.get(&bank)?;
    let categories = load_categories(user.as_deref(), categories.as_deref())?;

    let pages = PdfDocument::new(&input)
        .pages()
        .with_context(|| format!("Could not extract PDF content from file {input:?}"))?;
    if print_lines {
        for line in pages.iter().flat_map(|page| page.lines()) {
            println!("{line}");
        }
    }
    let parsed = parser.parse(pages.as_slice())?;

    write_to_csv(
        parsed
            .transactions
            .iter()
            .map(|transaction| CsvRow::new(transaction, &categories, user.as_deref())),
        output.as_path(),
    )
    .with_context(|| format!("Could not write CSV file {output:?}"))?;

    info!(
        transactions = parsed.transactions.len(),
        skipped_rows = parsed.diagnostics.len(),
        output = ?output,
        "Wrote statement"
    );
    Ok(())
}
