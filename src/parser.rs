use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use regex::{Captures, Regex};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::categorizer::KeywordCategorizer;
use crate::error::{DocumentSourceError, Error, LineError};
use crate::normalize::{parse_amount, parse_date};

const DATE_FIELD: &str = "date";
const DESCRIPTION_FIELD: &str = "description";
const DEBIT_FIELD: &str = "debit";
const CREDIT_FIELD: &str = "credit";
const BALANCE_FIELD: &str = "balance";

/// A money column as printed on statements: `#,###.##`.
const MONEY_COLUMN: &str = r"[\d,]+\.\d{2}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Negative for debits, positive for credits.
    pub amount: Decimal,
    pub category: String,
    pub balance: Decimal,
}

/// A row that matched a bank's row pattern but could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: String,
    pub error: LineError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error parsing line: {}. Error: {}", self.line, self.error)
    }
}

/// Transactions in source-line order, plus the rows that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedStatement {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedStatement {
    fn append(&mut self, mut other: ParsedStatement) {
        self.transactions.append(&mut other.transactions);
        self.diagnostics.append(&mut other.diagnostics);
    }
}

/// Where a layout finds the running balance of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceColumn {
    /// The statement prints a balance after the debit and credit columns.
    Explicit,
    /// No balance is printed; the credit column is reported as the balance. On debit rows
    /// this is usually `0.00` rather than the real balance.
    CreditPlaceholder,
}

/// The shape of a transaction row for one bank:
/// `<date> <description> <debit> <credit> [<balance>]`.
///
/// The pattern is searched for anywhere in a line. Lines that don't contain it are headers,
/// footers or summaries and are ignored.
#[derive(Debug, Clone)]
pub struct RowLayout {
    pattern: Regex,
    balance: BalanceColumn,
}

impl RowLayout {
    /// `date_token` is the regular expression of the date as printed by the bank.
    pub fn new(date_token: &str, balance: BalanceColumn) -> Result<Self, regex::Error> {
        let mut pattern = format!(
            r"(?P<{DATE_FIELD}>{date_token})\s+(?P<{DESCRIPTION_FIELD}>.*?)\s+(?P<{DEBIT_FIELD}>{MONEY_COLUMN})\s+(?P<{CREDIT_FIELD}>{MONEY_COLUMN})"
        );
        if balance == BalanceColumn::Explicit {
            pattern.push_str(&format!(r"\s+(?P<{BALANCE_FIELD}>{MONEY_COLUMN})"));
        }
        Ok(Self {
            pattern: Regex::new(&pattern)?,
            balance,
        })
    }

    pub fn balance(&self) -> BalanceColumn {
        self.balance
    }

    fn transaction(&self, groups: &Captures<'_>) -> Result<Transaction, LineError> {
        let date = parse_date(&groups[DATE_FIELD])?;
        let debit = parse_amount(&groups[DEBIT_FIELD])?;
        let credit = parse_amount(&groups[CREDIT_FIELD])?;
        let amount = if debit.is_zero() { credit } else { -debit };
        let balance = match self.balance {
            BalanceColumn::Explicit => parse_amount(&groups[BALANCE_FIELD])?,
            BalanceColumn::CreditPlaceholder => credit,
        };
        let description = groups[DESCRIPTION_FIELD].trim().to_owned();
        let category = KeywordCategorizer::builtin()
            .categorize(&description)
            .to_owned();
        Ok(Transaction {
            date,
            description,
            amount,
            category,
            balance,
        })
    }
}

/// Scans every line of `text` for rows of `layout`.
///
/// A row that matches but fails to normalize is reported as a [`Diagnostic`] and the scan
/// moves on to the next line.
pub fn parse_rows(text: &str, layout: &RowLayout) -> ParsedStatement {
    let mut parsed = ParsedStatement::default();
    for line in text.lines() {
        let Some(groups) = layout.pattern.captures(line) else {
            continue;
        };
        match layout.transaction(&groups) {
            Ok(transaction) => parsed.transactions.push(transaction),
            Err(error) => {
                warn!(%line, %error, "Skipping statement row");
                parsed.diagnostics.push(Diagnostic {
                    line: line.to_owned(),
                    error,
                });
            }
        }
    }
    parsed
}

/// Anything that yields the extracted text of a document, one string per page.
pub trait PageSource {
    fn pages(&self) -> Result<Vec<String>, Error>;
}

impl<S: AsRef<str>> PageSource for [S] {
    fn pages(&self) -> Result<Vec<String>, Error> {
        Ok(self.iter().map(|page| page.as_ref().to_owned()).collect())
    }
}

/// A PDF statement on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    path: PathBuf,
}

impl PdfDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_error(&self, source: impl Into<DocumentSourceError>) -> Error {
        Error::DocumentOpen {
            path: self.path.clone(),
            source: source.into(),
        }
    }
}

impl PageSource for PdfDocument {
    fn pages(&self) -> Result<Vec<String>, Error> {
        let bytes = fs::read(&self.path).map_err(|err| self.open_error(err))?;
        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
            .map_err(|err| self.open_error(err))?;
        debug!(path = ?self.path, pages = pages.len(), "Extracted statement text");
        Ok(pages)
    }
}

/// A bank's statement parser: its name and the function reading one page of its statements.
#[derive(Clone, Copy)]
pub struct BankParser {
    bank: &'static str,
    page: fn(&str) -> ParsedStatement,
}

impl BankParser {
    pub const fn new(bank: &'static str, page: fn(&str) -> ParsedStatement) -> Self {
        Self { bank, page }
    }

    pub fn bank(&self) -> &'static str {
        self.bank
    }

    pub fn parse_page(&self, text: &str) -> ParsedStatement {
        (self.page)(text)
    }

    /// Parses every page of `source` in order.
    ///
    /// Only failing to get the pages is an error; rows that can't be read end up in
    /// [`ParsedStatement::diagnostics`].
    pub fn parse<S: PageSource + ?Sized>(&self, source: &S) -> Result<ParsedStatement, Error> {
        let mut parsed = ParsedStatement::default();
        for (index, text) in source.pages()?.iter().enumerate() {
            let page = self.parse_page(text);
            debug!(
                bank = self.bank,
                page = index + 1,
                transactions = page.transactions.len(),
                diagnostics = page.diagnostics.len(),
                "Parsed page"
            );
            parsed.append(page);
        }
        info!(
            bank = self.bank,
            transactions = parsed.transactions.len(),
            diagnostics = parsed.diagnostics.len(),
            "Parsed statement"
        );
        Ok(parsed)
    }
}

impl fmt::Debug for BankParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BankParser")
            .field("bank", &self.bank)
            .finish_non_exhaustive()
    }
}
