//! Row layouts of the supported banks.
//!
//! | Bank          | Row                                                  |
//! |---------------|------------------------------------------------------|
//! | Access Bank   | `12-Jan-24 <description> <debit> <credit>`           |
//! | Zenith Bank   | `12-Jan-2024 <description> <debit> <credit>`         |
//! | GTBank        | `12-Jan-2024 <description> <debit> <credit> <balance>` |
//! | UBA           | `12-Jan-24 <description> <debit> <credit> <balance>` |
//!
//! Unused columns are printed as `0.00`.

use std::sync::LazyLock;

use crate::parser::{parse_rows, BalanceColumn, BankParser, ParsedStatement, RowLayout};

pub const ACCESS_BANK: &str = "Access Bank";
pub const ZENITH_BANK: &str = "Zenith Bank";
pub const GTBANK: &str = "GTBank";
pub const UBA: &str = "UBA";

const SHORT_YEAR_DATE: &str = r"\d{2}-[A-Za-z]{3}-\d{2}";
const FULL_YEAR_DATE: &str = r"\d{2}-[A-Za-z]{3}-\d{4}";

/// Every bank with a known statement layout.
pub const ALL: [BankParser; 4] = [
    BankParser::new(ACCESS_BANK, access_bank_page),
    BankParser::new(ZENITH_BANK, zenith_bank_page),
    BankParser::new(GTBANK, gtbank_page),
    BankParser::new(UBA, uba_page),
];

fn access_bank_page(text: &str) -> ParsedStatement {
    static LAYOUT: LazyLock<RowLayout> = LazyLock::new(|| {
        RowLayout::new(SHORT_YEAR_DATE, BalanceColumn::CreditPlaceholder).expect("regex")
    });
    parse_rows(text, &LAYOUT)
}

fn zenith_bank_page(text: &str) -> ParsedStatement {
    static LAYOUT: LazyLock<RowLayout> = LazyLock::new(|| {
        RowLayout::new(FULL_YEAR_DATE, BalanceColumn::CreditPlaceholder).expect("regex")
    });
    parse_rows(text, &LAYOUT)
}

fn gtbank_page(text: &str) -> ParsedStatement {
    static LAYOUT: LazyLock<RowLayout> =
        LazyLock::new(|| RowLayout::new(FULL_YEAR_DATE, BalanceColumn::Explicit).expect("regex"));
    parse_rows(text, &LAYOUT)
}

fn uba_page(text: &str) -> ParsedStatement {
    static LAYOUT: LazyLock<RowLayout> =
        LazyLock::new(|| RowLayout::new(SHORT_YEAR_DATE, BalanceColumn::Explicit).expect("regex"));
    parse_rows(text, &LAYOUT)
}
