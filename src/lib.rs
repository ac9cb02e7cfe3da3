#![warn(clippy::unwrap_used)]
//! Bank statement parsing and keyword categorization.
//!
//! A [`BankParser`] turns the text of a statement, page by page, into [`Transaction`]s tagged
//! with a built-in category. Rows that look like transactions but can't be read are returned as
//! [`Diagnostic`]s instead of failing the whole document. A [`CategorySet`] then maps each
//! description to a system or user-defined category.

pub mod banks;
pub mod categories;
pub mod categorizer;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod registry;

pub use categories::{Category, CategorySet};
pub use categorizer::KeywordCategorizer;
pub use error::{AmountParseError, CategoryError, DateParseError, Error, LineError};
pub use parser::{
    BalanceColumn, BankParser, Diagnostic, PageSource, ParsedStatement, PdfDocument, RowLayout,
    Transaction,
};
pub use registry::ParserRegistry;
