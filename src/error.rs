use std::path::PathBuf;

use thiserror::Error;

/// Document-level failures. These abort a parse and reach the caller unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not read statement document {path:?}")]
    DocumentOpen {
        path: PathBuf,
        #[source]
        source: DocumentSourceError,
    },
    #[error("No parser available for {0}")]
    UnknownBank(String),
}

#[derive(Debug, Error)]
pub enum DocumentSourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Extract(#[from] pdf_extract::OutputError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not parse amount '{input}'")]
pub struct AmountParseError {
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not parse date: {input}")]
pub struct DateParseError {
    pub input: String,
}

/// Failure to normalize a row that matched a bank's row pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error(transparent)]
    Amount(#[from] AmountParseError),
    #[error(transparent)]
    Date(#[from] DateParseError),
}

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category '{name}' already exists for {}", .owner.as_deref().unwrap_or("the system"))]
    Duplicate { owner: Option<String>, name: String },
    #[error("Could not read category configuration")]
    Config(#[from] toml::de::Error),
}
