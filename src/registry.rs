use std::collections::BTreeMap;

use crate::banks;
use crate::error::Error;
use crate::parser::BankParser;

/// Bank name → parser lookup. Build it once and hand it to whatever needs to pick a parser.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    parsers: BTreeMap<&'static str, BankParser>,
}

impl ParserRegistry {
    /// A registry of every bank with a known layout.
    pub fn new() -> Self {
        Self::from_parsers(banks::ALL)
    }

    pub fn from_parsers(parsers: impl IntoIterator<Item = BankParser>) -> Self {
        Self {
            parsers: parsers
                .into_iter()
                .map(|parser| (parser.bank(), parser))
                .collect(),
        }
    }

    /// Returns a registry that also knows `parser`, replacing any parser of the same bank.
    #[must_use]
    pub fn with_parser(mut self, parser: BankParser) -> Self {
        self.parsers.insert(parser.bank(), parser);
        self
    }

    /// Looks up the parser of `bank`. Names must match exactly.
    pub fn get(&self, bank: &str) -> Result<BankParser, Error> {
        self.parsers
            .get(bank)
            .copied()
            .ok_or_else(|| Error::UnknownBank(bank.to_owned()))
    }

    /// Registered bank names, sorted.
    pub fn banks(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.parsers.keys().copied()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
