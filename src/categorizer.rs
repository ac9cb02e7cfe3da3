//! Keyword categorization used while parsing.
//!
//! Matching is plain substring search on the lowercased description and is not aware of word
//! boundaries: `car` matches inside `scare`. The first table entry with a matching keyword wins,
//! so the declaration order of the table is part of its behavior.

use std::sync::LazyLock;

/// Label given to descriptions no entry claims.
pub const OTHER: &str = "other";

const BUILTIN_TABLE: &[(&str, &[&str])] = &[
    (
        "food",
        &[
            "restaurant",
            "cafe",
            "food",
            "grocery",
            "supermarket",
            "shoprite",
            "burger",
            "pizza",
            "chicken",
            "market",
        ],
    ),
    (
        "transport",
        &[
            "uber",
            "bolt",
            "taxi",
            "transport",
            "fuel",
            "petrol",
            "bus",
            "train",
            "flight",
            "airline",
        ],
    ),
    (
        "utilities",
        &[
            "electricity",
            "water",
            "gas",
            "dstv",
            "gotv",
            "internet",
            "wifi",
            "phone",
            "mobile",
            "utility",
        ],
    ),
    (
        "entertainment",
        &[
            "cinema",
            "movie",
            "theatre",
            "netflix",
            "spotify",
            "game",
            "betting",
            "entertainment",
        ],
    ),
    (
        "shopping",
        &[
            "mall",
            "store",
            "shop",
            "retail",
            "clothing",
            "fashion",
            "electronics",
            "gadget",
            "amazon",
        ],
    ),
    (
        "health",
        &[
            "hospital", "clinic", "pharmacy", "medical", "doctor", "dental", "health", "drug",
            "medicine",
        ],
    ),
    (
        "education",
        &[
            "school",
            "college",
            "university",
            "tuition",
            "course",
            "training",
            "education",
            "book",
        ],
    ),
];

/// Returns `true` when one of `keywords` occurs in `lowered_description`.
///
/// Both the parse-time table and [`crate::categories::CategorySet`] go through this, so the two
/// stages always agree on what "matches" means. Keywords are expected to be lowercase already.
pub fn matches_any<S: AsRef<str>>(lowered_description: &str, keywords: &[S]) -> bool {
    keywords
        .iter()
        .any(|keyword| lowered_description.contains(keyword.as_ref()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    label: String,
    keywords: Vec<String>,
}

/// An ordered label → keywords table with first-match-wins lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCategorizer {
    table: Vec<Entry>,
}

impl KeywordCategorizer {
    /// Builds a categorizer from `(label, keywords)` pairs, keeping their order.
    ///
    /// Keywords are trimmed and lowercased; blank ones are dropped since they would match
    /// every description.
    pub fn new<L, I, K>(table: impl IntoIterator<Item = (L, I)>) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let table = table
            .into_iter()
            .map(|(label, keywords)| Entry {
                label: label.into(),
                keywords: keywords
                    .into_iter()
                    .map(|keyword| keyword.as_ref().trim().to_lowercase())
                    .filter(|keyword| !keyword.is_empty())
                    .collect(),
            })
            .collect();
        Self { table }
    }

    /// The static seven-category table applied to every parsed row.
    pub fn builtin() -> &'static Self {
        static BUILTIN: LazyLock<KeywordCategorizer> = LazyLock::new(|| {
            KeywordCategorizer::new(
                BUILTIN_TABLE
                    .iter()
                    .map(|(label, keywords)| (*label, keywords.iter().copied())),
            )
        });
        &BUILTIN
    }

    pub fn categorize(&self, description: &str) -> &str {
        let lowered = description.to_lowercase();
        self.table
            .iter()
            .find(|entry| matches_any(&lowered, &entry.keywords))
            .map_or(OTHER, |entry| entry.label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.table.iter().map(|entry| entry.label.as_str())
    }
}

impl Default for KeywordCategorizer {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
