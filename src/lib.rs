pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod sort;

pub use checker::dictionary::Dictionary;
pub use checker::letters::{letter_index, sanitize, Letter, LETTERS};
pub use checker::suggestions::{DedupPolicy, SpellingComparator, Suggestion, MAX_EDIT_DISTANCE};
pub use checker::SpellChecker;
pub use config::Config;
pub use error::{Error, Result};
pub use sort::{Comparator, HeapSorter, NaturalOrder, Sorter};

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResult {
    pub checked: usize,
    pub unknown_count: usize,
    pub reports: Vec<WordReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Known,
    Unknown,
    /// Matched an ignore pattern.
    Ignored,
    /// Nothing left after sanitizing.
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordReport {
    pub word: String,
    pub normalized: String,
    pub status: WordStatus,
    pub frequency: u64,
    pub suggestions: Vec<Suggestion>,
}

impl WordReport {
    pub fn new(word: &str, normalized: String, status: WordStatus) -> Self {
        Self {
            word: word.to_string(),
            normalized,
            status,
            frequency: 0,
            suggestions: Vec::new(),
        }
    }
}
