//! Error types for the suggestion engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by dictionary construction and lookups.
#[derive(Debug, Error)]
pub enum Error {
    /// A word list or corpus file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from an already opened text source failed.
    #[error("failed to read text source: {0}")]
    Read(#[from] io::Error),

    /// Some step of the word's trie path is missing.
    #[error("word not found: {0:?}")]
    WordNotFound(String),

    /// A character outside `A..=Z` was mapped to a branch slot.
    #[error("the character '{0}' is not a letter")]
    InvalidCharacter(char),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for lookups on strings absent from the dictionary.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::WordNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
