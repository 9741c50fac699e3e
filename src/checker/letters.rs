use crate::error::{Error, Result};
use std::fmt;

/// All valid letters in branch order.
pub const LETTERS: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// One of the 26 uppercase letters, stored as its branch slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(u8);

impl Letter {
    /// Iterate over every letter in alphabetical order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (0..LETTERS.len() as u8).map(Letter)
    }

    /// Map a character to its letter, accepting either case.
    pub fn from_char(c: char) -> Result<Self> {
        letter_index(c).map(|idx| Letter(idx as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        LETTERS[self.index()]
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Return the branch slot (`0..26`) for a letter.
///
/// Lowercase letters are accepted and mapped like their uppercase form.
pub fn letter_index(c: char) -> Result<usize> {
    let upper = c.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Ok((upper as u8 - b'A') as usize)
    } else {
        Err(Error::InvalidCharacter(c))
    }
}

/// Uppercase `text` and drop everything that is not `A..=Z`.
pub fn sanitize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// Sanitize `text` straight into letters.
pub fn letters_of(text: &str) -> Vec<Letter> {
    text.to_uppercase()
        .chars()
        .filter_map(|c| Letter::from_char(c).ok())
        .collect()
}
