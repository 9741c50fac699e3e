pub mod dictionary;
pub mod letters;
pub mod suggestions;
pub mod trie;

use crate::config::Config;
use crate::dict::{manager, source};
use crate::{CheckResult, WordReport, WordStatus};
use anyhow::{Context, Result};
use dictionary::Dictionary;
use log::{debug, warn};
use rayon::prelude::*;
use regex::Regex;
use std::io::Read;
use std::path::Path;
use suggestions::DedupPolicy;

/// A configured query session over a built [`Dictionary`].
///
/// Construction is the build phase; afterwards the dictionary is only read,
/// so words can be checked from several threads at once.
pub struct SpellChecker {
    dictionary: Dictionary,
    ignore_patterns: Vec<Regex>,
    max_suggestions: usize,
    policy: DedupPolicy,
}

impl SpellChecker {
    /// Build the dictionary named by `config` and wrap it.
    pub fn new(config: &Config, progress: bool) -> Result<Self> {
        let word_list = config
            .word_list_path()
            .context("No word list configured and no data directory available")?;
        if !word_list.exists() {
            anyhow::bail!(
                "Word list not found: {}. Pass --dictionary or run `spellsuggest dict install <PATH>`.",
                word_list.display()
            );
        }

        let mut dictionary = manager::build(&word_list, config.corpus.as_deref(), progress)?;

        if let Some(personal) = &config.personal_dictionary {
            if personal.exists() {
                let added = load_personal_words(&mut dictionary, personal)?;
                debug!("added {} personal words from {}", added, personal.display());
            }
        }

        Ok(Self::with_dictionary(dictionary, config))
    }

    /// Wrap an already built dictionary.
    pub fn with_dictionary(dictionary: Dictionary, config: &Config) -> Self {
        // Compile ignore patterns
        let mut ignore_patterns = Vec::new();
        for pattern in &config.ignore_patterns {
            match Regex::new(pattern) {
                Ok(re) => ignore_patterns.push(re),
                Err(e) => warn!("invalid ignore pattern '{}': {}", pattern, e),
            }
        }

        Self {
            dictionary,
            ignore_patterns,
            max_suggestions: config.max_suggestions,
            policy: config.dedup_policy,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn check_word(&self, word: &str) -> WordReport {
        let normalized = letters::sanitize(word);

        if self.should_ignore(word) {
            return WordReport::new(word, normalized, WordStatus::Ignored);
        }
        if normalized.is_empty() {
            return WordReport::new(word, normalized, WordStatus::Empty);
        }

        let status = if self.dictionary.is_word(&normalized) {
            WordStatus::Known
        } else {
            WordStatus::Unknown
        };

        // a missing trie path means the word was never seen
        let frequency = self.dictionary.frequency_of(&normalized).unwrap_or(0);

        let mut suggestions = self.dictionary.suggest_with(&normalized, self.policy);
        if self.max_suggestions > 0 {
            suggestions.truncate(self.max_suggestions);
        }

        WordReport {
            frequency,
            suggestions,
            ..WordReport::new(word, normalized, status)
        }
    }

    /// Check many words in parallel, keeping input order.
    pub fn check_words<S: AsRef<str> + Sync>(&self, words: &[S]) -> CheckResult {
        let reports: Vec<WordReport> = words
            .par_iter()
            .map(|word| self.check_word(word.as_ref()))
            .collect();

        CheckResult {
            checked: reports.len(),
            unknown_count: reports
                .iter()
                .filter(|r| r.status == WordStatus::Unknown)
                .count(),
            reports,
        }
    }

    fn should_ignore(&self, word: &str) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.is_match(word))
    }
}

/// Add the words of a personal word list to `dictionary`.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn load_personal_words(dictionary: &mut Dictionary, path: &Path) -> Result<usize> {
    let mut content = String::new();
    source::open(path)
        .map_err(anyhow::Error::from)
        .and_then(|mut reader| reader.read_to_string(&mut content).map_err(anyhow::Error::from))
        .with_context(|| format!("Failed to read personal dictionary: {}", path.display()))?;

    let mut added = 0;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        for word in line.split_whitespace() {
            if !letters::sanitize(word).is_empty() && !dictionary.is_word(word) {
                dictionary.add_word(word);
                added += 1;
            }
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn checker(config: &Config) -> SpellChecker {
        let dict = Dictionary::from_texts("cat bat cats the then", "cat cat cat cat bat the");
        SpellChecker::with_dictionary(dict, config)
    }

    #[test]
    fn test_check_known_word() {
        let checker = checker(&Config::default());
        let report = checker.check_word("Cat");
        assert_eq!(report.status, WordStatus::Known);
        assert_eq!(report.normalized, "CAT");
        assert_eq!(report.frequency, 5);
        assert_eq!(report.suggestions[0].word(), "CAT");
    }

    #[test]
    fn test_check_unknown_word() {
        let checker = checker(&Config::default());
        let report = checker.check_word("caat");
        assert_eq!(report.status, WordStatus::Unknown);
        assert_eq!(report.frequency, 0);
        assert_eq!(report.suggestions[0].word(), "CAT");
        assert_eq!(report.suggestions[0].edit_distance(), 1);
    }

    #[test]
    fn test_max_suggestions() {
        let config = Config {
            max_suggestions: 1,
            ..Default::default()
        };
        let report = checker(&config).check_word("cat");
        assert_eq!(report.suggestions.len(), 1);
    }

    #[test]
    fn test_ignored_and_empty() {
        let checker = checker(&Config::default());
        assert_eq!(
            checker.check_word("https://example.com").status,
            WordStatus::Ignored
        );
        let report = checker.check_word("1234");
        assert_eq!(report.status, WordStatus::Empty);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let config = Config {
            ignore_patterns: vec!["(".to_string(), "^zz$".to_string()],
            ..Default::default()
        };
        let checker = checker(&config);
        assert_eq!(checker.check_word("zz").status, WordStatus::Ignored);
    }

    #[test]
    fn test_check_words_keeps_order() {
        let checker = checker(&Config::default());
        let words = vec!["the", "thw", "bat", "qqqqqq"];
        let result = checker.check_words(&words);
        assert_eq!(result.checked, 4);
        assert_eq!(result.unknown_count, 2);
        let order: Vec<&str> = result.reports.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(order, words);
        assert!(result.reports[3].suggestions.is_empty());
    }

    #[test]
    fn test_personal_words() {
        let dir = tempdir().unwrap();
        let personal = dir.path().join("personal.txt");
        fs::write(&personal, "# mine\nrustacean\ncat\n").unwrap();

        let mut dict = Dictionary::from_texts("cat", "cat");
        let added = load_personal_words(&mut dict, &personal).unwrap();
        assert_eq!(added, 1);
        assert!(dict.is_word("rustacean"));
        assert!(!dict.is_word("mine"));
        assert_eq!(dict.frequency_of("cat").unwrap(), 2);
    }

    #[test]
    fn test_new_builds_from_config() {
        let dir = tempdir().unwrap();
        let words = dir.path().join("words.txt");
        let corpus = dir.path().join("corpus.txt");
        fs::write(&words, "hello help").unwrap();
        fs::write(&corpus, "hello hello").unwrap();

        let config = Config {
            dictionary: Some(words),
            corpus: Some(corpus),
            ..Default::default()
        };
        let checker = SpellChecker::new(&config, false).unwrap();
        assert_eq!(checker.dictionary().frequency_of("hello").unwrap(), 3);

        let missing = Config {
            dictionary: Some(dir.path().join("nope.txt")),
            ..Default::default()
        };
        assert!(SpellChecker::new(&missing, false).is_err());
    }
}
