use crate::checker::suggestions::DedupPolicy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG: &str = ".spellsuggest.toml";

#[derive(Debug, Clone)]
pub struct Config {
    /// Word list; defaults to the installed `words.txt`.
    pub dictionary: Option<PathBuf>,

    /// Frequency corpus; without one every word has frequency 1.
    pub corpus: Option<PathBuf>,

    pub personal_dictionary: Option<PathBuf>,

    pub ignore_patterns: Vec<String>,

    /// Suggestions shown per word; 0 shows all of them.
    pub max_suggestions: usize,

    pub dedup_policy: DedupPolicy,
}

fn default_max_suggestions() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            corpus: None,
            personal_dictionary: None,
            ignore_patterns: vec![
                r"^https?://\S+$".to_string(),                              // URLs
                r"^[a-fA-F0-9]{32,}$".to_string(),                          // Hashes
                r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$".to_string(), // Emails
            ],
            max_suggestions: default_max_suggestions(),
            dedup_policy: DedupPolicy::Closest,
        }
    }
}

/// One configuration file. Only keys present in the file are `Some`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub dictionary: Option<PathBuf>,
    pub corpus: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Option<Vec<String>>,
    pub max_suggestions: Option<usize>,
    pub dedup_policy: Option<DedupPolicy>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Values given on the command line; `None`/empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dictionary: Option<PathBuf>,
    pub corpus: Option<PathBuf>,
    pub personal_dictionary: Option<PathBuf>,
    pub ignore_patterns: Vec<String>,
    pub max_suggestions: Option<usize>,
    pub dedup_policy: Option<DedupPolicy>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = ConfigFile::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            let local_config = ConfigFile::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        let mut config = config.apply(overrides);

        // Set default personal dictionary if not specified
        if config.personal_dictionary.is_none() {
            config.personal_dictionary = Self::default_personal_dict_path();
        }

        Ok(config)
    }

    /// Layer a config file on top; every key the file sets wins.
    fn merge(mut self, file: ConfigFile) -> Self {
        if file.dictionary.is_some() {
            self.dictionary = file.dictionary;
        }
        if file.corpus.is_some() {
            self.corpus = file.corpus;
        }
        if file.personal_dictionary.is_some() {
            self.personal_dictionary = file.personal_dictionary;
        }
        if let Some(patterns) = file.ignore_patterns {
            self.ignore_patterns = patterns;
        }
        if let Some(max) = file.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(policy) = file.dedup_policy {
            self.dedup_policy = policy;
        }
        self
    }

    fn apply(mut self, overrides: Overrides) -> Self {
        if overrides.dictionary.is_some() {
            self.dictionary = overrides.dictionary;
        }
        if overrides.corpus.is_some() {
            self.corpus = overrides.corpus;
        }
        if overrides.personal_dictionary.is_some() {
            self.personal_dictionary = overrides.personal_dictionary;
        }
        self.ignore_patterns.extend(overrides.ignore_patterns);
        if let Some(max) = overrides.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(policy) = overrides.dedup_policy {
            self.dedup_policy = policy;
        }
        self
    }

    /// The configured word list, falling back to the installed default.
    pub fn word_list_path(&self) -> Option<PathBuf> {
        self.dictionary
            .clone()
            .or_else(crate::dict::manager::default_word_list)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellsuggest").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn default_personal_dict_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellsuggest").map(|dirs| dirs.config_dir().join("personal.txt"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellsuggest").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
