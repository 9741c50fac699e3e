use crate::checker::letters::{letters_of, Letter};
use crate::checker::suggestions::{self, DedupPolicy, Suggestion};
use crate::checker::trie::{NodeId, Trie};
use crate::dict::source;
use crate::error::{Error, Result};
use log::debug;
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// A dictionary of correctly spelled words and their corpus frequencies,
/// indexed by a 26-ary prefix tree.
///
/// Built once (words, then corpus counts) and queried afterwards. Every
/// child lookup or creation bumps a cumulative "nodes visited" counter that
/// callers can read to measure the cost of operations.
#[derive(Debug, Default)]
pub struct Dictionary {
    trie: Trie,
    word_count: usize,
    nodes_visited: AtomicU64,
}

impl Dictionary {
    /// Create a dictionary with no words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a word list and a corpus held in memory.
    pub fn from_texts(word_list: &str, corpus: &str) -> Self {
        let mut dict = Self::new();
        for token in word_list.split_whitespace() {
            dict.add_token(token);
        }
        for token in corpus.split_whitespace() {
            dict.count_token(token);
        }
        dict
    }

    /// Build from two readers: the word list first, then the corpus.
    pub fn from_readers<W: BufRead, C: BufRead>(word_list: W, corpus: C) -> Result<Self> {
        let mut dict = Self::new();
        dict.load_words(word_list)?;
        dict.load_corpus(corpus)?;
        Ok(dict)
    }

    /// Build from a word list file and a corpus file.
    ///
    /// Fails with [`Error::Io`] if either file cannot be opened or read.
    /// Files ending in `.gz` are decompressed on the fly.
    pub fn from_paths(word_list: impl AsRef<Path>, corpus: impl AsRef<Path>) -> Result<Self> {
        let word_list = word_list.as_ref();
        let corpus = corpus.as_ref();

        let mut dict = Self::new();
        let words = source::open(word_list)?;
        dict.load_words(words)
            .map_err(|e| source::with_path(e, word_list))?;
        let counts = source::open(corpus)?;
        dict.load_corpus(counts)
            .map_err(|e| source::with_path(e, corpus))?;

        debug!(
            "built dictionary from {} and {}: {} words, {} nodes, {} nodes visited",
            word_list.display(),
            corpus.display(),
            dict.word_count(),
            dict.node_count(),
            dict.nodes_visited()
        );
        Ok(dict)
    }

    /// Insert every whitespace-separated token of `reader` as a word.
    ///
    /// Returns the number of tokens that were non-empty after sanitizing.
    pub fn load_words<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut added = 0;
        source::for_each_token(reader, |token| {
            if self.add_token(token) {
                added += 1;
            }
        })?;
        Ok(added)
    }

    /// Count every token of `reader` that is already a dictionary word.
    ///
    /// Tokens that are not words are ignored and never inserted. Returns the
    /// number of occurrences that were counted.
    pub fn load_corpus<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut counted = 0;
        source::for_each_token(reader, |token| {
            if self.count_token(token) {
                counted += 1;
            }
        })?;
        Ok(counted)
    }

    fn add_token(&mut self, token: &str) -> bool {
        let letters = letters_of(token);
        if letters.is_empty() {
            return false;
        }
        self.insert_letters(&letters);
        true
    }

    fn count_token(&mut self, token: &str) -> bool {
        let letters = letters_of(token);
        match self.find(&letters) {
            Some(node) if node != NodeId::ROOT && self.trie.node(node).is_word() => {
                self.bump(node);
                true
            }
            _ => false,
        }
    }

    /// Add a word. Newly added words get frequency 1; adding a known word
    /// leaves its frequency untouched.
    pub fn add_word(&mut self, word: &str) {
        let letters = letters_of(word);
        self.insert_letters(&letters);
    }

    fn insert_letters(&mut self, letters: &[Letter]) {
        if letters.is_empty() {
            return;
        }
        let mut node = NodeId::ROOT;
        for &letter in letters {
            node = self.add_child(node, letter);
        }
        if !self.trie.node(node).is_word() {
            self.bump(node);
        }
    }

    /// Whether `word` is a recognized dictionary word.
    pub fn is_word(&self, word: &str) -> bool {
        self.find(&letters_of(word))
            .is_some_and(|node| self.trie.node(node).is_word())
    }

    /// Corpus frequency of `word`.
    ///
    /// Fails with [`Error::WordNotFound`] when the trie has no path for the
    /// word. A path that exists only as a prefix yields `Ok(0)`, as does the
    /// empty string.
    pub fn frequency_of(&self, word: &str) -> Result<u64> {
        let node = self.require(word)?;
        Ok(self.trie.node(node).frequency())
    }

    /// Increment the frequency of `word` by one.
    ///
    /// Fails like [`Dictionary::frequency_of`]. Incrementing the empty string
    /// is a no-op since the root never represents a word.
    pub fn increment_frequency(&mut self, word: &str) -> Result<()> {
        let node = self.require(word)?;
        if node != NodeId::ROOT {
            self.bump(node);
        }
        Ok(())
    }

    /// Ranked suggestions within edit distance 2 of `query`.
    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        self.suggest_with(query, DedupPolicy::default())
    }

    /// Like [`Dictionary::suggest`], with an explicit duplicate policy.
    pub fn suggest_with(&self, query: &str, policy: DedupPolicy) -> Vec<Suggestion> {
        let letters = letters_of(query);
        let (results, visited) = suggestions::search(self, &letters, policy);
        debug!(
            "suggest {:?}: {} suggestions, {} nodes visited",
            query,
            results.len(),
            visited
        );
        results
    }

    /// Cumulative number of child lookups and creations.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }

    /// Number of distinct recognized words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Number of trie nodes, root included.
    pub fn node_count(&self) -> usize {
        self.trie.len()
    }

    pub fn total_frequency(&self) -> u64 {
        self.trie
            .words()
            .into_iter()
            .map(|(node, _)| self.trie.node(node).frequency())
            .sum()
    }

    /// All words with their frequencies, in alphabetical order.
    pub fn words(&self) -> Vec<(String, u64)> {
        self.trie
            .words()
            .into_iter()
            .map(|(node, word)| (word, self.trie.node(node).frequency()))
            .collect()
    }

    /// Whether some path (word or not) spells `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.find(&letters_of(prefix)).is_some()
    }

    pub(crate) fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Counted child lookup.
    pub(crate) fn child(&self, node: NodeId, letter: Letter) -> Option<NodeId> {
        self.nodes_visited.fetch_add(1, Ordering::Relaxed);
        self.trie.node(node).child(letter)
    }

    fn add_child(&mut self, node: NodeId, letter: Letter) -> NodeId {
        *self.nodes_visited.get_mut() += 1;
        self.trie.add_child(node, letter)
    }

    fn find(&self, letters: &[Letter]) -> Option<NodeId> {
        letters
            .iter()
            .try_fold(NodeId::ROOT, |node, &letter| self.child(node, letter))
    }

    fn require(&self, word: &str) -> Result<NodeId> {
        self.find(&letters_of(word))
            .ok_or_else(|| Error::WordNotFound(word.to_string()))
    }

    fn bump(&mut self, node: NodeId) {
        if !self.trie.node(node).is_word() {
            self.word_count += 1;
        }
        self.trie.increment_frequency(node);
    }
}
