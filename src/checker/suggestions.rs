//! Fuzzy suggestion search over the dictionary trie.
//!
//! Instead of generating candidate strings and testing each one, the search
//! walks the trie and the query together. The state is `(node, edits, pos)`:
//! the current trie node, the edits spent so far, and how much of the query
//! has been consumed. Following the query's next letter is free; while
//! budget remains, every child edge may also be taken as an insertion
//! (query position unchanged) or a substitution (query position advances),
//! and the query's next letter may be deleted (trie position unchanged).
//! A node is a hit when the whole query is consumed and the node is a word.

use crate::checker::dictionary::Dictionary;
use crate::checker::letters::Letter;
use crate::checker::trie::NodeId;
use crate::sort::{format_slice, Comparator, HeapSorter, Sorter};
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Suggestions are only searched for within this Levenshtein distance.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// A ranked candidate correction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    word: String,
    edit_distance: usize,
    frequency: u64,
}

impl Suggestion {
    pub fn new(word: impl Into<String>, edit_distance: usize, frequency: u64) -> Self {
        Self {
            word: word.into(),
            edit_distance,
            frequency,
        }
    }

    /// The suggested word, uppercase letters only.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Minimum edit distance from the query.
    pub fn edit_distance(&self) -> usize {
        self.edit_distance
    }

    /// Corpus frequency of the suggested word.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (edit distance {}, frequency {})",
            self.word, self.edit_distance, self.frequency
        )
    }
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        SpellingComparator.compare(self, other)
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks suggestions: lower edit distance first, then higher frequency,
/// then alphabetical order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpellingComparator;

impl Comparator<Suggestion> for SpellingComparator {
    fn compare(&self, left: &Suggestion, right: &Suggestion) -> Ordering {
        left.edit_distance
            .cmp(&right.edit_distance)
            .then_with(|| right.frequency.cmp(&left.frequency))
            .then_with(|| left.word.cmp(&right.word))
    }
}

/// How repeated discoveries of the same word are merged during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Keep one entry per word carrying the smallest distance found.
    #[default]
    Closest,
    /// Append only hits at the maximum distance; closer hits overwrite an
    /// existing maximum-distance entry and are otherwise dropped. Results
    /// depend on traversal order and may overstate distances.
    OverwriteOnly,
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "closest" => Ok(DedupPolicy::Closest),
            "overwrite-only" | "overwrite_only" => Ok(DedupPolicy::OverwriteOnly),
            _ => Err(format!("Unknown dedup policy: {}", s)),
        }
    }
}

impl fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupPolicy::Closest => write!(f, "closest"),
            DedupPolicy::OverwriteOnly => write!(f, "overwrite-only"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Hit {
    node: NodeId,
    distance: usize,
    frequency: u64,
}

/// Per-call result buffer; grows as needed.
struct SuggestionBuffer {
    policy: DedupPolicy,
    hits: Vec<Hit>,
    positions: HashMap<NodeId, usize>,
}

impl SuggestionBuffer {
    fn new(policy: DedupPolicy) -> Self {
        Self {
            policy,
            hits: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn record(&mut self, hit: Hit) {
        match self.policy {
            DedupPolicy::Closest => match self.positions.get(&hit.node).copied() {
                Some(idx) => {
                    let existing = &mut self.hits[idx];
                    existing.distance = existing.distance.min(hit.distance);
                }
                None => {
                    self.positions.insert(hit.node, self.hits.len());
                    self.hits.push(hit);
                }
            },
            DedupPolicy::OverwriteOnly => {
                if hit.distance < MAX_EDIT_DISTANCE && self.contains(hit.node, MAX_EDIT_DISTANCE) {
                    for existing in self
                        .hits
                        .iter_mut()
                        .filter(|h| h.node == hit.node && h.distance == MAX_EDIT_DISTANCE)
                    {
                        existing.distance = hit.distance;
                    }
                } else if hit.distance == MAX_EDIT_DISTANCE
                    && !self.contains(hit.node, MAX_EDIT_DISTANCE)
                    && !self.contains(hit.node, 1)
                {
                    self.hits.push(hit);
                }
            }
        }
    }

    fn contains(&self, node: NodeId, distance: usize) -> bool {
        self.hits
            .iter()
            .any(|h| h.node == node && h.distance == distance)
    }
}

struct Search<'a> {
    dict: &'a Dictionary,
    query: &'a [Letter],
    buffer: SuggestionBuffer,
    visited: u64,
}

impl Search<'_> {
    fn child(&mut self, node: NodeId, letter: Letter) -> Option<NodeId> {
        self.visited += 1;
        self.dict.child(node, letter)
    }

    fn visit(&mut self, node: NodeId, edits: usize, pos: usize) {
        if edits < MAX_EDIT_DISTANCE {
            for letter in Letter::all() {
                if let Some(child) = self.child(node, letter) {
                    // insertion
                    self.visit(child, edits + 1, pos);
                    // substitution
                    self.visit(child, edits + 1, pos + 1);
                }
            }
            // deletion
            self.visit(node, edits + 1, pos + 1);
        }

        if let Some(&letter) = self.query.get(pos) {
            if let Some(child) = self.child(node, letter) {
                self.visit(child, edits, pos + 1);
            }
        }

        if pos == self.query.len() {
            let frequency = self.dict.trie().node(node).frequency();
            if frequency > 0 {
                self.buffer.record(Hit {
                    node,
                    distance: edits,
                    frequency,
                });
            }
        }
    }
}

/// Find every word within [`MAX_EDIT_DISTANCE`] of `query`, ranked with
/// [`SpellingComparator`], along with the nodes this search visited.
pub(crate) fn search(
    dict: &Dictionary,
    query: &[Letter],
    policy: DedupPolicy,
) -> (Vec<Suggestion>, u64) {
    let mut search = Search {
        dict,
        query,
        buffer: SuggestionBuffer::new(policy),
        visited: 0,
    };
    search.visit(NodeId::ROOT, 0, 0);

    let trie = dict.trie();
    let mut suggestions: Vec<Suggestion> = search
        .buffer
        .hits
        .into_iter()
        .map(|hit| Suggestion::new(trie.word_of(hit.node), hit.distance, hit.frequency))
        .collect();

    HeapSorter::new(SpellingComparator).sort(&mut suggestions);
    trace!("ranked: {}", format_slice(&suggestions));
    (suggestions, search.visited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::letters::{letters_of, sanitize};
    use std::collections::HashSet;
    use strsim::levenshtein;

    fn sample_dictionary() -> Dictionary {
        Dictionary::from_texts(
            "cat cats bat bar car care cart act at a an ant and hat chat that than the then \
             there their these bake baker cake ace",
            "the the the the cat cat at a a an and and then there",
        )
    }

    #[test]
    fn test_ranking_example() {
        let dict = Dictionary::from_texts("cat bat cats", "cat cat cat cat bat");
        let suggestions = dict.suggest("CAT");
        assert_eq!(
            suggestions,
            vec![
                Suggestion::new("CAT", 0, 5),
                Suggestion::new("BAT", 1, 2),
                Suggestion::new("CATS", 1, 1),
            ]
        );
    }

    #[test]
    fn test_known_word_is_first_at_distance_zero() {
        let dict = sample_dictionary();
        for (word, _) in dict.words() {
            let suggestions = dict.suggest(&word);
            let frequency = dict.frequency_of(&word).unwrap();
            assert_eq!(suggestions[0], Suggestion::new(word.clone(), 0, frequency));
        }
    }

    #[test]
    fn test_distances_are_exact_and_complete() {
        let dict = sample_dictionary();
        let words = dict.words();
        let queries = [
            "cat", "kat", "caat", "ct", "", "x", "thw", "bkaer", "cre", "zzzz", "acts", "hte",
            "there's", "chta",
        ];

        for query in queries {
            let q = sanitize(query);
            let suggestions = dict.suggest(query);

            for s in &suggestions {
                assert_eq!(s.edit_distance(), levenshtein(&q, s.word()), "{} -> {}", q, s);
                assert!(s.edit_distance() <= MAX_EDIT_DISTANCE);
                assert_eq!(s.frequency(), dict.frequency_of(s.word()).unwrap());
            }

            let found: HashSet<&str> = suggestions.iter().map(|s| s.word()).collect();
            assert_eq!(found.len(), suggestions.len(), "duplicates for {:?}", q);

            for (word, _) in &words {
                let expected = levenshtein(&q, word) <= MAX_EDIT_DISTANCE;
                assert_eq!(found.contains(word.as_str()), expected, "{:?} vs {}", q, word);
            }
        }
    }

    #[test]
    fn test_results_are_ranked() {
        let dict = sample_dictionary();
        for query in ["th", "ca", "an", "bake"] {
            let suggestions = dict.suggest(query);
            for pair in suggestions.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(
                    a.edit_distance() < b.edit_distance()
                        || (a.edit_distance() == b.edit_distance() && a.frequency() > b.frequency())
                        || (a.edit_distance() == b.edit_distance()
                            && a.frequency() == b.frequency()
                            && a.word() <= b.word()),
                    "{} before {}",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_no_match() {
        let dict = sample_dictionary();
        assert!(dict.suggest("qqqqqqqq").is_empty());
        assert!(Dictionary::new().suggest("cat").is_empty());
    }

    #[test]
    fn test_query_is_sanitized() {
        let dict = sample_dictionary();
        assert_eq!(dict.suggest("c-a-t!"), dict.suggest("CAT"));
    }

    #[test]
    fn test_comparator_order() {
        let mut items = vec![
            Suggestion::new("B", 1, 3),
            Suggestion::new("A", 1, 3),
            Suggestion::new("C", 0, 1),
            Suggestion::new("D", 1, 9),
            Suggestion::new("E", 2, 100),
        ];
        HeapSorter::new(SpellingComparator).sort(&mut items);
        let order: Vec<&str> = items.iter().map(|s| s.word()).collect();
        assert_eq!(order, vec!["C", "D", "A", "B", "E"]);

        let mut natural = items.clone();
        natural.reverse();
        HeapSorter::natural().sort(&mut natural);
        assert_eq!(natural, items);
    }

    #[test]
    fn test_overwrite_only_policy() {
        // A closer hit only overwrites a distance-2 entry, so the first
        // overwrite sticks even when an exact match is found later.
        let dict = Dictionary::from_texts("cat", "");
        assert_eq!(
            dict.suggest_with("cat", DedupPolicy::OverwriteOnly),
            vec![Suggestion::new("CAT", 1, 1)]
        );

        let dict = sample_dictionary();
        for query in ["cat", "thw", "bkaer"] {
            let q = sanitize(query);
            for s in dict.suggest_with(query, DedupPolicy::OverwriteOnly) {
                assert!(s.edit_distance() >= levenshtein(&q, s.word()));
                assert!(levenshtein(&q, s.word()) <= MAX_EDIT_DISTANCE);
            }
        }
    }

    #[test]
    fn test_search_cost_single_letter() {
        // Root has one child A, which has none. Counting 26 lookups per
        // branching step plus one per match attempt:
        //   root(0,0) = 26 + A(1,0) 27 + A(1,1) 26 + root(1,1) 26 + 1 + A(0,1) 52
        let dict = Dictionary::from_texts("a", "");
        let (suggestions, visited) = search(&dict, &letters_of("A"), DedupPolicy::Closest);
        assert_eq!(suggestions, vec![Suggestion::new("A", 0, 1)]);
        assert_eq!(visited, 158);

        // Overwrite-only takes the same path through the trie.
        let (_, visited) = search(&dict, &letters_of("A"), DedupPolicy::OverwriteOnly);
        assert_eq!(visited, 158);
    }

    #[test]
    fn test_search_cost_empty_dictionary() {
        // root(0,0) = 26 + deletion root(1,1) = 26 + 26
        let dict = Dictionary::new();
        let (suggestions, visited) = search(&dict, &[], DedupPolicy::Closest);
        assert!(suggestions.is_empty());
        assert_eq!(visited, 52);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("closest".parse::<DedupPolicy>().unwrap(), DedupPolicy::Closest);
        assert_eq!(
            "Overwrite-Only".parse::<DedupPolicy>().unwrap(),
            DedupPolicy::OverwriteOnly
        );
        assert!("nearest".parse::<DedupPolicy>().is_err());
        assert_eq!(DedupPolicy::OverwriteOnly.to_string(), "overwrite-only");
    }
}
