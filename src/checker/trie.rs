//! Arena-backed 26-ary prefix tree.
//!
//! Every node lives in a single `Vec` owned by the [`Trie`] and refers to its
//! children and parent by [`NodeId`]. Each child slot is owned by exactly one
//! parent; the parent link is only used to rebuild the string a node
//! represents. Nodes are never removed.

use super::letters::{Letter, LETTERS};

/// Index of a node inside its trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone)]
pub struct TrieNode {
    letter: Option<Letter>,
    depth: usize,
    frequency: u64,
    parent: Option<NodeId>,
    children: [Option<NodeId>; LETTERS.len()],
}

impl TrieNode {
    fn root() -> Self {
        Self {
            letter: None,
            depth: 0,
            frequency: 0,
            parent: None,
            children: [None; LETTERS.len()],
        }
    }

    /// Letter on the edge from the parent; `None` for the root.
    pub fn letter(&self) -> Option<Letter> {
        self.letter
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Corpus frequency; zero when the node is only a prefix.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn child(&self, letter: Letter) -> Option<NodeId> {
        self.children[letter.index()]
    }

    pub fn is_word(&self) -> bool {
        self.frequency > 0
    }
}

#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::root()],
        }
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Return the child of `parent` for `letter`, creating it when missing.
    pub fn add_child(&mut self, parent: NodeId, letter: Letter) -> NodeId {
        if let Some(existing) = self.nodes[parent.0].children[letter.index()] {
            return existing;
        }

        let id = NodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(TrieNode {
            letter: Some(letter),
            depth,
            frequency: 0,
            parent: Some(parent),
            children: [None; LETTERS.len()],
        });
        self.nodes[parent.0].children[letter.index()] = Some(id);
        id
    }

    pub(crate) fn increment_frequency(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.0];
        node.frequency = node.frequency.saturating_add(1);
    }

    /// Rebuild the string represented by `id` by walking parent links.
    pub fn word_of(&self, id: NodeId) -> String {
        let node = self.node(id);
        let mut letters = vec!['\0'; node.depth];
        let mut current = id;
        for slot in letters.iter_mut().rev() {
            let node = self.node(current);
            if let Some(letter) = node.letter {
                *slot = letter.as_char();
            }
            if let Some(parent) = node.parent {
                current = parent;
            }
        }
        letters.into_iter().collect()
    }

    /// Depth-first walk in alphabetical order, yielding `(node, word)` for every node
    /// whose frequency is non-zero.
    ///
    /// Uses an explicit stack, so arbitrarily long words are fine.
    pub fn words(&self) -> Vec<(NodeId, String)> {
        let mut out = Vec::new();
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.is_word() {
                out.push((id, self.word_of(id)));
            }
            // reversed so that A is popped first
            stack.extend(node.children.iter().rev().flatten());
        }
        out
    }
}
