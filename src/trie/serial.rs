//! Serialized form of a [`Trie`].
//!
//! A trie is written as its word table plus its nodes in pre-order, children in
//! ascending key order. Each node record names its parent by position, the root
//! coming first with no parent:
//!
//! ```json
//! { "words": ["ab"],
//!   "nodes": [
//!     { "key": 0, "word": null, "skip": 1, "parent": null },
//!     { "key": 97, "word": null, "skip": 1, "parent": 0 },
//!     { "key": 98, "word": 0, "skip": 1, "parent": 1 } ] }
//! ```
//!
//! The node list stays flat however long the words are, so encoding and decoding
//! never recurse per trie level, and serde_json's nesting limit stays in force.
//! Skip distances are stored, not recomputed, so reading a trie back is linear in its size.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::children::Node;
use super::error::{Error, StructureError};
use super::node_arena::{NodeArena, NodeId};
use super::search::Trie;

impl Trie {
    /// Serializes the trie to JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Serializes the trie to indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a trie back from JSON produced by [`to_json`](Self::to_json).
    ///
    /// Either the whole trie is read and validated, or an error is returned.
    ///
    /// ```
    /// use libskiptrie::trie::{builder::build_trie, Trie};
    ///
    /// let trie = build_trie(["he", "she", "his", "hers"]);
    /// let json = trie.to_json().unwrap();
    /// let copy = Trie::from_json(&json).unwrap();
    /// assert_eq!(copy, trie);
    /// assert!(copy.is_contained("ushers"));
    /// ```
    pub fn from_json(data: &[u8]) -> Result<Trie, Error> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Reads a trie back from a JSON string.
    pub fn from_json_str(data: &str) -> Result<Trie, Error> {
        Self::from_json(data.as_bytes())
    }
}

impl Serialize for Trie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Trie", 2)?;
        state.serialize_field("words", self.words())?;
        state.serialize_field("nodes", &node_records(self.arena()))?;
        state.end()
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct NodeRecord {
    key: u8,
    #[serde(default)]
    word: Option<usize>,
    skip: usize,
    #[serde(default)]
    parent: Option<usize>,
}

#[derive(serde::Deserialize)]
struct TrieRecord {
    words: Vec<String>,
    nodes: Vec<NodeRecord>,
}

/// Lists the nodes in pre-order with the smallest key first.
fn node_records(arena: &NodeArena) -> Vec<NodeRecord> {
    let mut records = Vec::with_capacity(arena.len());
    let mut stack = vec![(NodeId::ROOT, None)];
    while let Some((id, parent)) = stack.pop() {
        let node = arena.node(id);
        let position = records.len();
        records.push(NodeRecord {
            key: node.key(),
            word: node.word(),
            skip: node.skip(),
            parent,
        });
        let children = node.children();
        stack.extend(
            (0..children.len())
                .rev()
                .filter_map(|i| children.get(i))
                .map(|(_, child)| (child, Some(position))),
        );
    }
    records
}

impl<'de> Deserialize<'de> for Trie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TrieRecord::deserialize(deserializer)?
            .into_trie()
            .map_err(de::Error::custom)
    }
}

impl TrieRecord {
    /// Lays the node list out in an arena, checking every node on the way.
    ///
    /// Nodes are allocated in list order, so a node's position is also its [`NodeId`].
    fn into_trie(self) -> Result<Trie, StructureError> {
        let TrieRecord { words, nodes } = self;
        let mut records = nodes.into_iter().enumerate();

        let (_, root) = records.next().ok_or(StructureError::MissingRoot)?;
        if root.parent.is_some() {
            return Err(StructureError::InvalidParent { node: 0 });
        }
        if let Some(index) = root.word {
            return Err(StructureError::RootWord { index });
        }
        if root.skip == 0 {
            return Err(StructureError::ZeroSkip { node: 0 });
        }

        let mut arena = NodeArena::new();
        arena.node_mut(NodeId::ROOT).set_skip(root.skip);

        for (node, record) in records {
            let parent = record
                .parent
                .filter(|&parent| parent < node)
                .ok_or(StructureError::InvalidParent { node })?;
            if record.skip == 0 {
                return Err(StructureError::ZeroSkip { node });
            }
            if let Some(index) = record.word.filter(|&index| index >= words.len()) {
                return Err(StructureError::WordOutOfRange {
                    node,
                    index,
                    words: words.len(),
                });
            }

            // Siblings arrive in list order, which must be ascending key order.
            let siblings = arena.node(NodeId(parent)).children();
            let last = siblings.len().checked_sub(1).and_then(|i| siblings.get(i));
            if last.is_some_and(|(key, _)| key >= record.key) {
                return Err(StructureError::UnorderedChildren {
                    node: parent,
                    key: record.key,
                });
            }

            let child = arena.alloc(Node::with_fields(record.key, record.word, record.skip));
            debug_assert_eq!(child, NodeId(node));
            arena.node_mut(NodeId(parent)).children_mut().insert(record.key, child);
        }

        check_word_paths(&words, &arena)?;
        Ok(Trie::from_parts(words, arena))
    }
}

/// Checks that word references and word bytes agree.
///
/// Every word must lead to a node referring to it or to a later copy of the same
/// word, and every word reference must sit where its word's bytes lead.
fn check_word_paths(words: &[String], arena: &NodeArena) -> Result<(), StructureError> {
    for (index, word) in words.iter().enumerate() {
        let walk = arena.walk(word.as_bytes());
        let owner = arena.node(walk.node).word();
        let reached = !word.is_empty() && walk.depth == word.len();
        if !reached || !owner.is_some_and(|owner| owner >= index && words[owner] == *word) {
            return Err(StructureError::WordPathMismatch { index });
        }
    }
    for node in 0..arena.len() {
        let id = NodeId(node);
        if let Some(index) = arena.node(id).word() {
            if arena.walk(words[index].as_bytes()).node != id {
                return Err(StructureError::WordPathMismatch { index });
            }
        }
    }
    Ok(())
}
