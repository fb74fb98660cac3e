use std::io;

use thiserror::Error;

/// Errors that can occur when loading a trie or its word list.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a word list failed.
    #[error("failed to read word list: {0}")]
    Io(#[from] io::Error),

    /// Serialized trie data could not be decoded.
    ///
    /// Structural problems found while decoding are reported here too, with a
    /// [`StructureError`] message.
    #[cfg(feature = "serde")]
    #[error("failed to decode trie: {0}")]
    Json(#[source] serde_json::Error),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

/// Ways a serialized trie can be well-formed data but still not describe a valid trie.
///
/// Nodes are identified by their position in the serialized node list, the root being 0.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StructureError {
    /// The node list is empty, so there is no root.
    #[error("node list is empty")]
    MissingRoot,

    /// The root has a parent, or another node does not name an earlier node as its parent.
    #[error("node {node} has an invalid parent")]
    InvalidParent {
        /// Position of the node.
        node: usize,
    },

    /// A node has a skip distance of zero, which would stall every scan reaching it.
    #[error("node {node} has a skip distance of 0")]
    ZeroSkip {
        /// Position of the node.
        node: usize,
    },

    /// A node refers to a word index outside the word table.
    #[error("node {node} refers to word {index}, but only {words} words exist")]
    WordOutOfRange {
        /// Position of the node.
        node: usize,
        /// The word index found.
        index: usize,
        /// Number of words in the word table.
        words: usize,
    },

    /// Sibling keys are repeated or not in ascending order.
    #[error("children of node {node} are not strictly ascending at key {key}")]
    UnorderedChildren {
        /// Position of the parent node.
        node: usize,
        /// The first key that breaks the order.
        key: u8,
    },

    /// The root is marked as the end of a word, which would mean an empty word.
    #[error("root node refers to word {index}, but empty words cannot be registered")]
    RootWord {
        /// The word index found on the root.
        index: usize,
    },

    /// A word's bytes do not lead to a node referring to it, or a node refers to a
    /// word whose bytes lead elsewhere.
    #[error("word {index} does not end at the node its bytes lead to")]
    WordPathMismatch {
        /// The word index.
        index: usize,
    },
}
