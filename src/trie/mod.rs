/// Trie builder: word registration, insertion and word list loading.
pub mod builder;
/// Trie nodes and their ordered children.
pub(crate) mod children;
/// Error types.
pub mod error;
/// Index arena owning the nodes of a trie.
pub(crate) mod node_arena;
/// Read-only trie and the scanning algorithms.
pub mod search;
/// JSON interchange form of a trie.
#[cfg(feature = "serde")]
pub mod serial;
/// Skip-distance optimization pass.
pub(crate) mod skip;

pub use builder::{build_trie, TrieBuilder};
pub use error::{Error, StructureError};
pub use search::{FindIter, Match, NodeChildren, NodeRef, Trie};
