//! # libskiptrie
//!
//! Multi-pattern substring search over raw bytes.
//!
//! A fixed dictionary of words is compiled into a trie that can then scan any text and
//! report every occurrence of every word, or just whether one occurs. Each match attempt
//! walks the trie from the root; when it can go no further, the scan jumps ahead by a
//! skip distance precomputed for the node it stopped at. Skip distances are chosen so
//! that no occurrence starting inside the skipped range can be missed.
//!
//! ## Features
//!
//! - **Every occurrence**: nested and overlapping words are all reported
//! - **Byte oriented**: texts are arbitrary `&[u8]`, `&str` or anything `AsRef<[u8]>`
//! - **Immutable and thread-safe**: a built [`Trie`](trie::Trie) is `Send + Sync`
//! - **Serializable** (`serde` feature, on by default): skip distances survive a round trip
//!
//! ## Quick Start
//!
//! ```
//! use libskiptrie::trie::builder::build_trie;
//!
//! let trie = build_trie(["he", "she", "his", "hers"]);
//!
//! assert!(trie.is_contained("ushers"));
//! let found: Vec<_> = trie.find_iter("ushers").map(|m| (m.word(), m.position())).collect();
//! assert_eq!(found, [("she", 1), ("he", 2), ("hers", 2)]);
//! ```
//!
//! For more control, use [`TrieBuilder`](trie::builder::TrieBuilder):
//!
//! ```
//! use libskiptrie::trie::builder::TrieBuilder;
//!
//! let mut builder = TrieBuilder::new();
//! builder.add_word("needle").add_words(["pin", "thread"]).optimize(true);
//! let trie = builder.build();
//!
//! let mut hits = Vec::new();
//! trie.find(b"a pin and a needle", |m| hits.push(m.position()));
//! assert_eq!(hits, [2, 12]);
//! ```
//!
//! ## Prefix queries
//!
//! ```
//! use libskiptrie::trie::builder::build_trie;
//!
//! let trie = build_trie(["car", "cart", "cat"]);
//! assert!(trie.has_prefix("ca"));
//! assert_eq!(trie.words_with_prefix("car"), ["car", "cart"]);
//! ```

#![warn(missing_docs)]

/// Search trie: node types, builder, scanning and serialization.
pub mod trie;

pub use trie::{build_trie, Error, Match, Trie, TrieBuilder};
