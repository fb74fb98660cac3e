use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use super::error::Error;
use super::node_arena::{NodeArena, NodeId};
use super::search::Trie;
use super::skip::optimize_skips;

/// A builder for constructing a [`Trie`] from a list of words.
///
/// Words are collected first and the trie is laid out in one go by [`build`](Self::build),
/// which also computes the skip distances used while scanning unless
/// [`optimize(false)`](Self::optimize) was requested.
///
/// # Examples
///
/// ```
/// use libskiptrie::trie::builder::TrieBuilder;
///
/// let mut builder = TrieBuilder::new();
/// builder.add_word("needle").add_words(["pin", "thread"]);
/// let trie = builder.build();
/// assert!(trie.is_contained("a needle in a haystack"));
/// ```
#[derive(Clone, Debug)]
pub struct TrieBuilder {
    words: Vec<String>,
    optimize: bool,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        TrieBuilder {
            words: Vec::new(),
            optimize: true,
        }
    }
}

impl TrieBuilder {
    /// Creates an empty builder with skip optimization enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a word. Empty words are ignored.
    ///
    /// Registering the same word again is allowed; the later registration is the one the
    /// trie reports.
    pub fn add_word(&mut self, word: impl Into<String>) -> &mut Self {
        let word = word.into();
        if !word.is_empty() {
            self.words.push(word);
        }
        self
    }

    /// Registers every word from `words`. Empty words are ignored.
    pub fn add_words<I>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for word in words {
            self.add_word(word);
        }
        self
    }

    /// Enables or disables the skip-distance pass. With it disabled every match attempt
    /// advances the scan by a single byte.
    pub fn optimize(&mut self, optimize: bool) -> &mut Self {
        self.optimize = optimize;
        self
    }

    /// Returns the number of words registered so far.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if no words have been registered.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Builds the trie.
    ///
    /// Cost is linear in the total length of the words, plus roughly quadratic in each
    /// word's length when optimization is enabled.
    pub fn build(self) -> Trie {
        debug!(
            "building trie from {} words (optimize: {})",
            self.words.len(),
            self.optimize
        );

        let mut arena = NodeArena::new();
        for (index, word) in self.words.iter().enumerate() {
            insert_word(&mut arena, word.as_bytes(), index);
        }

        if self.optimize {
            let skipping = optimize_skips(&mut arena, &self.words);
            debug!(
                "trie built with {} nodes, {} of which skip more than one byte",
                arena.len(),
                skipping
            );
        } else {
            debug!("trie built with {} nodes", arena.len());
        }

        Trie::from_parts(self.words, arena)
    }
}

/// Adds the path for `word` and marks its last node with `index`.
fn insert_word(arena: &mut NodeArena, word: &[u8], index: usize) {
    debug_assert!(!word.is_empty());
    let mut current = NodeId::ROOT;
    for &key in word {
        current = match arena.child(current, key) {
            Some(child) => child,
            None => arena.add_child(current, key),
        };
    }
    arena.node_mut(current).set_word(index);
}

/// Builds an optimized trie from an iterator of words.
///
/// # Examples
///
/// ```
/// use libskiptrie::trie::builder::build_trie;
///
/// let trie = build_trie(["APPLE", "BANANA", "CHERRY"]);
/// assert!(trie.contains_word("BANANA"));
/// assert!(!trie.is_contained("APRICOT"));
/// ```
pub fn build_trie<I>(words: I) -> Trie
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut builder = TrieBuilder::new();
    builder.add_words(words);
    builder.build()
}

/// Builds an optimized trie from a word list file.
///
/// The file holds one word per line. Line terminators are stripped but other whitespace
/// is kept, since it is part of the pattern. Empty lines are skipped, and so are lines
/// starting with '#' (after optional whitespace), which are treated as comments.
///
/// # Examples
///
/// ```no_run
/// use libskiptrie::trie::builder::build_trie_from_file;
///
/// let trie = build_trie_from_file("patterns.txt").unwrap();
/// ```
pub fn build_trie_from_file(path: impl AsRef<Path>) -> Result<Trie, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let builder = read_words(BufReader::new(file))?;
    debug!("read {} words from {}", builder.len(), path.display());
    Ok(builder.build())
}

pub(crate) fn read_words(mut reader: impl BufRead) -> Result<TrieBuilder, Error> {
    let mut builder = TrieBuilder::new();

    // Reuse one buffer instead of allocating a new string for every line.
    let mut buf = String::with_capacity(80);
    loop {
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let word = buf.trim_end_matches(['\n', '\r']);
        if !word.is_empty() && !is_comment(word) {
            builder.add_word(word);
        }
        buf.clear();
    }
    Ok(builder)
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
