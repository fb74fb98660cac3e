use std::fmt;

use super::children::{ChildIter, Node};
use super::node_arena::{NodeArena, NodeId};

/// An immutable multi-pattern search index.
///
/// A `Trie` is produced by [`TrieBuilder::build`](super::builder::TrieBuilder::build)
/// (or read back from its serialized form) and never changes afterwards, so it can be
/// queried from any number of threads at once.
///
/// # Examples
///
/// ```
/// use libskiptrie::trie::builder::build_trie;
///
/// let trie = build_trie(["he", "she", "his", "hers"]);
/// let found: Vec<_> = trie
///     .find_iter("ahishers")
///     .map(|m| (m.word(), m.position()))
///     .collect();
/// assert_eq!(found, [("his", 1), ("she", 3), ("he", 4), ("hers", 4)]);
/// ```
#[derive(Clone)]
pub struct Trie {
    words: Vec<String>,
    arena: NodeArena,
}

impl Trie {
    pub(crate) fn from_parts(words: Vec<String>, arena: NodeArena) -> Self {
        Trie { words, arena }
    }

    /// Returns the registered words in registration order.
    ///
    /// A word registered twice appears twice; only the later copy is referenced by the trie.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the word registered at `index`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Returns the number of registered words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True if no words are registered.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the number of nodes in the trie, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns a read-only view of the root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            trie: self,
            id: NodeId::ROOT,
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Returns an iterator over every occurrence of every registered word in `text`.
    ///
    /// Occurrences are yielded by ascending start position, and for one start position
    /// from the shortest word to the longest.
    pub fn find_iter<'t, 'h, H>(&'t self, text: &'h H) -> FindIter<'t, 'h>
    where
        H: AsRef<[u8]> + ?Sized,
    {
        FindIter {
            trie: self,
            text: text.as_ref(),
            start: 0,
            pos: 0,
            node: NodeId::ROOT,
        }
    }

    /// Calls `f` for every occurrence of every registered word in `text`.
    pub fn find<H, F>(&self, text: &H, mut f: F)
    where
        H: AsRef<[u8]> + ?Sized,
        F: FnMut(Match<'_>),
    {
        for m in self.find_iter(text) {
            f(m);
        }
    }

    /// Collects every occurrence of every registered word in `text`.
    pub fn find_all<H>(&self, text: &H) -> Vec<Match<'_>>
    where
        H: AsRef<[u8]> + ?Sized,
    {
        self.find_iter(text).collect()
    }

    /// Returns true if any registered word occurs in `text`.
    ///
    /// ```
    /// use libskiptrie::trie::builder::build_trie;
    ///
    /// let trie = build_trie(["abc"]);
    /// assert!(trie.is_contained("xxabcxx"));
    /// assert!(!trie.is_contained("xxabxcx"));
    /// ```
    pub fn is_contained<H>(&self, text: &H) -> bool
    where
        H: AsRef<[u8]> + ?Sized,
    {
        self.find_iter(text).next().is_some()
    }

    /// Returns true if `prefix` is a path in the trie, that is, a prefix of some registered
    /// word. The empty prefix is never reported.
    pub fn has_prefix<P>(&self, prefix: &P) -> bool
    where
        P: AsRef<[u8]> + ?Sized,
    {
        self.prefix_node(prefix.as_ref()).is_some()
    }

    /// Returns every registered word starting with `prefix`, the prefix itself included.
    ///
    /// Words come in depth-first order over children sorted by byte, which puts them in
    /// byte-wise lexicographic order. The empty prefix yields nothing.
    ///
    /// ```
    /// use libskiptrie::trie::builder::build_trie;
    ///
    /// let trie = build_trie(["car", "cart", "cat", "dog"]);
    /// assert_eq!(trie.words_with_prefix("car"), ["car", "cart"]);
    /// assert!(trie.words_with_prefix("cow").is_empty());
    /// ```
    pub fn words_with_prefix<P>(&self, prefix: &P) -> Vec<&str>
    where
        P: AsRef<[u8]> + ?Sized,
    {
        let Some(start) = self.prefix_node(prefix.as_ref()) else {
            return Vec::new();
        };

        let mut words = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let node = self.arena.node(id);
            if let Some(index) = node.word() {
                words.push(self.words[index].as_str());
            }
            let children = node.children();
            // Reversed so the smallest key is popped first.
            stack.extend(
                (0..children.len())
                    .rev()
                    .filter_map(|i| children.get(i))
                    .map(|(_, child)| child),
            );
        }
        words
    }

    /// Returns true if `word` is itself a registered word.
    pub fn contains_word<W>(&self, word: &W) -> bool
    where
        W: AsRef<[u8]> + ?Sized,
    {
        let word = word.as_ref();
        let walk = self.arena.walk(word);
        !word.is_empty() && walk.depth == word.len() && self.arena.node(walk.node).has_word()
    }

    fn prefix_node(&self, prefix: &[u8]) -> Option<NodeId> {
        if prefix.is_empty() {
            return None;
        }
        let walk = self.arena.walk(prefix);
        (walk.depth == prefix.len()).then_some(walk.node)
    }
}

/// Two tries are equal when they hold the same words and the same nodes, with the same
/// word references and skip distances.
impl PartialEq for Trie {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words && self.arena.same_shape(&other.arena)
    }
}

impl Eq for Trie {}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("words", &self.words)
            .field("nodes", &self.arena.len())
            .finish()
    }
}

/// One occurrence of a registered word in a searched text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match<'t> {
    word: &'t str,
    word_index: usize,
    position: usize,
}

impl<'t> Match<'t> {
    /// The word that was found.
    pub fn word(&self) -> &'t str {
        self.word
    }

    /// Index of the word in [`Trie::words`].
    pub fn word_index(&self) -> usize {
        self.word_index
    }

    /// Byte offset in the text where the occurrence starts.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Byte offset in the text just past the occurrence.
    pub fn end(&self) -> usize {
        self.position + self.word.len()
    }
}

/// Iterator over the occurrences of a trie's words in a text, created by
/// [`Trie::find_iter`].
///
/// Each match attempt walks the trie from the root starting at `start`. When the walk
/// can go no further, the next attempt starts `skip` bytes later, where `skip` is stored
/// on the deepest node reached.
#[derive(Clone)]
pub struct FindIter<'t, 'h> {
    trie: &'t Trie,
    text: &'h [u8],
    /// Start of the current match attempt.
    start: usize,
    /// Next byte to consume in the current attempt.
    pos: usize,
    /// Deepest node reached in the current attempt.
    node: NodeId,
}

impl<'t> Iterator for FindIter<'t, '_> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = &self.trie.arena;
        while self.start < self.text.len() {
            let child = self
                .text
                .get(self.pos)
                .and_then(|&key| arena.child(self.node, key));
            match child {
                Some(child) => {
                    self.node = child;
                    self.pos += 1;
                    if let Some(word_index) = arena.node(child).word() {
                        return Some(Match {
                            word: &self.trie.words[word_index],
                            word_index,
                            position: self.start,
                        });
                    }
                }
                None => {
                    self.start += arena.node(self.node).skip();
                    self.pos = self.start;
                    self.node = NodeId::ROOT;
                }
            }
        }
        None
    }
}

/// A read-only view of one trie node.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    trie: &'t Trie,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn node(&self) -> &'t Node {
        self.trie.arena.node(self.id)
    }

    /// The byte leading to this node from its parent. Meaningless for the root.
    pub fn key(&self) -> u8 {
        self.node().key()
    }

    /// How many bytes the scan cursor advances when a match attempt ends at this node.
    pub fn skip(&self) -> usize {
        self.node().skip()
    }

    /// Index of the word terminating at this node, if any.
    pub fn word_index(&self) -> Option<usize> {
        self.node().word()
    }

    /// The word terminating at this node, if any.
    pub fn word(&self) -> Option<&'t str> {
        self.word_index().map(|i| self.trie.words[i].as_str())
    }

    /// True if a registered word terminates at this node.
    pub fn has_word(&self) -> bool {
        self.node().has_word()
    }

    /// Returns the child reached through `key`, or `None` if no such edge exists.
    pub fn get(&self, key: u8) -> Option<NodeRef<'t>> {
        self.node().children().find(key).map(|id| NodeRef {
            trie: self.trie,
            id,
        })
    }

    /// Returns the number of children.
    pub fn child_count(&self) -> usize {
        self.node().children().len()
    }

    /// Returns an iterator over the children in ascending key order.
    pub fn children(&self) -> NodeChildren<'t> {
        NodeChildren {
            trie: self.trie,
            inner: self.node().children().iter(),
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.key())
            .field("word", &self.word_index())
            .field("skip", &self.skip())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Iterator over the children of a [`NodeRef`], in ascending key order.
#[derive(Clone)]
pub struct NodeChildren<'t> {
    trie: &'t Trie,
    inner: ChildIter<'t>,
}

impl<'t> Iterator for NodeChildren<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let (_, id) = self.inner.next()?;
        Some(NodeRef {
            trie: self.trie,
            id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NodeChildren<'_> {}

#[cfg(test)]
mod test {
    use super::super::builder::{build_trie, TrieBuilder};
    use super::*;

    fn found<'t>(trie: &'t Trie, text: &str) -> Vec<(&'t str, usize)> {
        trie.find_all(text)
            .into_iter()
            .map(|m| (m.word(), m.position()))
            .collect()
    }

    #[test]
    fn overlapping_words() {
        let trie = build_trie(["he", "she", "his", "hers"]);
        assert_eq!(
            found(&trie, "ahishers"),
            [("his", 1), ("she", 3), ("he", 4), ("hers", 4)]
        );
    }

    #[test]
    fn single_byte_word_matches_everywhere() {
        let trie = build_trie(["a"]);
        assert_eq!(found(&trie, "aaaa"), [("a", 0), ("a", 1), ("a", 2), ("a", 3)]);
    }

    #[test]
    fn empty_dictionary() {
        let trie = build_trie(Vec::<String>::new());
        assert!(!trie.is_contained("anything"));
        let mut calls = 0;
        trie.find("anything", |_| calls += 1);
        assert_eq!(calls, 0);
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn match_in_middle() {
        let trie = build_trie(["abc"]);
        assert!(trie.is_contained("xxabcxx"));
        let matches = trie.find_all("xxabcxx");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].word(), "abc");
        assert_eq!(matches[0].word_index(), 0);
        assert_eq!(matches[0].position(), 2);
        assert_eq!(matches[0].end(), 5);
    }

    #[test]
    fn repeated_byte_patterns() {
        let trie = build_trie(["aa", "aaa", "aaaa"]);
        let expected = [
            ("aa", 0), ("aaa", 0), ("aaaa", 0),
            ("aa", 1), ("aaa", 1), ("aaaa", 1),
            ("aa", 2), ("aaa", 2), ("aaaa", 2),
            ("aa", 3), ("aaa", 3),
            ("aa", 4),
        ];
        assert_eq!(found(&trie, "aaaaaa"), expected);
    }

    #[test]
    fn empty_text() {
        let trie = build_trie(["a", "bc"]);
        assert!(!trie.is_contained(""));
        assert!(trie.find_all("").is_empty());
    }

    #[test]
    fn text_ends_mid_word() {
        let trie = build_trie(["abcdef"]);
        assert!(!trie.is_contained("xxabcde"));
        assert_eq!(found(&trie, "abcdeabcdef"), [("abcdef", 5)]);
    }

    #[test]
    fn binary_text() {
        let trie = build_trie(["ab"]);
        let text: &[u8] = &[0xff, b'a', 0x00, b'a', b'b', 0xfe];
        assert!(trie.is_contained(text));
        assert_eq!(trie.find_all(text)[0].position(), 3);
    }

    #[test]
    fn duplicate_word_keeps_last_index() {
        let trie = build_trie(["ab", "cd", "ab"]);
        assert_eq!(trie.len(), 3);
        let matches = trie.find_all("ab");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].word_index(), 2);
    }

    #[test]
    fn prefixes() {
        let trie = build_trie(["car", "cart", "cat", "dog"]);
        assert!(trie.has_prefix("ca"));
        assert!(trie.has_prefix("cart"));
        assert!(!trie.has_prefix("carts"));
        assert!(!trie.has_prefix("x"));
        assert!(!trie.has_prefix(""));

        assert_eq!(trie.words_with_prefix("c"), ["car", "cart", "cat"]);
        assert_eq!(trie.words_with_prefix("cart"), ["cart"]);
        assert_eq!(trie.words_with_prefix("d"), ["dog"]);
        assert!(trie.words_with_prefix("").is_empty());
        assert!(trie.words_with_prefix("do g").is_empty());
    }

    #[test]
    fn words_with_prefix_is_lexicographic() {
        let trie = build_trie(["b", "abc", "a", "ab", "ba", "aab"]);
        assert_eq!(trie.words_with_prefix("a"), ["a", "aab", "ab", "abc"]);
        assert_eq!(trie.words_with_prefix("b"), ["b", "ba"]);
    }

    #[test]
    fn exact_membership() {
        let trie = build_trie(["car", "cart"]);
        assert!(trie.contains_word("car"));
        assert!(trie.contains_word("cart"));
        assert!(!trie.contains_word("ca"));
        assert!(!trie.contains_word("carts"));
        assert!(!trie.contains_word(""));
    }

    #[test]
    fn prefix_word_is_contained_in_itself() {
        let trie = build_trie(["needle", "need", "eel"]);
        for word in trie.words() {
            assert!(trie.has_prefix(word));
            assert!(trie.is_contained(word));
        }
    }

    #[test]
    fn node_navigation() {
        let trie = build_trie(["his", "hers"]);
        let root = trie.root();
        assert_eq!(root.child_count(), 1);
        let h = root.get(b'h').unwrap();
        assert_eq!(h.key(), b'h');
        assert!(!h.has_word());
        assert_eq!(h.children().map(|c| c.key()).collect::<Vec<_>>(), b"ei");
        let his = h.get(b'i').and_then(|n| n.get(b's')).unwrap();
        assert_eq!(his.word(), Some("his"));
        assert_eq!(his.word_index(), Some(0));
        assert_eq!(his.skip(), 2);
        assert!(root.get(b'x').is_none());
    }

    #[test]
    fn unoptimized_trie_keeps_default_skips() {
        let mut builder = TrieBuilder::new();
        builder.add_words(["hers", "his"]).optimize(false);
        let trie = builder.build();
        let mut stack = vec![trie.root()];
        while let Some(node) = stack.pop() {
            assert_eq!(node.skip(), 1);
            stack.extend(node.children());
        }
        assert_eq!(found(&trie, "ahishers"), [("his", 1), ("hers", 4)]);
    }

    #[test]
    fn trie_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Trie>();

        let trie = build_trie(["needle"]);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| assert!(trie.is_contained("haystack with a needle")));
            }
        });
    }
}
