use super::node_arena::NodeId;

/// Above this many children, lookups switch from a linear scan to binary search.
pub(crate) const LINEAR_SCAN_LIMIT: usize = 16;

/// A compact representation of the children of a [`Node`] that doesn't allocate until
/// there are at least three children.
///
/// Children are always kept in ascending key order and never contain the same key twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Children {
    /// No children.
    #[default]
    None,
    /// Exactly one child (key, node).
    One((u8, NodeId)),
    /// Exactly two children (key1, node1, key2, node2) with key1 < key2.
    Two((u8, NodeId, u8, NodeId)),
    /// Three or more children stored in a vector sorted by key.
    Many(Vec<(u8, NodeId)>),
}

impl Children {
    /// Gets the child at the specified index in key order.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<(u8, NodeId)> {
        match self {
            Children::None => None,
            Children::One(child) => match index {
                0 => Some(*child),
                _ => None,
            },
            Children::Two((k1, n1, k2, n2)) => match index {
                0 => Some((*k1, *n1)),
                1 => Some((*k2, *n2)),
                _ => None,
            },
            Children::Many(children) => children.get(index).copied(),
        }
    }

    /// Returns the child reached through `key`, or `None` if no such edge exists.
    #[inline]
    pub(crate) fn find(&self, key: u8) -> Option<NodeId> {
        match self {
            Children::None => None,
            Children::One((k, node)) => (*k == key).then_some(*node),
            Children::Two((k1, n1, k2, n2)) => {
                if key == *k1 {
                    Some(*n1)
                } else if key == *k2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(children) if children.len() <= LINEAR_SCAN_LIMIT => {
                // Unrolling by 2 exposes load-level parallelism on small nodes.
                let chunks = children.chunks_exact(2);
                let remainder = chunks.remainder();
                for chunk in chunks {
                    if chunk[0].0 == key {
                        return Some(chunk[0].1);
                    }
                    if chunk[1].0 == key {
                        return Some(chunk[1].1);
                    }
                }
                remainder
                    .iter()
                    .find(|&&(k, _)| k == key)
                    .map(|&(_, node)| node)
            }
            Children::Many(children) => children
                .binary_search_by_key(&key, |&(k, _)| k)
                .ok()
                .map(|index| children[index].1),
        }
    }

    /// Inserts an edge in sorted position.
    ///
    /// The key must not already be present.
    pub(crate) fn insert(&mut self, key: u8, child: NodeId) {
        debug_assert!(self.find(key).is_none(), "insert: key already exists");
        *self = match std::mem::take(self) {
            Children::None => Children::One((key, child)),
            Children::One((k1, n1)) => {
                if key < k1 {
                    Children::Two((key, child, k1, n1))
                } else {
                    Children::Two((k1, n1, key, child))
                }
            }
            Children::Two((k1, n1, k2, n2)) => {
                let mut v = vec![(k1, n1), (k2, n2), (key, child)];
                v.sort_unstable_by_key(|&(k, _)| k);
                Children::Many(v)
            }
            Children::Many(mut children) => {
                let pos = children.partition_point(|&(k, _)| k < key);
                children.insert(pos, (key, child));
                Children::Many(children)
            }
        };
    }

    /// Returns the number of children.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(children) => children.len(),
        }
    }

    /// Returns an iterator over `(key, node)` pairs in ascending key order.
    #[inline]
    pub(crate) fn iter(&self) -> ChildIter<'_> {
        ChildIter {
            children: self,
            index: 0,
        }
    }
}

/// An iterator over the children of a [`Node`], in ascending key order.
#[derive(Clone)]
pub(crate) struct ChildIter<'a> {
    children: &'a Children,
    index: usize,
}

impl Iterator for ChildIter<'_> {
    type Item = (u8, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let next_child = self.children.get(self.index)?;
        self.index += 1;
        Some(next_child)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.children.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ChildIter<'_> {}

/// A single vertex of the search trie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    key: u8,
    word: Option<usize>,
    skip: usize,
    children: Children,
}

impl Node {
    /// Creates a node reached through `key` that terminates no word and skips one byte.
    pub(crate) fn new(key: u8) -> Self {
        Node {
            key,
            word: None,
            skip: 1,
            children: Children::None,
        }
    }

    /// Creates a node with every field given, as read back from a serialized trie.
    #[cfg(feature = "serde")]
    pub(crate) fn with_fields(key: u8, word: Option<usize>, skip: usize) -> Self {
        debug_assert!(skip >= 1);
        Node {
            key,
            word,
            skip,
            children: Children::None,
        }
    }

    /// The byte this node represents relative to its parent.
    #[inline]
    pub(crate) fn key(&self) -> u8 {
        self.key
    }

    /// Index of the word terminating at this node.
    #[inline]
    pub(crate) fn word(&self) -> Option<usize> {
        self.word
    }

    /// True if some registered word terminates at this node.
    #[inline]
    pub(crate) fn has_word(&self) -> bool {
        self.word.is_some()
    }

    /// How far the scan cursor advances when a match attempt stops at this node.
    #[inline]
    pub(crate) fn skip(&self) -> usize {
        self.skip
    }

    #[inline]
    pub(crate) fn children(&self) -> &Children {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    pub(crate) fn set_word(&mut self, index: usize) {
        self.word = Some(index);
    }

    pub(crate) fn set_skip(&mut self, skip: usize) {
        debug_assert!(skip >= 1, "skip distance must be positive");
        self.skip = skip;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn keys(children: &Children) -> Vec<u8> {
        children.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn no_children() {
        let c = Children::None;
        assert_eq!(c.iter().next(), None);
        assert_eq!(c.len(), 0);
        assert_eq!(c.find(b'a'), None);
    }

    #[test]
    fn one_child() {
        let mut c = Children::None;
        c.insert(b'a', NodeId(1));
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![(b'a', NodeId(1))]);
        assert_eq!(c.find(b'a'), Some(NodeId(1)));
        assert_eq!(c.find(b'b'), None);
    }

    #[test]
    fn two_children_are_ordered() {
        let mut c = Children::None;
        c.insert(b'b', NodeId(1));
        c.insert(b'a', NodeId(2));
        assert_eq!(keys(&c), b"ab");
        assert_eq!(c.find(b'a'), Some(NodeId(2)));
        assert_eq!(c.find(b'b'), Some(NodeId(1)));
    }

    #[test]
    fn three_children_are_ordered() {
        let mut c = Children::None;
        c.insert(b'c', NodeId(1));
        c.insert(b'a', NodeId(2));
        c.insert(b'b', NodeId(3));
        assert_eq!(keys(&c), b"abc");
        assert_eq!(c.len(), 3);
        assert_eq!(c.find(b'b'), Some(NodeId(3)));
        assert_eq!(c.find(b'd'), None);
    }

    #[test]
    fn every_byte_value() {
        let mut c = Children::None;
        // Insert in a scrambled order so both search strategies see unsorted arrivals.
        for i in 0..=255u8 {
            let key = i.wrapping_mul(167);
            c.insert(key, NodeId(key as usize + 1));
            for probe in [0u8, 42, 128, 255] {
                let present = c.iter().any(|(k, _)| k == probe);
                assert_eq!(c.find(probe).is_some(), present);
            }
        }
        assert_eq!(c.len(), 256);
        assert_eq!(keys(&c), (0..=255u8).collect::<Vec<_>>());
        for key in 0..=255u8 {
            assert_eq!(c.find(key), Some(NodeId(key as usize + 1)));
        }
    }

    #[test]
    fn lookup_around_scan_limit() {
        for len in [LINEAR_SCAN_LIMIT - 1, LINEAR_SCAN_LIMIT, LINEAR_SCAN_LIMIT + 1] {
            let mut c = Children::None;
            for i in 0..len {
                c.insert((i * 2) as u8, NodeId(i));
            }
            for i in 0..len {
                assert_eq!(c.find((i * 2) as u8), Some(NodeId(i)));
                assert_eq!(c.find((i * 2 + 1) as u8), None);
            }
        }
    }

    #[test]
    fn exact_size() {
        let mut c = Children::None;
        for key in b"hello world".iter().copied() {
            if c.find(key).is_none() {
                c.insert(key, NodeId(0));
            }
        }
        let mut iter = c.iter();
        assert_eq!(iter.len(), 8);
        iter.next();
        assert_eq!(iter.len(), 7);
    }

    #[test]
    fn new_node_defaults() {
        let n = Node::new(b'x');
        assert_eq!(n.key(), b'x');
        assert!(!n.has_word());
        assert_eq!(n.word(), None);
        assert_eq!(n.skip(), 1);
        assert_eq!(n.children().len(), 0);
    }
}
