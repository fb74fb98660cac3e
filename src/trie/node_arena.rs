//! An index-based arena owning every node of a trie.
//!
//! Nodes refer to their children by [`NodeId`] instead of by pointer, so the whole tree
//! is a single `Vec` that is freed in one go and can be shared between threads once
//! construction is done.

use super::children::Node;

/// Handle to a node stored in a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root is always the first node allocated.
    pub(crate) const ROOT: NodeId = NodeId(0);
}

/// Owns every node of one trie. Node 0 is the root.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an arena holding only a fresh root.
    pub(crate) fn new() -> Self {
        NodeArena {
            nodes: vec![Node::new(0)],
        }
    }

    /// Allocates a node and returns its handle.
    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the number of nodes in this arena, root included.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Returns the child of `parent` reached through `key`.
    #[inline]
    pub(crate) fn child(&self, parent: NodeId, key: u8) -> Option<NodeId> {
        self.node(parent).children().find(key)
    }

    /// Creates a new child of `parent` with the given key and returns it.
    ///
    /// The key must not already be present among the parent's children.
    pub(crate) fn add_child(&mut self, parent: NodeId, key: u8) -> NodeId {
        let child = self.alloc(Node::new(key));
        self.node_mut(parent).children_mut().insert(key, child);
        child
    }

    /// Follows `path` from the root as far as it goes.
    ///
    /// Returns the number of bytes consumed, the node reached, and whether any node
    /// visited after the root terminates a word.
    pub(crate) fn walk(&self, path: &[u8]) -> Walk {
        let mut walk = Walk {
            depth: 0,
            node: NodeId::ROOT,
            passed_word: false,
        };
        for &key in path {
            match self.child(walk.node, key) {
                Some(child) => {
                    walk.depth += 1;
                    walk.node = child;
                    walk.passed_word |= self.node(child).has_word();
                }
                None => break,
            }
        }
        walk
    }

    /// Compares two tries node by node, independent of the order nodes were allocated in.
    ///
    /// Word references, skip distances and child keys must all agree.
    pub(crate) fn same_shape(&self, other: &NodeArena) -> bool {
        let mut stack = vec![(NodeId::ROOT, NodeId::ROOT)];
        while let Some((a, b)) = stack.pop() {
            let (a, b) = (self.node(a), other.node(b));
            if a.word() != b.word()
                || a.skip() != b.skip()
                || a.children().len() != b.children().len()
            {
                return false;
            }
            for ((ka, ca), (kb, cb)) in a.children().iter().zip(b.children().iter()) {
                if ka != kb {
                    return false;
                }
                stack.push((ca, cb));
            }
        }
        true
    }
}

/// Outcome of [`NodeArena::walk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Walk {
    pub(crate) depth: usize,
    pub(crate) node: NodeId,
    pub(crate) passed_word: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_arena_has_root() {
        let arena = NodeArena::new();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.node(NodeId::ROOT).skip(), 1);
        assert!(!arena.node(NodeId::ROOT).has_word());
    }

    #[test]
    fn add_and_find_children() {
        let mut arena = NodeArena::new();
        let b = arena.add_child(NodeId::ROOT, b'b');
        let a = arena.add_child(NodeId::ROOT, b'a');
        let ab = arena.add_child(a, b'b');
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.child(NodeId::ROOT, b'a'), Some(a));
        assert_eq!(arena.child(NodeId::ROOT, b'b'), Some(b));
        assert_eq!(arena.child(a, b'b'), Some(ab));
        assert_eq!(arena.child(b, b'b'), None);
        assert_eq!(arena.node(ab).key(), b'b');
    }

    #[test]
    fn walk_reports_depth_and_words() {
        let mut arena = NodeArena::new();
        let a = arena.add_child(NodeId::ROOT, b'a');
        let ab = arena.add_child(a, b'b');
        arena.node_mut(a).set_word(0);

        let w = arena.walk(b"abc");
        assert_eq!(w.depth, 2);
        assert_eq!(w.node, ab);
        assert!(w.passed_word);

        let w = arena.walk(b"b");
        assert_eq!(w.depth, 0);
        assert_eq!(w.node, NodeId::ROOT);
        assert!(!w.passed_word);

        let w = arena.walk(b"");
        assert_eq!(w.depth, 0);
        assert!(!w.passed_word);
    }

    #[test]
    fn shape_ignores_allocation_order() {
        let mut first = NodeArena::new();
        let x = first.add_child(NodeId::ROOT, b'x');
        first.add_child(NodeId::ROOT, b'y');
        first.add_child(x, b'z');

        let mut second = NodeArena::new();
        let y = second.add_child(NodeId::ROOT, b'y');
        let x = second.add_child(NodeId::ROOT, b'x');
        second.add_child(x, b'z');
        assert!(first.same_shape(&second));

        second.node_mut(y).set_skip(2);
        assert!(!first.same_shape(&second));
        second.node_mut(y).set_skip(1);
        second.node_mut(x).set_word(0);
        assert!(!first.same_shape(&second));
    }
}
