//! Skip-distance optimization.
//!
//! After every word has been inserted, each word's path is revisited and every node on
//! it is assigned the distance the scan cursor may jump when a match attempt stops at
//! that node. A jump of `s` from start position `p` is only allowed if no registered word
//! can begin at any of `p + 1 .. p + s`, judged from the bytes the failed attempt has
//! already consumed.

use log::trace;
use smallvec::{smallvec, SmallVec};

use super::node_arena::{NodeArena, NodeId};

/// Per-depth skip distances for one word; index `d` belongs to the node at depth `d + 1`.
pub(crate) type Skips = SmallVec<[usize; 32]>;

/// Computes and stores skip distances along the path of every word, in registration order.
///
/// Nodes shared by several words keep the value written for the last of them.
/// Returns the number of nodes left with a skip greater than one.
pub(crate) fn optimize_skips(arena: &mut NodeArena, words: &[String]) -> usize {
    for word in words {
        let word = word.as_bytes();
        if let Some(skips) = word_skips(arena, word) {
            trace!("skips for {:?}: {:?}", String::from_utf8_lossy(word), skips);
            apply_skips(arena, word, &skips);
        }
    }
    (0..arena.len())
        .filter(|&i| arena.node(NodeId(i)).skip() > 1)
        .count()
}

/// Computes the skip distance for every prefix of `word`.
///
/// Returns `None` for words of one byte or less, which keep the default of one.
pub(crate) fn word_skips(arena: &NodeArena, word: &[u8]) -> Option<Skips> {
    if word.len() <= 1 {
        return None;
    }

    let mut skips: Skips = smallvec![0; word.len()];

    for depth in (2..=word.len()).rev() {
        let mut to_skip = 1;
        for offset in 1..depth - 1 {
            let window = &word[offset..depth];
            let walk = arena.walk(window);
            if walk.passed_word || walk.depth == window.len() {
                // Something could start at `offset`; stop short of it.
                to_skip = offset;
                break;
            }
            to_skip = offset + 1;
        }

        skips[depth - 1] = to_skip;
        // Shallower prefixes may not skip further than this one.
        if to_skip == 1 {
            skips[..depth].fill(1);
            break;
        }
    }

    debug_assert!(skips.iter().all(|&s| s >= 1));
    Some(skips)
}

/// Writes `skips[d]` into the node at depth `d + 1` along `word`'s path.
fn apply_skips(arena: &mut NodeArena, word: &[u8], skips: &[usize]) {
    let mut current = NodeId::ROOT;
    for (&key, &skip) in word.iter().zip(skips) {
        match arena.child(current, key) {
            Some(child) => {
                arena.node_mut(child).set_skip(skip);
                current = child;
            }
            None => break,
        }
    }
}
