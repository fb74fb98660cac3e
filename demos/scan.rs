//! Example: scanning text for a set of words.
//!
//! Builds a trie from a small dictionary, reports every occurrence in a piece of text,
//! and shows the prefix queries and the skip distances the builder computed.
//!
//! Run with: cargo run --example scan

use libskiptrie::trie::builder::build_trie;
use libskiptrie::trie::NodeRef;

fn print_skips(node: NodeRef<'_>, path: &mut Vec<u8>) {
    for child in node.children() {
        path.push(child.key());
        if child.skip() > 1 {
            println!("  {:<8} skip {}", String::from_utf8_lossy(path), child.skip());
        }
        print_skips(child, path);
        path.pop();
    }
}

fn main() {
    let trie = build_trie(["he", "she", "his", "hers", "hershey"]);
    let text = "ahishers and his hershey bar";

    println!("Occurrences in {text:?}:");
    for m in trie.find_iter(text) {
        println!("  {:<8} at {}..{}", m.word(), m.position(), m.end());
    }

    println!("\nContains a word:");
    for t in ["usher", "hiss", "xyz"] {
        println!("  {t}: {}", if trie.is_contained(t) { "yes" } else { "no" });
    }

    println!("\nWords starting with \"he\": {:?}", trie.words_with_prefix("he"));

    println!("\nNodes that skip more than one byte:");
    print_skips(trie.root(), &mut Vec::new());
}
