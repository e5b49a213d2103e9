use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TrieStats;

/// A single vertex of the radix tree.
///
/// Each outgoing edge is labeled by a non-empty string; a child is reached by
/// consuming its whole label. Two invariants hold for every node reachable
/// from a `SearchableMap` root:
///
/// - No two sibling edges share a first code point, so at most one edge can
///   match any key during descent.
/// - No node other than the root has exactly one child and no payload; such
///   chains are collapsed into a single longer edge.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub(crate) struct Node<V> {
  pub(crate) children: HashMap<String, Node<V>>,
  pub(crate) payload: Option<V>,
}

impl<V> Default for Node<V> {
  fn default() -> Self {
    Self {
      children: HashMap::new(),
      payload: None,
    }
  }
}

impl<V> Node<V> {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn get(&self, key: &str) -> Option<&V> {
    if key.is_empty() {
      return self.payload.as_ref();
    }
    let (edge, child) = self
      .children
      .iter()
      .find(|(edge, _)| key.starts_with(edge.as_str()))?;
    child.get(&key[edge.len()..])
  }

  pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
    if key.is_empty() {
      return self.payload.as_mut();
    }
    let edge = self
      .children
      .keys()
      .find(|edge| key.starts_with(edge.as_str()))?
      .clone();
    let suffix = &key[edge.len()..];
    self.children.get_mut(&edge).unwrap().get_mut(suffix)
  }

  /// Inserts `key` below this node, splitting an edge at the longest common
  /// prefix when the key diverges in the middle of a label. Returns the value
  /// previously stored under `key`, if any; a pure overwrite never changes
  /// the tree's structure.
  pub(crate) fn insert(&mut self, key: &str, value: V) -> Option<V> {
    if key.is_empty() {
      return self.payload.replace(value);
    }

    // At most one sibling can share a prefix with `key` (first code points
    // of sibling edges are pairwise distinct).
    let matched = self.children.keys().find_map(|edge| {
      let shared = common_prefix_len(edge, key);
      (shared > 0).then(|| (edge.clone(), shared))
    });

    match matched {
      None => {
        let mut leaf = Node::new();
        leaf.payload = Some(value);
        self.children.insert(key.to_string(), leaf);
        None
      }
      Some((edge, shared)) if shared == edge.len() => {
        // Whole edge consumed: plain descent.
        let suffix = &key[shared..];
        self.children.get_mut(&edge).unwrap().insert(suffix, value)
      }
      Some((edge, shared)) => {
        // Key diverges inside the edge label: split it. The intermediate
        // node keeps the old subtree under the label's unconsumed suffix
        // and receives the rest of the new key, which either lands as its
        // payload (key exhausted) or as a second, divergent child.
        let old_child = self.children.remove(&edge).unwrap();
        let mut intermediate = Node::new();
        intermediate
          .children
          .insert(edge[shared..].to_string(), old_child);
        let previous = intermediate.insert(&key[shared..], value);
        self.children.insert(edge[..shared].to_string(), intermediate);
        previous
      }
    }
  }

  /// Removes `key` from the subtree. Absent keys (including paths that stop
  /// partway through an edge label) are a silent no-op.
  ///
  /// The recursion stack doubles as the transient ancestor path: each frame
  /// re-checks the child it descended into on unwind and removes or merges
  /// it if the deletion left it payload-less with zero or one child.
  pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
    if key.is_empty() {
      return self.payload.take();
    }
    let edge = self
      .children
      .keys()
      .find(|edge| key.starts_with(edge.as_str()))?
      .clone();
    let suffix = &key[edge.len()..];
    let removed = self.children.get_mut(&edge).unwrap().remove(suffix)?;
    self.compact_child(&edge);
    Some(removed)
  }

  /// Restores the compaction invariant for the child reached via `edge`
  /// after a removal below it: a payload-less child with no children is
  /// dropped; a payload-less child with a single grandchild is collapsed
  /// into its parent by concatenating the two edge labels.
  fn compact_child(&mut self, edge: &str) {
    let child = match self.children.get(edge) {
      Some(child) => child,
      None => return,
    };
    if child.payload.is_some() {
      return;
    }

    match child.children.len() {
      0 => {
        self.children.remove(edge);
      }
      1 => {
        let mut child = self.children.remove(edge).unwrap();
        let (tail, grandchild) = child.children.drain().next().unwrap();
        let mut merged = String::with_capacity(edge.len() + tail.len());
        merged.push_str(edge);
        merged.push_str(&tail);
        self.children.insert(merged, grandchild);
      }
      _ => {}
    }
  }

  pub(crate) fn collect_stats(&self, stats: &mut TrieStats) {
    stats.nodes += 1;
    if self.payload.is_some() {
      stats.payload_nodes += 1;
    }
    if self.children.len() > stats.max_fanout {
      stats.max_fanout = self.children.len();
    }
    for child in self.children.values() {
      child.collect_stats(stats);
    }
  }
}

/// Length in bytes of the longest common code-point prefix of `a` and `b`.
/// Comparing char by char (not byte by byte) keeps split points on character
/// boundaries for multi-byte labels; the sum of `len_utf8` is therefore
/// always a valid slice index into both strings.
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
  a.chars()
    .zip(b.chars())
    .take_while(|(x, y)| x == y)
    .map(|(ch, _)| ch.len_utf8())
    .sum()
}
