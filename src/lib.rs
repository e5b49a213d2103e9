mod fuzzy;
mod node;
mod print;

pub use fuzzy::FuzzyMatch;

use std::io;
use std::ops::Index;

use fuzzy::FuzzySearcher;
use node::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structural counters collected by [`SearchableMap::stats`].
///
/// `nodes` includes the root; path compression keeps it proportional to the
/// number of branching points, not to total key length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieStats {
  pub nodes: usize,
  pub payload_nodes: usize,
  pub max_fanout: usize,
}

/// A string-keyed radix tree (compressed trie) supporting exact lookup and
/// bounded edit-distance search.
///
/// Keys are sequences of Unicode code points compared by code-point equality
/// only; no normalization or collation is applied. The empty string is a
/// valid key, stored at the root.
///
/// The map is single-threaded: no operation blocks or suspends, and it is
/// not safe for concurrent mutation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchableMap<V> {
  root: Node<V>,
  len: usize,
}

impl<V> Default for SearchableMap<V> {
  fn default() -> Self {
    Self {
      root: Node::new(),
      len: 0,
    }
  }
}

impl<V> SearchableMap<V> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts `key`, returning the previously stored value on overwrite.
  /// Overwriting an existing key changes no tree structure.
  pub fn insert<K: AsRef<str>>(&mut self, key: K, value: V) -> Option<V> {
    let previous = self.root.insert(key.as_ref(), value);
    if previous.is_none() {
      self.len += 1;
    }
    previous
  }

  /// Exact lookup. Absence is an expected outcome, not an error: a key whose
  /// path stops partway through an edge, or ends on a payload-less branch
  /// node, is simply not present.
  pub fn get<K: AsRef<str>>(&self, key: K) -> Option<&V> {
    self.root.get(key.as_ref())
  }

  pub fn get_mut<K: AsRef<str>>(&mut self, key: K) -> Option<&mut V> {
    self.root.get_mut(key.as_ref())
  }

  /// Removes `key` and returns its value; a no-op on absent keys. Merges or
  /// drops the nodes left behind so that compaction holds afterwards.
  pub fn remove<K: AsRef<str>>(&mut self, key: K) -> Option<V> {
    let removed = self.root.remove(key.as_ref());
    if removed.is_some() {
      self.len -= 1;
    }
    removed
  }

  /// Number of stored keys.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Returns every stored key within Levenshtein distance `max_distance` of
  /// `query` (insertions, deletions, and substitutions of single code points,
  /// unit cost), together with its exact distance and payload.
  ///
  /// Results are sorted by distance, then key. `max_distance = 0` degenerates
  /// to exact match. An empty query is valid and matches exactly the stored
  /// keys of length `<= max_distance`.
  pub fn fuzzy_search(&self, query: &str, max_distance: usize) -> Vec<FuzzyMatch<'_, V>> {
    let query: Vec<char> = query.chars().collect();
    FuzzySearcher::new(&query, max_distance).search(&self.root)
  }

  /// Entries in lexicographic (code point) key order.
  pub fn iter(&self) -> Iter<'_, V> {
    Iter::new(&self.root)
  }

  pub fn stats(&self) -> TrieStats {
    let mut stats = TrieStats::default();
    self.root.collect_stats(&mut stats);
    stats
  }

  /// Writes a tree diagram of the internal structure to `out`, children in
  /// sorted edge order, payload-bearing nodes marked with `*`. Debugging
  /// aid only; nothing depends on the format.
  pub fn print<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
    print::render(&self.root, out)
  }
}

// --- RUST TRAITS ---

impl<V> FromIterator<(String, V)> for SearchableMap<V> {
  fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
    let mut map = SearchableMap::default();
    for (k, v) in iter {
      map.insert(k, v);
    }
    map
  }
}

impl<V> Extend<(String, V)> for SearchableMap<V> {
  fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
    for (k, v) in iter {
      self.insert(k, v);
    }
  }
}

impl<V> Index<&str> for SearchableMap<V> {
  type Output = V;
  fn index(&self, index: &str) -> &Self::Output {
    self.get(index).expect("no entry found for key")
  }
}

// Iteration is deterministic and sorted, so sequence comparison works even
// when two maps were built by different insert orders.
impl<V: PartialEq> PartialEq for SearchableMap<V> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.iter().eq(other.iter())
  }
}

impl<V: Eq> Eq for SearchableMap<V> {}

impl<'a, V> IntoIterator for &'a SearchableMap<V> {
  type Item = (String, &'a V);
  type IntoIter = Iter<'a, V>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

// --- Iterator Implementation ---

/// Depth-first iterator yielding `(key, &value)` in lexicographic key order.
/// Children are sorted per node on entry since the underlying map is
/// unordered.
pub struct Iter<'a, V> {
  stack: Vec<IterFrame<'a, V>>,
  prefix: String,
}

struct IterFrame<'a, V> {
  edges: std::vec::IntoIter<(&'a String, &'a Node<V>)>,
  payload: Option<&'a V>,
  // Bytes this frame contributed to `prefix`, popped again on unwind.
  edge_len: usize,
}

impl<'a, V> Iter<'a, V> {
  fn new(root: &'a Node<V>) -> Self {
    let mut iter = Self {
      stack: Vec::with_capacity(8),
      prefix: String::new(),
    };
    iter.push_node(root, 0);
    iter
  }

  fn push_node(&mut self, node: &'a Node<V>, edge_len: usize) {
    let mut edges: Vec<_> = node.children.iter().collect();
    edges.sort_by(|a, b| a.0.cmp(b.0));
    self.stack.push(IterFrame {
      edges: edges.into_iter(),
      payload: node.payload.as_ref(),
      edge_len,
    });
  }
}

impl<'a, V> Iterator for Iter<'a, V> {
  type Item = (String, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let frame = self.stack.last_mut()?;
      if let Some(value) = frame.payload.take() {
        return Some((self.prefix.clone(), value));
      }

      match frame.edges.next() {
        Some((edge, child)) => {
          self.prefix.push_str(edge);
          self.push_node(child, edge.len());
        }
        None => {
          let frame = self.stack.pop().unwrap();
          let new_len = self.prefix.len() - frame.edge_len;
          self.prefix.truncate(new_len);
        }
      }
    }
  }
}
