// src/fuzzy.rs

use crate::node::Node;

/// One hit from [`crate::SearchableMap::fuzzy_search`]: a stored key, its
/// exact Levenshtein distance to the query, and a reference to its payload.
#[derive(Debug)]
pub struct FuzzyMatch<'v, V> {
  pub key: String,
  pub distance: usize,
  pub value: &'v V,
}

/// Bounded edit-distance search over the trie.
///
/// The classic DP matrix for Levenshtein distance is grown one row per code
/// point of each edge label as the traversal descends, so at any point it
/// holds the distance from every prefix of the walked path to every prefix
/// of the query. Rows are capped at `query_len + max_distance` path code
/// points: no longer path can possibly stay within the bound, which is what
/// keeps the matrix allocation fixed per call.
pub(crate) struct FuzzySearcher<'k, 'v, V> {
  // 'v: the lifetime of the data residing in the trie
  results: Vec<FuzzyMatch<'v, V>>,
  // 'k: the lifetime of the query's code points
  query: &'k [char],
  max_distance: usize,
  matrix: Vec<Vec<usize>>,
}

impl<'k, 'v, V> FuzzySearcher<'k, 'v, V> {
  pub(crate) fn new(query: &'k [char], max_distance: usize) -> Self {
    let columns = query.len() + 1;
    let rows = columns + max_distance;

    // Base cases: D[0][j] = j (build the query from nothing),
    // D[i][0] = i (delete the whole path prefix).
    let mut matrix = vec![vec![0usize; columns]; rows];
    for (j, cell) in matrix[0].iter_mut().enumerate() {
      *cell = j;
    }
    for (i, row) in matrix.iter_mut().enumerate() {
      row[0] = i;
    }

    Self {
      results: Vec::new(),
      query,
      max_distance,
      matrix,
    }
  }

  pub(crate) fn search(mut self, root: &'v Node<V>) -> Vec<FuzzyMatch<'v, V>> {
    let mut prefix = String::with_capacity(32);
    self.recurse(root, 0, &mut prefix);

    // Child iteration order is arbitrary; sort so equal runs of the same
    // query always report matches identically.
    self
      .results
      .sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.key.cmp(&b.key)));
    self.results
  }

  /// `row` is the matrix row describing the path walked so far; its last
  /// column is that path's exact distance to the full query.
  fn recurse(&mut self, node: &'v Node<V>, row: usize, prefix: &mut String) {
    if let Some(value) = &node.payload {
      let distance = self.matrix[row][self.query.len()];
      if distance <= self.max_distance {
        self.results.push(FuzzyMatch {
          key: prefix.clone(),
          distance,
          value,
        });
      }
    }

    'children: for (edge, child) in &node.children {
      let mut i = row;
      for ch in edge.chars() {
        if i + 1 >= self.matrix.len() {
          // Row budget exhausted: every key below here is longer than
          // query_len + max_distance and cannot match.
          continue 'children;
        }
        let row_min = self.extend_row(i, ch);
        if row_min > self.max_distance {
          // Row minima never decrease as rows are added, so the whole
          // subtree under this edge is already out of reach.
          continue 'children;
        }
        i += 1;
      }

      prefix.push_str(edge);
      self.recurse(child, i, prefix);
      prefix.truncate(prefix.len() - edge.len());
    }
  }

  /// Fills row `prev + 1` from row `prev` for path code point `ch` using the
  /// standard recurrence, returning the new row's minimum value.
  fn extend_row(&mut self, prev: usize, ch: char) -> usize {
    let columns = self.query.len() + 1;
    let next = prev + 1;
    let mut row_min = self.matrix[next][0];

    for j in 1..columns {
      let substitute = self.matrix[prev][j - 1] + usize::from(self.query[j - 1] != ch);
      let delete = self.matrix[prev][j] + 1;
      let insert = self.matrix[next][j - 1] + 1;

      let dist = substitute.min(delete).min(insert);
      self.matrix[next][j] = dist;
      if dist < row_min {
        row_min = dist;
      }
    }

    row_min
  }
}
