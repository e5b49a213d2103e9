use radix_search::SearchableMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

// ============================================================================
// 1. Deletion & Structure Cleanup
// ============================================================================

#[test]
fn test_remove() {
  let mut map = SearchableMap::new();
  map.insert("apple", 1);
  map.insert("apricot", 2);

  assert_eq!(map.remove("apple"), Some(1));
  assert_eq!(map.get("apple"), None);
  assert_eq!(map.get("apricot"), Some(&2));
  assert_eq!(map.len(), 1);

  // Remove non-existent
  assert_eq!(map.remove("banana"), None);
  assert_eq!(map.len(), 1);
}

#[test]
fn test_remove_leaves_siblings_intact() {
  let mut map = SearchableMap::new();
  map.insert("bird", 1);
  map.insert("brew", 2);
  map.insert("brand", 3);

  map.remove("bird");

  assert_eq!(map.get("bird"), None);
  assert_eq!(map.get("brew"), Some(&2));
  assert_eq!(map.get("brand"), Some(&3));
}

#[test]
fn test_remove_merges_leftover_branch() {
  let mut map = SearchableMap::new();
  map.insert("bird", 1);
  map.insert("barb", 2);

  // root -> "b" -> {"ird", "arb"}: four nodes.
  assert_eq!(map.stats().nodes, 4);

  map.remove("barb");

  // The "b" branch point is left payload-less with a single child and
  // must collapse back into one "bird" edge: root + one leaf.
  let stats = map.stats();
  assert_eq!(stats.nodes, 2);
  assert_eq!(map.get("bird"), Some(&1));
}

#[test]
fn test_remove_prefix_key_keeps_extension() {
  let mut map = SearchableMap::new();
  map.insert("bird", 1);
  map.insert("birds", 2);

  assert_eq!(map.remove("bird"), Some(1));

  // "bird" becomes a payload-less single-child node and must merge with
  // its "s" child into one "birds" edge.
  assert_eq!(map.get("bird"), None);
  assert_eq!(map.get("birds"), Some(&2));
  assert_eq!(map.stats().nodes, 2);
}

#[test]
fn test_remove_partial_path_is_noop() {
  let mut map = SearchableMap::new();
  map.insert("bird", 1);
  map.insert("brew", 2);
  map.insert("brand", 3);

  // "band" shares a prefix with stored keys but is not itself stored.
  assert_eq!(map.remove("band"), None);
  assert_eq!(map.len(), 3);
  for key in ["bird", "brew", "brand"] {
    assert!(map.get(key).is_some());
  }
}

#[test]
fn test_remove_all_empties_the_tree() {
  let mut map = SearchableMap::new();
  let n = 1000;

  for i in 0..n {
    map.insert(format!("key-{}", i), i);
  }
  assert_eq!(map.len(), n);

  for i in 0..n {
    assert_eq!(map.remove(format!("key-{}", i)), Some(i));
  }

  assert_eq!(map.len(), 0);
  assert!(map.is_empty());
  assert_eq!(map.iter().count(), 0);
  // Only the root survives.
  assert_eq!(map.stats().nodes, 1);
}

// ============================================================================
// 2. Mutation through handles
// ============================================================================

#[test]
fn test_get_mut() {
  let mut map = SearchableMap::new();
  map.insert("counter", 10);

  if let Some(val) = map.get_mut("counter") {
    *val += 1;
  }

  assert_eq!(map.get("counter"), Some(&11));
}

#[test]
fn test_get_mut_modification() {
  let mut map = SearchableMap::new();
  map.insert("list", vec![1, 2, 3]);

  if let Some(list) = map.get_mut("list") {
    list.push(4);
  }

  assert_eq!(map.get("list"), Some(&vec![1, 2, 3, 4]));
}

// ============================================================================
// 3. The Grand Unified Fuzzer (Insert + Remove)
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
  Insert(String, u32),
  Remove(String),
  Get(String), // Used to verify state during sequence
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(500))]

  #[test]
  fn prop_insert_delete_equivalence(
    ops in proptest::collection::vec(
      prop_oneof![
        // 60% chance Insert
        ("[a-e]{0,10}", any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        // 30% chance Remove
        "[a-e]{0,10}".prop_map(Op::Remove),
        // 10% chance Get (check consistency)
        "[a-e]{0,10}".prop_map(Op::Get),
      ],
      0..200
    )
  ) {
    let mut map = SearchableMap::new();
    let mut model = BTreeMap::new();

    for op in ops {
      match op {
        Op::Insert(k, v) => {
          let t_res = map.insert(&k, v);
          let m_res = model.insert(k, v);
          assert_eq!(t_res, m_res, "Insert result mismatch");
        },
        Op::Remove(k) => {
          let t_res = map.remove(&k);
          let m_res = model.remove(&k);
          assert_eq!(t_res, m_res, "Remove result mismatch for key {:?}", k);
        },
        Op::Get(k) => {
          assert_eq!(map.get(&k), model.get(&k), "Get mismatch for key {:?}", k);
        }
      }

      // Check Invariant: Length
      assert_eq!(map.len(), model.len(), "Length mismatch after op");
    }

    // Final Invariant: Full iteration check
    let map_items: Vec<_> = map.iter().map(|(k, v)| (k, *v)).collect();
    let model_items: Vec<_> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(map_items, model_items, "Final iteration mismatch");
  }
}
