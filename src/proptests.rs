use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

/// Walks the whole tree and checks every structural invariant.
fn validate_tree(t: &AvlTree) {
    let mut stack: Vec<&Node> = Vec::new();
    if let Some(root) = t.root.as_deref() {
        stack.push(root);
    }

    let mut reachable = 0usize;
    while let Some(node) = stack.pop() {
        reachable += 1;

        assert_eq!(
            node.height,
            1 + height(&node.left).max(height(&node.right)),
            "stored node height must match children"
        );
        if t.config.balancing {
            assert!(
                (-1..=1).contains(&node.factor()),
                "balance factor out of range at {:?}",
                node.key
            );
        }

        if let Some(left) = node.left.as_deref() {
            assert!(left.key <= node.key, "left child must not exceed parent");
            stack.push(left);
        }
        if let Some(right) = node.right.as_deref() {
            assert!(right.key >= node.key, "right child must not precede parent");
            stack.push(right);
        }
    }

    assert_eq!(reachable, t.count, "reachable node count must match len");

    let keys = t.traverse_inorder();
    assert!(
        keys.windows(2).all(|w| w[0] <= w[1]),
        "inorder traversal must be non-decreasing"
    );
}

fn key_strategy() -> impl Strategy<Value = String> {
    // A small alphabet keeps duplicates and shared prefixes frequent.
    "[a-e]{0,4}"
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 3)]
    Insert(#[proptest(regex = "[a-e]{0,4}")] String),
    Retrieve(#[proptest(regex = "[a-e]{0,4}")] String),
}

/// AVL height never exceeds 1.4405 * log2(n + 2).
fn avl_height_bound(n: usize) -> u32 {
    (1.4405 * ((n + 2) as f64).log2()).floor() as u32
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_multiset_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=500)) {
        let mut t = AvlTree::new();
        let mut model: Vec<String> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert!(t.insert(&key).unwrap());
                    let at = model.partition_point(|k| k <= &key);
                    model.insert(at, key);
                    validate_tree(&t);
                }
                Op::Retrieve(key) => {
                    let found = t.retrieve(&key);
                    let expected = model.binary_search(&key).is_ok();
                    prop_assert_eq!(found.is_some(), expected);
                    if let Some(stored) = found {
                        prop_assert_eq!(stored, key.as_str());
                    }
                }
            }
        }

        prop_assert_eq!(t.len(), model.len());
        prop_assert_eq!(t.traverse_inorder(), model);
        prop_assert!(t.height() <= avl_height_bound(t.len()));
    }

    #[test]
    fn prop_reject_matches_btreeset(keys in prop::collection::vec(key_strategy(), 0..=500)) {
        let config = Config::default().duplicates(DuplicatePolicy::Reject);
        let mut t = AvlTree::with_config(config);
        let mut model: BTreeSet<String> = BTreeSet::new();

        for key in keys {
            prop_assert_eq!(t.insert(&key).unwrap(), model.insert(key));
        }
        validate_tree(&t);

        prop_assert_eq!(t.len(), model.len());
        let got: Vec<&str> = t.iter().collect();
        let expected: Vec<&str> = model.iter().map(String::as_str).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_unbalanced_keeps_order(keys in prop::collection::vec(key_strategy(), 0..=200)) {
        let mut t = AvlTree::with_config(Config::default().balancing(false));
        for key in &keys {
            t.insert(key).unwrap();
        }
        validate_tree(&t);

        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(t.traverse_inorder(), sorted);
        for key in &keys {
            prop_assert_eq!(t.retrieve(key), Some(key.as_str()));
        }
    }

    #[test]
    fn prop_structure_lists_every_key_descending(keys in prop::collection::vec(key_strategy(), 1..=64)) {
        let mut t = AvlTree::new();
        for key in &keys {
            t.insert(key).unwrap();
        }

        let dump = t.structure().to_string();
        let listed: Vec<&str> = dump.lines().map(|l| l.trim_start_matches('\t')).collect();
        let mut expected = t.traverse_inorder();
        expected.reverse();
        prop_assert_eq!(listed, expected);

        let root_lines: Vec<&str> = dump.lines().filter(|l| !l.starts_with('\t')).collect();
        prop_assert_eq!(root_lines.len(), 1);
    }
}
