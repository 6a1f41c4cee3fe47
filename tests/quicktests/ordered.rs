use bst_lab::ordered::Tree;

use std::collections::HashSet;

use crate::Op;

fn inorder(tree: &Tree) -> Vec<i32> {
    let mut keys = Vec::new();
    tree.inorder(|key| keys.push(key));
    keys
}

/// Applies a set of operations to a tree and to a sorted `Vec` acting as a multiset. Every query
/// operation is checked against the model as it happens, and the keys of both are compared at the
/// end.
fn do_ops(ops: &[Op<i8>]) -> bool {
    let mut tree = Tree::new();
    let mut model: Vec<i32> = Vec::new();

    for op in ops {
        let ok = match *op {
            Op::Insert(key) => {
                let key = i32::from(key);
                tree.insert(key);
                let pos = model.partition_point(|&k| k <= key);
                model.insert(pos, key);
                true
            }
            Op::Remove(key) => {
                let key = i32::from(key);
                let expected = match model.iter().position(|&k| k == key) {
                    Some(pos) => {
                        model.remove(pos);
                        true
                    }
                    None => false,
                };
                tree.delete(key) == expected
            }
            Op::Range(low, high) => {
                let (low, high) = (i32::from(low), i32::from(high));
                let mut emitted = Vec::new();
                tree.range(low, high, |key| emitted.push(key));
                let expected: Vec<i32> = model
                    .iter()
                    .copied()
                    .filter(|&k| low <= k && k <= high)
                    .collect();
                emitted == expected
            }
            Op::KthLargest(k) => {
                let k = usize::from(k);
                let expected = match k {
                    0 => None,
                    k => model.iter().rev().nth(k - 1).copied(),
                };
                tree.kth_largest(k) == expected
            }
            Op::Iter => tree.iter().eq(model.iter().copied()),
        };
        if !ok || !tree.is_ordered() || tree.len() != model.len() {
            return false;
        }
    }

    inorder(&tree) == model && tree.is_empty() == model.is_empty()
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        do_ops(&ops)
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i32>) -> bool {
        let tree: Tree = xs.iter().copied().collect();

        tree.len() == xs.len() && xs.iter().all(|&x| tree.search(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree = xs.iter().map(|&x| i32::from(x)).collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|&x| !tree.search(i32::from(x)))
    }
}

quickcheck::quickcheck! {
    fn inorder_is_sorted(xs: Vec<i32>) -> bool {
        let tree: Tree = xs.iter().copied().collect();
        let mut sorted = xs;
        sorted.sort_unstable();

        inorder(&tree) == sorted
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree = xs.iter().map(|&x| i32::from(x)).collect();
        let mut still_present = xs;
        for delete in &deletes {
            let removed = tree.delete(i32::from(*delete));
            // Only one copy of a duplicated key goes per delete.
            match still_present.iter().position(|x| x == delete) {
                Some(pos) => {
                    still_present.swap_remove(pos);
                    if !removed {
                        return false;
                    }
                }
                None => {
                    if removed {
                        return false;
                    }
                }
            }
        }

        tree.len() == still_present.len()
            && still_present.iter().all(|&x| tree.search(i32::from(x)))
            && tree.is_ordered()
    }
}

quickcheck::quickcheck! {
    fn traversals_visit_every_key_once(xs: Vec<i8>) -> bool {
        let tree: Tree = xs.iter().map(|&x| i32::from(x)).collect();
        let mut pre = Vec::new();
        tree.preorder(|key| pre.push(key));
        let mut post = Vec::new();
        tree.postorder(|key| post.push(key));

        // The first key inserted is the root: first in preorder, last in postorder.
        let root = xs.first().map(|&x| i32::from(x));
        if pre.first().copied() != root || post.last().copied() != root {
            return false;
        }

        let mut sorted: Vec<i32> = xs.iter().map(|&x| i32::from(x)).collect();
        sorted.sort_unstable();
        pre.sort_unstable();
        post.sort_unstable();

        pre == sorted && post == sorted
    }
}
