use lazy_bst::{LazyTree, NotFound};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and to a set holding the values that should be logically
/// present. Returns the values that should still be physically present.
fn do_ops<T>(ops: &[Op<T>], tree: &mut LazyTree<T>, live: &mut BTreeSet<T>) -> BTreeSet<T>
where
    T: Ord + Clone,
{
    let mut physical = BTreeSet::new();
    for op in ops {
        match op {
            Op::Insert(x) => {
                if tree.insert(x.clone()) {
                    live.insert(x.clone());
                    physical.insert(x.clone());
                }
            }
            Op::Remove(x) => {
                tree.remove(x);
                live.remove(x);
            }
            Op::RemoveHard(x) => {
                tree.remove_hard(x);
                live.remove(x);
                physical.remove(x);
            }
            Op::CollectGarbage => {
                tree.collect_garbage();
                physical.retain(|x| live.contains(x));
            }
        }
    }

    physical
}

/// Everything a `LazyTree` exposes about its logical contents.
fn observe(tree: &LazyTree<i8>) -> (usize, Vec<i8>, Option<i8>, Option<i8>) {
    (
        tree.len(),
        tree.iter().copied().collect(),
        tree.find_min().ok().copied(),
        tree.find_max().ok().copied(),
    )
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = LazyTree::new();
        let mut live = BTreeSet::new();

        let physical = do_ops(&ops, &mut tree, &mut live);

        let mut traversed = Vec::new();
        tree.traverse(&mut |x: &i8| traversed.push(*x));

        tree.len() == live.len()
            && tree.len_hard() == physical.len()
            && traversed.iter().eq(live.iter())
            && live.iter().all(|x| tree.find(x) == Ok(x))
            && physical.difference(&live).all(|x| tree.find(x) == Err(NotFound))
    }

    fn traversal_is_strictly_ascending(ops: Vec<Op<i8>>) -> bool {
        let mut tree = LazyTree::new();
        do_ops(&ops, &mut tree, &mut BTreeSet::new());

        let values: Vec<_> = tree.iter().collect();
        values.windows(2).all(|pair| pair[0] < pair[1]) && values.len() == tree.len()
    }

    fn contains(xs: Vec<i8>) -> bool {
        let tree: LazyTree<i8> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.find(x) == Ok(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: LazyTree<i8> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x) == Err(NotFound))
    }

    fn soft_delete_of_absent_value_changes_nothing(ops: Vec<Op<i8>>, x: i8) -> bool {
        let mut tree = LazyTree::new();
        let mut live = BTreeSet::new();
        do_ops(&ops, &mut tree, &mut live);
        live.remove(&x);
        tree.remove(&x);

        let before = observe(&tree);
        let len_hard = tree.len_hard();
        let removed = tree.remove(&x);

        !removed && observe(&tree) == before && tree.len_hard() == len_hard
    }

    fn hard_delete_is_complete(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: LazyTree<i8> = xs.iter().copied().collect();
        for x in xs.iter().step_by(2) {
            tree.remove(x);
        }
        for delete in &deletes {
            tree.remove_hard(delete);
        }

        deletes.iter().all(|x| {
            !tree.contains(x)
                && tree.find_min_hard().ok() != Some(x)
                && tree.find_max_hard().ok() != Some(x)
        })
    }

    fn collect_garbage_is_transparent(ops: Vec<Op<i8>>) -> bool {
        let mut tree = LazyTree::new();
        do_ops(&ops, &mut tree, &mut BTreeSet::new());

        let before: Vec<bool> = (i8::MIN..=i8::MAX).map(|x| tree.contains(&x)).collect();
        let observed = observe(&tree);
        tree.collect_garbage();
        let after: Vec<bool> = (i8::MIN..=i8::MAX).map(|x| tree.contains(&x)).collect();

        before == after && observe(&tree) == observed && tree.len_hard() == tree.len()
    }

    fn clone_is_independent(ops: Vec<Op<i8>>, more: Vec<Op<i8>>) -> bool {
        let mut tree = LazyTree::new();
        do_ops(&ops, &mut tree, &mut BTreeSet::new());

        let mut clone = tree.clone();
        let original = observe(&tree);
        let same = observe(&clone) == original && clone.len_hard() == tree.len_hard();

        do_ops(&more, &mut clone, &mut BTreeSet::new());
        let untouched = observe(&tree) == original;

        let cloned = observe(&clone);
        do_ops(&more, &mut tree, &mut BTreeSet::new());

        same && untouched && observe(&clone) == cloned
    }
}

#[test]
fn ascending_inserts_build_a_list() {
    for n in [1, 2, 10, 200] {
        let tree: LazyTree<i32> = (0..n).collect();
        assert_eq!(tree.height(), n as isize - 1);
    }
}
