use meteorite_bst::OrderedTree;
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same values in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, set: &mut BTreeSet<T>) -> bool
where
    T: Ord + Clone,
{
    for op in ops {
        let agrees = match op {
            Op::Add(x) => tree.add(x.clone()) == Ok(set.insert(x.clone())),
            Op::Remove(x) => tree.remove(x) == Ok(set.remove(x)),
            Op::Iter => tree.iter().eq(set.iter()),
        };
        if !agrees || tree.len() != set.len() {
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = OrderedTree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set)
        && set.iter().all(|x| tree.contains(x) == Ok(true))
        && tree.iter().count() == tree.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.add(*x).unwrap();
    }

    xs.iter().all(|x| tree.contains(x) == Ok(true))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.add(*x).unwrap();
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.contains(x) == Ok(false))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    for x in &xs {
        tree.add(*x).unwrap();
    }
    for delete in &deletes {
        let before = tree.len();
        let removed = tree.remove(delete).unwrap();
        let expected = if removed { before - 1 } else { before };
        if tree.len() != expected {
            return false;
        }
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| tree.contains(x) == Ok(false))
        && still_present.iter().all(|x| tree.contains(x) == Ok(true))
}

#[quickcheck]
fn add_is_idempotent(xs: Vec<i16>) -> bool {
    let mut tree = OrderedTree::new();
    tree.try_extend(xs.iter().copied()).unwrap();
    let before = tree.clone();

    xs.iter().all(|x| tree.add(*x) == Ok(false)) && tree == before && tree.len() == before.len()
}

#[quickcheck]
fn in_order_is_strictly_ascending(xs: Vec<i16>) -> bool {
    let mut tree = OrderedTree::new();
    tree.try_extend(xs).unwrap();

    let values: Vec<_> = tree.iter().collect();
    values.windows(2).all(|pair| pair[0] < pair[1]) && values.len() == tree.len()
}

#[quickcheck]
fn range_tree_holds_the_range(xs: Vec<i8>, a: i8, b: i8) -> bool {
    let (from, to) = (a.min(b), a.max(b));
    let mut tree = OrderedTree::new();
    tree.try_extend(xs).unwrap();

    let listed: Vec<i8> = tree.range(&from, &to).unwrap().into_iter().copied().collect();
    let copy = tree.range_tree(&from, &to).unwrap();

    copy.to_vec() == listed
        && listed.iter().all(|x| from <= *x && *x <= to)
        && tree.iter().filter(|x| from <= **x && **x <= to).count() == listed.len()
}

#[quickcheck]
fn full_range_is_everything(xs: Vec<i8>) -> bool {
    let mut tree = OrderedTree::new();
    tree.try_extend(xs).unwrap();

    match (tree.first(), tree.last()) {
        (Ok(first), Ok(last)) => tree.range(first, last).unwrap() == tree.iter().collect::<Vec<_>>(),
        _ => tree.is_empty(),
    }
}
