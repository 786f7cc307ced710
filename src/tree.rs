//! An unbalanced BST over values. Every node exclusively owns its children, and every mutation
//! hands the (possibly new) subtree back to the slot it was taken from.
//!
//! # Examples
//!
//! ```
//! use meteorite_bst::{OrderedTree, TreeError};
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.contains(&1), Ok(false));
//! assert_eq!(tree.first(), Err(TreeError::EmptyTree));
//!
//! assert_eq!(tree.add(1), Ok(true));
//! assert_eq!(tree.contains(&1), Ok(true));
//!
//! // Duplicates are turned away.
//! assert_eq!(tree.add(1), Ok(false));
//! assert_eq!(tree.len(), 1);
//!
//! assert_eq!(tree.remove(&1), Ok(true));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use log::trace;

use crate::error::{Result, TreeError};
use crate::order::{Natural, Order};

type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree that stores each value at most once. Values are placed according to the
/// ordering strategy `O` handed to the tree on construction; by default that's the values' own
/// [`PartialOrd`] implementation.
///
/// No balancing is done, so inserting already sorted values produces a tree as tall as it has
/// elements.
pub struct OrderedTree<T, O = Natural> {
    root: Link<T>,
    len: usize,
    order: O,
}

impl<T> OrderedTree<T, Natural> {
    /// Generates a new, empty `OrderedTree` using the natural order of `T`.
    pub fn new() -> Self {
        Self::with_order(Natural)
    }
}

impl<T, O> Default for OrderedTree<T, O>
where
    O: Default,
{
    fn default() -> Self {
        Self::with_order(O::default())
    }
}

impl<T, O> OrderedTree<T, O> {
    /// Generates a new, empty `OrderedTree` placing values according to `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_bst::order::Comparator;
    /// use meteorite_bst::OrderedTree;
    ///
    /// let mut tree = OrderedTree::with_order(Comparator::new(|a: &i32, b: &i32| Ok(b.cmp(a))));
    /// tree.try_extend([1, 3, 2]).unwrap();
    ///
    /// assert_eq!(tree.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn with_order(order: O) -> Self {
        Self {
            root: None,
            len: 0,
            order,
        }
    }

    /// The ordering strategy this tree was constructed with.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the lowest value in the tree.
    pub fn first(&self) -> Result<&T> {
        let mut node = self.root.as_deref().ok_or(TreeError::EmptyTree)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.value)
    }

    /// Returns the highest value in the tree.
    pub fn last(&self) -> Result<&T> {
        let mut node = self.root.as_deref().ok_or(TreeError::EmptyTree)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.value)
    }

    /// Returns an iterator over the values in ascending order.
    ///
    /// The iterator walks the tree lazily but borrows it for as long as it lives, so the tree
    /// can't change underneath it. What it yields is therefore always the tree as it was when
    /// the iterator was created.
    ///
    /// ```compile_fail
    /// use meteorite_bst::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.add(1).unwrap();
    ///
    /// for value in tree.iter() {
    ///     tree.add(value + 1).unwrap();
    /// }
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.len)
    }

    /// Returns an iterator over the values in pre-order: each node before its left subtree and
    /// its left subtree before its right subtree. Adding these values, in this order, to an
    /// empty tree with the same ordering rebuilds this exact shape.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(&self.root, self.len)
    }

    /// Copies every value, in ascending order, into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Draws the shape of the tree, one node per line in pre-order. Children are indented under
    /// their parent and marked with `|--`; a missing child is drawn as `->`.
    ///
    /// Values whose `Display` output spans multiple lines will garble the drawing.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_bst::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.try_extend([2, 1]).unwrap();
    ///
    /// assert_eq!(
    ///     tree.to_tree_diagram(),
    ///     "2\n|--1\n   |--->\n   |--->\n|--->\n"
    /// );
    /// ```
    pub fn to_tree_diagram(&self) -> String
    where
        T: fmt::Display,
    {
        let mut diagram = String::new();
        Node::draw(&self.root, &mut diagram);
        diagram
    }
}

impl<T, O> OrderedTree<T, O>
where
    O: Order<T>,
{
    /// Whether the tree holds `value`. The search is steered by the tree's ordering, but the
    /// value it lands on must also be `==` to `value`: a comparator may consider two values
    /// equivalent that aren't equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_bst::order::Comparator;
    /// use meteorite_bst::OrderedTree;
    ///
    /// // Only the first field takes part in the ordering.
    /// let by_key = Comparator::new(|a: &(i32, char), b: &(i32, char)| Ok(a.0.cmp(&b.0)));
    /// let mut tree = OrderedTree::with_order(by_key);
    /// tree.add((1, 'a')).unwrap();
    ///
    /// assert_eq!(tree.contains(&(1, 'a')), Ok(true));
    /// assert_eq!(tree.contains(&(1, 'b')), Ok(false));
    /// ```
    pub fn contains(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.check(value)?;
        let found = Node::find(&self.root, value, &self.order)?;
        Ok(found.map_or(false, |stored| stored == value))
    }

    /// Adds `value` unless a value that orders equal to it is already stored, in which case the
    /// tree is left untouched (the stored value is kept) and `false` is returned.
    pub fn add(&mut self, value: T) -> Result<bool> {
        self.check(&value)?;
        let added = Node::insert(&mut self.root, value, &self.order)?;
        if added {
            self.len += 1;
        }
        Ok(added)
    }

    /// Adds every value yielded by `values`, returning how many were new. Stops at the first
    /// value the ordering refuses; values added before it stay in the tree.
    pub fn try_extend<I>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
    {
        let mut added = 0;
        for value in values {
            if self.add(value)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Removes the value that orders equal to `value`, if there is one.
    ///
    /// A node with two children takes on the value of its in-order predecessor (the largest
    /// value of its left subtree), which is then unlinked from that subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_bst::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.try_extend([50, 30, 70, 20, 40]).unwrap();
    ///
    /// assert_eq!(tree.remove(&50), Ok(true));
    /// assert_eq!(tree.remove(&50), Ok(false));
    /// assert_eq!(tree.to_vec(), vec![20, 30, 40, 70]);
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<bool> {
        self.check(value)?;
        let removed = Node::remove(&mut self.root, value, &self.order)?;
        if removed {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Returns every value between `from` and `to` (both inclusive) in ascending order. Subtrees
    /// lying entirely outside of the bounds are never visited.
    ///
    /// The returned values are borrowed from the tree; nothing changes in the tree if they are
    /// cloned and modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use meteorite_bst::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.try_extend([5, 1, 9, 3, 7]).unwrap();
    ///
    /// assert_eq!(tree.range(&2, &7), Ok(vec![&3, &5, &7]));
    /// assert_eq!(tree.range(&7, &2), Err(TreeError::InvalidRange));
    /// ```
    pub fn range(&self, from: &T, to: &T) -> Result<Vec<&T>> {
        self.check_bounds(from, to)?;
        let mut matches = Vec::new();
        Node::collect_range(&self.root, from, to, &self.order, &mut matches)?;
        Ok(matches)
    }

    /// Like [`range`][Self::range] but the matches are copied into a new tree with the same
    /// ordering. Matches are added in pre-order, so a well-shaped region of this tree stays well
    /// shaped instead of collapsing into a list.
    pub fn range_tree(&self, from: &T, to: &T) -> Result<Self>
    where
        T: Clone,
        O: Clone,
    {
        self.check_bounds(from, to)?;
        let mut tree = Self::with_order(self.order.clone());
        Node::copy_range(&self.root, from, to, &self.order, &mut tree)?;
        Ok(tree)
    }

    /// Makes sure the ordering accepts `value` at all before anything else is attempted.
    fn check(&self, value: &T) -> Result<()> {
        self.order.compare(value, value).map(|_| ())
    }

    fn check_bounds(&self, from: &T, to: &T) -> Result<()> {
        self.check(from)?;
        self.check(to)?;
        match self.order.compare(from, to)? {
            Ordering::Greater => Err(TreeError::InvalidRange),
            _ => Ok(()),
        }
    }
}

impl<T, O> Drop for OrderedTree<T, O> {
    // Unlinks nodes one at a time so a degenerate (list shaped) tree doesn't blow the stack by
    // recursively dropping boxes.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T, O> Clone for OrderedTree<T, O>
where
    T: Clone,
    O: Clone,
{
    fn clone(&self) -> Self {
        // Reversed pre-order visits both subtrees of a node before the node itself, right then
        // left, so its children are on top of `built` (left topmost) by the time it's copied.
        let mut built: Vec<Box<Node<T>>> = Vec::with_capacity(self.len);
        let mut pre_order = PreOrder::new(&self.root, self.len);
        let nodes: Vec<&Node<T>> = std::iter::from_fn(|| pre_order.next_node()).collect();
        for node in nodes.into_iter().rev() {
            let left = if node.left.is_some() { built.pop() } else { None };
            let right = if node.right.is_some() { built.pop() } else { None };
            built.push(Box::new(Node {
                value: node.value.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            len: self.len,
            order: self.order.clone(),
        }
    }
}

/// Two trees are equal when they hold equal values in the same order, however they are shaped.
impl<T, O, P> PartialEq<OrderedTree<T, P>> for OrderedTree<T, O>
where
    T: PartialEq,
{
    fn eq(&self, other: &OrderedTree<T, P>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, O> Eq for OrderedTree<T, O> where T: Eq {}

/// Lists the values in ascending order, e.g. `[1, 2, 3]`.
impl<T, O> fmt::Display for OrderedTree<T, O>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

impl<T, O> fmt::Debug for OrderedTree<T, O>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, O> IntoIterator for &'a OrderedTree<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    fn find<'a, O>(mut link: &'a Link<T>, value: &T, order: &O) -> Result<Option<&'a T>>
    where
        O: Order<T>,
    {
        while let Some(node) = link.as_deref() {
            link = match order.compare(value, &node.value)? {
                Ordering::Less => &node.left,
                Ordering::Equal => return Ok(Some(&node.value)),
                Ordering::Greater => &node.right,
            };
        }
        Ok(None)
    }

    /// Walks down from `link` to the slot holding the value that orders equal to `value`, or to
    /// the empty slot it belongs in. Nothing is modified on the way, so a failed comparison
    /// leaves the tree as it was.
    fn slot<'a, O>(mut link: &'a mut Link<T>, value: &T, order: &O) -> Result<&'a mut Link<T>>
    where
        O: Order<T>,
    {
        loop {
            let ordering = match link.as_deref() {
                Some(node) => Some(order.compare(value, &node.value)?),
                None => None,
            };
            link = match (ordering, link) {
                (Some(Ordering::Less), Some(node)) => &mut node.left,
                (Some(Ordering::Greater), Some(node)) => &mut node.right,
                (_, link) => return Ok(link),
            };
        }
    }

    fn insert<O>(link: &mut Link<T>, value: T, order: &O) -> Result<bool>
    where
        O: Order<T>,
    {
        let slot = Self::slot(link, &value, order)?;
        if slot.is_some() {
            // Duplicate. Keep what's already here.
            return Ok(false);
        }
        *slot = Some(Self::new_boxed(value));
        Ok(true)
    }

    fn remove<O>(link: &mut Link<T>, target: &T, order: &O) -> Result<bool>
    where
        O: Order<T>,
    {
        let slot = Self::slot(link, target, order)?;
        match slot.take() {
            None => Ok(false),
            Some(node) => {
                *slot = Self::unlink(node);
                Ok(true)
            }
        }
    }

    /// Drops `node` from its subtree and returns what should take its place.
    fn unlink(mut node: Box<Self>) -> Link<T> {
        match (node.left.take(), node.right.take()) {
            (None, right) => right,
            (left, None) => left,
            // If we have two children we promote this node's predecessor. That is, the largest
            // value in this node's left subtree.
            (left, right) => {
                trace!("promoting in-order predecessor into a node with two children");
                node.left = left;
                node.right = right;
                if let Some(predecessor) = Self::take_largest(&mut node.left) {
                    node.value = predecessor;
                }
                Some(node)
            }
        }
    }

    /// Unlinks the largest value of the subtree at `link` and returns it.
    fn take_largest(mut link: &mut Link<T>) -> Option<T> {
        loop {
            let has_right = link.as_ref().map_or(false, |node| node.right.is_some());
            link = match (has_right, link) {
                (true, Some(node)) => &mut node.right,
                (_, link) => {
                    let Node { value, left, .. } = *link.take()?;
                    *link = left;
                    return Some(value);
                }
            };
        }
    }

    fn collect_range<'a, O>(
        root: &'a Link<T>,
        from: &T,
        to: &T,
        order: &O,
        matches: &mut Vec<&'a T>,
    ) -> Result<()>
    where
        O: Order<T>,
    {
        // Nodes not below `from` whose value hasn't been looked at yet, left subtree done.
        let mut stack: Vec<&'a Node<T>> = Vec::new();
        let mut link = root;
        loop {
            while let Some(node) = link.as_deref() {
                if order.compare(&node.value, from)? == Ordering::Less {
                    // Its whole left subtree is below `from` too.
                    link = &node.right;
                } else {
                    stack.push(node);
                    link = &node.left;
                }
            }

            let Some(node) = stack.pop() else {
                return Ok(());
            };
            // Everything still on the stack, and every right subtree, is above this node.
            if order.compare(&node.value, to)? == Ordering::Greater {
                return Ok(());
            }
            matches.push(&node.value);
            link = &node.right;
        }
    }

    fn copy_range<O>(
        root: &Link<T>,
        from: &T,
        to: &T,
        order: &O,
        tree: &mut OrderedTree<T, O>,
    ) -> Result<()>
    where
        T: Clone,
        O: Order<T>,
    {
        // Pre-order so sorted input doesn't degrade the copy into a list.
        let mut stack: Vec<&Node<T>> = root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            if order.compare(&node.value, from)? == Ordering::Less {
                stack.extend(node.right.as_deref());
                continue;
            }
            if order.compare(&node.value, to)? == Ordering::Greater {
                stack.extend(node.left.as_deref());
                continue;
            }

            tree.add(node.value.clone())?;
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        Ok(())
    }

    fn draw(root: &Link<T>, diagram: &mut String)
    where
        T: fmt::Display,
    {
        let mut stack = vec![(root.as_deref(), 0)];
        while let Some((slot, level)) = stack.pop() {
            if level > 0 {
                diagram.push_str(&"   ".repeat(level - 1));
                diagram.push_str("|--");
            }

            match slot {
                None => diagram.push_str("->\n"),
                Some(node) => {
                    diagram.push_str(&node.value.to_string());
                    diagram.push('\n');
                    stack.push((node.right.as_deref(), level + 1));
                    stack.push((node.left.as_deref(), level + 1));
                }
            }
        }
    }
}

/// In-order iterator over the values of an [`OrderedTree`], created by [`OrderedTree::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose value hasn't been yielded yet, each one's left subtree already done.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: &'a Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// Pre-order iterator over the values of an [`OrderedTree`], created by
/// [`OrderedTree::pre_order`].
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> PreOrder<'a, T> {
    fn new(root: &'a Link<T>, len: usize) -> Self {
        Self {
            stack: root.as_deref().into_iter().collect(),
            remaining: len,
        }
    }

    fn next_node(&mut self) -> Option<&'a Node<T>> {
        let node = self.stack.pop()?;
        // Right first so the left subtree is popped before it.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.remaining -= 1;
        Some(node)
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| &node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PreOrder<'_, T> {}
impl<T> FusedIterator for PreOrder<'_, T> {}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`, checking along the way that they
    /// agree on every outcome.
    fn do_ops<T>(ops: &[Op<T>], tree: &mut OrderedTree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Add(value) => {
                    assert_eq!(tree.add(value.clone()), Ok(set.insert(value.clone())));
                }
                Op::Remove(value) => {
                    assert_eq!(tree.remove(value), Ok(set.remove(value)));
                }
                Op::Iter => {
                    assert!(tree.iter().eq(set.iter()));
                }
            }
            assert_eq!(tree.len(), set.len());
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = OrderedTree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            set.iter().all(|value| tree.contains(value) == Ok(true))
                && tree.iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn strictly_ascending(xs: Vec<i16>) -> bool {
            let mut tree = OrderedTree::new();
            tree.try_extend(xs).unwrap();

            let values = tree.to_vec();
            values.windows(2).all(|pair| pair[0] < pair[1]) && values.len() == tree.len()
        }
    }

    quickcheck::quickcheck! {
        fn range_agrees_with_set(xs: Vec<i8>, a: i8, b: i8) -> bool {
            let (from, to) = (a.min(b), a.max(b));
            let mut tree = OrderedTree::new();
            tree.try_extend(xs.iter().copied()).unwrap();
            let set: BTreeSet<i8> = xs.into_iter().collect();

            let expected: Vec<&i8> = set.range(from..=to).collect();
            tree.range(&from, &to) == Ok(expected.clone())
                && tree.range_tree(&from, &to).unwrap().iter().eq(expected.into_iter())
        }
    }
}
