use std::{collections::BTreeSet, hash::Hash};

use bit_set::BitSet;
use itertools::Itertools;

use crate::Show;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A set of root indices, stored as a bitset. This is the label of a state in an automaton
/// produced by [`crate::automaton::AutomatonBuilder`]. Equality and hashing only depend on
/// the elements, never on the capacity of the underlying bit vector.
#[derive(Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RootSet(BitSet);

impl RootSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set that can hold roots with index below `roots` without reallocating.
    pub fn with_capacity(roots: usize) -> Self {
        Self(BitSet::with_capacity(roots))
    }

    /// Returns true if the root with index `root` is contained in `self`.
    pub fn contains(&self, root: usize) -> bool {
        self.0.contains(root)
    }

    /// Adds `root` to the set, returns whether it was newly inserted.
    pub fn insert(&mut self, root: usize) -> bool {
        self.0.insert(root)
    }

    /// Number of roots in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no root is contained in `self`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the contained root indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter()
    }

    /// Adds all elements of `other` to `self`.
    pub fn union_with(&mut self, other: &RootSet) {
        self.0.union_with(&other.0)
    }
}

impl FromIterator<usize> for RootSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(BitSet::from_iter(iter))
    }
}

impl Extend<usize> for RootSet {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

impl std::fmt::Debug for RootSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

impl Show for RootSet {
    fn show(&self) -> String {
        format!("{{{}}}", self.iter().join(", "))
    }
}

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators
    /// which yield elements of type `I`.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .collect(),
        )
    }

    /// Returns the class containing `element`, if there is one.
    pub fn class_of(&self, element: &I) -> Option<&BTreeSet<I>> {
        self.0.iter().find(|class| class.contains(element))
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Partition, RootSet};
    use crate::Show;

    #[test]
    fn root_set_identity_ignores_capacity() {
        let mut small = RootSet::new();
        small.insert(1);
        small.insert(4);
        let mut large = RootSet::with_capacity(128);
        large.insert(4);
        large.insert(1);
        assert_eq!(small, large);

        let set = crate::math::Set::from_iter([small.clone()]);
        assert!(set.contains(&large));
        assert_eq!(small.show(), "{1, 4}");
    }

    #[test]
    fn partition_equality_is_order_independent() {
        let left = Partition::new([vec![0, 1], vec![2]]);
        let right = Partition::new([vec![2], vec![1, 0]]);
        assert_eq!(left, right);
        assert_eq!(left.size(), 2);
        assert_eq!(left.class_of(&1).map(|c| c.len()), Some(2));
        assert!(left.class_of(&7).is_none());
    }
}
