//! A sparse set of entity handles without attached values, written `EntitySet<E>`, where `E` is the handle type.
//!
//! The set keeps two arrays in sync: a dense buffer of the present handles, and a [`SparseIndex`] mapping each handle to
//! its position in the dense buffer. For every present handle `e`, `dense[sparse[e]] == e`, and the dense buffer never
//! has gaps.
//!
//! See [this article](https://research.swtch.com/sparse) on more details behind the data structure.
//!
//! The dense order is insertion order until it is changed by [`EntitySet::remove`] (the last handle takes the removed
//! handle's place), [`EntitySet::sort_by`] or [`EntitySet::respect`]. The last two exist so that several sets iterated in
//! lock-step visit the same handles at the same positions.

use std::{cmp::Ordering, collections::TryReserveError, fmt};

use crate::{iter::Entities, Entity, SparseIndex};

/// A sparsely populated set of entity handles, written `EntitySet<E>`.
///
/// For operation complexity notes, *n* is the number of handles in the set.
pub struct EntitySet<E> {
  /// All present handles, in dense order.
  dense: Vec<E>,

  /// The position of every present handle in `dense`.
  sparse: SparseIndex<E>,
}

impl<E> EntitySet<E> {
  /// Constructs a new, empty `EntitySet<E>`.
  ///
  /// The set will not allocate until handles are inserted into it.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// # #[allow(unused_mut)]
  /// let mut set: EntitySet<u32> = EntitySet::new();
  /// ```
  #[must_use]
  pub fn new() -> Self {
    Self {
      dense: Vec::new(),
      sparse: SparseIndex::new(),
    }
  }

  /// Constructs a new, empty `EntitySet<E>` able to hold `capacity` handles, all smaller than `capacity`, without
  /// reallocating.
  ///
  /// # Panics
  ///
  /// Panics if the new capacity exceeds `isize::MAX` bytes.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set = EntitySet::with_capacity(10);
  /// assert!(set.capacity() >= 10);
  ///
  /// for entity in 0..10u32 {
  ///   set.insert(entity);
  /// }
  ///
  /// assert_eq!(set.len(), 10);
  /// ```
  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      dense: Vec::with_capacity(capacity),
      sparse: SparseIndex::with_capacity(capacity),
    }
  }

  /// Extracts a slice of the handles in dense order.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set = EntitySet::new();
  /// set.insert(3u32);
  /// set.insert(12);
  /// set.insert(42);
  ///
  /// assert_eq!(set.as_slice(), &[3, 12, 42]);
  /// ```
  #[must_use]
  pub fn as_slice(&self) -> &[E] {
    &self.dense
  }

  /// Returns the number of handles the dense buffer can hold without reallocating.
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.dense.capacity()
  }

  /// Returns `true` if the set contains no handles.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set = EntitySet::new();
  /// assert!(set.is_empty());
  ///
  /// set.insert(42u32);
  /// assert!(!set.is_empty());
  /// ```
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.dense.is_empty()
  }

  /// Returns an iterator over the handles, from the last dense position to the first.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set = EntitySet::new();
  /// set.insert(3u32);
  /// set.insert(12);
  /// set.insert(42);
  ///
  /// assert!(set.iter().eq([42, 12, 3]));
  /// ```
  pub fn iter(&self) -> Entities<'_, E> {
    Entities::new(&self.dense)
  }

  /// Returns the number of handles in the set, also referred to as its 'len'.
  #[must_use]
  pub fn len(&self) -> usize {
    self.dense.len()
  }

  /// Reserves capacity for at least `additional` more handles in the dense buffer.
  ///
  /// The sparse index grows on demand as larger handles are inserted.
  ///
  /// # Panics
  ///
  /// Panics if the new capacity exceeds `isize::MAX` bytes.
  pub fn reserve(&mut self, additional: usize) {
    self.dense.reserve(additional);
  }

  /// Reserves the minimum capacity for exactly `additional` more handles in the dense buffer.
  ///
  /// # Panics
  ///
  /// Panics if the new capacity exceeds `isize::MAX` bytes.
  pub fn reserve_exact(&mut self, additional: usize) {
    self.dense.reserve_exact(additional);
  }

  /// Shrinks the capacity of the dense buffer as much as possible.
  ///
  /// The sparse index is left as is, as it never shrinks.
  pub fn shrink_to_fit(&mut self) {
    self.dense.shrink_to_fit();
  }

  /// Returns the number of slots in the sparse index, i.e. one more than the largest handle ever inserted.
  #[must_use]
  pub fn sparse_len(&self) -> usize {
    self.sparse.len()
  }

  /// Tries to reserve capacity for at least `additional` more handles in the dense buffer.
  ///
  /// # Errors
  ///
  /// If the capacity overflows, or the allocator reports a failure, then an error is returned.
  pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
    self.dense.try_reserve(additional)
  }

  /// Tries to reserve the minimum capacity for exactly `additional` more handles in the dense buffer.
  ///
  /// # Errors
  ///
  /// If the capacity overflows, or the allocator reports a failure, then an error is returned.
  pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
    self.dense.try_reserve_exact(additional)
  }
}

impl<E: Entity> EntitySet<E> {
  /// Returns the dense position of the handle.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Panics
  ///
  /// Panics if the handle is not in the set.
  #[must_use]
  pub fn at(&self, entity: E) -> usize {
    match self.get(entity) {
      Some(position) => position,
      None => absent_entity(),
    }
  }

  /// Removes every handle from the set.
  ///
  /// Note that this method has no effect on the allocated capacity of either the dense buffer or the sparse index.
  ///
  /// This operation is *O*(*n*).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set = EntitySet::new();
  /// set.insert(42u32);
  /// set.clear();
  ///
  /// assert!(set.is_empty());
  /// assert!(!set.contains(42));
  /// ```
  pub fn clear(&mut self) {
    for entity in self.dense.drain(..) {
      let _ = self.sparse.remove(entity);
    }
  }

  /// Returns `true` if the set contains the handle.
  ///
  /// This operation is *O*(*1*).
  #[must_use]
  pub fn contains(&self, entity: E) -> bool {
    self.sparse.contains(entity)
  }

  /// Returns the dense position of the handle, if it is in the set.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set = EntitySet::new();
  /// set.insert(3u32);
  /// set.insert(12);
  ///
  /// assert_eq!(set.get(12), Some(1));
  /// assert_eq!(set.get(42), None);
  /// ```
  #[must_use]
  pub fn get(&self, entity: E) -> Option<usize> {
    self.sparse.get(entity)
  }

  /// Inserts the handle at the end of the dense buffer and returns its position.
  ///
  /// The handle must not already be in the set; handles are expected to be unique per the caller's allocator. Debug
  /// builds assert this, release builds return the existing position.
  ///
  /// If the handle does not fit in the sparse index, then an allocation will take place.
  ///
  /// This operation is amortized *O*(*1*).
  ///
  /// # Panics
  ///
  /// Panics if the sparse index cannot grow to hold the handle, e.g. a `usize` handle of `usize::MAX`.
  pub fn insert(&mut self, entity: E) -> usize {
    let existing = self.sparse.get(entity);
    debug_assert!(existing.is_none(), "handle is already in the set");

    if let Some(position) = existing {
      return position;
    }

    // The sparse side goes first, so a handle it cannot hold leaves the set untouched.
    let position = self.dense.len();
    self.sparse.insert(entity, position);
    self.dense.push(entity);
    position
  }

  /// Removes the handle from the set, returning the dense position it had, if it was present.
  ///
  /// The last handle in the dense buffer is moved into the freed position.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set = EntitySet::new();
  /// set.insert(3u32);
  /// set.insert(12);
  /// set.insert(42);
  ///
  /// assert_eq!(set.remove(3), Some(0));
  /// assert_eq!(set.as_slice(), &[42, 12]);
  /// assert_eq!(set.remove(3), None);
  /// ```
  pub fn remove(&mut self, entity: E) -> Option<usize> {
    let position = self.sparse.remove(entity)?;
    let _ = self.dense.swap_remove(position);

    if let Some(&moved) = self.dense.get(position) {
      self.sparse.relocate(moved, position);
    }

    Some(position)
  }

  /// Aligns the order of the handles shared with `other` to the order they have in `other`.
  ///
  /// `other` is walked from its last dense position to its first. Every handle also present in this set is swapped into
  /// the last position not yet aligned, so the shared handles end up as a block at the end of the dense buffer, in the
  /// same relative order as in `other`. Handles only present in this set end up before that block, but their relative
  /// order is not kept: the swaps may shuffle them. `other` is never modified.
  ///
  /// This operation is *O*(*m*), where *m* is the number of handles in `other`.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let reference: EntitySet<u32> = [1, 2, 3, 4, 5].into_iter().collect();
  /// let mut set: EntitySet<u32> = [3, 2, 6, 1, 4, 5].into_iter().collect();
  ///
  /// set.respect(&reference);
  /// assert_eq!(set.as_slice(), &[6, 1, 2, 3, 4, 5]);
  /// ```
  pub fn respect<R: AsRef<EntitySet<E>> + ?Sized>(&mut self, other: &R) {
    self.respect_with(other.as_ref(), |_, _| {});
  }

  /// Keeps the handles for which `predicate` returns `true`, removing the others.
  ///
  /// Handles are visited from the last dense position to the first, which is the order in which removal never moves an
  /// unvisited handle.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set: EntitySet<u32> = (0..6).collect();
  /// set.retain(|entity| entity % 2 == 0);
  ///
  /// assert_eq!(set.len(), 3);
  /// assert!(set.contains(4));
  /// assert!(!set.contains(5));
  /// ```
  pub fn retain<F: FnMut(E) -> bool>(&mut self, mut predicate: F) {
    for position in (0..self.dense.len()).rev() {
      let entity = self.dense[position];

      if !predicate(entity) {
        let _ = self.remove(entity);
      }
    }
  }

  /// Sorts the dense buffer with a comparator over handles.
  ///
  /// `compare` orders handles ascending. The dense buffer is arranged in *descending* order, so that iteration, which
  /// walks it back to front, yields handles in ascending order. The sort is not stable.
  ///
  /// This operation is *O*(*n* \* log(*n*)).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::EntitySet;
  /// #
  /// let mut set: EntitySet<u32> = [12, 42, 7, 3, 9].into_iter().collect();
  /// set.sort_by(|lhs, rhs| lhs.cmp(&rhs));
  ///
  /// assert_eq!(set.as_slice(), &[42, 12, 9, 7, 3]);
  /// assert!(set.iter().eq([3, 7, 9, 12, 42]));
  /// ```
  pub fn sort_by<F: FnMut(E, E) -> Ordering>(&mut self, mut compare: F) {
    let dense = &self.dense;
    let order = descending_order(dense.len(), |lhs, rhs| compare(dense[lhs], dense[rhs]));
    self.arrange(order, |_, _| {});
  }

  /// Sorts the dense buffer with a key extraction function, so that iteration yields handles in ascending key order.
  ///
  /// See [`EntitySet::sort_by`].
  pub fn sort_by_key<K: Ord, F: FnMut(E) -> K>(&mut self, mut key: F) {
    self.sort_by(|lhs, rhs| key(lhs).cmp(&key(rhs)));
  }

  /// Swaps the dense positions of two handles.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Panics
  ///
  /// Panics if either handle is not in the set.
  pub fn swap(&mut self, lhs: E, rhs: E) {
    let (lhs, rhs) = (self.at(lhs), self.at(rhs));
    self.swap_positions(lhs, rhs);
  }

  /// Applies a permutation to the dense buffer, where `order[i]` is the current position of the handle that must end at
  /// position `i`.
  ///
  /// The permutation is applied cycle by cycle with pairwise swaps, and `on_swap` is called with every pair of swapped
  /// positions so a parallel buffer can follow along.
  pub(crate) fn arrange(&mut self, mut order: Vec<usize>, mut on_swap: impl FnMut(usize, usize)) {
    debug_assert_eq!(order.len(), self.dense.len());

    for start in 0..order.len() {
      let mut current = start;
      let mut next = order[current];

      while next != start {
        self.swap_positions(current, next);
        on_swap(current, next);
        order[current] = current;
        current = next;
        next = order[current];
      }

      order[current] = current;
    }
  }

  /// The respect pass, calling `on_swap` with every pair of swapped positions.
  pub(crate) fn respect_with(&mut self, other: &EntitySet<E>, mut on_swap: impl FnMut(usize, usize)) {
    let Some(mut target) = self.dense.len().checked_sub(1) else {
      return;
    };

    for &entity in other.dense.iter().rev() {
      // Only position 0 is left, so any remaining shared handle is already there.
      if target == 0 {
        break;
      }

      if let Some(position) = self.sparse.get(entity) {
        if position != target {
          self.swap_positions(position, target);
          on_swap(position, target);
        }

        target -= 1;
      }
    }
  }

  /// Swaps the handles at two dense positions and updates the sparse index for both.
  pub(crate) fn swap_positions(&mut self, lhs: usize, rhs: usize) {
    if lhs == rhs {
      return;
    }

    self.dense.swap(lhs, rhs);
    self.sparse.relocate(self.dense[lhs], lhs);
    self.sparse.relocate(self.dense[rhs], rhs);
  }

  /// Asserts that the dense buffer and the sparse index describe the same bijection.
  #[cfg(test)]
  pub(crate) fn assert_consistent(&self) {
    for (position, &entity) in self.dense.iter().enumerate() {
      assert_eq!(self.sparse.get(entity), Some(position));
    }

    assert_eq!(self.sparse.present(), self.dense.len());
  }
}

/// Returns the positions `0..len` sorted descending by `compare`.
pub(crate) fn descending_order(len: usize, mut compare: impl FnMut(usize, usize) -> Ordering) -> Vec<usize> {
  let mut order: Vec<usize> = (0..len).collect();
  order.sort_unstable_by(|&lhs, &rhs| compare(rhs, lhs));
  order
}

/// Central function for reporting a lookup of a handle that is not in the set.
#[cold]
#[track_caller]
pub(crate) fn absent_entity() -> ! {
  panic!("handle is not in the set");
}

impl<E> AsRef<EntitySet<E>> for EntitySet<E> {
  fn as_ref(&self) -> &EntitySet<E> {
    self
  }
}

impl<E> AsRef<[E]> for EntitySet<E> {
  fn as_ref(&self) -> &[E] {
    &self.dense
  }
}

impl<E: Clone> Clone for EntitySet<E> {
  fn clone(&self) -> Self {
    Self {
      dense: self.dense.clone(),
      sparse: self.sparse.clone(),
    }
  }
}

impl<E> Default for EntitySet<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E: fmt::Debug> fmt::Debug for EntitySet<E> {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(&self.dense, formatter)
  }
}

impl<E: Entity> Extend<E> for EntitySet<E> {
  fn extend<Iter: IntoIterator<Item = E>>(&mut self, iter: Iter) {
    for entity in iter {
      let _ = self.insert(entity);
    }
  }
}

impl<E: Entity> FromIterator<E> for EntitySet<E> {
  fn from_iter<Iter: IntoIterator<Item = E>>(iter: Iter) -> Self {
    let mut set = EntitySet::new();
    set.extend(iter);
    set
  }
}

impl<'a, E: Copy> IntoIterator for &'a EntitySet<E> {
  type Item = E;
  type IntoIter = Entities<'a, E>;

  fn into_iter(self) -> Self::IntoIter {
    Entities::new(&self.dense)
  }
}

/// Two sets are equal when they contain the same handles, regardless of dense order.
impl<E: Entity> PartialEq for EntitySet<E> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.dense.iter().all(|&entity| other.contains(entity))
  }
}

impl<E: Entity> Eq for EntitySet<E> {}
