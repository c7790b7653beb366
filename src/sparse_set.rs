//! A sparsely populated set with a value per handle, written `SparseSet<E, T>`, where `E` is the handle type and `T` is
//! the value type.
//!
//! A `SparseSet<E, T>` is an [`EntitySet<E>`] with a value buffer kept strictly parallel to its dense buffer: the value at
//! dense position `i` belongs to the handle at dense position `i`. Every operation that moves a handle (removal, sort,
//! respect, swap) moves its value with it.
//!
//! See [this article](https://research.swtch.com/sparse) on more details behind the data structure.

#![allow(unsafe_code)]

use std::{
  cmp::Ordering,
  collections::TryReserveError,
  fmt,
  ops::{Deref, Index, IndexMut},
};

use crate::{
  entity_set::{absent_entity, descending_order},
  iter::{Entities, Iter, IterMut},
  Entity, EntitySet,
};

/// A sparsely populated set, written `SparseSet<E, T>`, where `E` is the handle type and `T` is the value type.
///
/// For operation complexity notes, *n* is the number of handles in the set.
pub struct SparseSet<E, T> {
  /// The handles and their dense positions.
  entities: EntitySet<E>,

  /// One value per handle, in dense order.
  values: Vec<T>,
}

impl<E, T> SparseSet<E, T> {
  /// Constructs a new, empty `SparseSet<E, T>`.
  ///
  /// The sparse set will not allocate until elements are inserted into it.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// # #[allow(unused_mut)]
  /// let mut set: SparseSet<u32, i32> = SparseSet::new();
  /// ```
  #[must_use]
  pub fn new() -> Self {
    Self {
      entities: EntitySet::new(),
      values: Vec::new(),
    }
  }

  /// Constructs a new, empty `SparseSet<E, T>` able to hold `capacity` elements, with handles smaller than `capacity`,
  /// without reallocating.
  ///
  /// # Panics
  ///
  /// Panics if the new capacity exceeds `isize::MAX` bytes.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::with_capacity(10);
  ///
  /// // The sparse set contains no items, even though it has capacity for more.
  /// assert_eq!(set.len(), 0);
  /// assert!(set.capacity() >= 10);
  ///
  /// for entity in 0..10u32 {
  ///   set.insert(entity, entity * 2);
  /// }
  ///
  /// assert_eq!(set.len(), 10);
  /// ```
  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      entities: EntitySet::with_capacity(capacity),
      values: Vec::with_capacity(capacity),
    }
  }

  /// Returns the set of handles, without their values.
  ///
  /// Useful as the reference in [`SparseSet::respect`] or [`EntitySet::respect`].
  #[must_use]
  pub fn as_entity_set(&self) -> &EntitySet<E> {
    &self.entities
  }

  /// Extracts a slice of the handles in dense order.
  #[must_use]
  pub fn as_entities_slice(&self) -> &[E] {
    self.entities.as_slice()
  }

  /// Extracts a slice of the values in dense order.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  /// set.insert(3u32, 3);
  /// set.insert(12, 6);
  /// set.insert(42, 9);
  ///
  /// assert_eq!(set.as_slice(), &[3, 6, 9]);
  /// ```
  #[must_use]
  pub fn as_slice(&self) -> &[T] {
    &self.values
  }

  /// Extracts a mutable slice of the values in dense order.
  ///
  /// Only the values can be changed through the slice, so the handles and their positions stay consistent.
  #[must_use]
  pub fn as_mut_slice(&mut self) -> &mut [T] {
    &mut self.values
  }

  /// Returns the number of elements the sparse set can hold without reallocating.
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.entities.capacity().min(self.values.capacity())
  }

  /// Returns an iterator over the handles, from the last dense position to the first.
  pub fn entities(&self) -> Entities<'_, E> {
    self.entities.iter()
  }

  /// Returns `true` if the sparse set contains no elements.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Returns an iterator over the `(handle, &value)` pairs, from the last dense position to the first.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  /// set.insert(3u32, 3);
  /// set.insert(12, 6);
  /// set.insert(42, 9);
  ///
  /// assert!(set.iter().eq([(42, &9), (12, &6), (3, &3)]));
  /// ```
  pub fn iter(&self) -> Iter<'_, E, T> {
    Iter::new(self.entities.as_slice(), &self.values)
  }

  /// Returns an iterator over the `(handle, &mut value)` pairs, from the last dense position to the first.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  /// set.insert(3u32, 3);
  /// set.insert(12, 6);
  ///
  /// for (_, value) in set.iter_mut() {
  ///   *value += 1;
  /// }
  ///
  /// assert_eq!(set.as_slice(), &[4, 7]);
  /// ```
  pub fn iter_mut(&mut self) -> IterMut<'_, E, T> {
    IterMut::new(self.entities.as_slice(), &mut self.values)
  }

  /// Returns the number of elements in the sparse set, also referred to as its 'len'.
  #[must_use]
  pub fn len(&self) -> usize {
    self.values.len()
  }

  /// Reserves capacity for at least `additional` more elements.
  ///
  /// # Panics
  ///
  /// Panics if the new capacity exceeds `isize::MAX` bytes.
  pub fn reserve(&mut self, additional: usize) {
    self.entities.reserve(additional);
    self.values.reserve(additional);
  }

  /// Reserves the minimum capacity for exactly `additional` more elements.
  ///
  /// # Panics
  ///
  /// Panics if the new capacity exceeds `isize::MAX` bytes.
  pub fn reserve_exact(&mut self, additional: usize) {
    self.entities.reserve_exact(additional);
    self.values.reserve_exact(additional);
  }

  /// Shrinks the capacity of the dense and value buffers as much as possible.
  pub fn shrink_to_fit(&mut self) {
    self.entities.shrink_to_fit();
    self.values.shrink_to_fit();
  }

  /// Returns the number of slots in the sparse index, i.e. one more than the largest handle ever inserted.
  #[must_use]
  pub fn sparse_len(&self) -> usize {
    self.entities.sparse_len()
  }

  /// Tries to reserve capacity for at least `additional` more elements.
  ///
  /// # Errors
  ///
  /// If the capacity overflows, or the allocator reports a failure, then an error is returned.
  ///
  /// # Examples
  ///
  /// ```
  /// use std::collections::TryReserveError;
  ///
  /// # use entity_set::SparseSet;
  ///
  /// fn process_data(data: &[u32]) -> Result<SparseSet<u32, u32>, TryReserveError> {
  ///   let mut output = SparseSet::new();
  ///
  ///   // Pre-reserve the memory, exiting if we can't.
  ///   output.try_reserve(data.len())?;
  ///
  ///   for (entity, value) in (0u32..).zip(data.iter().cloned()) {
  ///     output.insert(entity, value);
  ///   }
  ///
  ///   Ok(output)
  /// }
  /// # process_data(&[1, 2, 3]).expect("why is the test harness OOMing on 12 bytes?");
  /// ```
  pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
    self.entities.try_reserve(additional)?;
    self.values.try_reserve(additional)
  }

  /// Tries to reserve the minimum capacity for exactly `additional` more elements.
  ///
  /// # Errors
  ///
  /// If the capacity overflows, or the allocator reports a failure, then an error is returned.
  pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), TryReserveError> {
    self.entities.try_reserve_exact(additional)?;
    self.values.try_reserve_exact(additional)
  }

  /// Returns an iterator over the values, from the last dense position to the first.
  pub fn values(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
    self.values.iter().rev()
  }

  /// Returns an iterator that allows modifying each value, from the last dense position to the first.
  pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + ExactSizeIterator {
    self.values.iter_mut().rev()
  }
}

impl<E: Entity, T> SparseSet<E, T> {
  /// Returns a reference to the value of the handle.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Panics
  ///
  /// Panics if the handle is not in the set.
  #[must_use]
  pub fn at(&self, entity: E) -> &T {
    match self.get(entity) {
      Some(value) => value,
      None => absent_entity(),
    }
  }

  /// Returns a mutable reference to the value of the handle.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Panics
  ///
  /// Panics if the handle is not in the set.
  #[must_use]
  pub fn at_mut(&mut self, entity: E) -> &mut T {
    match self.get_mut(entity) {
      Some(value) => value,
      None => absent_entity(),
    }
  }

  /// Clears the sparse set, removing all values.
  ///
  /// Note that this method has no effect on the allocated capacity of the sparse set.
  ///
  /// This operation is *O*(*n*).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  ///
  /// set.insert(0u32, 1);
  /// set.insert(1, 2);
  /// set.insert(2, 3);
  ///
  /// set.clear();
  ///
  /// assert!(set.is_empty());
  /// ```
  pub fn clear(&mut self) {
    self.entities.clear();
    self.values.clear();
  }

  /// Returns `true` if the sparse set contains an element for the handle.
  ///
  /// This operation is *O*(*1*).
  #[must_use]
  pub fn contains(&self, entity: E) -> bool {
    self.entities.contains(entity)
  }

  /// Returns a reference to the value of the handle, if it exists.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  ///
  /// set.insert(0u32, 1);
  /// set.insert(1, 2);
  /// set.insert(2, 3);
  /// assert_eq!(Some(&2), set.get(1));
  /// assert_eq!(None, set.get(3));
  ///
  /// set.remove(1);
  /// assert_eq!(None, set.get(1));
  /// ```
  #[must_use]
  pub fn get(&self, entity: E) -> Option<&T> {
    self
      .entities
      .get(entity)
      // SAFETY: every dense position is within the value buffer, which has the same length as the dense buffer.
      .map(|position| unsafe { self.values.get_unchecked(position) })
  }

  /// Returns a mutable reference to the value of the handle, if it exists.
  ///
  /// This operation is *O*(*1*).
  #[must_use]
  pub fn get_mut(&mut self, entity: E) -> Option<&mut T> {
    let values = &mut self.values;

    self
      .entities
      .get(entity)
      // SAFETY: every dense position is within the value buffer, which has the same length as the dense buffer.
      .map(|position| unsafe { values.get_unchecked_mut(position) })
  }

  /// Inserts an element for the handle at the end of the dense buffer.
  ///
  /// The handle must not already be in the set; handles are expected to be unique per the caller's allocator. Debug
  /// builds assert this, release builds overwrite the existing value in place.
  ///
  /// If the handle does not fit in the sparse index, then an allocation will take place.
  ///
  /// This operation is amortized *O*(*1*).
  ///
  /// # Panics
  ///
  /// Panics if the sparse index cannot grow to hold the handle, e.g. a `usize` handle of `usize::MAX`.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  ///
  /// set.insert(0u32, 1);
  /// set.insert(1, 4);
  /// set.insert(20, 5);
  ///
  /// assert_eq!(set.as_slice(), &[1, 4, 5]);
  /// assert_eq!(set.get(20), Some(&5));
  /// ```
  pub fn insert(&mut self, entity: E, value: T) {
    let existing = self.entities.get(entity);
    debug_assert!(existing.is_none(), "handle is already in the set");

    match existing {
      Some(position) => self.values[position] = value,
      None => {
        let _ = self.entities.insert(entity);
        self.values.push(value);
      }
    }
  }

  /// Returns the dense position of the handle, if it exists.
  #[must_use]
  pub fn position(&self, entity: E) -> Option<usize> {
    self.entities.get(entity)
  }

  /// Removes and returns the value of the handle, if it exists.
  ///
  /// The last element in the dense buffer is moved into the freed position.
  ///
  /// This operation is *O*(*1*).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  /// set.insert(0u32, 1);
  /// set.insert(1, 2);
  /// set.insert(2, 3);
  ///
  /// assert_eq!(set.remove(0), Some(1));
  /// assert_eq!(set.as_slice(), &[3, 2]);
  /// ```
  pub fn remove(&mut self, entity: E) -> Option<T> {
    let position = self.entities.remove(entity)?;
    Some(self.values.swap_remove(position))
  }

  /// Aligns the order of the handles shared with `other` to the order they have in `other`, moving values along.
  ///
  /// See [`EntitySet::respect`] for the resulting order.
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  /// set.insert(3u32, 3);
  /// set.insert(12, 6);
  /// set.insert(42, 9);
  ///
  /// let mut other = SparseSet::new();
  /// other.insert(12u32, 'a');
  ///
  /// set.respect(&other);
  /// assert_eq!(set.as_slice(), &[3, 9, 6]);
  /// ```
  pub fn respect<R: AsRef<EntitySet<E>> + ?Sized>(&mut self, other: &R) {
    let values = &mut self.values;
    self
      .entities
      .respect_with(other.as_ref(), |lhs, rhs| values.swap(lhs, rhs));
  }

  /// Keeps the elements for which `predicate` returns `true`, removing the others.
  ///
  /// Elements are visited from the last dense position to the first, which is the order in which removal never moves an
  /// unvisited element.
  pub fn retain<F: FnMut(E, &mut T) -> bool>(&mut self, mut predicate: F) {
    for position in (0..self.values.len()).rev() {
      let entity = self.entities.as_slice()[position];

      if !predicate(entity, &mut self.values[position]) {
        let _ = self.remove(entity);
      }
    }
  }

  /// Sorts the elements with a comparator over `(handle, &value)` pairs.
  ///
  /// `compare` orders elements ascending. The dense buffer is arranged in *descending* order, so that iteration, which
  /// walks it back to front, yields elements in ascending order. The sort is not stable.
  ///
  /// This operation is *O*(*n* \* log(*n*)).
  ///
  /// # Examples
  ///
  /// ```
  /// # use entity_set::SparseSet;
  /// #
  /// let mut set = SparseSet::new();
  /// set.insert(1u32, 3);
  /// set.insert(2, 9);
  /// set.insert(3, 1);
  ///
  /// set.sort_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs));
  ///
  /// assert_eq!(set.as_entities_slice(), &[2, 1, 3]);
  /// assert!(set.iter().eq([(3, &1), (1, &3), (2, &9)]));
  /// ```
  pub fn sort_by<F: FnMut((E, &T), (E, &T)) -> Ordering>(&mut self, mut compare: F) {
    let entities = self.entities.as_slice();
    let values = &self.values;
    let order = descending_order(values.len(), |lhs, rhs| {
      compare((entities[lhs], &values[lhs]), (entities[rhs], &values[rhs]))
    });

    let values = &mut self.values;
    self
      .entities
      .arrange(order, |lhs, rhs| values.swap(lhs, rhs));
  }

  /// Sorts the elements with a key extraction function, so that iteration yields elements in ascending key order.
  ///
  /// See [`SparseSet::sort_by`].
  pub fn sort_by_key<K: Ord, F: FnMut(E, &T) -> K>(&mut self, mut key: F) {
    self.sort_by(|(lhs, lhs_value), (rhs, rhs_value)| key(lhs, lhs_value).cmp(&key(rhs, rhs_value)));
  }

  /// Swaps the dense positions of two handles along with their values.
  ///
  /// # Panics
  ///
  /// Panics if either handle is not in the set.
  pub fn swap(&mut self, lhs: E, rhs: E) {
    let (lhs, rhs) = (self.entities.at(lhs), self.entities.at(rhs));
    self.entities.swap_positions(lhs, rhs);
    self.values.swap(lhs, rhs);
  }

  /// Asserts that the handles, their positions and the values are in sync.
  #[cfg(test)]
  pub(crate) fn assert_consistent(&self) {
    self.entities.assert_consistent();
    assert_eq!(self.entities.len(), self.values.len());
  }
}

impl<E, T> AsRef<EntitySet<E>> for SparseSet<E, T> {
  fn as_ref(&self) -> &EntitySet<E> {
    &self.entities
  }
}

impl<E, T> AsRef<[T]> for SparseSet<E, T> {
  fn as_ref(&self) -> &[T] {
    &self.values
  }
}

impl<E: Clone, T: Clone> Clone for SparseSet<E, T> {
  fn clone(&self) -> Self {
    Self {
      entities: self.entities.clone(),
      values: self.values.clone(),
    }
  }
}

impl<E, T> Default for SparseSet<E, T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E, T> Deref for SparseSet<E, T> {
  type Target = [T];

  fn deref(&self) -> &[T] {
    &self.values
  }
}

impl<E: fmt::Debug, T: fmt::Debug> fmt::Debug for SparseSet<E, T> {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    formatter
      .debug_map()
      .entries(self.entities.as_slice().iter().zip(self.values.iter()))
      .finish()
  }
}

impl<E: Entity, T> Extend<(E, T)> for SparseSet<E, T> {
  fn extend<Iter: IntoIterator<Item = (E, T)>>(&mut self, iter: Iter) {
    for (entity, value) in iter {
      self.insert(entity, value);
    }
  }
}

impl<E: Entity, T> FromIterator<(E, T)> for SparseSet<E, T> {
  fn from_iter<Iter: IntoIterator<Item = (E, T)>>(iter: Iter) -> Self {
    let mut set = SparseSet::new();
    set.extend(iter);
    set
  }
}

impl<E: Entity, T> Index<E> for SparseSet<E, T> {
  type Output = T;

  fn index(&self, entity: E) -> &Self::Output {
    self.at(entity)
  }
}

impl<E: Entity, T> IndexMut<E> for SparseSet<E, T> {
  fn index_mut(&mut self, entity: E) -> &mut Self::Output {
    self.at_mut(entity)
  }
}

impl<'a, E: Copy, T> IntoIterator for &'a SparseSet<E, T> {
  type Item = (E, &'a T);
  type IntoIter = Iter<'a, E, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<'a, E: Copy, T> IntoIterator for &'a mut SparseSet<E, T> {
  type Item = (E, &'a mut T);
  type IntoIter = IterMut<'a, E, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter_mut()
  }
}

/// Two sparse sets are equal when they map the same handles to equal values, regardless of dense order.
impl<E: Entity, T: PartialEq> PartialEq for SparseSet<E, T> {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len()
      && self
        .entities
        .as_slice()
        .iter()
        .zip(self.values.iter())
        .all(|(&entity, value)| other.get(entity) == Some(value))
  }
}

impl<E: Entity, T: Eq> Eq for SparseSet<E, T> {}
