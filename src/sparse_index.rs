//! The sparse half of a sparse set, written `SparseIndex<E>`, where `E` is the entity handle type.
//!
//! Each slot is addressed directly by a handle's [`Entity::to_index`] and holds the handle's position in the dense
//! buffer, or `None` if the handle is absent. Positions are stored offset by one as a [`NonZeroUsize`] so a slot is the
//! size of a `usize`.
//!
//! The table only ever grows. Removing handles leaves empty slots behind, which keeps lookups *O*(*1*) without
//! rehashing.

use std::{collections::TryReserveError, fmt, marker::PhantomData, num::NonZeroUsize};

use crate::Entity;

/// Maps entity handles to dense positions.
///
/// For operation complexity notes, *m* is the value of the largest handle ever inserted.
pub struct SparseIndex<E> {
  /// Dense position plus one for every slot, `None` for absent handles.
  slots: Vec<Option<NonZeroUsize>>,

  _marker: PhantomData<E>,
}

impl<E> SparseIndex<E> {
  /// Constructs a new, empty `SparseIndex<E>`.
  ///
  /// The sparse index will not allocate until handles are inserted into it.
  #[must_use]
  pub fn new() -> Self {
    Self {
      slots: Vec::new(),
      _marker: PhantomData,
    }
  }

  /// Constructs a new, empty `SparseIndex<E>` able to hold handles up to `capacity - 1` without reallocating.
  #[must_use]
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
      _marker: PhantomData,
    }
  }

  /// Returns the number of slots the sparse index can hold without reallocating.
  #[must_use]
  pub fn capacity(&self) -> usize {
    self.slots.capacity()
  }

  /// Returns the number of slots in the sparse index, i.e. one more than the largest handle inserted so far.
  #[must_use]
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  /// Returns `true` if no handle was ever inserted into the sparse index.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  /// Reserves capacity for at least `additional` more slots.
  ///
  /// # Panics
  ///
  /// Panics if the new capacity exceeds `isize::MAX` bytes.
  pub fn reserve(&mut self, additional: usize) {
    self.slots.reserve(additional);
  }

  /// Tries to reserve capacity for at least `additional` more slots.
  ///
  /// # Errors
  ///
  /// If the capacity overflows, or the allocator reports a failure, then an error is returned.
  pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
    self.slots.try_reserve(additional)
  }
}

impl<E: Entity> SparseIndex<E> {
  /// Returns `true` if the handle has a dense position.
  ///
  /// This operation is *O*(*1*).
  #[must_use]
  pub fn contains(&self, entity: E) -> bool {
    self.get(entity).is_some()
  }

  /// Returns the dense position of the handle, if it is present.
  ///
  /// This operation is *O*(*1*).
  #[must_use]
  #[inline]
  pub fn get(&self, entity: E) -> Option<usize> {
    self
      .slots
      .get(entity.to_index())
      .copied()
      .flatten()
      .map(|position| position.get() - 1)
  }

  /// Records `position` as the dense position of the handle, growing the table if the handle does not fit yet.
  ///
  /// If the handle already had a position, it is overwritten.
  ///
  /// This operation is amortized *O*(*1*).
  ///
  /// # Panics
  ///
  /// Panics if the handle's slot or `position` is `usize::MAX`, or if the table cannot grow to hold the handle.
  pub fn insert(&mut self, entity: E, position: usize) {
    let slot = to_slot(position);
    let index = entity.to_index();

    if index >= self.slots.len() {
      let Some(len) = index.checked_add(1) else {
        capacity_overflow();
      };

      self.slots.resize(len, None);
    }

    self.slots[index] = Some(slot);
  }

  /// Overwrites the dense position of a handle that is known to be present.
  ///
  /// Used when a handle moves within the dense buffer.
  #[inline]
  pub(crate) fn relocate(&mut self, entity: E, position: usize) {
    let index = entity.to_index();
    debug_assert!(
      matches!(self.slots.get(index), Some(Some(_))),
      "relocated handle is not present"
    );

    if let Some(slot) = self.slots.get_mut(index) {
      *slot = Some(to_slot(position));
    }
  }

  /// Returns the number of slots holding a position.
  #[cfg(test)]
  pub(crate) fn present(&self) -> usize {
    self.slots.iter().filter(|slot| slot.is_some()).count()
  }

  /// Removes the handle, returning the dense position it had, if it was present.
  ///
  /// The slot is left in place, so the table never shrinks.
  ///
  /// This operation is *O*(*1*).
  pub fn remove(&mut self, entity: E) -> Option<usize> {
    self
      .slots
      .get_mut(entity.to_index())
      .and_then(Option::take)
      .map(|position| position.get() - 1)
  }
}

/// Converts a dense position into its stored form.
#[inline]
fn to_slot(position: usize) -> NonZeroUsize {
  match position.checked_add(1).and_then(NonZeroUsize::new) {
    Some(slot) => slot,
    None => capacity_overflow(),
  }
}

/// Central function for reporting a slot or position that does not fit in the table.
#[cold]
#[track_caller]
fn capacity_overflow() -> ! {
  panic!("capacity overflow");
}

impl<E> Clone for SparseIndex<E> {
  fn clone(&self) -> Self {
    Self {
      slots: self.slots.clone(),
      _marker: PhantomData,
    }
  }
}

impl<E> Default for SparseIndex<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E> fmt::Debug for SparseIndex<E> {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    formatter
      .debug_map()
      .entries(
        self
          .slots
          .iter()
          .enumerate()
          .filter_map(|(index, slot)| slot.map(|position| (index, position.get() - 1))),
      )
      .finish()
  }
}
