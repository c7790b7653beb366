//! Iterators over `EntitySet` and `SparseSet`.
//!
//! All iterators walk the dense buffer from its last position to its first. Removing the element just visited moves the
//! last element into its slot, and that element has already been visited, so a traversal that removes as it goes in
//! this order neither skips nor repeats elements. See `retain` on either set for the safe form of that pattern.

use std::{fmt, iter::FusedIterator, ptr, slice};

/// An iterator over the handles of a set, in reverse dense order.
///
/// Two iterators compare equal when they reference the same set and have the same elements left to yield.
pub struct Entities<'a, E> {
  entities: &'a [E],

  /// Remaining positions are `front..back`; `next` yields from `back`.
  front: usize,
  back: usize,
}

impl<'a, E> Entities<'a, E> {
  pub(crate) fn new(entities: &'a [E]) -> Self {
    Self {
      entities,
      front: 0,
      back: entities.len(),
    }
  }

  /// Returns the dense position of the next handle this iterator will yield, if any.
  #[must_use]
  pub fn position(&self) -> Option<usize> {
    (self.front < self.back).then(|| self.back - 1)
  }
}

impl<E> Clone for Entities<'_, E> {
  fn clone(&self) -> Self {
    Self {
      entities: self.entities,
      front: self.front,
      back: self.back,
    }
  }
}

impl<E: fmt::Debug> fmt::Debug for Entities<'_, E> {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    formatter
      .debug_list()
      .entries(self.entities[self.front..self.back].iter().rev())
      .finish()
  }
}

impl<E: Copy> Iterator for Entities<'_, E> {
  type Item = E;

  fn next(&mut self) -> Option<E> {
    if self.front == self.back {
      return None;
    }

    self.back -= 1;
    Some(self.entities[self.back])
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.back - self.front;
    (len, Some(len))
  }
}

impl<E: Copy> DoubleEndedIterator for Entities<'_, E> {
  fn next_back(&mut self) -> Option<E> {
    if self.front == self.back {
      return None;
    }

    let entity = self.entities[self.front];
    self.front += 1;
    Some(entity)
  }
}

impl<E: Copy> ExactSizeIterator for Entities<'_, E> {}

impl<E: Copy> FusedIterator for Entities<'_, E> {}

impl<E> PartialEq for Entities<'_, E> {
  fn eq(&self, other: &Self) -> bool {
    ptr::eq(self.entities, other.entities) && self.front == other.front && self.back == other.back
  }
}

impl<E> Eq for Entities<'_, E> {}

/// An iterator over the `(handle, &value)` pairs of a `SparseSet`, in reverse dense order.
///
/// Two iterators compare equal when they reference the same set and have the same elements left to yield.
pub struct Iter<'a, E, T> {
  entities: Entities<'a, E>,
  values: &'a [T],
}

impl<'a, E, T> Iter<'a, E, T> {
  pub(crate) fn new(entities: &'a [E], values: &'a [T]) -> Self {
    debug_assert_eq!(entities.len(), values.len());

    Self {
      entities: Entities::new(entities),
      values,
    }
  }

  /// Returns the dense position of the next pair this iterator will yield, if any.
  #[must_use]
  pub fn position(&self) -> Option<usize> {
    self.entities.position()
  }
}

impl<E, T> Clone for Iter<'_, E, T> {
  fn clone(&self) -> Self {
    Self {
      entities: self.entities.clone(),
      values: self.values,
    }
  }
}

impl<E: fmt::Debug + Copy, T: fmt::Debug> fmt::Debug for Iter<'_, E, T> {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    formatter.debug_map().entries(self.clone()).finish()
  }
}

impl<'a, E: Copy, T> Iterator for Iter<'a, E, T> {
  type Item = (E, &'a T);

  fn next(&mut self) -> Option<Self::Item> {
    let values = self.values;
    let position = self.entities.position()?;
    let entity = self.entities.next()?;
    Some((entity, &values[position]))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.entities.size_hint()
  }
}

impl<E: Copy, T> DoubleEndedIterator for Iter<'_, E, T> {
  fn next_back(&mut self) -> Option<Self::Item> {
    let values = self.values;
    let position = self.entities.front;
    let entity = self.entities.next_back()?;
    Some((entity, &values[position]))
  }
}

impl<E: Copy, T> ExactSizeIterator for Iter<'_, E, T> {}

impl<E: Copy, T> FusedIterator for Iter<'_, E, T> {}

impl<E, T> PartialEq for Iter<'_, E, T> {
  fn eq(&self, other: &Self) -> bool {
    self.entities == other.entities && ptr::eq(self.values, other.values)
  }
}

impl<E, T> Eq for Iter<'_, E, T> {}

/// An iterator over the `(handle, &mut value)` pairs of a `SparseSet`, in reverse dense order.
pub struct IterMut<'a, E, T> {
  entities: slice::Iter<'a, E>,
  values: slice::IterMut<'a, T>,
}

impl<'a, E, T> IterMut<'a, E, T> {
  pub(crate) fn new(entities: &'a [E], values: &'a mut [T]) -> Self {
    debug_assert_eq!(entities.len(), values.len());

    Self {
      entities: entities.iter(),
      values: values.iter_mut(),
    }
  }
}

impl<E: fmt::Debug, T: fmt::Debug> fmt::Debug for IterMut<'_, E, T> {
  fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
    formatter
      .debug_map()
      .entries(
        self
          .entities
          .as_slice()
          .iter()
          .zip(self.values.as_slice().iter())
          .rev(),
      )
      .finish()
  }
}

impl<'a, E: Copy, T> Iterator for IterMut<'a, E, T> {
  type Item = (E, &'a mut T);

  fn next(&mut self) -> Option<Self::Item> {
    Some((*self.entities.next_back()?, self.values.next_back()?))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.entities.size_hint()
  }
}

impl<E: Copy, T> DoubleEndedIterator for IterMut<'_, E, T> {
  fn next_back(&mut self) -> Option<Self::Item> {
    Some((*self.entities.next()?, self.values.next()?))
  }
}

impl<E: Copy, T> ExactSizeIterator for IterMut<'_, E, T> {}

impl<E: Copy, T> FusedIterator for IterMut<'_, E, T> {}
