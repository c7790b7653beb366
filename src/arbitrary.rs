//! `Arbitrary` implementations for the types in this crate.

use arbitrary::{Arbitrary, Unstructured};

use crate::{Entity, EntitySet, SparseSet};

/// Picks a handle in `0..len`.
fn arbitrary_entity<E: TryFrom<usize>>(u: &mut Unstructured<'_>, len: usize) -> arbitrary::Result<E> {
  let index = u.int_in_range(0..=(len - 1))?;
  E::try_from(index).map_err(|_| arbitrary::Error::IncorrectFormat)
}

impl<'a, E: Entity + TryFrom<usize>> Arbitrary<'a> for EntitySet<E> {
  fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
    // Get the number of handles we should insert into our collection.
    let len = u.arbitrary_len::<u8>()?;
    let mut set = Self::with_capacity(len);

    for _ in 0..len {
      if *u.choose(&[false, true])? {
        let entity = arbitrary_entity(u, len)?;

        if !set.contains(entity) {
          let _ = set.insert(entity);
        }
      }
    }

    Ok(set)
  }
}

impl<'a, E: Entity + TryFrom<usize>, T: Arbitrary<'a>> Arbitrary<'a> for SparseSet<E, T> {
  fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
    // Get the number of `T`s we should insert into our collection.
    let len = u.arbitrary_len::<T>()?;
    let mut set = Self::with_capacity(len);

    for _ in 0..len {
      if *u.choose(&[false, true])? {
        let entity = arbitrary_entity(u, len)?;
        let value = T::arbitrary(u)?;

        match set.get_mut(entity) {
          Some(slot) => *slot = value,
          None => set.insert(entity, value),
        }
      }
    }

    Ok(set)
  }
}
