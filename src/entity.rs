//! Defines the handle types that can be stored in an `EntitySet` or `SparseSet`.

/// A type with this trait indicates it can be used as an entity handle in an `EntitySet` or `SparseSet`.
///
/// Handles are allocated and recycled by the caller; the sets only record which handles are present. The value returned
/// by [`Entity::to_index`] is used directly as the slot in the sparse index, so the index grows to hold the largest
/// handle ever inserted.
///
/// Two handles must convert to the same `usize` if and only if they are equal.
pub trait Entity: Copy + Eq {
  /// Returns the sparse index slot of this handle.
  fn to_index(self) -> usize;
}

macro_rules! impl_entity {
  ($($ty:ty),*) => {
    $(
      impl Entity for $ty {
        #[inline]
        fn to_index(self) -> usize {
          usize::from(self)
        }
      }
    )*
  };
}

impl_entity!(u8, u16, usize);

// `usize` is at least 32 bits on every target the crate supports.
#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl Entity for u32 {
  #[inline]
  fn to_index(self) -> usize {
    self as usize
  }
}

#[cfg(target_pointer_width = "64")]
impl Entity for u64 {
  #[inline]
  fn to_index(self) -> usize {
    self as usize
  }
}
