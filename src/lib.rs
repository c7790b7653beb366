//! A crate that implements sparse set storage for entity-component systems.
//!
//! An [`EntitySet`] records which entity handles are present, packing them into a dense buffer so that iteration is a
//! plain walk over contiguous memory while membership and lookup stay *O*(*1*). A [`SparseSet`] adds one value per
//! handle, kept in lock-step with the dense buffer.
//!
//! Both sets iterate from the last dense position to the first. They can be sorted, which arranges the dense buffer so
//! that iteration yields elements in ascending order, and one set can be made to [`respect`](EntitySet::respect)
//! another, which moves the handles they share into the same relative order so two sets can be walked side by side.
//!
//! See [this article](https://research.swtch.com/sparse) on more details behind the data structure.
//!
//! # Examples
//!
//! ```
//! use entity_set::SparseSet;
//!
//! let mut positions = SparseSet::new();
//! positions.insert(3u32, 30);
//! positions.insert(1, 10);
//! positions.insert(2, 20);
//!
//! let mut names = SparseSet::new();
//! names.insert(2u32, "two");
//! names.insert(3, "three");
//! names.insert(1, "one");
//!
//! positions.sort_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs));
//! names.respect(&positions);
//!
//! assert!(names.iter().eq([(1, &"one"), (2, &"two"), (3, &"three")]));
//! ```

#![cfg_attr(coverage_nightly, feature(no_coverage))]

#[cfg(feature = "arbitrary")]
pub mod arbitrary;

pub mod entity;
pub mod entity_set;
pub mod iter;
pub mod sparse_index;
pub mod sparse_set;

pub use crate::{
  entity::Entity,
  entity_set::EntitySet,
  iter::{Entities, Iter, IterMut},
  sparse_index::SparseIndex,
  sparse_set::SparseSet,
};
