#![no_main]
use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use entity_set::{EntitySet, SparseSet};

#[derive(Arbitrary, Debug)]
enum Op {
  Insert(u8, u16),
  Remove(u8),
  Swap(u8, u8),
  Sort,
  Respect(EntitySet<u8>),
  Clear,
}

fuzz_target!(|ops: Vec<Op>| {
  let mut set = SparseSet::new();
  let mut model = HashMap::new();

  for op in ops {
    match op {
      Op::Insert(entity, value) => {
        if !set.contains(entity) {
          set.insert(entity, value);
          model.insert(entity, value);
        }
      }
      Op::Remove(entity) => assert_eq!(set.remove(entity), model.remove(&entity)),
      Op::Swap(lhs, rhs) => {
        if set.contains(lhs) && set.contains(rhs) {
          set.swap(lhs, rhs);
        }
      }
      Op::Sort => set.sort_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs)),
      Op::Respect(reference) => {
        set.respect(&reference);

        let shared: Vec<u8> = reference.iter().filter(|&entity| set.contains(entity)).collect();
        let tail: Vec<u8> = set.entities().take(shared.len()).collect();
        assert_eq!(tail, shared);
      }
      Op::Clear => {
        set.clear();
        model.clear();
      }
    }

    assert_eq!(set.len(), model.len());
    for (position, &entity) in set.as_entities_slice().iter().enumerate() {
      assert_eq!(set.position(entity), Some(position));
      assert_eq!(set.get(entity), model.get(&entity));
    }
  }
});
