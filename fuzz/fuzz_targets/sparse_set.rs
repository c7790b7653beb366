#![no_main]
use libfuzzer_sys::{
  arbitrary::{Arbitrary, Unstructured},
  fuzz_target,
};
use entity_set::SparseSet;

fuzz_target!(|bytes: &[u8]| {
  let u = Unstructured::new(bytes);
  let mut set = match SparseSet::<u32, u16>::arbitrary_take_rest(u) {
    Ok(set) => set,
    _ => return,
  };

  for (position, &entity) in set.as_entities_slice().iter().enumerate() {
    assert_eq!(set.position(entity), Some(position));
  }

  let reference = set.as_entity_set().clone();
  set.sort_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs));
  assert!(set.as_slice().windows(2).all(|pair| pair[0] >= pair[1]));

  set.respect(&reference);
  assert_eq!(set.as_entities_slice(), reference.as_slice());
  assert_eq!(set, set);

  set.clear();
  assert!(set.is_empty());
});
