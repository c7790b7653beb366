use criterion::{criterion_group, BatchSize, Bencher, Criterion};
use entity_set::{EntitySet, SparseSet};

const ELEMENT_COUNT: usize = 100000;

fn reference() -> EntitySet<usize> {
  (0..ELEMENT_COUNT).map(|i| i.wrapping_mul(7919) % ELEMENT_COUNT).collect()
}

fn full_overlap(b: &mut Bencher<'_>) {
  let reference = reference();
  let set: SparseSet<usize, usize> = (0..ELEMENT_COUNT).map(|i| (i, i)).collect();

  b.iter_batched_ref(|| set.clone(), |set| set.respect(&reference), BatchSize::LargeInput);
}

fn half_overlap(b: &mut Bencher<'_>) {
  let reference = reference();
  let set: SparseSet<usize, usize> = (0..ELEMENT_COUNT).step_by(2).map(|i| (i, i)).collect();

  b.iter_batched_ref(|| set.clone(), |set| set.respect(&reference), BatchSize::LargeInput);
}

fn already_aligned(b: &mut Bencher<'_>) {
  let reference = reference();
  let mut set: SparseSet<usize, usize> = (0..ELEMENT_COUNT).map(|i| (i, i)).collect();
  set.respect(&reference);

  b.iter(|| set.respect(&reference));
}

fn benchmark(c: &mut Criterion) {
  let mut group = c.benchmark_group("respect");

  group.bench_function("full overlap", |b| full_overlap(b));
  group.bench_function("half overlap", |b| half_overlap(b));
  group.bench_function("already aligned", |b| already_aligned(b));

  group.finish();
}

criterion_group!(benches, benchmark);
