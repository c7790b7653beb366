use criterion::{criterion_group, BatchSize, Bencher, Criterion};
use entity_set::{EntitySet, SparseSet};

const ELEMENT_COUNT: usize = 100000;

/// Values in a scrambled order so the sort has real work to do.
fn input_iter() -> impl Iterator<Item = (usize, usize)> {
  (0..ELEMENT_COUNT).map(|i| (i, i.wrapping_mul(7919) % ELEMENT_COUNT))
}

fn entity_set(b: &mut Bencher<'_>) {
  let set: EntitySet<usize> = input_iter().map(|(_, v)| v).collect();

  b.iter_batched_ref(
    || set.clone(),
    |set| set.sort_by(|lhs, rhs| lhs.cmp(&rhs)),
    BatchSize::LargeInput,
  );
}

fn sparse_set(b: &mut Bencher<'_>) {
  let set: SparseSet<usize, usize> = input_iter().collect();

  b.iter_batched_ref(
    || set.clone(),
    |set| set.sort_by(|(_, lhs), (_, rhs)| lhs.cmp(rhs)),
    BatchSize::LargeInput,
  );
}

fn vec(b: &mut Bencher<'_>) {
  let vec: Vec<(usize, usize)> = input_iter().collect();

  b.iter_batched_ref(
    || vec.clone(),
    |vec| vec.sort_unstable_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs)),
    BatchSize::LargeInput,
  );
}

fn benchmark(c: &mut Criterion) {
  let mut group = c.benchmark_group("sort");

  group.bench_function("EntitySet", |b| entity_set(b));
  group.bench_function("SparseSet", |b| sparse_set(b));
  group.bench_function("Vec", |b| vec(b));

  group.finish();
}

criterion_group!(benches, benchmark);
