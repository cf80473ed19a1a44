//! Compares `SpillVec` with `Vec` and `SmallVec` on small and large workloads.

use core::hint;
use criterion::{Bencher, Criterion, criterion_group, criterion_main};
use smallvec::SmallVec;
use spillvec::SpillVec;
use std::sync::OnceLock;

use rand::Rng;

const SMALL_SIZE: usize = 16;

/// Generates one random number in `start..end`.
///
/// Sizes are random so the compiler cannot specialize the loops on them.
#[inline(never)]
fn gen_one(start: usize, end: usize) -> usize {
    let mut rng = rand::rng();
    rng.random_range(start..end)
}

/// Generates `len` random values in `start..end`.
#[inline(never)]
fn gen_rand(len: usize, start: u64, end: u64) -> Box<[u64]> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random_range(start..end)).collect()
}

/// Element count that fits inline (14-15).
static SMALL_BOUND: OnceLock<usize> = OnceLock::new();

/// Element count far beyond the inline threshold (36000-36002).
static LARGE_BOUND: OnceLock<usize> = OnceLock::new();

/// The operations every benchmarked container provides.
trait VecLike: Default {
    fn push(&mut self, value: u64);
    fn pop(&mut self) -> Option<u64>;
    fn insert(&mut self, index: usize, value: u64);
    fn remove(&mut self, index: usize) -> u64;
    fn get_mut(&mut self, index: usize) -> &mut u64;
    fn len(&self) -> usize;
}

macro_rules! impl_vec_like {
    ($name:ty) => {
        impl VecLike for $name {
            #[inline(always)]
            fn push(&mut self, value: u64) {
                <$name>::push(self, value);
            }
            #[inline(always)]
            fn pop(&mut self) -> Option<u64> {
                <$name>::pop(self)
            }
            #[inline(always)]
            fn insert(&mut self, index: usize, value: u64) {
                <$name>::insert(self, index, value);
            }
            #[inline(always)]
            fn remove(&mut self, index: usize) -> u64 {
                <$name>::remove(self, index)
            }
            #[inline(always)]
            fn get_mut(&mut self, index: usize) -> &mut u64 {
                &mut self[index]
            }
            #[inline(always)]
            fn len(&self) -> usize {
                <$name>::len(self)
            }
        }
    };
}

impl_vec_like!(Vec<u64>);
impl_vec_like!(SmallVec<u64, SMALL_SIZE>);
impl_vec_like!(SpillVec<u64, SMALL_SIZE>);

macro_rules! gen_bench_group {
    ($c:ident => $fn_name:ident) => {{
        let mut group = $c.benchmark_group(stringify!($fn_name));
        group.bench_function("Vec", |b| $fn_name::<Vec<u64>>(b));
        group.bench_function("SmallVec", |b| $fn_name::<SmallVec<u64, SMALL_SIZE>>(b));
        group.bench_function("SpillVec", |b| $fn_name::<SpillVec<u64, SMALL_SIZE>>(b));
    }};
}

fn bench_vec(c: &mut Criterion) {
    SMALL_BOUND.get_or_init(|| gen_one(14, 16));
    LARGE_BOUND.get_or_init(|| gen_one(36000, 36003));
    gen_bench_group!(c => push_small);
    gen_bench_group!(c => push_large);
    gen_bench_group!(c => pop_large);
    gen_bench_group!(c => insert_small);
    gen_bench_group!(c => remove_small);
    gen_bench_group!(c => threshold_churn);
}

/// Fill an empty vector with 14-15 elements.
///
/// Only `Vec` allocates.
#[inline(never)]
fn push_small<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*SMALL_BOUND.get().unwrap(), 0, 9999);
    let index = gen_one(0, *SMALL_BOUND.get().unwrap());

    b.iter(|| {
        let mut vec = T::default();
        for item in &data {
            vec.push(*item);
        }
        hint::black_box(*vec.get_mut(index))
    });
}

/// Fill an empty vector with 36000-36002 elements, every container reallocates.
#[inline(never)]
fn push_large<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);
    let index = gen_rand(10, 0, *LARGE_BOUND.get().unwrap() as _);

    b.iter(|| {
        let mut vec = T::default();
        for item in &data {
            vec.push(*item);
        }
        let mut counter = 0u64;
        for item in &index {
            counter += *vec.get_mut(*item as usize);
        }
        hint::black_box(counter)
    });
}

/// Drain a large vector from the back.
///
/// `SpillVec` moves back inline on the last few pops.
#[inline(never)]
fn pop_large<T: VecLike>(b: &mut Bencher) {
    let data = gen_rand(*LARGE_BOUND.get().unwrap(), 0, 9999);

    b.iter_batched(
        || {
            let mut vec = T::default();
            for item in &data {
                vec.push(*item);
            }
            vec
        },
        |mut vec| {
            let mut counter = 0u64;
            while let Some(item) = vec.pop() {
                counter += item;
            }
            hint::black_box(counter)
        },
        criterion::BatchSize::LargeInput,
    );
}

/// Insert into a 12 element vector, staying inline.
#[inline(never)]
fn insert_small<T: VecLike>(b: &mut Bencher) {
    let num = *SMALL_BOUND.get().unwrap();
    let index = gen_one(0, 16);

    b.iter(|| {
        let mut vec = T::default();
        for item in 0..12 {
            vec.push(item);
        }
        vec.insert((num + 4) % 12, 6);
        vec.insert((num + 7) % 13, 7);
        vec.insert((num + 9) % 14, 8);
        vec.insert((num + 14) % 15, 11);
        hint::black_box(*vec.get_mut(index))
    });
}

/// Remove from a full inline vector.
#[inline(never)]
fn remove_small<T: VecLike>(b: &mut Bencher) {
    let num = *SMALL_BOUND.get().unwrap();
    let index = gen_one(0, 12);

    b.iter(|| {
        let mut vec = T::default();
        for item in 0..16 {
            vec.push(item);
        }
        vec.remove((num + 14) % 15);
        vec.remove((num + 9) % 14);
        vec.remove((num + 7) % 13);
        vec.remove((num + 4) % 12);
        hint::black_box(*vec.get_mut(index))
    });
}

/// Push and pop around the inline threshold.
///
/// The worst case for `SpillVec`: every cycle spills to the heap and comes back.
#[inline(never)]
fn threshold_churn<T: VecLike>(b: &mut Bencher) {
    let rounds = *SMALL_BOUND.get().unwrap();

    b.iter(|| {
        let mut vec = T::default();
        for item in 0..SMALL_SIZE as u64 {
            vec.push(item);
        }
        let mut counter = 0u64;
        for round in 0..rounds as u64 {
            vec.push(round);
            counter += vec.pop().unwrap_or_default();
        }
        hint::black_box(counter + vec.len() as u64)
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(200)
        .warm_up_time(core::time::Duration::from_secs(3))
        .measurement_time(core::time::Duration::from_secs(10))
        .confidence_level(0.96)
        .noise_threshold(0.04);
    targets = bench_vec,
}
criterion_main!(benches);
