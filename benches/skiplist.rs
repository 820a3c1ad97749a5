//! Benchmarks for [`towerlist::SkipList`].

use criterion::{black_box, AxisScale, BenchmarkId, Criterion, PlotConfiguration};
use rand::{rngs::StdRng, Rng, SeedableRng};
use towerlist::SkipList;

/// Benchmarking sizes.
const SIZES: [usize; 4] = [10, 100, 1000, 10_000];

/// Benchmarking insertion.
#[inline]
pub fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Insert");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sl: SkipList<u64> =
                std::iter::repeat_with(|| rng.gen()).take(size).collect();

            b.iter(|| {
                sl.insert(rng.gen());
            });
        });
    }
    group.finish();
}

/// Benchmarking membership queries.
#[inline]
pub fn contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Contains");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let sl: SkipList<u64> =
                std::iter::repeat_with(|| rng.gen()).take(size).collect();
            let probes: Vec<u64> = std::iter::repeat_with(|| rng.gen()).take(10).collect();

            b.iter(|| {
                for probe in &probes {
                    black_box(sl.contains(probe));
                }
            });
        });
    }
    group.finish();
}

/// Benchmarking removal.
#[inline]
pub fn remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("SkipList Remove");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for size in SIZES {
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = StdRng::seed_from_u64(0x1234_abcd);
            let mut sl: SkipList<u64> =
                std::iter::repeat_with(|| rng.gen()).take(size).collect();

            b.iter(|| {
                let key = rng.gen();
                sl.insert(key);
                black_box(sl.remove(&key));
            });
        });
    }
    group.finish();
}
