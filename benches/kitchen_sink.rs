#[macro_use]
extern crate criterion;

use criterion::Criterion;
use intervalset::{Interval, IntervalSet};
use rand::prelude::*;

fn kitchen_sink(intervals: &[Interval<i32>]) {
    let mut set: IntervalSet<i32> = IntervalSet::new();
    let mut other: IntervalSet<i32> = IntervalSet::new();
    // Subtract every second interval, and collect the subtracted
    // ones to combine with at the end.
    let mut subtract = false;
    for interval in intervals {
        if subtract {
            set.difference_interval(interval);
            other.add_optimized_for_append(*interval);
        } else {
            set.add(*interval);
        }
        subtract = !subtract;
    }
    set.union(&other);
    set.intersection(&other);
    set.complement(0, 1100);
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("kitchen sink", |b| {
        let mut rng = thread_rng();
        let intervals: Vec<Interval<i32>> = (0..1000)
            .map(|_| {
                let min = rng.gen_range(0..1000);
                let max = min + rng.gen_range(1..100);
                Interval::new(min, max)
            })
            .collect();
        b.iter(|| kitchen_sink(&intervals))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
