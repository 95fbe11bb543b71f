#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use intervalset::{Interval, IntervalSet};
use std::ops::Range;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Add(Range<u8>),
    Append(Range<u8>),
    Difference(Range<u8>),
    Union(Vec<Range<u8>>),
    Intersection(Vec<Range<u8>>),
    DifferenceSet(Vec<Range<u8>>),
    Complement(Range<u8>),
}

fn to_set(ranges: Vec<Range<u8>>) -> IntervalSet<u8> {
    ranges.into_iter().map(Interval::from).collect()
}

impl Op {
    fn apply(self, set: &mut IntervalSet<u8>) {
        match self {
            Op::Add(r) => set.add(r.into()),
            Op::Append(r) => set.add_optimized_for_append(r.into()),
            Op::Difference(r) => set.difference_interval(&r.into()),
            Op::Union(rs) => set.union(&to_set(rs)),
            Op::Intersection(rs) => set.intersection(&to_set(rs)),
            Op::DifferenceSet(rs) => set.difference(&to_set(rs)),
            Op::Complement(r) => set.complement(r.start, r.end),
        }
    }
}

fuzz_target!(|ops: Vec<Op>| {
    let mut set = IntervalSet::new();

    for op in ops {
        op.apply(&mut set);

        // No empty intervals, and no two intervals that overlap or touch.
        let mut peek = set.iter().peekable();
        while let Some(interval) = peek.next() {
            assert!(!interval.is_empty());
            if let Some(next) = peek.peek() {
                if interval.max() >= next.min() {
                    panic!()
                }
            }
        }
    }
});
