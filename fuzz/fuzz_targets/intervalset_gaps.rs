#![no_main]
use libfuzzer_sys::fuzz_target;

use arbitrary::{Arbitrary, Unstructured};
use intervalset::{Interval, IntervalSet};
use std::ops::Range;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Add(Range<u8>),
    Difference(Range<u8>),
}

impl Op {
    fn apply(self, set: &mut IntervalSet<u8>) {
        match self {
            Op::Add(r) => set.add(r.into()),
            Op::Difference(r) => set.difference_interval(&r.into()),
        }
    }
}

#[derive(Clone, Debug)]
struct Input {
    ops: Vec<Op>,
    outer: Interval<u8>,
}

impl Arbitrary for Input {
    fn arbitrary(u: &mut Unstructured) -> arbitrary::Result<Self> {
        Ok(Self {
            ops: u.arbitrary()?,
            // Bounds further out than these are too far away
            // from boundary conditions to be interesting.
            outer: Interval::new(
                *u.choose(&[0, 1, 2, 3, 100, 101, 102, 103])?,
                *u.choose(&[100, 101, 102, 103, 252, 253, 254, 255])?,
            ),
        })
    }
}

fuzz_target!(|input: Input| {
    let Input { ops, outer } = input;

    let mut set = IntervalSet::new();

    for op in ops {
        op.apply(&mut set);
    }

    let gaps: Vec<Interval<u8>> = set.gaps(&outer).collect();

    // Gaps are exactly what complementing within the outer interval leaves.
    let mut complement = set.clone();
    complement.complement(*outer.min(), *outer.max());
    assert_eq!(gaps, complement.iter().cloned().collect::<Vec<_>>());

    // Check that the combination of gaps and stored intervals
    // fills the entire outer interval.
    let mut pieces: Vec<Interval<u8>> = set
        .iter()
        .filter_map(|interval| interval.intersection(&outer))
        .collect();

    pieces.extend(gaps.into_iter());
    pieces.sort_by_key(|piece| *piece.min());

    if outer.is_empty() {
        // There should be no gaps or pieces returned if the outer interval
        // is empty, because empty intervals cover no values.
        assert!(pieces.is_empty());
        return;
    }

    // Gaps and pieces combined should span the whole outer interval.
    assert_eq!(pieces.first().unwrap().min(), outer.min());
    assert_eq!(pieces.last().unwrap().max(), outer.max());

    // Each piece should start where the previous one ended.
    for pair in pieces.windows(2) {
        assert_eq!(pair[0].max(), pair[1].min());
    }
});
