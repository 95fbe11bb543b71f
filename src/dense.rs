use alloc::{collections::BTreeSet, vec::Vec};

use crate::{Interval, IntervalSet};

// A simple but infeasibly slow and memory-hungry
// version of `IntervalSet` for testing.
//
// Only understands `u32` values, so that we can
// enumerate every value an interval covers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DenseU32IntervalSet {
    // Stores every covered value individually
    // rather than as intervals.
    values: BTreeSet<u32>,
}

impl DenseU32IntervalSet {
    pub fn new() -> DenseU32IntervalSet {
        DenseU32IntervalSet {
            values: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, interval: &Interval<u32>) {
        for value in *interval.min()..*interval.max() {
            self.values.insert(value);
        }
    }

    pub fn remove(&mut self, interval: &Interval<u32>) {
        for value in *interval.min()..*interval.max() {
            self.values.remove(&value);
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    pub fn union(&self, other: &Self) -> Self {
        DenseU32IntervalSet {
            values: self.values.union(&other.values).copied().collect(),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        DenseU32IntervalSet {
            values: self.values.intersection(&other.values).copied().collect(),
        }
    }

    pub fn difference(&self, other: &Self) -> Self {
        DenseU32IntervalSet {
            values: self.values.difference(&other.values).copied().collect(),
        }
    }

    // Coalesces runs of consecutive values back into half-open
    // intervals. Vecs are easier to use for assertions than iterators,
    // because you don't have to consume them to compare them.
    pub fn to_vec(&self) -> Vec<Interval<u32>> {
        let mut intervals: Vec<Interval<u32>> = Vec::new();
        for &value in self.values.iter() {
            match intervals.last_mut() {
                Some(current) if *current.max() == value => current.set_max(value + 1),
                _ => intervals.push(Interval::new(value, value + 1)),
            }
        }
        intervals
    }
}

impl From<&IntervalSet<u32>> for DenseU32IntervalSet {
    fn from(set: &IntervalSet<u32>) -> Self {
        let mut dense = Self::new();
        for interval in set.iter() {
            dense.insert(interval);
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn coalesces_consecutive_values() {
        let mut dense = DenseU32IntervalSet::new();
        dense.insert(&Interval::new(1, 3));
        dense.insert(&Interval::new(3, 5));
        dense.insert(&Interval::new(7, 8));
        assert_eq!(dense.to_vec(), vec![Interval::new(1, 5), Interval::new(7, 8)]);
        dense.remove(&Interval::new(2, 4));
        assert_eq!(
            dense.to_vec(),
            vec![Interval::new(1, 2), Interval::new(4, 5), Interval::new(7, 8)]
        );
    }
}
