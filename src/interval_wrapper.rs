// Wrapper to allow storing (and sorting/searching)
// intervals as the keys of a `BTreeSet`.
//
// Intervals are ordered by ascending `min`, and intervals that
// share a `min` are ordered by _descending_ `max`. Ascending `min`
// is the traversal order clients expect. Descending `max` is what
// the set's algorithms depend on:
//
// - A degenerate probe `[v, v)` sorts after every stored interval
//   whose `min` is `v`, so "the last key <= probe" is the only stored
//   interval that could contain `v`.
// - An interval that is inserted next to a wider stored interval
//   with the same `min` sorts directly after it, so compaction finds
//   and merges the two as neighbours.
//
// NOTE: Equality here is plain equality of both bounds, which is
// consistent with this ordering. That is only meaningful because the
// set never stores empty intervals.

use core::cmp::Ordering;

use crate::Interval;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct IntervalWrapper<T> {
    pub interval: Interval<T>,
}

impl<T> IntervalWrapper<T> {
    pub fn new(interval: Interval<T>) -> IntervalWrapper<T> {
        IntervalWrapper { interval }
    }
}

impl<T> IntervalWrapper<T>
where
    T: Clone,
{
    // The probe `[value, value)` used to search for the interval
    // containing `value`.
    pub fn probe(value: &T) -> IntervalWrapper<T> {
        IntervalWrapper::new(Interval::new(value.clone(), value.clone()))
    }
}

impl<T> Ord for IntervalWrapper<T>
where
    T: Ord,
{
    fn cmp(&self, other: &IntervalWrapper<T>) -> Ordering {
        self.interval
            .min()
            .cmp(other.interval.min())
            .then_with(|| other.interval.max().cmp(self.interval.max()))
    }
}

impl<T> PartialOrd for IntervalWrapper<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &IntervalWrapper<T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
