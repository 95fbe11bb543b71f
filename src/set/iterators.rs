use alloc::collections::btree_set;
use core::iter::FusedIterator;

use super::IntervalSet;
use crate::interval_wrapper::IntervalWrapper;
use crate::Interval;

/// An iterator over the intervals of an [`IntervalSet`], in ascending order.
///
/// This `struct` is created by [`IntervalSet::iter`].
pub struct Iter<'a, T> {
    inner: btree_set::Iter<'a, IntervalWrapper<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(inner: btree_set::Iter<'a, IntervalWrapper<T>>) -> Self {
        Iter { inner }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<&'a Interval<T>> {
        self.inner.next().map(|wrapper| &wrapper.interval)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn last(mut self) -> Option<&'a Interval<T>> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a Interval<T>> {
        self.inner.next_back().map(|wrapper| &wrapper.interval)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the intervals of an [`IntervalSet`], in
/// ascending order.
///
/// This `struct` is created by the `into_iter` method on [`IntervalSet`]
/// (provided by the [`IntoIterator`] trait).
pub struct IntoIter<T> {
    inner: btree_set::IntoIter<IntervalWrapper<T>>,
}

impl<T> IntoIterator for IntervalSet<T> {
    type Item = Interval<T>;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.intervals.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = Interval<T>;
    fn next(&mut self) -> Option<Interval<T>> {
        self.inner.next().map(|wrapper| wrapper.interval)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Interval<T>> {
        self.inner.next_back().map(|wrapper| wrapper.interval)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

/// An iterator over the uncovered parts of an outer interval.
///
/// This `struct` is created by [`IntervalSet::gaps`].
pub struct Gaps<'a, T> {
    outer: &'a Interval<T>,
    keys: core::iter::Peekable<btree_set::Range<'a, IntervalWrapper<T>>>,
    candidate_start: &'a T,
}

impl<'a, T> Gaps<'a, T>
where
    T: Ord,
{
    pub(crate) fn new(outer: &'a Interval<T>, keys: btree_set::Range<'a, IntervalWrapper<T>>) -> Self {
        let mut keys = keys.peekable();

        // Find the first potential gap.
        let mut candidate_start = outer.min();
        while let Some(item) = keys.peek() {
            if item.interval.max() <= outer.min() {
                // This interval sits entirely before the start of
                // the outer interval; just skip it.
                let _ = keys.next();
            } else if item.interval.min() <= outer.min() {
                // This interval overlaps the start of the
                // outer interval, so the first possible candidate
                // gap begins at its end.
                candidate_start = item.interval.max();
                let _ = keys.next();
            } else {
                // The rest of the items might contribute to gaps.
                break;
            }
        }

        Gaps {
            outer,
            keys,
            candidate_start,
        }
    }
}

// `Gaps` is always fused. (See definition of `next` below.)
impl<'a, T> FusedIterator for Gaps<'a, T> where T: Ord + Clone {}

impl<'a, T> Iterator for Gaps<'a, T>
where
    T: Ord + Clone,
{
    type Item = Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let outer = self.outer;
        if *self.candidate_start >= *outer.max() {
            // We've already passed the end of the outer interval;
            // there are no more gaps to find.
            return None;
        }

        // Figure out where this gap ends.
        let (end, next_candidate_start) = match self.keys.next() {
            // The gap goes up until the start of the next item,
            // and the next candidate starts after it.
            Some(item) if item.interval.min() < outer.max() => {
                (item.interval.min(), item.interval.max())
            }
            // Either there's no next item, or it sits after the end of
            // the outer interval. Either way this gap runs to the end of
            // the outer interval and there will be no more.
            _ => (outer.max(), outer.max()),
        };

        // Move the next candidate gap start past the end
        // of this gap, and yield the gap we found.
        let gap = Interval::new(self.candidate_start.clone(), end.clone());
        self.candidate_start = next_candidate_start;
        Some(gap)
    }
}
