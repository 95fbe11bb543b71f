use alloc::collections::BTreeSet;
use core::cmp::max;
use core::fmt::{self, Debug, Display};
use core::iter::FromIterator;
use core::mem;
use core::ops::Bound;

#[cfg(feature = "serde1")]
use core::marker::PhantomData;
#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{Serialize, Serializer},
};

use crate::interval_wrapper::IntervalWrapper;
use crate::Interval;

mod iterators;

pub use iterators::{Gaps, IntoIter, Iter};

/// A set whose items are stored as half-open intervals `[min, max)`.
///
/// The set always holds the minimal number of intervals needed to
/// represent its contents: stored intervals are non-empty, pairwise
/// disjoint and never adjacent. Adding `[2, 3)` to a set holding only
/// `[1, 2)` leaves the single interval `[1, 3)`.
///
/// Intervals are iterated in ascending order of `min`, and (because of
/// the invariants above) each interval's `max` is strictly less than the
/// next interval's `min`.
///
/// Swapping two sets, or moving one, is constant-time.
#[derive(Clone)]
pub struct IntervalSet<T> {
    // Wrap intervals so that they are `Ord`.
    // See `interval_wrapper.rs` for explanation.
    //
    // Shared with the set algebra in `operations.rs`.
    pub(crate) intervals: BTreeSet<IntervalWrapper<T>>,
}

impl<T> Default for IntervalSet<T>
where
    T: Ord + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalSet<T> {
    /// Returns the number of disjoint intervals in the set.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the set holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Removes every interval from the set.
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Gets an iterator over all intervals, in ascending order.
    ///
    /// The iterator is double-ended, so `iter().rev()` walks the set
    /// from its last interval backwards.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.intervals.iter())
    }

    /// Exchanges the contents of `self` and `other` in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.intervals, &mut other.intervals);
    }
}

impl<T> IntervalSet<T>
where
    T: Ord + Clone,
{
    /// Makes a new empty `IntervalSet`.
    pub fn new() -> Self {
        IntervalSet {
            intervals: BTreeSet::new(),
        }
    }

    /// Makes a set holding exactly `interval`, or an empty set if
    /// `interval` is empty.
    pub fn from_interval(interval: Interval<T>) -> Self {
        let mut set = Self::new();
        set.add(interval);
        set
    }

    /// Makes a set holding exactly `[min, max)`, or an empty set if
    /// `min >= max`.
    pub fn from_bounds(min: T, max: T) -> Self {
        Self::from_interval(Interval::new(min, max))
    }

    /// Replaces the contents of the set with the union of `intervals`.
    pub fn assign<I>(&mut self, intervals: I)
    where
        I: IntoIterator<Item = Interval<T>>,
    {
        self.clear();
        self.extend(intervals);
    }

    /// Returns the interval with the lowest values, if any.
    pub fn first(&self) -> Option<&Interval<T>> {
        self.intervals.first().map(|wrapper| &wrapper.interval)
    }

    /// Returns the interval with the highest values, if any.
    pub fn last(&self) -> Option<&Interval<T>> {
        self.intervals.last().map(|wrapper| &wrapper.interval)
    }

    /// Returns the smallest interval covering every interval in the set,
    /// or the empty interval if the set is empty.
    pub fn spanning_interval(&self) -> Interval<T>
    where
        T: Default,
    {
        self.span().unwrap_or_default()
    }

    pub(crate) fn span(&self) -> Option<Interval<T>> {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => {
                Some(Interval::new(first.min().clone(), last.max().clone()))
            }
            _ => None,
        }
    }

    /// Adds `interval` to the set.
    ///
    /// Any stored intervals that overlap or are immediately adjacent
    /// to `interval` are coalesced with it into a single interval.
    /// Adding an empty interval has no effect.
    pub fn add(&mut self, interval: Interval<T>) {
        if interval.is_empty() {
            return;
        }

        let new_wrapper = IntervalWrapper::new(interval);
        if !self.intervals.insert(new_wrapper.clone()) {
            // Already stored, verbatim.
            return;
        }

        // The set was valid before this insertion, so only the new interval
        // and its neighbours can need merging. That region starts one stored
        // interval to the left (which might reach or overlap it) and runs
        // through the last interval starting at or before the new `max`.
        let begin = self
            .intervals
            .range((Bound::Unbounded, Bound::Excluded(&new_wrapper)))
            .next_back()
            .cloned()
            .unwrap_or_else(|| new_wrapper.clone());
        let end = IntervalWrapper::probe(new_wrapper.interval.max());
        self.compact(begin, Bound::Included(end));
    }

    /// Adds the interval `[min, max)` to the set.
    ///
    /// See [`add`](Self::add).
    pub fn add_bounds(&mut self, min: T, max: T) {
        self.add(Interval::new(min, max));
    }

    /// Same semantics as [`add`](Self::add), but cheaper when `interval`
    /// starts somewhere within `[last.min, last.max]`, where `last` is the
    /// highest interval in the set. This is the usual case when recording
    /// data that arrives mostly in order.
    ///
    /// Widening the last interval skips the neighbour search and
    /// compaction that [`add`](Self::add) performs, but it still removes
    /// and re-inserts that interval in the underlying tree, so it costs
    /// `O(log n)` rather than constant time.
    ///
    /// Falls back to [`add`](Self::add) when that doesn't hold.
    pub fn add_optimized_for_append(&mut self, interval: Interval<T>) {
        let extends_last = match self.last() {
            Some(last) if last.min() <= interval.min() && interval.min() <= last.max() => {
                if interval.max() <= last.max() {
                    // Already covered by the last interval.
                    return;
                }
                true
            }
            _ => false,
        };

        if extends_last {
            let (_min, max) = interval.into_bounds();
            self.widen_last(max);
        } else {
            self.add(interval);
        }
    }

    /// Adds the interval `[min, max)` to the set.
    ///
    /// See [`add_optimized_for_append`](Self::add_optimized_for_append).
    pub fn add_bounds_optimized_for_append(&mut self, min: T, max: T) {
        self.add_optimized_for_append(Interval::new(min, max));
    }

    // Moves the `max` of the last stored interval up to `max`.
    //
    // This is the only place a stored interval changes without going
    // through compaction. It is safe because the last interval stays
    // last, and there is nothing after it to overlap.
    fn widen_last(&mut self, max: T) {
        if let Some(mut last) = self.intervals.pop_last() {
            debug_assert!(*last.interval.max() <= max);
            last.interval.set_max(max);
            self.intervals.insert(last);
        }
    }

    // Merges overlapping and adjacent intervals between `begin` (inclusive)
    // and `end`, restoring the set's invariants after `add` or `union` have
    // put duplicate or overlapping entries into storage.
    //
    // This relies on intervals sharing a `min` sorting widest-first, so
    // that they sit next to each other in storage.
    pub(crate) fn compact(&mut self, begin: IntervalWrapper<T>, end: Bound<IntervalWrapper<T>>) {
        let mut prev = begin;
        loop {
            let next = self
                .intervals
                .range((Bound::Excluded(&prev), end.as_ref()))
                .next()
                .cloned();
            let Some(current) = next else {
                break;
            };

            if prev.interval.touches(&current.interval) {
                // Overlapping or adjacent; merge the two intervals.
                let merged = IntervalWrapper::new(Interval::new(
                    prev.interval.min().clone(),
                    max(prev.interval.max(), current.interval.max()).clone(),
                ));
                self.intervals.remove(&prev);
                self.intervals.remove(&current);
                let inserted = self.intervals.insert(merged.clone());
                debug_assert!(inserted);
                prev = merged;
            } else {
                prev = current;
            }
        }
    }

    // The last stored interval ordered at or before `probe`. For a probe
    // `[v, v)` this is the only stored interval that could contain `v`,
    // and for a non-empty probe it is the only one that could contain
    // the whole probe.
    fn candidate(&self, probe: &IntervalWrapper<T>) -> Option<&Interval<T>> {
        self.intervals
            .range((Bound::Unbounded, Bound::Included(probe)))
            .next_back()
            .map(|wrapper| &wrapper.interval)
    }

    /// Returns `true` if any interval in the set contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Returns `true` if some interval in the set wholly contains
    /// `interval`.
    ///
    /// This returns `false` for an empty `interval`, following
    /// [`Interval::contains_interval`].
    ///
    /// Assume a set holding `[10, 20)` and `[30, 40)`:
    /// `[15, 16)` is contained (by `[10, 20)`), but `[15, 35)` is not,
    /// because it spans the gap.
    pub fn contains_interval(&self, interval: &Interval<T>) -> bool {
        self.find_interval(interval).is_some()
    }

    /// Returns `true` if some interval in the set wholly contains
    /// `[min, max)`.
    pub fn contains_bounds(&self, min: T, max: T) -> bool {
        self.contains_interval(&Interval::new(min, max))
    }

    /// Returns `true` if every interval in `other` is wholly contained
    /// by some interval in `self`.
    ///
    /// Perhaps unintuitively, this returns `false` if `other` is empty.
    /// It runs in `O(other.len() * log(self.len()))`.
    pub fn contains_set(&self, other: &Self) -> bool {
        match (self.span(), other.span()) {
            (Some(mine), Some(theirs)) if mine.contains_interval(&theirs) => {}
            _ => return false,
        }
        other.iter().all(|interval| self.contains_interval(interval))
    }

    /// Returns the interval in the set that contains `value`, if any.
    pub fn find(&self, value: &T) -> Option<&Interval<T>> {
        self.candidate(&IntervalWrapper::probe(value))
            .filter(|interval| interval.contains(value))
    }

    /// Returns the interval in the set that wholly contains `interval`,
    /// if any. Always `None` for an empty `interval`.
    pub fn find_interval(&self, interval: &Interval<T>) -> Option<&Interval<T>> {
        self.candidate(&IntervalWrapper::new(interval.clone()))
            .filter(|candidate| candidate.contains_interval(interval))
    }

    /// Returns the interval in the set that wholly contains `[min, max)`,
    /// if any.
    pub fn find_bounds(&self, min: T, max: T) -> Option<&Interval<T>> {
        self.find_interval(&Interval::new(min, max))
    }

    /// Returns the first interval that either contains `value` or lies
    /// entirely after it.
    ///
    /// ```text
    ///   [10, 20)  [30, 40)
    ///   ^                    lower_bound(10)
    ///   ^                    lower_bound(15)
    ///             ^          lower_bound(20)
    ///             ^          lower_bound(25)
    /// ```
    pub fn lower_bound(&self, value: &T) -> Option<&Interval<T>> {
        self.find(value).or_else(|| self.upper_bound(value))
    }

    /// Returns the first interval lying entirely after `value`.
    ///
    /// ```text
    ///   [10, 20)  [30, 40)
    ///             ^          upper_bound(10)
    ///             ^          upper_bound(15)
    ///             ^          upper_bound(20)
    ///             ^          upper_bound(25)
    /// ```
    pub fn upper_bound(&self, value: &T) -> Option<&Interval<T>> {
        self.intervals
            .range((Bound::Excluded(IntervalWrapper::probe(value)), Bound::Unbounded))
            .next()
            .map(|wrapper| &wrapper.interval)
    }

    /// Returns `true` if no value in `interval` is contained in the set.
    ///
    /// An empty `interval` is always disjoint from the set, even though
    /// the set never [contains](Self::contains_interval) one either.
    pub fn is_disjoint(&self, interval: &Interval<T>) -> bool {
        if interval.is_empty() {
            return true;
        }
        let probe = IntervalWrapper::probe(interval.min());
        // The first stored interval starting after `interval.min()`
        // must not start before `interval` ends...
        if let Some(next) = self
            .intervals
            .range((Bound::Excluded(&probe), Bound::Unbounded))
            .next()
        {
            if interval.max() > next.interval.min() {
                return false;
            }
        }
        // ...and the one before it must end by the time `interval` starts.
        match self.candidate(&probe) {
            Some(prev) => prev.max() <= interval.min(),
            None => true,
        }
    }

    /// Gets an iterator over all the maximally-sized intervals
    /// contained in `outer` that are not covered by any interval
    /// stored in the set.
    ///
    /// This yields the same intervals that [`complement`](Self::complement)
    /// would leave behind, without modifying the set.
    ///
    /// NOTE: Calling `gaps` eagerly finds the first gap,
    /// even if the iterator is never consumed.
    pub fn gaps<'a>(&'a self, outer: &'a Interval<T>) -> Gaps<'a, T> {
        // Nothing ordered before the candidate for `outer.min()` can
        // reach into `outer`.
        let probe = IntervalWrapper::probe(outer.min());
        let keys = match self
            .intervals
            .range((Bound::Unbounded, Bound::Included(&probe)))
            .next_back()
        {
            Some(candidate) => self.intervals.range((Bound::Included(candidate), Bound::Unbounded)),
            None => self.intervals.range::<IntervalWrapper<T>, _>(..),
        };
        Gaps::new(outer, keys)
    }

    // Checks the set's invariants: every interval is non-empty, and each
    // one ends strictly before the next one starts.
    pub(crate) fn is_valid(&self) -> bool {
        let mut prev: Option<&Interval<T>> = None;
        for interval in self.iter() {
            if interval.is_empty() {
                return false;
            }
            if let Some(prev) = prev {
                // Not sorted, not disjoint, or adjacent.
                if prev.max() >= interval.min() {
                    return false;
                }
            }
            prev = Some(interval);
        }
        true
    }
}

// Every stored interval is non-empty, so comparing the stored
// bounds in order is enough.
impl<T> PartialEq for IntervalSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &IntervalSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for IntervalSet<T> where T: Eq {}

// We can't just derive this automatically, because that would
// expose irrelevant (and private) implementation details.
// Instead implement it in the same way that the underlying BTreeSet does.
impl<T: Debug> Debug for IntervalSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Human-readable form, `{ [a1, b1) [a2, b2) ... }`.
///
/// Meant for logs and test failures; don't parse it.
impl<T: Display> Display for IntervalSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for interval in self.iter() {
            write!(f, " {}", interval)?;
        }
        f.write_str(" }")
    }
}

impl<T> FromIterator<Interval<T>> for IntervalSet<T>
where
    T: Ord + Clone,
{
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut set = IntervalSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<Interval<T>> for IntervalSet<T>
where
    T: Ord + Clone,
{
    fn extend<I: IntoIterator<Item = Interval<T>>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |interval| {
            self.add(interval);
        })
    }
}

impl<T, const N: usize> From<[Interval<T>; N]> for IntervalSet<T>
where
    T: Ord + Clone,
{
    fn from(intervals: [Interval<T>; N]) -> Self {
        IntoIterator::into_iter(intervals).collect()
    }
}

impl<T> From<Interval<T>> for IntervalSet<T>
where
    T: Ord + Clone,
{
    fn from(interval: Interval<T>) -> Self {
        IntervalSet::from_interval(interval)
    }
}

#[cfg(feature = "serde1")]
impl<T> Serialize for IntervalSet<T>
where
    T: Ord + Clone + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.intervals.len()))?;
        for interval in self.iter() {
            seq.serialize_element(interval)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Deserialize<'de> for IntervalSet<T>
where
    T: Ord + Clone + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(IntervalSetVisitor::new())
    }
}

#[cfg(feature = "serde1")]
struct IntervalSetVisitor<T> {
    marker: PhantomData<fn() -> IntervalSet<T>>,
}

#[cfg(feature = "serde1")]
impl<T> IntervalSetVisitor<T> {
    fn new() -> Self {
        IntervalSetVisitor {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Visitor<'de> for IntervalSetVisitor<T>
where
    T: Ord + Clone + Deserialize<'de>,
{
    type Value = IntervalSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("IntervalSet")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // Input isn't trusted to be canonical; `add` restores that.
        let mut set = IntervalSet::new();
        while let Some(interval) = access.next_element()? {
            set.add(interval);
        }
        Ok(set)
    }
}

#[cfg(feature = "quickcheck")]
impl<T> quickcheck::Arbitrary for IntervalSet<T>
where
    T: quickcheck::Arbitrary + Ord,
{
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Overlapping intervals are fine; they are coalesced on the way in.
        <alloc::vec::Vec<Interval<T>>>::arbitrary(g)
            .into_iter()
            .collect()
    }
}
