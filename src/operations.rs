use alloc::vec::Vec;
use core::ops::Bound;

use crate::interval_wrapper::IntervalWrapper;
use crate::{Interval, IntervalSet};

// Position of a lockstep scan within one set. `None` is past the end.
type Cursor<T> = Option<IntervalWrapper<T>>;

impl<T> IntervalSet<T>
where
    T: Ord + Clone,
{
    /// Adds every value in `other` to `self`.
    pub fn union(&mut self, other: &Self) {
        let (first, last) = match (other.intervals.first(), other.intervals.last()) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => return,
        };

        self.intervals.extend(other.intervals.iter().cloned());

        // Only intervals between the one just before `other`'s first
        // interval and the ones starting by the end of `other`'s last
        // interval could have been disturbed.
        let begin = self
            .intervals
            .range((Bound::Unbounded, Bound::Excluded(&first)))
            .next_back()
            .cloned()
            .unwrap_or(first);
        let end = IntervalWrapper::probe(last.interval.max());
        self.compact(begin, Bound::Included(end));
        debug_assert!(self.is_valid());
    }

    /// Removes every value from `self` that isn't also in `other`.
    pub fn intersection(&mut self, other: &Self) {
        if !self.spans_intersect(other) {
            self.intervals.clear();
            return;
        }

        let mut mine = other
            .intervals
            .first()
            .and_then(|first| self.intersection_candidate(first));
        // Nothing ordered before the candidate can intersect anything of theirs.
        if let Some(candidate) = &mine {
            self.intervals = self.intervals.split_off(candidate);
        }
        let mut theirs = self
            .intervals
            .first()
            .and_then(|first| other.intersection_candidate(first));

        let mut holes = Vec::new();
        loop {
            let found = self.find_next_intersecting_pair(other, &mut mine, &mut theirs, |hole| {
                holes.push(hole.clone());
            });
            for hole in holes.drain(..) {
                self.intervals.remove(&hole);
            }
            if !found {
                break;
            }
            let (Some(current), Some(first_theirs)) = (mine.take(), theirs.take()) else {
                break;
            };

            // Replace ours with its intersection with each consecutive
            // interval of theirs that it reaches. Nothing later of ours can
            // intersect those, except possibly the last one.
            self.intervals.remove(&current);
            let mut last_piece = None;
            let mut last_theirs = first_theirs.clone();
            let mut next_theirs = Some(first_theirs);
            while let Some(candidate) = next_theirs {
                let Some(piece) = current.interval.intersection(&candidate.interval) else {
                    break;
                };
                let piece = IntervalWrapper::new(piece);
                let inserted = self.intervals.insert(piece.clone());
                debug_assert!(inserted);
                last_piece = Some(piece);
                next_theirs = other.next_after(&candidate);
                last_theirs = candidate;
            }
            debug_assert!(last_piece.is_some());

            theirs = Some(last_theirs);
            mine = last_piece.and_then(|piece| self.next_after(&piece));
        }
        debug_assert!(self.is_valid());
    }

    /// Returns `true` if some interval of `self` intersects some
    /// interval of `other`.
    pub fn intersects(&self, other: &Self) -> bool {
        if !self.spans_intersect(other) {
            return false;
        }

        let mut mine = other
            .intervals
            .first()
            .and_then(|first| self.intersection_candidate(first));
        let mut theirs = match &mine {
            Some(candidate) => other.intersection_candidate(candidate),
            None => return false,
        };

        self.find_next_intersecting_pair(other, &mut mine, &mut theirs, |_| {})
    }

    /// Removes every value in `interval` from `self`.
    pub fn difference_interval(&mut self, interval: &Interval<T>) {
        match self.span() {
            Some(span) if span.intersects(interval) => {}
            _ => return,
        }
        self.difference(&IntervalSet::from_interval(interval.clone()));
    }

    /// Removes every value in `[min, max)` from `self`.
    pub fn difference_bounds(&mut self, min: T, max: T) {
        self.difference_interval(&Interval::new(min, max));
    }

    /// Removes every value in `other` from `self`.
    pub fn difference(&mut self, other: &Self) {
        if !self.spans_intersect(other) {
            return;
        }

        let mut mine = other
            .intervals
            .first()
            .and_then(|first| self.intersection_candidate(first));
        // If nothing of ours reaches their first interval, we're done.
        if mine.is_none() {
            return;
        }
        let mut theirs = self
            .intervals
            .first()
            .and_then(|first| other.intersection_candidate(first));

        while self.find_next_intersecting_pair(other, &mut mine, &mut theirs, |_| {}) {
            let (Some(current), Some(cut)) = (mine.take(), theirs.as_ref()) else {
                break;
            };

            // Ours is replaced with whatever survives having theirs cut out
            // of it. Look up its successor first: a low piece would sort
            // straight after it.
            let next = self.next_after(&current);
            self.intervals.remove(&current);
            let (low, high) = current.interval.difference(&cut.interval);

            if let Some(low) = low {
                // This can't intersect anything else of theirs.
                let inserted = self.intervals.insert(IntervalWrapper::new(low));
                debug_assert!(inserted);
            }

            mine = match high {
                Some(high) => {
                    // This might, so it is examined again.
                    let high = IntervalWrapper::new(high);
                    let inserted = self.intervals.insert(high.clone());
                    debug_assert!(inserted);
                    Some(high)
                }
                None => next,
            };
        }
        debug_assert!(self.is_valid());
    }

    /// Replaces the contents of `self` with the values in `[min, max)`
    /// that are not currently in `self`.
    ///
    /// See [`gaps`](Self::gaps) for a non-mutating equivalent.
    pub fn complement(&mut self, min: T, max: T) {
        let mut span = IntervalSet::from_bounds(min, max);
        span.difference(self);
        self.swap(&mut span);
    }

    fn spans_intersect(&self, other: &Self) -> bool {
        match (self.span(), other.span()) {
            (Some(mine), Some(theirs)) => mine.intersects(&theirs),
            _ => false,
        }
    }

    // The first stored interval that could intersect anything ordered
    // at or after `key`: the last one ordered at or before it, or failing
    // that, the first one. Nothing before it can intersect `key` or
    // anything after it.
    fn intersection_candidate(&self, key: &IntervalWrapper<T>) -> Cursor<T> {
        self.intervals
            .range((Bound::Unbounded, Bound::Included(key)))
            .next_back()
            .or_else(|| self.intervals.first())
            .cloned()
    }

    fn next_after(&self, key: &IntervalWrapper<T>) -> Cursor<T> {
        self.intervals
            .range((Bound::Excluded(key), Bound::Unbounded))
            .next()
            .cloned()
    }

    // Advances `mine` (over `self`) and `theirs` (over `other`) until they
    // point at a pair of intervals that intersect, returning `false` if
    // either runs out first.
    //
    // Intervals of ours that are skipped can't intersect anything of
    // theirs. They are passed to `on_hole`, including every remaining
    // interval of ours once theirs run out.
    fn find_next_intersecting_pair<F>(
        &self,
        other: &Self,
        mine: &mut Cursor<T>,
        theirs: &mut Cursor<T>,
        mut on_hole: F,
    ) -> bool
    where
        F: FnMut(&IntervalWrapper<T>),
    {
        loop {
            match (mine.as_ref(), theirs.as_ref()) {
                (Some(m), Some(t)) if m.interval.intersects(&t.interval) => return true,
                (Some(_), Some(_)) => {}
                _ => return false,
            }

            // Skip over intervals of ours that end before theirs starts.
            if let Some(t) = theirs.as_ref() {
                while let Some(m) = mine.as_ref() {
                    if m.interval.max() > t.interval.min() {
                        break;
                    }
                    on_hole(m);
                    let next = self.next_after(m);
                    *mine = next;
                }
            }
            let Some(m) = mine.as_ref() else {
                return false;
            };

            // Skip over intervals of theirs that end before ours starts.
            while let Some(t) = theirs.as_ref() {
                if t.interval.max() > m.interval.min() {
                    break;
                }
                let next = other.next_after(t);
                *theirs = next;
            }
            if theirs.is_none() {
                for hole in self
                    .intervals
                    .range((Bound::Included(m), Bound::Unbounded))
                {
                    on_hole(hole);
                }
                return false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};

    fn set(intervals: &[(u32, u32)]) -> IntervalSet<u32> {
        intervals
            .iter()
            .map(|&(min, max)| Interval::new(min, max))
            .collect()
    }

    fn to_vec(set: &IntervalSet<u32>) -> Vec<(u32, u32)> {
        set.iter().map(|interval| (*interval.min(), *interval.max())).collect()
    }

    #[test]
    fn intersection_candidate_is_last_at_or_before() {
        let s = set(&[(0, 5), (10, 20), (50, 60)]);
        let candidate = |min, max| {
            s.intersection_candidate(&IntervalWrapper::new(Interval::new(min, max)))
                .map(|wrapper| wrapper.interval)
        };
        assert_eq!(candidate(15, 16), Some(Interval::new(10, 20)));
        assert_eq!(candidate(10, 12), Some(Interval::new(10, 20)));
        assert_eq!(candidate(100, 120), Some(Interval::new(50, 60)));
        // Nothing before it; the first interval is the candidate.
        assert_eq!(candidate(0, 0), Some(Interval::new(0, 5)));
        assert_eq!(
            IntervalSet::<u32>::new().intersection_candidate(&IntervalWrapper::probe(&3)),
            None
        );
    }

    #[test]
    fn pair_search_reports_holes() {
        let mine = set(&[(0, 2), (4, 6), (10, 20), (30, 40), (50, 60)]);
        let theirs = set(&[(15, 35)]);
        let mut m = Some(IntervalWrapper::new(Interval::new(0, 2)));
        let mut t = Some(IntervalWrapper::new(Interval::new(15, 35)));
        let mut holes = Vec::new();
        let found = mine.find_next_intersecting_pair(&theirs, &mut m, &mut t, |hole| {
            holes.push((*hole.interval.min(), *hole.interval.max()))
        });
        assert!(found);
        assert_eq!(holes, vec![(0, 2), (4, 6)]);
        assert_eq!(m.map(|wrapper| wrapper.interval), Some(Interval::new(10, 20)));
    }

    #[test]
    fn pair_search_treats_remainder_as_holes_once_theirs_run_out() {
        let mine = set(&[(0, 2), (40, 45), (50, 60)]);
        let theirs = set(&[(10, 20)]);
        let mut m = Some(IntervalWrapper::new(Interval::new(0, 2)));
        let mut t = Some(IntervalWrapper::new(Interval::new(10, 20)));
        let mut holes = Vec::new();
        let found = mine.find_next_intersecting_pair(&theirs, &mut m, &mut t, |hole| {
            holes.push((*hole.interval.min(), *hole.interval.max()))
        });
        assert!(!found);
        assert_eq!(holes, vec![(0, 2), (40, 45), (50, 60)]);
    }

    #[test]
    fn union_compacts_only_what_it_touches() {
        let mut s = set(&[(0, 5), (10, 20), (30, 40), (50, 60)]);
        s.union(&set(&[(20, 25), (28, 30)]));
        assert_eq!(to_vec(&s), vec![(0, 5), (10, 25), (28, 40), (50, 60)]);
        assert!(s.is_valid());
    }

    #[test]
    fn set_algebra_rewrites_stored_intervals() {
        let mut s = set(&[(0, 10), (20, 30), (40, 50)]);
        let other = set(&[(5, 25), (45, 60)]);
        assert!(s.intersects(&other));

        let mut intersection = s.clone();
        intersection.intersection(&other);
        assert_eq!(intersection.intervals.len(), 3);
        assert_eq!(to_vec(&intersection), vec![(5, 10), (20, 25), (45, 50)]);

        s.difference(&other);
        assert_eq!(to_vec(&s), vec![(0, 5), (25, 30), (40, 45)]);
        s.union(&intersection);
        assert_eq!(to_vec(&s), vec![(0, 10), (20, 30), (40, 50)]);
        s.complement(0, 60);
        assert_eq!(to_vec(&s), vec![(10, 20), (30, 40), (50, 60)]);
        assert_eq!(s.intervals.len(), 3);
    }
}
