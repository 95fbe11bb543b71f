use core::cmp::{max, min};
use core::fmt::{self, Debug, Display};
use core::ops::{Range, Sub};

#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer},
    ser::{Serialize, Serializer},
};

/// A half-open interval `[min, max)` over an ordered type.
///
/// The interval contains `min` but not `max`. It is considered empty
/// whenever `min >= max`, so `[5, 5)` and `[7, 3)` are both empty and
/// contain nothing.
///
/// Unlike [`Range`], `Interval` knows how to intersect with and subtract
/// other intervals, which is everything [`IntervalSet`] needs from it.
///
/// [`IntervalSet`]: crate::IntervalSet
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interval<T> {
    min: T,
    max: T,
}

impl<T> Interval<T> {
    /// Makes a new interval `[min, max)`.
    ///
    /// No check is made that `min < max`; the result may be empty.
    pub const fn new(min: T, max: T) -> Self {
        Interval { min, max }
    }

    /// The inclusive lower bound.
    pub fn min(&self) -> &T {
        &self.min
    }

    /// The exclusive upper bound.
    pub fn max(&self) -> &T {
        &self.max
    }

    /// Replaces the inclusive lower bound.
    pub fn set_min(&mut self, min: T) {
        self.min = min;
    }

    /// Replaces the exclusive upper bound. This is how
    /// [`IntervalSet::add_optimized_for_append`] widens the set's last
    /// interval.
    ///
    /// [`IntervalSet::add_optimized_for_append`]: crate::IntervalSet::add_optimized_for_append
    pub fn set_max(&mut self, max: T) {
        self.max = max;
    }

    /// Splits the interval back into its bounds.
    pub fn into_bounds(self) -> (T, T) {
        (self.min, self.max)
    }
}

impl<T> Interval<T>
where
    T: Ord,
{
    /// Returns `true` if the interval contains no values (`min >= max`).
    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    /// Returns `true` if `min <= value < max`.
    pub fn contains(&self, value: &T) -> bool {
        self.min <= *value && *value < self.max
    }

    /// Returns `true` if every value of `other` lies within `self`.
    ///
    /// By convention this is `false` whenever either interval is empty,
    /// even though an empty interval arguably contains nothing and so
    /// is "contained" by everything.
    pub fn contains_interval(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.min <= other.min && other.max <= self.max
    }

    /// Returns `true` if the two intervals share at least one value.
    pub fn intersects(&self, other: &Self) -> bool {
        // Strictly less than, because ends are excluded.
        max(&self.min, &other.min) < min(&self.max, &other.max)
    }

    /// Returns `true` if the two intervals overlap or are immediately
    /// adjacent, i.e. they could be joined into one without gaining any
    /// values that neither of them covers.
    pub(crate) fn touches(&self, other: &Self) -> bool {
        // Less-than-or-equal-to because if one end is excluded, the other is included.
        max(&self.min, &other.min) <= min(&self.max, &other.max)
    }
}

impl<T> Interval<T>
where
    T: Ord + Clone,
{
    /// Returns the values common to both intervals, if there are any.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = max(&self.min, &other.min);
        let end = min(&self.max, &other.max);

        if start >= end {
            return None;
        }

        Some(Interval::new(start.clone(), end.clone()))
    }

    /// Narrows `self` to its intersection with `other`.
    ///
    /// Returns `true` if `self` changed. If the intervals don't intersect
    /// `self` is left untouched, which is not the same as leaving it
    /// empty; check [`intersects`](Self::intersects) first if that matters.
    pub fn intersect_with(&mut self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let mut modified = false;
        if other.min > self.min {
            self.min = other.min.clone();
            modified = true;
        }
        if other.max < self.max {
            self.max = other.max.clone();
            modified = true;
        }
        modified
    }

    /// Widens `self` to the smallest interval covering both `self` and
    /// `other`, including any gap between them.
    ///
    /// Returns `true` if `self` changed. An empty `other` changes nothing,
    /// and an empty `self` simply becomes `other`.
    pub fn spanning_union(&mut self, other: &Self) -> bool {
        if other.is_empty() {
            return false;
        }
        if self.is_empty() {
            *self = other.clone();
            return true;
        }
        let mut modified = false;
        if other.min < self.min {
            self.min = other.min.clone();
            modified = true;
        }
        if other.max > self.max {
            self.max = other.max.clone();
            modified = true;
        }
        modified
    }

    /// Subtracts `other` from `self`.
    ///
    /// Returns the (possibly empty) pieces of `self` lying strictly below
    /// and strictly above `other`. When the two don't intersect, all of a
    /// non-empty `self` is returned as the low piece.
    pub fn difference(&self, other: &Self) -> (Option<Self>, Option<Self>) {
        if self.is_empty() {
            return (None, None);
        }
        if !self.intersects(other) {
            return (Some(self.clone()), None);
        }

        let low = if self.min < other.min {
            Some(Interval::new(self.min.clone(), other.min.clone()))
        } else {
            None
        };
        let high = if other.max < self.max {
            Some(Interval::new(other.max.clone(), self.max.clone()))
        } else {
            None
        };
        (low, high)
    }
}

impl<T> Interval<T>
where
    T: Ord + Clone + Default + Sub<Output = T>,
{
    /// The distance from `min` to `max`, or `T::default()` if empty.
    pub fn len(&self) -> T {
        if self.is_empty() {
            T::default()
        } else {
            self.max.clone() - self.min.clone()
        }
    }
}

impl<T> From<Range<T>> for Interval<T> {
    fn from(range: Range<T>) -> Self {
        Interval::new(range.start, range.end)
    }
}

impl<T> From<Interval<T>> for Range<T> {
    fn from(interval: Interval<T>) -> Self {
        interval.min..interval.max
    }
}

impl<T: Display> Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.min, self.max)
    }
}

// Derived `Debug` would spell out field names, which gets noisy
// inside a set's debug output.
impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?})", self.min, self.max)
    }
}

#[cfg(feature = "serde1")]
impl<T> Serialize for Interval<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (&self.min, &self.max).serialize(serializer)
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Deserialize<'de> for Interval<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (min, max) = <(T, T)>::deserialize(deserializer)?;
        Ok(Interval::new(min, max))
    }
}

#[cfg(feature = "quickcheck")]
impl<T> quickcheck::Arbitrary for Interval<T>
where
    T: quickcheck::Arbitrary,
{
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Interval::new(T::arbitrary(g), T::arbitrary(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn emptiness() {
        assert!(Interval::new(5, 5).is_empty());
        assert!(Interval::new(7, 3).is_empty());
        assert!(!Interval::new(3, 4).is_empty());
        assert!(Interval::<u32>::default().is_empty());
    }

    #[test]
    fn contains_value_is_half_open() {
        let interval = Interval::new(10, 20);
        assert!(!interval.contains(&9));
        assert!(interval.contains(&10));
        assert!(interval.contains(&19));
        assert!(!interval.contains(&20));
    }

    #[test]
    fn contains_interval_rejects_empty_intervals() {
        let interval = Interval::new(10, 20);
        assert!(interval.contains_interval(&Interval::new(10, 20)));
        assert!(interval.contains_interval(&Interval::new(12, 15)));
        assert!(!interval.contains_interval(&Interval::new(5, 15)));
        assert!(!interval.contains_interval(&Interval::new(15, 15)));
        assert!(!Interval::new(15, 15).contains_interval(&Interval::new(15, 15)));
    }

    #[test]
    fn intersects_needs_shared_values() {
        let interval = Interval::new(10, 20);
        assert!(interval.intersects(&Interval::new(19, 30)));
        assert!(!interval.intersects(&Interval::new(20, 30)));
        assert!(!interval.intersects(&Interval::new(0, 10)));
        assert!(!interval.intersects(&Interval::new(15, 15)));
        assert!(!interval.intersects(&Interval::new(30, 5)));
    }

    #[test]
    fn touches_includes_adjacency() {
        let interval = Interval::new(10, 20);
        assert!(interval.touches(&Interval::new(20, 30)));
        assert!(interval.touches(&Interval::new(0, 10)));
        assert!(!interval.touches(&Interval::new(21, 30)));
    }

    #[test]
    fn intersection() {
        assert_eq!(
            Interval::new(0, 5).intersection(&Interval::new(0, 3)),
            Some(Interval::new(0, 3))
        );
        assert_eq!(
            Interval::new(0, 3).intersection(&Interval::new(2, 5)),
            Some(Interval::new(2, 3))
        );
        assert_eq!(Interval::new(0, 3).intersection(&Interval::new(3, 3)), None);
        assert_eq!(Interval::new(0, 3).intersection(&Interval::new(3, 6)), None);
    }

    #[test]
    fn intersect_with_narrows_in_place() {
        let mut interval = Interval::new(0, 10);
        assert!(interval.intersect_with(&Interval::new(5, 20)));
        assert_eq!(interval, Interval::new(5, 10));
        assert!(!interval.intersect_with(&Interval::new(0, 20)));
        assert_eq!(interval, Interval::new(5, 10));
        assert!(!interval.intersect_with(&Interval::new(7, 7)));
    }

    #[test]
    fn spanning_union_covers_gap() {
        let mut interval = Interval::new(10, 20);
        assert!(interval.spanning_union(&Interval::new(30, 40)));
        assert_eq!(interval, Interval::new(10, 40));
        assert!(!interval.spanning_union(&Interval::new(15, 25)));
        assert!(!interval.spanning_union(&Interval::new(50, 50)));

        let mut empty = Interval::new(0, 0);
        assert!(empty.spanning_union(&Interval::new(3, 4)));
        assert_eq!(empty, Interval::new(3, 4));
    }

    #[test]
    fn difference_splits_into_low_and_high() {
        let interval = Interval::new(10, 40);
        assert_eq!(
            interval.difference(&Interval::new(20, 30)),
            (Some(Interval::new(10, 20)), Some(Interval::new(30, 40)))
        );
        assert_eq!(
            interval.difference(&Interval::new(0, 20)),
            (None, Some(Interval::new(20, 40)))
        );
        assert_eq!(
            interval.difference(&Interval::new(30, 50)),
            (Some(Interval::new(10, 30)), None)
        );
        assert_eq!(interval.difference(&Interval::new(0, 50)), (None, None));
        // Disjoint: nothing is removed.
        assert_eq!(
            interval.difference(&Interval::new(40, 50)),
            (Some(Interval::new(10, 40)), None)
        );
        assert_eq!(Interval::new(5, 5).difference(&interval), (None, None));
    }

    #[test]
    fn set_bounds_in_place() {
        let mut interval = Interval::new(10, 20);
        interval.set_max(30);
        assert_eq!(interval, Interval::new(10, 30));
        interval.set_min(25);
        assert_eq!(interval, Interval::new(25, 30));
        interval.set_min(40);
        assert!(interval.is_empty());
        assert_eq!(interval.into_bounds(), (40, 30));
    }

    #[test]
    fn len_is_zero_for_empty() {
        assert_eq!(Interval::new(10u64, 25).len(), 15);
        assert_eq!(Interval::new(25u64, 10).len(), 0);
    }

    #[test]
    fn converts_to_and_from_range() {
        let interval: Interval<u32> = (3..7).into();
        assert_eq!(interval, Interval::new(3, 7));
        let range: Range<u32> = interval.into();
        assert_eq!(range, 3..7);
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(format!("{}", Interval::new(10, 20)), "[10, 20)");
        assert_eq!(format!("{:?}", Interval::new(10, 20)), "[10, 20)");
    }
}
