/*!
[`IntervalSet`] is a set data structure whose items are stored as
half-open intervals `[min, max)`. Overlapping and adjacent intervals are
coalesced, so the set always holds the minimal number of intervals needed
to represent its contents.

It is built for the bookkeeping of packet-oriented transport protocols:
tracking which byte offsets or packet numbers have been received, sent or
acknowledged, where ranges arrive mostly in order, get merged and
subtracted constantly, and have to be queried cheaply.


# Intervals

An [`Interval`] is a pair of bounds `min` and `max`. It contains `min` but
not `max`, and it is _empty_ whenever `min >= max`. Empty intervals are
accepted everywhere and never change a set: adding one, subtracting one or
intersecting a set with one is a no-op (intersecting with an empty _set_
empties it, though).

`Interval` converts to and from [`Range`], so either can be used to build
a set.


# Example

```rust
use intervalset::{Interval, IntervalSet};

let mut acked: IntervalSet<u64> = IntervalSet::new();
acked.add(Interval::new(10, 20));
acked.add(Interval::new(30, 40));
// `acked` holds [10, 20) and [30, 40).

acked.add(Interval::new(15, 35));
// The three have been coalesced into the single interval [10, 40).
assert_eq!(acked.len(), 1);
assert!(acked.contains_interval(&Interval::new(10, 40)));

acked.difference_interval(&Interval::new(10, 20));
// Now only [20, 40) is left.
assert_eq!(acked.len(), 1);
assert!(acked.contains_interval(&Interval::new(20, 40)));

// Which parts of [0, 50) are missing?
acked.complement(0, 50);
assert_eq!(acked.to_string(), "{ [0, 20) [40, 50) }");
```


# Appending

Data mostly arrives in order, so the common insertion extends the last
interval in the set. [`IntervalSet::add_optimized_for_append`] handles
that case without searching or compacting the set, and falls back to
[`IntervalSet::add`] otherwise.


## Crate features

By default this crate has no dependencies on other crates.

If you enable the **serde1** feature it will introduce a dependency on
the _serde_ crate and provide `Serialize` and `Deserialize`
implementations for [`Interval`] and [`IntervalSet`]. A set is written
as a sequence of `[min, max]` pairs, and re-coalesced when it is read.

You can enable the **serde1** feature in your _Cargo.toml_ file like so:

```toml
[dependencies]
intervalset = { version = "0.1", features = ["serde1"] }
```

You can similarly enable support for _quickcheck_ by enabling
the **quickcheck** feature.


## Building without the Rust standard library

This crate can work without the full standard library available
(e.g. when running on bare metal without an operating system)
but relies on the presence of a global allocator &mdash;
i.e. it links the `core` and `alloc` crates, but not `std`.


[`IntervalSet`]: crate::IntervalSet
[`Interval`]: crate::Interval
[`Range`]: core::ops::Range

*/

#![no_std]
extern crate alloc;

pub mod interval;
pub(crate) mod operations;
pub mod set;

#[cfg(test)]
mod dense;
mod interval_wrapper;

pub use interval::Interval;
pub use set::IntervalSet;
