//! The [`times`](self) module contains the call counter that backs
//! invocation-count limits and verification.

use std::ops::{Bound, RangeBounds, RangeFrom, RangeToInclusive};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Keeps track of how often a setup was invoked and how often it may be
/// invoked.
#[derive(Default, Debug)]
pub(crate) struct Times {
    count: AtomicUsize,
    range: TimesRange,
}

impl Times {
    /// Create a new [`Times`] instance from the passed `range`.
    pub(crate) fn new<R: Into<TimesRange>>(range: R) -> Self {
        Self {
            count: AtomicUsize::default(),
            range: range.into(),
        }
    }

    /// Increment the call count and return the new count.
    pub(crate) fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub(crate) fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    /// Return `true` if the lower bound of the range is fulfilled.
    pub(crate) fn is_ready(&self) -> bool {
        match &self.range.lower {
            Bound::Unbounded => true,
            Bound::Included(x) => *x <= self.count(),
            Bound::Excluded(x) => *x < self.count(),
        }
    }

    /// Return `true` if the count went past the upper bound of the range.
    pub(crate) fn is_exceeded(&self) -> bool {
        match &self.range.upper {
            Bound::Unbounded => false,
            Bound::Included(x) => self.count() > *x,
            Bound::Excluded(x) => self.count() >= *x,
        }
    }

    /// Largest count that is still within the range.
    pub(crate) fn limit(&self) -> Option<usize> {
        match &self.range.upper {
            Bound::Unbounded => None,
            Bound::Included(x) => Some(*x),
            Bound::Excluded(x) => Some(x.saturating_sub(1)),
        }
    }
}

/// Defines the range of expected calls with a lower and a upper limit.
///
/// Similar to [`RangeBounds`] from the standard library but as struct instead
/// of trait.
#[derive(Debug)]
pub(crate) struct TimesRange {
    lower: Bound<usize>,
    upper: Bound<usize>,
}

impl Default for TimesRange {
    fn default() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }
}

macro_rules! impl_from_range_bounds {
    ($x:ty) => {
        impl From<$x> for TimesRange {
            fn from(value: $x) -> Self {
                Self {
                    lower: value.start_bound().cloned(),
                    upper: value.end_bound().cloned(),
                }
            }
        }
    };
}

impl_from_range_bounds!(RangeFrom<usize>);
impl_from_range_bounds!(RangeToInclusive<usize>);
