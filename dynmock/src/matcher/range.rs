use std::any::Any;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};

use crate::value::{TypeInfo, Value};
use crate::Matcher;

use super::same_with;

pub fn range<R, T>(range: R) -> Range<R, T>
where
    R: RangeBounds<T>,
{
    Range::new(range)
}

/// Matches arguments of type `T` that lie within a range.
#[must_use]
#[derive(Debug)]
pub struct Range<R, T> {
    range: R,
    _marker: PhantomData<fn(&T)>,
}

impl<R, T> Range<R, T> {
    pub fn new(range: R) -> Self {
        Self {
            range,
            _marker: PhantomData,
        }
    }
}

impl<R, T> Matcher for Range<R, T>
where
    R: RangeBounds<T> + Send + Sync + 'static,
    T: PartialOrd + Debug + 'static,
{
    fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
        value
            .view::<T>()
            .map_or(false, |value| self.range.contains(value))
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        same_with(self, other, |a, b| {
            a.range.start_bound() == b.range.start_bound()
                && a.range.end_bound() == b.range.end_bound()
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.range.start_bound() {
            Bound::Unbounded => write!(f, "[_, "),
            Bound::Included(x) => write!(f, "[{x:?}, "),
            Bound::Excluded(x) => write!(f, "({x:?}, "),
        }?;

        match self.range.end_bound() {
            Bound::Unbounded => write!(f, "_]"),
            Bound::Included(x) => write!(f, "{x:?}]"),
            Bound::Excluded(x) => write!(f, "{x:?})"),
        }?;

        Ok(())
    }
}
