//! The [`matcher`](self) module contains the argument matchers of a setup.

mod any;
mod array;
mod closure;
mod compare;
mod exact;
mod lazy;
mod out;
mod range;
mod string;
mod types;

use std::any::Any as StdAny;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::value::{TypeInfo, Value};

pub use any::{any, Any};
pub use array::{array, FixedArray};
pub use closure::{is, Is};
pub use compare::{ge, gt, le, lt, ne, Ge, Gt, Le, Lt, Ne};
pub use exact::{eq, Exact};
pub use lazy::{lazy, Expression, LazyEval};
pub use out::{out, OutValue};
pub use range::{range, Range};
pub use string::{
    contains as str_contains, ends_with as str_ends_with, is_empty, starts_with as str_starts_with,
    Contains as StrContains, EndsWith as StrEndsWith, IsEmpty, StartsWith as StrStartsWith,
};
pub use types::{is_any, of_type, IsType};

/// A matcher decides whether the argument passed for one parameter satisfies
/// the expectation of a setup.
pub trait Matcher: Send + Sync + 'static {
    /// Returns `true` if the passed `value` matches the expectation. `ty` is
    /// the declared type of the parameter.
    fn matches(&self, value: &Value, ty: &TypeInfo) -> bool;

    /// Returns `true` if `other` expresses the same expectation as `self`.
    fn same_as(&self, other: &dyn Matcher) -> bool;

    /// Upcast to [`Any`](std::any::Any), used to implement
    /// [`same_as`](Self::same_as).
    fn as_any(&self) -> &dyn StdAny;

    /// Write a human readable representation of the matcher to the passed
    /// formatter.
    ///
    /// # Errors
    /// Returns an error if writing to the formatter failed.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult;

    /// Returns `true` if the matcher stands for a whole parameter array
    /// instead of its first element.
    fn accepts_array(&self) -> bool {
        false
    }

    /// Value that is assigned to an out parameter matched by this matcher.
    fn out_value(&self) -> Option<&Value> {
        None
    }

    /// Box the matcher.
    fn boxed(self) -> Box<dyn Matcher>
    where
        Self: Sized,
    {
        Box::new(self)
    }
}

impl Display for dyn Matcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Matcher::fmt(self, f)
    }
}

/// Downcast `other` to the type of `this` and compare both with `eq`.
pub(crate) fn same_with<M, F>(this: &M, other: &dyn Matcher, eq: F) -> bool
where
    M: Matcher,
    F: FnOnce(&M, &M) -> bool,
{
    other
        .as_any()
        .downcast_ref::<M>()
        .map_or(false, |other| eq(this, other))
}

/// Create a `Vec<Box<dyn Matcher>>` from a list of matchers.
///
/// ```
/// use dynmock::matcher::{any, eq};
/// use dynmock::matchers;
///
/// let matchers = matchers![eq(4), any()];
/// assert_eq!(2, matchers.len());
/// ```
#[macro_export]
macro_rules! matchers {
    ($( $matcher:expr ),* $(,)?) => {
        ::std::vec![ $( $crate::matcher::Matcher::boxed($matcher) ),* ]
    };
}
