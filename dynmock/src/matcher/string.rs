use std::any::Any;
use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{TypeInfo, Value};
use crate::Matcher;

use super::same_with;

/// String content of `value`, for `String` and `&'static str` arguments.
fn as_str(value: &Value) -> Option<&str> {
    value
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| value.downcast_ref::<&'static str>().copied())
}

/* IsEmpty */

pub fn is_empty() -> IsEmpty {
    IsEmpty
}

#[must_use]
#[derive(Debug)]
pub struct IsEmpty;

impl Matcher for IsEmpty {
    fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
        as_str(value).map_or(false, str::is_empty)
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        other.as_any().is::<Self>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "is_empty")
    }
}

macro_rules! impl_str_matcher {
    ($type:ident, str::$method:ident, $fmt:tt) => {
        pub fn $method<P: Into<String>>(pattern: P) -> $type {
            $type(pattern.into())
        }

        #[must_use]
        #[derive(Debug)]
        pub struct $type(String);

        impl Matcher for $type {
            fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
                as_str(value).map_or(false, |value| value.$method(self.0.as_str()))
            }

            fn same_as(&self, other: &dyn Matcher) -> bool {
                same_with(self, other, |a, b| a.0 == b.0)
            }

            fn as_any(&self) -> &dyn Any {
                self
            }

            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                write!(f, $fmt, self.0)
            }
        }
    };
}

impl_str_matcher!(StartsWith, str::starts_with, "starts_with({:?})");
impl_str_matcher!(EndsWith, str::ends_with, "ends_with({:?})");
impl_str_matcher!(Contains, str::contains, "contains({:?})");
