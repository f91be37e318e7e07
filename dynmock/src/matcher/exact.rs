use std::any::Any;
use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{Data, TypeInfo, Value};
use crate::Matcher;

use super::same_with;

/// Create an [`Exact`] matcher for `value`.
pub fn eq<T: Data>(value: T) -> Exact {
    Exact(Value::new(value))
}

/// Matches arguments that are structurally equal to a captured value.
#[must_use]
#[derive(Debug)]
pub struct Exact(pub Value);

impl Matcher for Exact {
    fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
        self.0 == *value
    }

    fn accepts_array(&self) -> bool {
        self.0.as_array().is_some()
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        same_with(self, other, |a, b| a.0 == b.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:?}", self.0)
    }
}
