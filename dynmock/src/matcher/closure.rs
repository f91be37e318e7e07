use std::any::{type_name, Any};
use std::fmt::{Formatter, Result as FmtResult};
use std::marker::PhantomData;

use crate::value::{TypeInfo, Value};
use crate::Matcher;

use super::same_with;

/// Create a matcher that passes arguments of type `T` to `f`.
pub fn is<T, F>(f: F) -> Is<T, F>
where
    T: Any,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Is(f, PhantomData)
}

/// Matches arguments of type `T` that satisfy a predicate. Two [`Is`]
/// matchers express the same expectation if they were created from the same
/// closure.
#[must_use]
pub struct Is<T, F>(pub F, PhantomData<fn(&T)>);

impl<T, F> Matcher for Is<T, F>
where
    T: Any,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
        value.view::<T>().map_or(false, &self.0)
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        same_with(self, other, |_, _| true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "is::<{}>(..)", type_name::<T>())
    }
}
