use std::any::Any;
use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{TypeInfo, Value};
use crate::Matcher;

use super::same_with;

/// Create a [`FixedArray`] matcher from one matcher per expected element.
pub fn array(matchers: Vec<Box<dyn Matcher>>) -> FixedArray {
    FixedArray(matchers)
}

/// Matches array arguments (parameter arrays of variadic methods) element by
/// element.
///
/// The argument must be an array with exactly one element per sub-matcher.
/// Anything else is not a match.
#[must_use]
pub struct FixedArray(pub Vec<Box<dyn Matcher>>);

impl Matcher for FixedArray {
    fn matches(&self, value: &Value, ty: &TypeInfo) -> bool {
        let Some(values) = value.as_array() else {
            return false;
        };

        if values.len() != self.0.len() {
            return false;
        }

        let any = TypeInfo::any();
        let element_type = ty.element_type().unwrap_or(&any);

        self.0
            .iter()
            .zip(values)
            .all(|(matcher, value)| matcher.matches(value, element_type))
    }

    fn accepts_array(&self) -> bool {
        true
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        same_with(self, other, |a, b| {
            a.0.len() == b.0.len() && a.0.iter().zip(&b.0).all(|(a, b)| a.same_as(&**b))
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "[")?;

        for (index, matcher) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            matcher.fmt(f)?;
        }

        write!(f, "]")
    }
}
