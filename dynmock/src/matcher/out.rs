use std::any::Any;
use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{Data, TypeInfo, Value};
use crate::Matcher;

use super::same_with;

/// Matcher for an out parameter: accepts any argument and makes the setup
/// write `value` into the argument slot.
pub fn out<T: Data>(value: T) -> OutValue {
    OutValue(Value::new(value))
}

#[must_use]
#[derive(Debug)]
pub struct OutValue(pub Value);

impl Matcher for OutValue {
    fn matches(&self, _value: &Value, _ty: &TypeInfo) -> bool {
        true
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        same_with(self, other, |a, b| a.0 == b.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "out {:?}", self.0)
    }

    fn out_value(&self) -> Option<&Value> {
        Some(&self.0)
    }
}
