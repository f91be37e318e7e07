use std::any::Any as StdAny;
use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{TypeInfo, Value};
use crate::Matcher;

pub fn any() -> Any {
    Any
}

#[must_use]
#[derive(Debug)]
pub struct Any;

impl Matcher for Any {
    fn matches(&self, _value: &Value, _ty: &TypeInfo) -> bool {
        true
    }

    fn accepts_array(&self) -> bool {
        true
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        other.as_any().is::<Self>()
    }

    fn as_any(&self) -> &dyn StdAny {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "any")
    }
}
