use std::any::Any;
use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{TypeInfo, TypeKind, Value};
use crate::Matcher;

use super::same_with;

/// Matches any argument whose runtime type is `T`.
pub fn is_any<T: Any>() -> IsType {
    IsType(TypeInfo::of::<T>())
}

/// Matches any argument that is an instance of `ty`. Pass a type matcher
/// (see [`TypeInfo::matching`]) to match a family of types.
pub fn of_type(ty: TypeInfo) -> IsType {
    IsType(ty)
}

/// Type predicate matcher.
#[must_use]
#[derive(Debug)]
pub struct IsType(pub TypeInfo);

impl Matcher for IsType {
    fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
        self.0.accepts(value)
    }

    fn accepts_array(&self) -> bool {
        matches!(self.0.kind(), TypeKind::Any | TypeKind::Array(_))
    }

    fn same_as(&self, other: &dyn Matcher) -> bool {
        same_with(self, other, |a, b| a.0 == b.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "is_any::<{}>()", self.0.name())
    }
}
