use std::any::Any;
use std::fmt::{Formatter, Result as FmtResult};

use crate::value::{Data, TypeInfo, Value};
use crate::Matcher;

use super::same_with;

macro_rules! impl_matcher {
    ($type:ident, $trait:ident::$method:ident, $fmt:tt) => {
        #[doc = concat!("Matches arguments `x` of type `T` for which `x.", stringify!($method), "(value)` holds.")]
        pub fn $method<T>(value: T) -> $type<T>
        where
            T: Data + $trait,
        {
            $type(value)
        }

        #[must_use]
        #[derive(Debug)]
        pub struct $type<T>(pub T);

        impl<T> Matcher for $type<T>
        where
            T: Data + $trait,
        {
            fn matches(&self, value: &Value, _ty: &TypeInfo) -> bool {
                value
                    .view::<T>()
                    .map_or(false, |value| value.$method(&self.0))
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

impl_matcher!(Ne, PartialEq::ne, "ne({:?})");

impl_matcher!(Lt, PartialOrd::lt, "lt({:?})");
impl_matcher!(Le, PartialOrd::le, "le({:?})");
impl_matcher!(Gt, PartialOrd::gt, "gt({:?})");
impl_matcher!(Ge, PartialOrd::ge, "ge({:?})");
