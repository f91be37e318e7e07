//! The [`default_value`](self) module contains the providers that produce the
//! return values of invocations no setup provided a value for.

use std::fmt::Debug;

use crate::value::{TypeInfo, Value};

/// Produces values for invocations of a loose mock that have no matching
/// setup, or whose matching setup does not return anything.
pub trait DefaultValueProvider: Debug + Send + Sync {
    fn default_value(&self, ty: &TypeInfo) -> Value;
}

/// Returns the default value of the type, or `null` if it has none.
#[derive(Default, Debug, Clone, Copy)]
pub struct EmptyDefaultValueProvider;

impl DefaultValueProvider for EmptyDefaultValueProvider {
    fn default_value(&self, ty: &TypeInfo) -> Value {
        ty.default_value().unwrap_or_else(Value::null)
    }
}

/// Returns the same value for every non-void type.
#[derive(Debug, Clone)]
pub struct ConstantDefaultValueProvider(pub Value);

impl DefaultValueProvider for ConstantDefaultValueProvider {
    fn default_value(&self, ty: &TypeInfo) -> Value {
        if ty.is_void() {
            Value::unit()
        } else {
            self.0.clone()
        }
    }
}
