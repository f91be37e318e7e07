//! Contains a hand written proxy for the [`Calculator`] trait, the way a
//! proxy generator would produce it.

use std::any::Any;

use thiserror::Error;

use crate::behavior::EventHandler;
use crate::config::MockOptions;
use crate::error::Error;
use crate::invocation::{Exception, Invocation};
use crate::mock::Mock;
use crate::value::{TypeInfo, Value};

/// Simple test trait to create a proxy for.
pub trait Calculator {
    fn add(&self, a: i32, b: i32) -> i32;

    fn reset(&self);

    fn sum_all(&self, values: &[i32]) -> i32;

    /// Returns `true` and writes the parsed number to `result` on success.
    fn try_parse(&self, input: &str, result: &mut i32) -> bool;

    fn divide(&self, a: i32, b: i32) -> Result<i32, DivideError>;

    fn subscribe_changed(&self, handler: EventHandler);

    fn unsubscribe_changed(&self, handler: EventHandler);
}

/// Error of [`Calculator::divide`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DivideError {
    #[error("Division by zero")]
    DivideByZero,
}

/// Descriptors of the methods of [`Calculator`].
pub mod methods {
    use std::sync::Arc;

    use once_cell::sync::Lazy;

    use crate::behavior::EventHandler;
    use crate::method::MethodInfo;
    use crate::value::TypeInfo;

    pub static ADD: Lazy<Arc<MethodInfo>> = Lazy::new(|| {
        Arc::new(
            MethodInfo::new("Calculator", "add")
                .param::<i32>("a")
                .param::<i32>("b")
                .returns::<i32>(),
        )
    });

    pub static RESET: Lazy<Arc<MethodInfo>> =
        Lazy::new(|| Arc::new(MethodInfo::new("Calculator", "reset")));

    pub static SUM_ALL: Lazy<Arc<MethodInfo>> = Lazy::new(|| {
        Arc::new(
            MethodInfo::new("Calculator", "sum_all")
                .params_array("values", TypeInfo::of::<i32>())
                .returns::<i32>(),
        )
    });

    pub static TRY_PARSE: Lazy<Arc<MethodInfo>> = Lazy::new(|| {
        Arc::new(
            MethodInfo::new("Calculator", "try_parse")
                .param::<String>("input")
                .out_param::<i32>("result")
                .returns::<bool>(),
        )
    });

    pub static DIVIDE: Lazy<Arc<MethodInfo>> = Lazy::new(|| {
        Arc::new(
            MethodInfo::new("Calculator", "divide")
                .param::<i32>("a")
                .param::<i32>("b")
                .returns::<i32>(),
        )
    });

    pub static SUBSCRIBE_CHANGED: Lazy<Arc<MethodInfo>> = Lazy::new(|| {
        Arc::new(
            MethodInfo::new("Calculator", "subscribe_changed")
                .param::<EventHandler>("handler")
                .event_add("changed"),
        )
    });

    pub static UNSUBSCRIBE_CHANGED: Lazy<Arc<MethodInfo>> = Lazy::new(|| {
        Arc::new(
            MethodInfo::new("Calculator", "unsubscribe_changed")
                .param::<EventHandler>("handler")
                .event_remove("changed"),
        )
    });
}

/// Proxy that implements [`Calculator`] by forwarding every call to its
/// [`Mock`].
///
/// Errors of the framework are turned into panics, exceptions are returned
/// to the caller where the method signature allows it.
#[derive(Debug, Clone)]
pub struct CalculatorProxy {
    mock: Mock,
}

impl CalculatorProxy {
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(MockOptions::default())
    }

    #[must_use]
    pub fn with_options(options: MockOptions) -> Self {
        Self {
            mock: Mock::with_options(TypeInfo::of::<CalculatorProxy>(), options),
        }
    }

    #[must_use]
    pub fn mock(&self) -> &Mock {
        &self.mock
    }

    fn invoke(&self, invocation: &mut Invocation) -> Result<Value, Exception> {
        match self.mock.invoke(invocation) {
            Ok(value) => Ok(value),
            Err(Error::Thrown(exception)) => Err(exception),
            Err(err) => panic!("{err}"),
        }
    }

    fn call<T: Any + Clone>(&self, invocation: &mut Invocation) -> T {
        match self.invoke(invocation) {
            Ok(value) => returned(invocation, &value),
            Err(exception) => panic!("{invocation} raised an exception: {exception}"),
        }
    }
}

impl Default for CalculatorProxy {
    fn default() -> Self {
        Self::new()
    }
}

fn returned<T: Any + Clone>(invocation: &Invocation, value: &Value) -> T {
    match value.cloned::<T>() {
        Some(value) => value,
        None => panic!("{invocation} returned unexpected value {value:?}"),
    }
}

impl Calculator for CalculatorProxy {
    fn add(&self, a: i32, b: i32) -> i32 {
        let mut invocation =
            Invocation::new(methods::ADD.clone(), vec![Value::new(a), Value::new(b)])
                .with_base(move |_| Ok(Value::new(a.wrapping_add(b))));

        self.call(&mut invocation)
    }

    fn reset(&self) {
        let mut invocation = Invocation::new(methods::RESET.clone(), Vec::new())
            .with_base(|_| Ok(Value::unit()));

        self.call::<()>(&mut invocation);
    }

    fn sum_all(&self, values: &[i32]) -> i32 {
        let sum = values.iter().fold(0i32, |sum, x| sum.wrapping_add(*x));
        let values = Value::array(values.iter().copied().map(Value::new));
        let mut invocation = Invocation::new(methods::SUM_ALL.clone(), vec![values])
            .with_base(move |_| Ok(Value::new(sum)));

        self.call(&mut invocation)
    }

    fn try_parse(&self, input: &str, result: &mut i32) -> bool {
        let parsed = input.parse::<i32>().ok();
        let mut invocation = Invocation::new(
            methods::TRY_PARSE.clone(),
            vec![Value::new(input.to_owned()), Value::new(*result)],
        )
        .with_base(move |_| Ok(Value::new(parsed.is_some())));

        let ret = self.call(&mut invocation);

        if let Some(value) = invocation.argument(1).and_then(|arg| arg.cloned::<i32>()) {
            *result = value;
        }

        ret
    }

    fn divide(&self, a: i32, b: i32) -> Result<i32, DivideError> {
        let mut invocation =
            Invocation::new(methods::DIVIDE.clone(), vec![Value::new(a), Value::new(b)])
                .with_base(move |_| match a.checked_div(b) {
                    Some(value) => Ok(Value::new(value)),
                    None => Err(Exception::new(DivideError::DivideByZero)),
                });

        match self.invoke(&mut invocation) {
            Ok(value) => Ok(returned(&invocation, &value)),
            Err(exception) => match exception.downcast_ref::<DivideError>() {
                Some(err) => Err(err.clone()),
                None => panic!("{invocation} raised an exception: {exception}"),
            },
        }
    }

    fn subscribe_changed(&self, handler: EventHandler) {
        let mut invocation = Invocation::new(
            methods::SUBSCRIBE_CHANGED.clone(),
            vec![Value::opaque(handler)],
        );

        self.call::<()>(&mut invocation);
    }

    fn unsubscribe_changed(&self, handler: EventHandler) {
        let mut invocation = Invocation::new(
            methods::UNSUBSCRIBE_CHANGED.clone(),
            vec![Value::opaque(handler)],
        );

        self.call::<()>(&mut invocation);
    }
}
