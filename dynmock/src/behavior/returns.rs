use crate::error::Error;
use crate::invocation::{Exception, Invocation};
use crate::method::MethodInfo;
use crate::value::{TypeKind, Value};

use super::{CallMode, Delegate};

/// Terminal step of a setup: produce the return value of the invocation or
/// raise an exception.
#[derive(Debug, Clone)]
pub(crate) enum ReturnOrThrow {
    /// Return a fixed value.
    Value(Value),

    /// Compute the return value for each invocation.
    Computed { factory: Delegate, mode: CallMode },

    /// Forward the invocation to the base implementation.
    Base,

    /// Raise an exception.
    Throw(Exception),
}

impl ReturnOrThrow {
    /// Resolve how `factory` produces return values for `method`.
    ///
    /// - no factory at all returns the default value of the return type
    /// - if the method returns a delegate, the factory itself is the value
    /// - a factory taking the [`Invocation`] receives the invocation
    /// - any other factory receives the arguments of the call, or nothing if
    ///   it has no parameters
    pub(crate) fn computed(factory: Option<Delegate>, method: &MethodInfo) -> Result<Self, Error> {
        let return_type = method.return_type();

        let Some(factory) = factory else {
            let value = return_type.default_value().unwrap_or_else(Value::null);

            return Ok(Self::Value(value));
        };

        if return_type.is_delegate() {
            return Ok(Self::Value(Value::opaque(factory)));
        }

        let produces_any = matches!(factory.return_type().kind(), TypeKind::Any);
        if factory.takes_invocation()
            && (produces_any || return_type.is_assignable_from(factory.return_type()))
        {
            return Ok(Self::Computed {
                factory,
                mode: CallMode::Invocation,
            });
        }

        validate(&factory, method)?;

        let mode = if factory.params().is_empty() {
            CallMode::Nothing
        } else {
            CallMode::Positional
        };

        Ok(Self::Computed { factory, mode })
    }

    pub(crate) fn exec(&self, invocation: &Invocation) -> Result<Value, Error> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Computed { factory, mode } => factory.call(invocation, *mode),
            Self::Base => match invocation.call_base() {
                Some(result) => result.map_err(Error::Thrown),
                None => Err(Error::NoBaseImplementation {
                    invocation: invocation.to_string(),
                }),
            },
            Self::Throw(exception) => Err(Error::Thrown(exception.clone())),
        }
    }

    /// The configured return value, if it is a fixed one.
    pub(crate) fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

fn validate(factory: &Delegate, method: &MethodInfo) -> Result<(), Error> {
    let actual = factory.params().len();
    if actual > 0 {
        let expected = method.params().len();
        if actual != expected {
            return Err(Error::CallbackParameterCountMismatch { expected, actual });
        }

        if !factory.has_params(method.params()) {
            return Err(Error::CallbackParameterMismatch {
                expected: method.parameter_type_list(),
                actual: factory.parameter_type_list(),
            });
        }
    }

    if factory.return_type().is_void() {
        return Err(Error::ReturnsCallbackWithoutReturnType);
    }

    let expected = method.return_type();
    if !expected.is_type_matcher() && !expected.is_assignable_from(factory.return_type()) {
        return Err(Error::CallbackReturnTypeMismatch {
            expected: expected.name().into(),
            actual: factory.return_type().name().into(),
        });
    }

    Ok(())
}
