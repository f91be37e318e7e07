use crate::error::Error;
use crate::invocation::Invocation;
use crate::method::MethodInfo;

use super::{CallMode, Delegate};

/// User code that is executed for each invocation handled by a setup.
#[derive(Debug, Clone)]
pub(crate) struct Callback {
    delegate: Delegate,
    mode: CallMode,
}

impl Callback {
    /// Check that `delegate` can be called for invocations of `method`.
    ///
    /// A delegate without parameters ignores the arguments, a delegate that
    /// takes an [`Invocation`] receives the invocation. Any other delegate
    /// must have exactly the parameter types of the method. Callbacks never
    /// return a value.
    pub(crate) fn new(delegate: Delegate, method: &MethodInfo) -> Result<Self, Error> {
        let mode = if delegate.params().is_empty() {
            CallMode::Nothing
        } else if delegate.takes_invocation() {
            CallMode::Invocation
        } else if delegate.has_params(method.params()) {
            CallMode::Positional
        } else {
            return Err(Error::CallbackParameterMismatch {
                expected: method.parameter_type_list(),
                actual: delegate.parameter_type_list(),
            });
        };

        if !delegate.return_type().is_void() {
            return Err(Error::CallbackNotAProcedure {
                actual: delegate.return_type().name().into(),
            });
        }

        Ok(Self { delegate, mode })
    }

    pub(crate) fn exec(&self, invocation: &Invocation) -> Result<(), Error> {
        self.delegate.call(invocation, self.mode).map(drop)
    }
}
