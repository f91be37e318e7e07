//! The [`error`](self) module contains the errors of the framework.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::invocation::Exception;

/// Errors reported by setups, the dispatcher and verification.
#[derive(Debug, Error, Clone)]
pub enum Error {
    #[error("Method {method} expects {expected} argument matcher(s), but {actual} were supplied.")]
    MatcherCountMismatch {
        method: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid callback. Setup on method with parameters ({expected}) cannot invoke callback with parameters ({actual}).")]
    CallbackParameterMismatch { expected: String, actual: String },

    #[error("Invalid callback. Setup on method with {expected} parameter(s) cannot invoke callback with different number of parameters ({actual}).")]
    CallbackParameterCountMismatch { expected: usize, actual: usize },

    #[error("Invalid callback. Callbacks must not return a value, but this one returns `{actual}`.")]
    CallbackNotAProcedure { actual: String },

    #[error("Invalid callback. A value factory must return a value.")]
    ReturnsCallbackWithoutReturnType,

    #[error("Invalid callback. Setup on method with return type `{expected}` cannot invoke callback with return type `{actual}`.")]
    CallbackReturnTypeMismatch { expected: String, actual: String },

    #[error("Method {method} does not return a value, so no return value can be set up.")]
    ReturnOnVoidMethod { method: String },

    #[error("CallBase cannot be used with delegate mocks.")]
    CallBaseOnDelegateMock,

    #[error("{invocation} invocation failed with mock behavior Strict.\nAll invocations on the mock must have a corresponding setup.")]
    NoSetup { invocation: String },

    #[error("{invocation} invocation failed with mock behavior Strict.\nInvocation needs to return a value and therefore must have a corresponding setup that provides it.\nMatched setup: {setup}")]
    ReturnValueRequired { invocation: String, setup: String },

    #[error("{setup}\nExpected only {limit} call(s), but {invocation} was call number {count}.")]
    MoreThanNCalls {
        setup: String,
        invocation: String,
        limit: usize,
        count: usize,
    },

    #[error("{invocation} has no base implementation that could be called.")]
    NoBaseImplementation { invocation: String },

    #[error("Arguments of {invocation} cannot be passed to a delegate with parameters ({expected}).")]
    ArgumentTypeMismatch { invocation: String, expected: String },

    /// Raised by a `throws` setup or a base implementation.
    #[error(transparent)]
    Thrown(#[from] Exception),

    #[error(transparent)]
    Verification(#[from] VerificationFailure),
}

impl Error {
    /// Returns the user exception if this error carries one.
    #[must_use]
    pub fn exception(&self) -> Option<&Exception> {
        match self {
            Self::Thrown(exception) => Some(exception),
            _ => None,
        }
    }
}

/// All violations found by one verification pass.
#[derive(Debug, Clone)]
pub struct VerificationFailure {
    /// Name of the mocked type.
    pub mock: String,

    /// Every setup that failed verification.
    pub failures: Vec<SetupFailure>,
}

/// A setup that was expected to be invoked but was not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupFailure {
    /// Description of the setup.
    pub setup: String,

    /// Custom fail message of the setup, if it has one.
    pub message: Option<String>,
}

impl Display for VerificationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Mock<{}>:", self.mock)?;
        write!(f, "This mock failed verification due to the following:")?;

        for failure in &self.failures {
            let message = failure
                .message
                .as_deref()
                .unwrap_or("This setup was not matched.");

            write!(f, "\n\n   {}:\n   {message}", failure.setup)?;
        }

        Ok(())
    }
}

impl StdError for VerificationFailure {}
