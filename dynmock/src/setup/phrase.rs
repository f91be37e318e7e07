//! Views of the fluent setup builder. Each builder call consumes the current
//! view and returns a narrower one, so only calls that make sense at that
//! point can be chained. All views modify the same [`Setup`].

use std::error::Error as StdError;
use std::sync::Arc;

use crate::behavior::{EventArgs, IntoDelegate};
use crate::error::Error;
use crate::invocation::{Exception, Invocation};
use crate::value::{Data, Value};

use super::Setup;

/// Returned by [`Mock::setup`](crate::Mock::setup). Offers every builder call.
#[derive(Debug)]
pub struct SetupPhrase {
    setup: Arc<Setup>,
}

/// Returned after a callback that runs before the return value is produced.
#[derive(Debug)]
pub struct CallbackPhrase {
    setup: Arc<Setup>,
}

/// Returned after the return value (or base call) was configured.
#[derive(Debug)]
pub struct ReturnsPhrase {
    setup: Arc<Setup>,
}

/// Returned after an exception was configured.
#[derive(Debug)]
pub struct ThrowsPhrase {
    setup: Arc<Setup>,
}

/// Returned after a callback that runs after the return value was produced.
#[derive(Debug)]
pub struct VerifiesPhrase {
    setup: Arc<Setup>,
}

impl SetupPhrase {
    pub(crate) fn new(setup: Arc<Setup>) -> Self {
        Self { setup }
    }
}

macro_rules! impl_phrase {
    ($type:ident) => {
        impl $type {
            /// The setup this builder configures.
            #[must_use]
            pub fn setup(&self) -> &Arc<Setup> {
                &self.setup
            }

            /// Mark the setup as verifiable: [`Mock::verify`](crate::Mock::verify)
            /// fails if it was never invoked.
            pub fn verifiable(self) {
                self.setup.set_verifiable(None);
            }

            /// Like [`verifiable`](Self::verifiable), but reports `fail_message`
            /// if the setup was never invoked.
            pub fn verifiable_with<S: Into<String>>(self, fail_message: S) {
                self.setup.set_verifiable(Some(fail_message.into()));
            }
        }
    };
}

macro_rules! impl_at_most {
    ($type:ident) => {
        impl $type {
            /// Fail every invocation after the `limit`th one. Calling this again
            /// replaces the previous limit.
            pub fn at_most(self, limit: usize) -> Self {
                self.setup.set_limit(limit);

                self
            }

            pub fn at_most_once(self) -> Self {
                self.at_most(1)
            }
        }
    };
}

macro_rules! impl_raises {
    ($type:ident) => {
        impl $type {
            /// Raise `event` on the mock with the passed `args` whenever the
            /// setup handles an invocation.
            pub fn raises<S: Into<String>>(self, event: S, args: Vec<Value>) -> Self {
                self.setup
                    .set_raise_event_behavior(event.into(), EventArgs::Fixed(args));

                self
            }

            /// Like [`raises`](Self::raises), but the arguments are computed
            /// from the invocation.
            pub fn raises_with<S, F>(self, event: S, args: F) -> Self
            where
                S: Into<String>,
                F: Fn(&Invocation) -> Vec<Value> + Send + Sync + 'static,
            {
                self.setup
                    .set_raise_event_behavior(event.into(), EventArgs::Computed(Arc::new(args)));

                self
            }
        }
    };
}

macro_rules! impl_callback {
    ($type:ident => $next:ident) => {
        impl $type {
            /// Execute `callback` for each invocation the setup handles.
            ///
            /// The callback either takes no arguments, the whole
            /// [`Invocation`], or references to the arguments of the method.
            ///
            /// # Errors
            /// Fails if the parameters of the callback do not fit the method,
            /// or if the callback returns a value.
            pub fn callback<F, M>(self, callback: F) -> Result<$next, Error>
            where
                F: IntoDelegate<M>,
            {
                self.setup.set_callback_behavior(callback.into_delegate())?;

                Ok($next { setup: self.setup })
            }
        }
    };
}

macro_rules! impl_returns {
    ($type:ident) => {
        impl $type {
            /// Return `value` from each invocation the setup handles.
            ///
            /// # Errors
            /// Fails if the method does not return a value.
            pub fn returns<T: Data>(self, value: T) -> Result<ReturnsPhrase, Error> {
                self.setup.set_return_value_behavior(Value::new(value))?;

                Ok(ReturnsPhrase { setup: self.setup })
            }

            /// Compute the return value of each invocation with `factory`.
            ///
            /// The factory takes no arguments, the whole [`Invocation`], or
            /// references to the arguments of the method. If the method
            /// returns a delegate, the factory itself is returned instead.
            ///
            /// # Errors
            /// Fails if the shape of the factory does not fit the method.
            pub fn returns_with<F, M>(self, factory: F) -> Result<ReturnsPhrase, Error>
            where
                F: IntoDelegate<M>,
            {
                self.setup
                    .set_return_computed_value_behavior(Some(factory.into_delegate()))?;

                Ok(ReturnsPhrase { setup: self.setup })
            }

            /// Return the default value of the return type.
            ///
            /// # Errors
            /// Fails if the method does not return a value.
            pub fn returns_default(self) -> Result<ReturnsPhrase, Error> {
                self.setup.set_return_computed_value_behavior(None)?;

                Ok(ReturnsPhrase { setup: self.setup })
            }

            /// Forward each invocation to the base implementation.
            ///
            /// # Errors
            /// Fails if the mocked type is a delegate.
            pub fn call_base(self) -> Result<ReturnsPhrase, Error> {
                self.setup.set_call_base_behavior()?;

                Ok(ReturnsPhrase { setup: self.setup })
            }

            /// Raise `error` from each invocation the setup handles.
            pub fn throws<E>(self, error: E) -> ThrowsPhrase
            where
                E: StdError + Send + Sync + 'static,
            {
                self.setup
                    .set_throw_exception_behavior(Exception::new(error));

                ThrowsPhrase { setup: self.setup }
            }
        }
    };
}

impl_phrase!(SetupPhrase);
impl_phrase!(CallbackPhrase);
impl_phrase!(ReturnsPhrase);
impl_phrase!(ThrowsPhrase);
impl_phrase!(VerifiesPhrase);

impl_at_most!(SetupPhrase);
impl_at_most!(CallbackPhrase);
impl_at_most!(ReturnsPhrase);
impl_at_most!(ThrowsPhrase);

impl_raises!(SetupPhrase);
impl_raises!(CallbackPhrase);
impl_raises!(ReturnsPhrase);
impl_raises!(VerifiesPhrase);

impl_callback!(SetupPhrase => CallbackPhrase);
impl_callback!(ReturnsPhrase => VerifiesPhrase);

impl_returns!(SetupPhrase);
impl_returns!(CallbackPhrase);
