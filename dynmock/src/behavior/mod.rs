//! The [`behavior`](self) module contains the steps a setup performs when it
//! handles an invocation.
//!
//! A setup owns at most one behavior per step. The steps are executed in this
//! order:
//! - [`LimitInvocationCount`]: fail if the setup was invoked too often
//! - [`Callback`]: user code that runs before the return value is produced
//! - [`RaiseEvent`]: notify the handlers of an event
//! - [`ReturnOrThrow`]: produce the return value or raise an exception
//! - [`Callback`]: user code that runs after the return value was produced

mod callback;
mod delegate;
mod event;
mod limit;
mod returns;

pub use delegate::{Delegate, IntoDelegate};
pub use event::EventHandler;

pub(crate) use callback::Callback;
pub(crate) use delegate::CallMode;
pub(crate) use event::{handle_subscription, raise, EventArgs, EventRegistry, RaiseEvent};
pub(crate) use limit::LimitInvocationCount;
pub(crate) use returns::ReturnOrThrow;
