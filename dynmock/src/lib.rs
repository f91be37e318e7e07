//! Runtime core of a mocking framework.
//!
//! A [`Mock`] records setups: a description of the calls they apply to
//! ([`InvocationShape`]) together with the behavior to execute when such a
//! call is made. A proxy that implements the mocked type forwards each call
//! as an [`Invocation`] to [`Mock::invoke`], which selects the most recent
//! matching setup and runs its behaviors. Afterwards [`Mock::verify`] reports
//! all verifiable setups that were never invoked.
//!
//! See the [`example`] module for a proxy of a simple trait.

pub mod behavior;
pub mod config;
pub mod default_value;
pub mod error;
pub mod example;
pub mod invocation;
pub mod matcher;
pub mod method;
pub mod mock;
pub mod setup;
mod times;
pub mod value;

pub use once_cell::sync::Lazy;

pub use behavior::{Delegate, EventHandler, IntoDelegate};
pub use config::{MockBehavior, MockOptions, Switches};
pub use default_value::{
    ConstantDefaultValueProvider, DefaultValueProvider, EmptyDefaultValueProvider,
};
pub use error::{Error, SetupFailure, VerificationFailure};
pub use invocation::{BaseImpl, Exception, Invocation, Outcome};
pub use matcher::Matcher;
pub use method::{MethodInfo, MethodKind, ParamInfo, PassBy};
pub use mock::{ConditionalSetup, Mock, SetupInfo};
pub use setup::{
    CallSiteResolver, CallbackPhrase, FileLineResolver, InvocationShape, ReturnsPhrase, Setup,
    SetupPhrase, ThrowsPhrase, VerifiesPhrase,
};
pub use value::{Data, TypeInfo, TypeKind, Value};
