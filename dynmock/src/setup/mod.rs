//! The [`setup`](self) module contains the recorded expectations of a mock
//! and the fluent builder that configures them.

mod diagnostics;
mod phrase;
mod shape;

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::behavior::{
    handle_subscription, Callback, Delegate, EventArgs, LimitInvocationCount, RaiseEvent,
    ReturnOrThrow,
};
use crate::config::MockBehavior;
use crate::error::Error;
use crate::invocation::{Exception, Invocation, Outcome};
use crate::method::{MethodInfo, PassBy};
use crate::mock::Shared;
use crate::times::Times;
use crate::value::{TypeInfo, Value};

pub use diagnostics::{CallSiteResolver, FileLineResolver};
pub use phrase::{CallbackPhrase, ReturnsPhrase, SetupPhrase, ThrowsPhrase, VerifiesPhrase};
pub use shape::InvocationShape;

pub(crate) use diagnostics::capture as capture_declaration_site;

/// Guard of a conditional setup.
pub type Condition = Arc<dyn Fn() -> bool + Send + Sync>;

/// Behaviors of a setup, one per step.
#[derive(Default, Clone)]
struct Pipeline {
    limit: Option<LimitInvocationCount>,
    callback: Option<Callback>,
    raise_event: Option<RaiseEvent>,
    return_or_throw: Option<ReturnOrThrow>,
    after_return_callback: Option<Callback>,
}

#[derive(Default)]
struct State {
    pipeline: Pipeline,
    verifiable: bool,
    fail_message: Option<String>,
}

/// A recorded expectation: the calls it applies to and what happens when
/// such a call is made.
pub struct Setup {
    id: usize,
    shape: InvocationShape,
    condition: Option<Condition>,
    declaration_site: Option<String>,
    mocked_type: TypeInfo,
    state: Mutex<State>,
    times: Times,
    overridden: AtomicBool,
}

impl Setup {
    pub(crate) fn new(
        id: usize,
        shape: InvocationShape,
        condition: Option<Condition>,
        declaration_site: Option<String>,
        mocked_type: TypeInfo,
    ) -> Self {
        Self {
            id,
            shape,
            condition,
            declaration_site,
            mocked_type,
            state: Mutex::default(),
            times: Times::new(1..),
            overridden: AtomicBool::new(false),
        }
    }

    /// Id of the setup, unique within its mock.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    #[must_use]
    pub fn shape(&self) -> &InvocationShape {
        &self.shape
    }

    #[must_use]
    pub fn method(&self) -> &MethodInfo {
        self.shape.method()
    }

    #[must_use]
    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Returns `true` if a later setup with an identical shape replaced this one.
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.overridden.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_verifiable(&self) -> bool {
        self.state.lock().verifiable
    }

    /// Number of invocations this setup handled.
    #[must_use]
    pub fn invocation_count(&self) -> usize {
        self.times.count()
    }

    /// Returns `true` if the setup handled at least one invocation.
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.times.is_ready()
    }

    #[must_use]
    pub fn fail_message(&self) -> Option<String> {
        self.state.lock().fail_message.clone()
    }

    /// Description of where the setup was declared, if diagnostics were
    /// enabled for the mock.
    #[must_use]
    pub fn declaration_site(&self) -> Option<&str> {
        self.declaration_site.as_deref()
    }

    /// The fixed return value of the setup, if it has one.
    #[must_use]
    pub fn return_value(&self) -> Option<Value> {
        self.state
            .lock()
            .pipeline
            .return_or_throw
            .as_ref()
            .and_then(ReturnOrThrow::value)
            .cloned()
    }

    /// Returns `true` if this setup handles `invocation`.
    ///
    /// Overridden setups and setups whose guard is not satisfied never match.
    #[must_use]
    pub fn matches(&self, invocation: &Invocation) -> bool {
        if self.is_overridden() {
            return false;
        }

        if let Some(condition) = &self.condition {
            if !condition() {
                trace!(setup = self.id, "Skip setup, condition is not satisfied");

                return false;
            }
        }

        self.shape.matches(invocation)
    }

    /// Description of the setup without its fail message.
    pub(crate) fn expression(&self) -> String {
        match &self.declaration_site {
            Some(site) => format!("{} ({site})", self.shape),
            None => self.shape.to_string(),
        }
    }

    pub(crate) fn mark_overridden(&self) {
        if !self.overridden.swap(true, Ordering::Relaxed) {
            trace!(setup = self.id, "Setup was overridden");
        }
    }

    /// Reset the invocation counters of the setup.
    pub(crate) fn reset(&self) {
        self.times.reset();

        if let Some(limit) = &self.state.lock().pipeline.limit {
            limit.reset();
        }
    }

    /* Builder */

    pub(crate) fn set_callback_behavior(&self, callback: Delegate) -> Result<(), Error> {
        let callback = Callback::new(callback, self.method())?;

        let mut state = self.state.lock();
        if state.pipeline.return_or_throw.is_none() {
            state.pipeline.callback = Some(callback);
        } else {
            state.pipeline.after_return_callback = Some(callback);
        }

        Ok(())
    }

    pub(crate) fn set_return_value_behavior(&self, value: Value) -> Result<(), Error> {
        self.check_returns_value()?;
        self.state.lock().pipeline.return_or_throw = Some(ReturnOrThrow::Value(value));

        Ok(())
    }

    pub(crate) fn set_return_computed_value_behavior(
        &self,
        factory: Option<Delegate>,
    ) -> Result<(), Error> {
        self.check_returns_value()?;

        let behavior = ReturnOrThrow::computed(factory, self.method())?;
        self.state.lock().pipeline.return_or_throw = Some(behavior);

        Ok(())
    }

    pub(crate) fn set_call_base_behavior(&self) -> Result<(), Error> {
        if self.mocked_type.is_delegate() {
            return Err(Error::CallBaseOnDelegateMock);
        }

        self.state.lock().pipeline.return_or_throw = Some(ReturnOrThrow::Base);

        Ok(())
    }

    pub(crate) fn set_throw_exception_behavior(&self, exception: Exception) {
        self.state.lock().pipeline.return_or_throw = Some(ReturnOrThrow::Throw(exception));
    }

    pub(crate) fn set_raise_event_behavior(&self, event: String, args: EventArgs) {
        self.state.lock().pipeline.raise_event = Some(RaiseEvent::new(event, args));
    }

    pub(crate) fn set_limit(&self, limit: usize) {
        self.state.lock().pipeline.limit = Some(LimitInvocationCount::new(limit));
    }

    pub(crate) fn set_verifiable(&self, fail_message: Option<String>) {
        let mut state = self.state.lock();
        state.verifiable = true;
        if fail_message.is_some() {
            state.fail_message = fail_message;
        }
    }

    fn check_returns_value(&self) -> Result<(), Error> {
        if self.method().return_type().is_void() {
            return Err(Error::ReturnOnVoidMethod {
                method: self.method().to_string(),
            });
        }

        Ok(())
    }

    /* Execution */

    /// Run the pipeline of the setup for `invocation`.
    ///
    /// The behaviors are copied out of the setup first, so user code that is
    /// executed by the pipeline may use the mock again.
    pub(crate) fn execute(&self, invocation: &mut Invocation, mock: &Shared) -> Result<Value, Error> {
        self.times.increment();

        let pipeline = self.state.lock().pipeline.clone();

        self.assign_out_values(invocation);

        if let Some(limit) = &pipeline.limit {
            limit.exec(&self.to_string(), invocation)?;
        }

        if let Some(callback) = &pipeline.callback {
            callback.exec(invocation)?;
        }

        if let Some(raise_event) = &pipeline.raise_event {
            raise_event.exec(invocation, &mock.events);
        }

        let value = match &pipeline.return_or_throw {
            Some(return_or_throw) => return_or_throw.exec(invocation)?,
            None => self.return_without_behavior(invocation, mock)?,
        };

        invocation.set_outcome(Outcome::Returned(value.clone()));

        if let Some(callback) = &pipeline.after_return_callback {
            callback.exec(invocation)?;
        }

        Ok(value)
    }

    fn assign_out_values(&self, invocation: &mut Invocation) {
        let params = self.shape.method().params();

        for (index, (param, matcher)) in params.iter().zip(self.shape.matchers()).enumerate() {
            if param.pass_by() == PassBy::Value {
                continue;
            }

            if let Some(value) = matcher.out_value() {
                invocation.set_argument(index, value.clone());
            }
        }
    }

    fn return_without_behavior(
        &self,
        invocation: &Invocation,
        mock: &Shared,
    ) -> Result<Value, Error> {
        let method = invocation.method();

        if method.return_type().is_void() {
            handle_subscription(invocation, &mock.events);

            return Ok(Value::unit());
        }

        match mock.options.behavior {
            MockBehavior::Strict => Err(Error::ReturnValueRequired {
                invocation: invocation.to_string(),
                setup: self.to_string(),
            }),
            MockBehavior::Loose => mock.default_return(invocation),
        }
    }
}

impl Display for Setup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(fail_message) = &self.state.lock().fail_message {
            write!(f, "{fail_message}: ")?;
        }

        write!(f, "{}", self.expression())
    }
}

impl Debug for Setup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Setup")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("conditional", &self.is_conditional())
            .field("overridden", &self.is_overridden())
            .field("invocation_count", &self.invocation_count())
            .finish()
    }
}
