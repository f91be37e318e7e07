//! The [`invocation`](self) module contains the record of a single call that
//! a proxy forwarded to its mock.

use std::error::Error as StdError;
use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::method::MethodInfo;
use crate::value::Value;

/// A user defined error that a mocked method raises.
///
/// Exceptions are produced by `throws` setups or by base implementations and
/// are handed to the caller unmodified.
#[derive(Clone)]
pub struct Exception(Arc<dyn StdError + Send + Sync + 'static>);

impl Exception {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref()
    }

    #[must_use]
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.0.is::<E>()
    }
}

impl Debug for Exception {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&*self.0, f)
    }
}

impl Display for Exception {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&*self.0, f)
    }
}

impl StdError for Exception {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Real implementation of a mocked method, provided by the proxy.
pub type BaseImpl = Arc<dyn Fn(&Invocation) -> Result<Value, Exception> + Send + Sync>;

/// Result of a dispatched invocation.
#[derive(Debug, Clone)]
pub enum Outcome {
    Returned(Value),
    Threw(Exception),
}

/// One observed call of a mocked method.
#[derive(Clone)]
pub struct Invocation {
    method: Arc<MethodInfo>,
    arguments: Vec<Value>,
    base: Option<BaseImpl>,
    outcome: Option<Outcome>,
    matching_setup: Option<usize>,
}

impl Invocation {
    pub fn new<M>(method: M, arguments: Vec<Value>) -> Self
    where
        M: Into<Arc<MethodInfo>>,
    {
        Self {
            method: method.into(),
            arguments,
            base: None,
            outcome: None,
            matching_setup: None,
        }
    }

    /// Attach the real implementation of the method.
    #[must_use]
    pub fn with_base<F>(mut self, base: F) -> Self
    where
        F: Fn(&Invocation) -> Result<Value, Exception> + Send + Sync + 'static,
    {
        self.base = Some(Arc::new(base));

        self
    }

    #[must_use]
    pub fn method(&self) -> &Arc<MethodInfo> {
        &self.method
    }

    /// Argument values, including the current state of out and ref slots.
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&Value> {
        self.arguments.get(index)
    }

    /// Call the base implementation, `None` if the proxy did not provide one.
    #[must_use]
    pub fn call_base(&self) -> Option<Result<Value, Exception>> {
        self.base.as_ref().map(|base| base(self))
    }

    #[must_use]
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Value produced by the call, once it returned.
    #[must_use]
    pub fn return_value(&self) -> Option<&Value> {
        match &self.outcome {
            Some(Outcome::Returned(value)) => Some(value),
            _ => None,
        }
    }

    /// Id of the setup that handled this invocation, `None` if no setup matched.
    #[must_use]
    pub fn matching_setup(&self) -> Option<usize> {
        self.matching_setup
    }

    pub(crate) fn set_argument(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.arguments.get_mut(index) {
            *slot = value;
        }
    }

    pub(crate) fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }

    pub(crate) fn set_matching_setup(&mut self, id: usize) {
        self.matching_setup = Some(id);
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}.{}(",
            self.method.declaring_type(),
            self.method.name()
        )?;

        for (index, argument) in self.arguments.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{argument:?}")?;
        }

        write!(f, ")")
    }
}

impl Debug for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Invocation")
            .field("method", &self.method)
            .field("arguments", &self.arguments)
            .field("has_base", &self.base.is_some())
            .field("outcome", &self.outcome)
            .field("matching_setup", &self.matching_setup)
            .finish()
    }
}
