//! The [`mock`](self) module contains the per-mock session: the recorded
//! setups, the dispatcher that selects a setup for each invocation, and the
//! verification of the setups.

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe, Location};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::behavior::{handle_subscription, raise, EventHandler, EventRegistry};
use crate::config::{MockBehavior, MockOptions};
use crate::error::{Error, SetupFailure, VerificationFailure};
use crate::invocation::{Invocation, Outcome};
use crate::setup::{capture_declaration_site, Condition, InvocationShape, Setup, SetupPhrase};
use crate::value::{TypeInfo, Value};

/// The session of one mocked object.
///
/// Cloning a mock is cheap, all clones share the same session.
#[derive(Debug, Clone)]
pub struct Mock {
    shared: Arc<Shared>,
}

#[derive(Debug)]
pub(crate) struct Shared {
    pub(crate) mocked_type: TypeInfo,
    pub(crate) options: MockOptions,
    pub(crate) events: Mutex<EventRegistry>,
    setups: Mutex<Vec<Arc<Setup>>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl Shared {
    /// Value of an invocation no setup provided a value for.
    pub(crate) fn default_return(&self, invocation: &Invocation) -> Result<Value, Error> {
        if self.options.call_base {
            if let Some(result) = invocation.call_base() {
                return result.map_err(Error::Thrown);
            }
        }

        let ty = invocation.method().return_type();

        Ok(self.options.default_value_provider.default_value(ty))
    }
}

/// Snapshot of a setup as reported by [`Mock::setups`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupInfo {
    pub id: usize,
    pub expression: String,
    pub is_conditional: bool,
    pub is_overridden: bool,
    pub is_verifiable: bool,
    pub invocation_count: usize,
}

impl Mock {
    /// Create a mock for `mocked_type` with the default options.
    #[must_use]
    pub fn new(mocked_type: TypeInfo) -> Self {
        Self::with_options(mocked_type, MockOptions::default())
    }

    #[must_use]
    pub fn with_options(mocked_type: TypeInfo, options: MockOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                mocked_type,
                options,
                events: Mutex::default(),
                setups: Mutex::default(),
                invocations: Mutex::default(),
            }),
        }
    }

    #[must_use]
    pub fn mocked_type(&self) -> &TypeInfo {
        &self.shared.mocked_type
    }

    #[must_use]
    pub fn options(&self) -> &MockOptions {
        &self.shared.options
    }

    /// Record a new setup for the calls described by `shape`.
    ///
    /// The setup replaces earlier unconditional setups with an identical
    /// shape.
    #[track_caller]
    pub fn setup(&self, shape: InvocationShape) -> SetupPhrase {
        let setup = self.add_setup(shape, None, Location::caller());

        SetupPhrase::new(setup)
    }

    /// Start a conditional setup that only applies while `condition` returns
    /// `true`.
    pub fn when<F>(&self, condition: F) -> ConditionalSetup<'_>
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        ConditionalSetup {
            mock: self,
            condition: Arc::new(condition),
        }
    }

    fn add_setup(
        &self,
        shape: InvocationShape,
        condition: Option<Condition>,
        location: &'static Location<'static>,
    ) -> Arc<Setup> {
        let options = &self.shared.options;
        let declaration_site = if options.switches.collect_diagnostic_file_info {
            capture_declaration_site(&*options.call_site_resolver, location)
        } else {
            None
        };

        let mut setups = self.shared.setups.lock();
        let setup = Arc::new(Setup::new(
            setups.len(),
            shape,
            condition,
            declaration_site,
            self.shared.mocked_type.clone(),
        ));

        if !setup.is_conditional() {
            setups
                .iter()
                .filter(|earlier| overrides(&setup, earlier))
                .for_each(|earlier| earlier.mark_overridden());
        }

        debug!(setup = setup.id(), expression = %setup.expression(), "Add setup");

        setups.push(setup.clone());

        setup
    }

    /// Dispatch an invocation forwarded by a proxy.
    ///
    /// The most recent setup that matches the invocation handles it. The
    /// invocation is recorded, together with its outcome.
    ///
    /// # Errors
    /// Returns [`Error::Thrown`] if the setup (or the base implementation)
    /// raised an exception, or the error of the framework if the invocation
    /// could not be handled.
    ///
    /// # Panics
    /// Panics of user code (callbacks, value factories, base implementations)
    /// are passed on to the caller. The invocation is recorded anyway, without
    /// an outcome.
    pub fn invoke(&self, invocation: &mut Invocation) -> Result<Value, Error> {
        let result = match catch_unwind(AssertUnwindSafe(|| self.dispatch(invocation))) {
            Ok(result) => result,
            Err(payload) => {
                self.shared.invocations.lock().push(invocation.clone());

                resume_unwind(payload);
            }
        };

        match &result {
            Ok(value) => invocation.set_outcome(Outcome::Returned(value.clone())),
            Err(Error::Thrown(exception)) => {
                invocation.set_outcome(Outcome::Threw(exception.clone()));
            }
            Err(_) => (),
        }

        self.shared.invocations.lock().push(invocation.clone());

        result
    }

    fn dispatch(&self, invocation: &mut Invocation) -> Result<Value, Error> {
        let setups = self.shared.setups.lock().clone();

        let Some(setup) = setups.iter().rev().find(|setup| setup.matches(invocation)) else {
            return self.dispatch_unmatched(invocation);
        };

        setups[..setup.id()]
            .iter()
            .filter(|earlier| overrides(setup, earlier))
            .for_each(|earlier| earlier.mark_overridden());

        debug!(%invocation, setup = setup.id(), "Invocation matched setup");

        invocation.set_matching_setup(setup.id());

        let result = setup.execute(invocation, &self.shared);
        if let Err(Error::ReturnValueRequired { .. }) = &result {
            warn!(%invocation, "Strict mock rejected invocation without return value");
        }

        result
    }

    fn dispatch_unmatched(&self, invocation: &mut Invocation) -> Result<Value, Error> {
        if invocation.method().is_event_accessor() {
            handle_subscription(invocation, &self.shared.events);

            return Ok(Value::unit());
        }

        match self.shared.options.behavior {
            MockBehavior::Strict => {
                warn!(%invocation, "Strict mock rejected invocation without setup");

                Err(Error::NoSetup {
                    invocation: invocation.to_string(),
                })
            }
            MockBehavior::Loose => {
                trace!(%invocation, "No setup matched, return default");

                self.shared.default_return(invocation)
            }
        }
    }

    /* Queries */

    /// Snapshots of all setups in declaration order.
    #[must_use]
    pub fn setups(&self) -> Vec<SetupInfo> {
        self.setup_list()
            .iter()
            .map(|setup| SetupInfo {
                id: setup.id(),
                expression: setup.to_string(),
                is_conditional: setup.is_conditional(),
                is_overridden: setup.is_overridden(),
                is_verifiable: setup.is_verifiable(),
                invocation_count: setup.invocation_count(),
            })
            .collect()
    }

    /// The setups themselves, in declaration order.
    #[must_use]
    pub fn setup_list(&self) -> Vec<Arc<Setup>> {
        self.shared.setups.lock().clone()
    }

    /// All invocations the mock received, in the order they were made.
    #[must_use]
    pub fn invocations(&self) -> Vec<Invocation> {
        self.shared.invocations.lock().clone()
    }

    /// Invocations that no setup handled.
    #[must_use]
    pub fn unmatched_invocations(&self) -> Vec<Invocation> {
        self.shared
            .invocations
            .lock()
            .iter()
            .filter(|invocation| invocation.matching_setup().is_none())
            .cloned()
            .collect()
    }

    /// Forget all recorded invocations and reset the call counters of all
    /// setups.
    pub fn reset_calls(&self) {
        self.shared.invocations.lock().clear();

        for setup in self.setup_list() {
            setup.reset();
        }
    }

    /* Verification */

    /// Check that every verifiable setup was invoked at least once.
    ///
    /// # Errors
    /// Returns [`Error::Verification`] listing all setups that were not invoked.
    pub fn verify(&self) -> Result<(), Error> {
        self.verify_setups(|setup| setup.is_verifiable() && !setup.is_overridden())
    }

    /// Check that every setup was invoked at least once. Overridden and
    /// conditional setups are ignored.
    ///
    /// # Errors
    /// Returns [`Error::Verification`] listing all setups that were not invoked.
    pub fn verify_all(&self) -> Result<(), Error> {
        self.verify_setups(|setup| !setup.is_overridden() && !setup.is_conditional())
    }

    fn verify_setups<F>(&self, filter: F) -> Result<(), Error>
    where
        F: Fn(&Setup) -> bool,
    {
        let failures = self
            .setup_list()
            .iter()
            .filter(|setup| filter(setup) && !setup.is_matched())
            .map(|setup| SetupFailure {
                setup: setup.expression(),
                message: setup.fail_message(),
            })
            .collect::<Vec<_>>();

        if failures.is_empty() {
            return Ok(());
        }

        debug!(failures = failures.len(), "Verification failed");

        Err(Error::Verification(VerificationFailure {
            mock: self.shared.mocked_type.name().into(),
            failures,
        }))
    }

    /* Events */

    /// Raise `event` and call all subscribed handlers with `args`.
    pub fn raise(&self, event: &str, args: &[Value]) {
        raise(&self.shared.events, event, args);
    }

    pub fn add_event_handler(&self, event: &str, handler: EventHandler) {
        self.shared.events.lock().add(event, handler);
    }

    /// Returns `false` if `handler` was not subscribed to `event`.
    pub fn remove_event_handler(&self, event: &str, handler: &EventHandler) -> bool {
        self.shared.events.lock().remove(event, handler)
    }
}

/// Builder for setups that only apply while a condition holds, see
/// [`Mock::when`].
#[must_use]
pub struct ConditionalSetup<'a> {
    mock: &'a Mock,
    condition: Condition,
}

impl ConditionalSetup<'_> {
    /// Record a new setup that applies while the condition holds.
    #[track_caller]
    pub fn setup(&self, shape: InvocationShape) -> SetupPhrase {
        let setup = self
            .mock
            .add_setup(shape, Some(self.condition.clone()), Location::caller());

        SetupPhrase::new(setup)
    }
}

/// Returns `true` if `setup` replaces the `earlier` setup. Guards are not
/// taken into account: once replaced, a setup never matches again.
fn overrides(setup: &Setup, earlier: &Setup) -> bool {
    earlier.id() < setup.id()
        && !earlier.is_overridden()
        && earlier.shape().is_identical(setup.shape())
}
