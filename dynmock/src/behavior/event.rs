use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::invocation::Invocation;
use crate::method::MethodKind;
use crate::value::Value;

/// Handler of a mocked event. Proxies pass handlers to event accessors as
/// [`Value::opaque`] arguments.
pub type EventHandler = Arc<dyn Fn(&[Value]) + Send + Sync>;

/// Handlers subscribed to the events of one mock.
#[derive(Default)]
pub(crate) struct EventRegistry {
    handlers: HashMap<String, Vec<EventHandler>>,
}

impl EventRegistry {
    pub(crate) fn add(&mut self, event: &str, handler: EventHandler) {
        self.handlers.entry(event.into()).or_default().push(handler);
    }

    /// Remove the last subscription of `handler`. Returns `false` if the
    /// handler was not subscribed.
    pub(crate) fn remove(&mut self, event: &str, handler: &EventHandler) -> bool {
        let Some(handlers) = self.handlers.get_mut(event) else {
            return false;
        };

        let ptr = Arc::as_ptr(handler).cast::<()>();
        let index = handlers
            .iter()
            .rposition(|h| Arc::as_ptr(h).cast::<()>() == ptr);

        match index {
            Some(index) => {
                handlers.remove(index);

                true
            }
            None => false,
        }
    }

    pub(crate) fn handlers(&self, event: &str) -> Vec<EventHandler> {
        self.handlers.get(event).cloned().unwrap_or_default()
    }
}

impl Debug for EventRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_map()
            .entries(self.handlers.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

/// Call every handler subscribed to `event`. The registry is not locked
/// while the handlers run.
pub(crate) fn raise(events: &Mutex<EventRegistry>, event: &str, args: &[Value]) {
    let handlers = events.lock().handlers(event);

    trace!(event, handlers = handlers.len(), "Raise event");

    for handler in handlers {
        handler(args);
    }
}

/// Apply the subscription change of an event accessor invocation.
pub(crate) fn handle_subscription(invocation: &Invocation, events: &Mutex<EventRegistry>) {
    let handler = invocation
        .argument(0)
        .and_then(|arg| arg.downcast_ref::<EventHandler>())
        .cloned();
    let Some(handler) = handler else {
        return;
    };

    match invocation.method().kind() {
        MethodKind::EventAdd(event) => {
            trace!(event, "Subscribe event handler");

            events.lock().add(event, handler);
        }
        MethodKind::EventRemove(event) => {
            trace!(event, "Unsubscribe event handler");

            events.lock().remove(event, &handler);
        }
        MethodKind::Regular => (),
    }
}

/// Arguments passed to the handlers of a raised event.
#[derive(Clone)]
pub(crate) enum EventArgs {
    Fixed(Vec<Value>),
    Computed(Arc<dyn Fn(&Invocation) -> Vec<Value> + Send + Sync>),
}

impl Debug for EventArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Fixed(args) => f.debug_tuple("Fixed").field(args).finish(),
            Self::Computed(_) => f.debug_tuple("Computed").finish(),
        }
    }
}

/// Raises an event on the mock whenever the setup handles an invocation.
#[derive(Debug, Clone)]
pub(crate) struct RaiseEvent {
    event: String,
    args: EventArgs,
}

impl RaiseEvent {
    pub(crate) fn new(event: String, args: EventArgs) -> Self {
        Self { event, args }
    }

    pub(crate) fn exec(&self, invocation: &Invocation, events: &Mutex<EventRegistry>) {
        let args = match &self.args {
            EventArgs::Fixed(args) => args.clone(),
            EventArgs::Computed(f) => f(invocation),
        };

        raise(events, &self.event, &args);
    }
}
