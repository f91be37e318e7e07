//! The [`config`](self) module contains the options a [`Mock`](crate::Mock)
//! is created with.

use std::env::var;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::default_value::{DefaultValueProvider, EmptyDefaultValueProvider};
use crate::setup::{CallSiteResolver, FileLineResolver};

/// Environment variable that enables [`Switches::collect_diagnostic_file_info`]
/// for all mocks that use the default switches.
pub const DIAGNOSTICS_ENV: &str = "DYNMOCK_DIAGNOSTICS";

static DEFAULT_SWITCHES: Lazy<Switches> = Lazy::new(|| {
    let enabled = var(DIAGNOSTICS_ENV)
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"))
        .unwrap_or(false);

    Switches {
        collect_diagnostic_file_info: enabled,
    }
});

/// How a mock handles invocations nobody set up.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Invocations without a setup fail, and so do invocations of non-void
    /// methods whose setup does not provide a return value.
    Strict,

    /// Invocations without a setup return default values.
    #[default]
    Loose,
}

/// Optional features of a mock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Switches {
    /// Capture the location each setup was declared at and include it in
    /// failure messages.
    pub collect_diagnostic_file_info: bool,
}

impl Switches {
    /// Switches with every feature turned off.
    #[must_use]
    pub fn none() -> Self {
        Self {
            collect_diagnostic_file_info: false,
        }
    }
}

impl Default for Switches {
    fn default() -> Self {
        *DEFAULT_SWITCHES
    }
}

/// Options of a [`Mock`](crate::Mock).
#[derive(Debug, Clone)]
pub struct MockOptions {
    pub behavior: MockBehavior,
    pub switches: Switches,

    /// Forward invocations without a setup provided value to the base
    /// implementation, if the proxy supplied one.
    pub call_base: bool,

    pub default_value_provider: Arc<dyn DefaultValueProvider>,
    pub call_site_resolver: Arc<dyn CallSiteResolver>,
}

impl MockOptions {
    #[must_use]
    pub fn behavior(mut self, behavior: MockBehavior) -> Self {
        self.behavior = behavior;

        self
    }

    #[must_use]
    pub fn strict(self) -> Self {
        self.behavior(MockBehavior::Strict)
    }

    #[must_use]
    pub fn switches(mut self, switches: Switches) -> Self {
        self.switches = switches;

        self
    }

    #[must_use]
    pub fn call_base(mut self, call_base: bool) -> Self {
        self.call_base = call_base;

        self
    }

    #[must_use]
    pub fn default_value_provider<P>(mut self, provider: P) -> Self
    where
        P: DefaultValueProvider + 'static,
    {
        self.default_value_provider = Arc::new(provider);

        self
    }

    #[must_use]
    pub fn call_site_resolver<R>(mut self, resolver: R) -> Self
    where
        R: CallSiteResolver + 'static,
    {
        self.call_site_resolver = Arc::new(resolver);

        self
    }
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            behavior: MockBehavior::default(),
            switches: Switches::default(),
            call_base: false,
            default_value_provider: Arc::new(EmptyDefaultValueProvider),
            call_site_resolver: Arc::new(FileLineResolver),
        }
    }
}
