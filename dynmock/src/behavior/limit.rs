use std::sync::Arc;

use crate::error::Error;
use crate::invocation::Invocation;
use crate::times::Times;

/// Fails an invocation once the setup was invoked more than `limit` times.
#[derive(Debug, Clone)]
pub(crate) struct LimitInvocationCount {
    times: Arc<Times>,
}

impl LimitInvocationCount {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            times: Arc::new(Times::new(..=limit)),
        }
    }

    /// Count `invocation`. `setup` is the description used in the error.
    pub(crate) fn exec(&self, setup: &str, invocation: &Invocation) -> Result<(), Error> {
        let count = self.times.increment();
        if self.times.is_exceeded() {
            return Err(Error::MoreThanNCalls {
                setup: setup.into(),
                invocation: invocation.to_string(),
                limit: self.times.limit().unwrap_or_default(),
                count,
            });
        }

        Ok(())
    }

    pub(crate) fn reset(&self) {
        self.times.reset();
    }
}
