use std::fmt::Debug;
use std::panic::{catch_unwind, AssertUnwindSafe, Location};
use std::path::Path;

use tracing::warn;

/// Turns the location a setup was declared at into the description that is
/// shown in failure messages.
pub trait CallSiteResolver: Debug + Send + Sync {
    fn resolve(&self, location: &'static Location<'static>) -> Option<String>;
}

/// Describes a call site as `in <file name>: line <line>`.
///
/// A [`Location`] carries no function name, so unlike a stack walk the
/// declaring type and method are not part of the description. Install a
/// custom [`CallSiteResolver`] through
/// [`MockOptions::call_site_resolver`](crate::MockOptions::call_site_resolver)
/// to describe call sites differently.
#[derive(Default, Debug, Clone, Copy)]
pub struct FileLineResolver;

impl CallSiteResolver for FileLineResolver {
    fn resolve(&self, location: &'static Location<'static>) -> Option<String> {
        let file = Path::new(location.file()).file_name()?.to_str()?;

        Some(format!("in {file}: line {}", location.line()))
    }
}

/// Resolve the declaration site of a setup. Never fails: if the resolver
/// panics the site is omitted.
pub(crate) fn capture(
    resolver: &dyn CallSiteResolver,
    location: &'static Location<'static>,
) -> Option<String> {
    match catch_unwind(AssertUnwindSafe(|| resolver.resolve(location))) {
        Ok(site) => site,
        Err(_) => {
            warn!(%location, "Resolving the declaration site of a setup panicked");

            None
        }
    }
}
