//! Execution context offered to a component while it processes records.

use crate::logging::ComponentLog;
use crate::traits::service::ServiceLookup;

/// Property access, service resolution, and scoped logging during
/// processing.
///
/// Property values are resolved against the component's declared
/// descriptors: an unset property falls back to its declared default.
pub trait ProcessContext {
    /// Get the effective value for a property, or `None` when it is unset
    /// and has no default.
    fn property(&self, name: &str) -> Option<String>;

    /// The service-resolution capability.
    fn services(&self) -> &dyn ServiceLookup;

    /// The capture logger scoped to the component under test. The same
    /// instance on every call.
    fn logger(&self) -> &ComponentLog;
}
