//! Controller service contract and the service-resolution capability.

use crate::error::Result;
use crate::logging::ComponentLog;
use crate::types::ServiceId;
use std::any::Any;
use std::sync::Arc;

/// A shared, identifier-addressable service other components depend on.
///
/// Services are registered under an opaque identifier and resolved by that
/// identifier at execution time. `as_any` lets a dependent recover the
/// concrete service type after resolution.
pub trait ControllerService: Send + Sync + 'static {
    /// Called once during the service's setup phase, with the same
    /// capabilities a real runtime would provide: the assigned identifier
    /// and a way to resolve sibling services.
    ///
    /// # Errors
    /// A failure here aborts service registration.
    fn initialize(&self, context: &dyn ServiceInitialization) -> Result<()> {
        let _ = context;
        Ok(())
    }

    /// Upcast for concrete-type recovery by dependents.
    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn ControllerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn ControllerService")
    }
}

/// Narrow capability for resolving controller services by identifier.
///
/// Implemented by the service registry; contexts compose it via delegation.
pub trait ServiceLookup {
    /// Resolve a service instance by identifier.
    ///
    /// The instance returned is the identical one registered (reference
    /// equality, observable via [`Arc::ptr_eq`]).
    ///
    /// # Errors
    /// Returns [`WeirError::ServiceNotFound`](crate::error::WeirError::ServiceNotFound)
    /// for an unknown identifier.
    fn resolve(&self, service_id: &ServiceId) -> Result<Arc<dyn ControllerService>>;

    /// Whether the service is enabled. Defaults to `true` for any
    /// registered, unconfigured identifier; `false` for unknown ones.
    fn is_enabled(&self, service_id: &ServiceId) -> bool;

    /// Display name for the service, when one is tracked.
    fn service_name(&self, service_id: &ServiceId) -> Option<String>;
}

/// What a controller service receives during its setup phase.
pub trait ServiceInitialization {
    /// The identifier the service is registered under, exactly as supplied.
    fn identifier(&self) -> &ServiceId;

    /// Lookup for resolving sibling services — including the service under
    /// initialization itself, which is pre-registered before setup runs.
    fn lookup(&self) -> &dyn ServiceLookup;

    /// The capture logger scoped to this service.
    fn logger(&self) -> &ComponentLog;
}
