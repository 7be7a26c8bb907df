//! Initialization context handed to a controller service during setup.

use crate::registry::ServiceRegistry;
use std::sync::Arc;
use weir_core::error::Result;
use weir_core::logging::ComponentLog;
use weir_core::traits::{ControllerService, ServiceInitialization, ServiceLookup};
use weir_core::types::ServiceId;

/// Gives a controller service, during its setup phase, the same two
/// capabilities a real runtime would: its identifier and a way to resolve
/// sibling services — without requiring a full runtime.
///
/// The context registers its subject before exposing lookup, so a service
/// can resolve itself by identifier during initialization (e.g., to pass
/// downstream) before any other registration occurs. Construction follows
/// an explicit ordered sequence: build the registry, register the subject,
/// then wrap the context view over it.
///
/// `service_name` always answers `None`: this reduced contract does no
/// display-name tracking on the context. That is a deliberate stub, not an
/// omission — the standalone [`ServiceRegistry`] tracks optional display
/// names for tests that need them.
pub struct ServiceInitContext {
    identifier: ServiceId,
    logger: ComponentLog,
    registry: Arc<ServiceRegistry>,
}

impl ServiceInitContext {
    /// Build a context over a fresh embedded registry, synthesizing a
    /// capture logger scoped to the identifier.
    #[must_use]
    pub fn new(service: Arc<dyn ControllerService>, identifier: ServiceId) -> Self {
        let logger = ComponentLog::new(identifier.as_str(), "controller-service");
        Self::with_logger(service, identifier, logger)
    }

    /// Build a context over a fresh embedded registry with a caller-supplied
    /// logger.
    #[must_use]
    pub fn with_logger(
        service: Arc<dyn ControllerService>,
        identifier: ServiceId,
        logger: ComponentLog,
    ) -> Self {
        let registry = Arc::new(ServiceRegistry::with_service(identifier.clone(), service));
        Self {
            identifier,
            logger,
            registry,
        }
    }

    /// Build a context over an externally shared registry, registering the
    /// subject into it.
    ///
    /// # Errors
    /// Returns [`WeirError::DuplicateServiceId`](weir_core::WeirError::DuplicateServiceId)
    /// when the identifier is already registered — constructing two contexts
    /// for the same identifier inside one shared registry is a test defect.
    pub fn with_registry(
        service: Arc<dyn ControllerService>,
        identifier: ServiceId,
        registry: Arc<ServiceRegistry>,
    ) -> Result<Self> {
        registry.register(identifier.clone(), service)?;
        let logger = ComponentLog::new(identifier.as_str(), "controller-service");
        Ok(Self {
            identifier,
            logger,
            registry,
        })
    }

    /// The registry backing this context.
    #[must_use]
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }
}

impl ServiceLookup for ServiceInitContext {
    fn resolve(&self, service_id: &ServiceId) -> Result<Arc<dyn ControllerService>> {
        self.registry.resolve(service_id)
    }

    fn is_enabled(&self, service_id: &ServiceId) -> bool {
        self.registry.is_enabled(service_id)
    }

    // Always None in this reduced contract; see the type-level docs.
    fn service_name(&self, _service_id: &ServiceId) -> Option<String> {
        None
    }
}

impl ServiceInitialization for ServiceInitContext {
    fn identifier(&self) -> &ServiceId {
        &self.identifier
    }

    fn lookup(&self) -> &dyn ServiceLookup {
        self
    }

    fn logger(&self) -> &ComponentLog {
        &self.logger
    }
}

impl std::fmt::Debug for ServiceInitContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceInitContext")
            .field("identifier", &self.identifier)
            .finish()
    }
}
