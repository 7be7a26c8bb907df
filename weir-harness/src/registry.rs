//! Process-scoped controller service registry.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use weir_core::error::{Result, WeirError};
use weir_core::traits::{ControllerService, ServiceLookup};
use weir_core::types::ServiceId;

/// One registered service: the instance, its enabled-flag, and an optional
/// display name.
struct ServiceRegistration {
    service: Arc<dyn ControllerService>,
    enabled: bool,
    display_name: Option<String>,
}

/// A mapping from service identifier to service instance, scoped to a
/// single test.
///
/// Identifiers are unique for the lifetime of the registry. Registrations
/// start enabled; tests may toggle the flag to simulate disabled
/// dependencies. The registry is mutable shared state for one test and is
/// not designed for concurrent access from multiple test threads.
pub struct ServiceRegistry {
    entries: RwLock<HashMap<ServiceId, ServiceRegistration>>,
}

impl ServiceRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry seeded with one guaranteed entry.
    #[must_use]
    pub fn with_service(service_id: ServiceId, service: Arc<dyn ControllerService>) -> Self {
        let registry = Self::new();
        registry.entries.write().insert(
            service_id,
            ServiceRegistration {
                service,
                enabled: true,
                display_name: None,
            },
        );
        registry
    }

    /// Register a service under an identifier, enabled by default.
    ///
    /// # Errors
    /// Returns [`WeirError::DuplicateServiceId`] when the identifier is
    /// already present.
    pub fn register(
        &self,
        service_id: ServiceId,
        service: Arc<dyn ControllerService>,
    ) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.contains_key(&service_id) {
            return Err(WeirError::DuplicateServiceId { service_id });
        }
        tracing::debug!(service_id = %service_id, "registering controller service");
        entries.insert(
            service_id,
            ServiceRegistration {
                service,
                enabled: true,
                display_name: None,
            },
        );
        Ok(())
    }

    /// Toggle the enabled-flag to simulate a disabled dependency.
    ///
    /// # Errors
    /// Returns [`WeirError::ServiceNotFound`] for an unknown identifier.
    pub fn set_enabled(&self, service_id: &ServiceId, enabled: bool) -> Result<()> {
        let mut entries = self.entries.write();
        match entries.get_mut(service_id) {
            Some(registration) => {
                registration.enabled = enabled;
                Ok(())
            }
            None => Err(WeirError::ServiceNotFound {
                service_id: service_id.clone(),
            }),
        }
    }

    /// Attach a display name to a registration.
    ///
    /// # Errors
    /// Returns [`WeirError::ServiceNotFound`] for an unknown identifier.
    pub fn set_service_name(&self, service_id: &ServiceId, name: impl Into<String>) -> Result<()> {
        let mut entries = self.entries.write();
        match entries.get_mut(service_id) {
            Some(registration) => {
                registration.display_name = Some(name.into());
                Ok(())
            }
            None => Err(WeirError::ServiceNotFound {
                service_id: service_id.clone(),
            }),
        }
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceLookup for ServiceRegistry {
    fn resolve(&self, service_id: &ServiceId) -> Result<Arc<dyn ControllerService>> {
        self.entries
            .read()
            .get(service_id)
            .map(|registration| Arc::clone(&registration.service))
            .ok_or_else(|| WeirError::ServiceNotFound {
                service_id: service_id.clone(),
            })
    }

    fn is_enabled(&self, service_id: &ServiceId) -> bool {
        self.entries
            .read()
            .get(service_id)
            .map(|registration| registration.enabled)
            .unwrap_or(false)
    }

    fn service_name(&self, service_id: &ServiceId) -> Option<String> {
        self.entries
            .read()
            .get(service_id)
            .and_then(|registration| registration.display_name.clone())
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.len())
            .finish()
    }
}
