//! Mock process context: property values and deferred validation.

use crate::registry::ServiceRegistry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use weir_core::logging::ComponentLog;
use weir_core::property::PropertyDescriptor;
use weir_core::traits::{ProcessContext, Processor, ServiceLookup};
use weir_core::validation::ValidationResult;

/// Evaluates a component's declared configuration against supplied values.
///
/// Setting a value performs no checks; validation is deferred and explicit.
/// `validate` evaluates every declared rule against the current full set of
/// property values and returns one failing [`ValidationResult`] per violated
/// rule — an empty set signals the configuration is fully valid. Repeated
/// calls with no intervening mutation yield an equal result set.
pub struct MockProcessContext {
    processor: Arc<dyn Processor>,
    descriptors: Vec<PropertyDescriptor>,
    values: RwLock<HashMap<String, String>>,
    registry: Arc<ServiceRegistry>,
    logger: ComponentLog,
}

impl MockProcessContext {
    /// Build a context for a processor, capturing its declared descriptors.
    #[must_use]
    pub fn new(
        processor: Arc<dyn Processor>,
        registry: Arc<ServiceRegistry>,
        logger: ComponentLog,
    ) -> Self {
        let descriptors = processor.properties();
        Self {
            processor,
            descriptors,
            values: RwLock::new(HashMap::new()),
            registry,
            logger,
        }
    }

    /// Set a property value, overwriting any prior value for the name.
    /// Returns the previous value if one was present. No validation is
    /// performed at set time.
    pub fn set_property(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.write().insert(name.into(), value.into())
    }

    /// The descriptors the component declared.
    #[must_use]
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// The registry backing service lookup.
    #[must_use]
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// Evaluate every declared rule against the current property values.
    ///
    /// Returns one failing result per violated rule:
    /// - a required property with no value and no default,
    /// - a value outside the declared allowed set,
    /// - a per-property validator rejection,
    /// - a value supplied for a property the component never declared,
    /// - each cross-property rule the component itself reports.
    ///
    /// Cross-property constraints yield a single result even when several
    /// properties participate.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationResult> {
        let mut failures = Vec::new();

        {
            let values = self.values.read();

            for descriptor in &self.descriptors {
                let display = descriptor.get_display_name();
                let effective = values
                    .get(descriptor.name())
                    .map(String::as_str)
                    .or_else(|| descriptor.get_default_value());

                let Some(value) = effective else {
                    if descriptor.is_required() {
                        failures.push(ValidationResult::invalid(
                            display,
                            None,
                            format!("{display} is required"),
                        ));
                    }
                    continue;
                };

                let allowed = descriptor.get_allowed_values();
                if !allowed.is_empty() && !allowed.iter().any(|a| a == value) {
                    failures.push(ValidationResult::invalid(
                        display,
                        Some(value.to_string()),
                        format!(
                            "Given value not found in allowed set '{}'",
                            allowed.join(", ")
                        ),
                    ));
                    continue;
                }

                for validator in descriptor.get_validators() {
                    if let Err(explanation) = validator(value) {
                        failures.push(ValidationResult::invalid(
                            display,
                            Some(value.to_string()),
                            explanation,
                        ));
                    }
                }
            }

            // Values for undeclared properties, in a stable order.
            let mut undeclared: Vec<(&String, &String)> = values
                .iter()
                .filter(|(name, _)| !self.descriptors.iter().any(|d| d.name() == name.as_str()))
                .collect();
            undeclared.sort_by_key(|(name, _)| name.as_str());
            for (name, value) in undeclared {
                failures.push(ValidationResult::invalid(
                    name.clone(),
                    Some(value.clone()),
                    format!("{name} is not a supported property"),
                ));
            }
        }

        failures.extend(
            self.processor
                .validate_config(self)
                .into_iter()
                .filter(|result| !result.is_valid()),
        );
        failures
    }
}

impl ProcessContext for MockProcessContext {
    fn property(&self, name: &str) -> Option<String> {
        if let Some(value) = self.values.read().get(name) {
            return Some(value.clone());
        }
        self.descriptors
            .iter()
            .find(|d| d.name() == name)
            .and_then(|d| d.get_default_value())
            .map(str::to_string)
    }

    fn services(&self) -> &dyn ServiceLookup {
        self.registry.as_ref()
    }

    fn logger(&self) -> &ComponentLog {
        &self.logger
    }
}

impl std::fmt::Debug for MockProcessContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProcessContext")
            .field("processor", &self.processor.name())
            .field("declared_properties", &self.descriptors.len())
            .finish()
    }
}
