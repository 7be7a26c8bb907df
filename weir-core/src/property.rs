//! Configuration property descriptors.
//!
//! Components declare their configurable properties ahead of time so a
//! validation context can enumerate rules. Validation itself is deferred:
//! setting a value performs no checks.

use std::fmt;
use std::sync::Arc;

/// A per-property validation rule.
///
/// Given the property's current value, returns `Ok(())` or an explanation
/// of the violated constraint.
pub type ValidatorFn = Arc<dyn Fn(&str) -> std::result::Result<(), String> + Send + Sync>;

/// Declared metadata for one configurable property.
///
/// Built in consuming-builder style:
///
/// ```
/// use weir_core::property::{validators, PropertyDescriptor};
///
/// let directory = PropertyDescriptor::new("directory")
///     .display_name("Directory")
///     .description("Directory to retrieve records from")
///     .required(true)
///     .validator(validators::non_empty());
/// assert!(directory.is_required());
/// ```
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: String,
    display_name: String,
    description: String,
    required: bool,
    default_value: Option<String>,
    allowed_values: Vec<String>,
    validators: Vec<ValidatorFn>,
}

impl PropertyDescriptor {
    /// Create a descriptor; the display name defaults to the property name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: String::new(),
            required: false,
            default_value: None,
            allowed_values: Vec::new(),
            validators: Vec::new(),
        }
    }

    /// Set the human-readable display name used in validation messages.
    #[must_use]
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the property required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set a default value used when no explicit value is supplied.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Restrict the property to a fixed set of allowed values.
    #[must_use]
    pub fn allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a per-property validation rule.
    #[must_use]
    pub fn validator(mut self, validator: ValidatorFn) -> Self {
        self.validators.push(validator);
        self
    }

    /// Get the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the display name.
    #[must_use]
    pub fn get_display_name(&self) -> &str {
        &self.display_name
    }

    /// Get the description.
    #[must_use]
    pub fn get_description(&self) -> &str {
        &self.description
    }

    /// Whether the property is required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Get the default value, if any.
    #[must_use]
    pub fn get_default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Get the allowed-value set; empty means unrestricted.
    #[must_use]
    pub fn get_allowed_values(&self) -> &[String] {
        &self.allowed_values
    }

    /// Get the attached validators.
    #[must_use]
    pub fn get_validators(&self) -> &[ValidatorFn] {
        &self.validators
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("allowed_values", &self.allowed_values)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Stock per-property validators.
pub mod validators {
    use super::ValidatorFn;
    use regex::Regex;
    use std::sync::Arc;

    /// Value must not be empty or all-whitespace.
    #[must_use]
    pub fn non_empty() -> ValidatorFn {
        Arc::new(|value| {
            if value.trim().is_empty() {
                Err("value must not be empty".to_string())
            } else {
                Ok(())
            }
        })
    }

    /// Value must parse as an unsigned integer.
    #[must_use]
    pub fn unsigned_integer() -> ValidatorFn {
        Arc::new(|value| {
            value
                .trim()
                .parse::<u64>()
                .map(|_| ())
                .map_err(|_| format!("'{value}' is not a valid non-negative integer"))
        })
    }

    /// Value must itself be a compilable regular expression.
    ///
    /// Useful for filename-filter style properties whose value is a pattern
    /// applied by the component at execution time.
    #[must_use]
    pub fn regular_expression() -> ValidatorFn {
        Arc::new(|value| {
            Regex::new(value)
                .map(|_| ())
                .map_err(|e| format!("'{value}' is not a valid regular expression: {e}"))
        })
    }

    /// Value must match the given pattern in full.
    #[must_use]
    pub fn matches_pattern(pattern: Regex) -> ValidatorFn {
        Arc::new(move |value| {
            if pattern.is_match(value) {
                Ok(())
            } else {
                Err(format!("'{value}' does not match pattern '{pattern}'"))
            }
        })
    }
}
