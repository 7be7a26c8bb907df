//! Named output channels declared by a component.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A named output channel a component routes records to.
///
/// Components declare their relationships ahead of time; the harness
/// partitions transferred records into ordered sequences per relationship.
/// Two relationships are equal when their names are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship name (e.g., "success", "failure").
    name: String,
    /// Description of when records are routed here.
    description: String,
}

impl Relationship {
    /// Create a new relationship.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Create the conventional "success" relationship.
    #[must_use]
    pub fn success() -> Self {
        Self::new("success").with_description("Records that were processed successfully")
    }

    /// Create the conventional "failure" relationship.
    #[must_use]
    pub fn failure() -> Self {
        Self::new("failure").with_description("Records that could not be processed")
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the relationship name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Relationship {}

impl Hash for Relationship {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
