//! Validation outcomes.
//!
//! Configuration-rule violations are data, not errors: a validation pass
//! returns one [`ValidationResult`] per violated rule, and an empty set
//! signals a fully valid configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome describing whether the current configuration satisfies one
/// declared rule. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The property display name or rule scope the result refers to.
    subject: String,
    /// The offending input value, when one was supplied.
    input: Option<String>,
    /// Human-readable description of the violated constraint.
    explanation: String,
    /// Whether the rule was satisfied.
    valid: bool,
}

impl ValidationResult {
    /// Create a passing result for a subject.
    #[must_use]
    pub fn valid(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            input: None,
            explanation: String::new(),
            valid: true,
        }
    }

    /// Create a failing result.
    #[must_use]
    pub fn invalid(
        subject: impl Into<String>,
        input: Option<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            input,
            explanation: explanation.into(),
            valid: false,
        }
    }

    /// The property display name or rule scope.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The offending input value, if one was supplied.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    /// Description of the violated constraint.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Whether the rule was satisfied.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "'{}' is valid", self.subject);
        }
        match &self.input {
            Some(input) => write!(
                f,
                "'{}' validated against '{}' is invalid because {}",
                self.subject, input, self.explanation
            ),
            None => write!(
                f,
                "'{}' is invalid because {}",
                self.subject, self.explanation
            ),
        }
    }
}
