//! Error types for weir.
//!
//! Harness-internal invariant violations (duplicate identifiers, unrouted
//! records) are fatal to the current test: they indicate a test or harness
//! defect, not a transient condition, and never degrade gracefully.
//! Configuration-rule violations are not errors; they are structured
//! [`ValidationResult`](crate::validation::ValidationResult) values returned
//! for the caller to assert against.

use crate::types::{RecordId, ServiceId};
use crate::validation::ValidationResult;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for weir operations.
#[derive(Error, Debug)]
pub enum WeirError {
    // =========================================================================
    // Service Lookup Errors (E100-E199)
    // =========================================================================
    /// A controller service was registered twice under the same identifier.
    #[error("E101: controller service '{service_id}' is already registered")]
    DuplicateServiceId {
        /// The identifier that was registered twice.
        service_id: ServiceId,
    },

    /// No controller service is registered under the requested identifier.
    #[error("E102: no controller service registered for '{service_id}'")]
    ServiceNotFound {
        /// The identifier that failed to resolve.
        service_id: ServiceId,
    },

    // =========================================================================
    // Record Lifecycle Errors (E200-E299)
    // =========================================================================
    /// A record obtained or created during an invocation was never
    /// transferred to a relationship. A real runtime would stall this record
    /// in limbo.
    #[error("E201: {count} record(s) left unrouted after invocation (first: {record_id})")]
    UnroutedRecord {
        /// The first record left outstanding, in acquisition order.
        record_id: RecordId,
        /// Total number of outstanding records.
        count: usize,
    },

    /// A record was transferred to a relationship the component never
    /// declared.
    #[error("E202: transfer to undeclared relationship '{relationship}'")]
    UndeclaredRelationship {
        /// The relationship name that is not declared.
        relationship: String,
    },

    // =========================================================================
    // Assertion Errors (E300-E399)
    // =========================================================================
    /// Record content differs from the expected bytes.
    #[error(
        "E301: record content differs at byte {offset}: expected {expected_len} bytes, got {actual_len}"
    )]
    ContentMismatch {
        /// Offset of the first differing byte.
        offset: usize,
        /// Length of the expected content.
        expected_len: usize,
        /// Length of the actual content.
        actual_len: usize,
    },

    /// A record attribute differs from the expected value.
    #[error("E302: attribute '{key}' mismatch: expected '{expected}', got {actual:?}")]
    AttributeMismatch {
        /// The attribute key.
        key: String,
        /// The expected value.
        expected: String,
        /// The actual value, if the attribute was present at all.
        actual: Option<String>,
    },

    // =========================================================================
    // Driver Errors (E400-E499)
    // =========================================================================
    /// The driver was re-entered while an invocation was in flight.
    #[error("E401: runner re-entered while an invocation is in flight")]
    ConcurrentUse,

    /// The driver refused to invoke a component whose configuration failed
    /// validation.
    #[error("E402: refusing to run with {} failing validation result(s)", .failures.len())]
    InvalidConfiguration {
        /// The failing validation results, one per violated rule.
        failures: Vec<ValidationResult>,
    },

    // =========================================================================
    // Component Errors (E500-E599)
    // =========================================================================
    /// A failure raised by the component itself during processing.
    /// Propagated unmodified so tests can assert on it; no retry or backoff
    /// is simulated.
    #[error("E501: processor '{processor}' failed: {cause}")]
    ProcessorFailure {
        /// The component's display name.
        processor: String,
        /// Reason for the failure.
        cause: String,
    },

    /// A controller service failed during its setup phase.
    #[error("E502: controller service '{service_id}' failed to initialize: {cause}")]
    ServiceInitFailure {
        /// The service that failed.
        service_id: ServiceId,
        /// Reason for the failure.
        cause: String,
    },

    // =========================================================================
    // Fixture Errors (E600-E699)
    // =========================================================================
    /// A file-backed fixture could not be read.
    #[error("E601: fixture read failed at {path}: {cause}")]
    FixtureRead {
        /// The fixture path.
        path: PathBuf,
        /// Description of the I/O failure.
        cause: String,
    },
}

impl WeirError {
    /// Get the error code (e.g., "E101").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateServiceId { .. } => "E101",
            Self::ServiceNotFound { .. } => "E102",
            Self::UnroutedRecord { .. } => "E201",
            Self::UndeclaredRelationship { .. } => "E202",
            Self::ContentMismatch { .. } => "E301",
            Self::AttributeMismatch { .. } => "E302",
            Self::ConcurrentUse => "E401",
            Self::InvalidConfiguration { .. } => "E402",
            Self::ProcessorFailure { .. } => "E501",
            Self::ServiceInitFailure { .. } => "E502",
            Self::FixtureRead { .. } => "E601",
        }
    }

    /// Check if this error indicates a defect in the test or harness setup
    /// rather than in the component under test.
    #[must_use]
    pub fn is_harness_defect(&self) -> bool {
        matches!(
            self,
            Self::DuplicateServiceId { .. }
                | Self::UnroutedRecord { .. }
                | Self::UndeclaredRelationship { .. }
                | Self::ConcurrentUse
        )
    }

    /// Check if this error is an assertion failure produced by a record
    /// comparison helper.
    #[must_use]
    pub fn is_assertion_failure(&self) -> bool {
        matches!(
            self,
            Self::ContentMismatch { .. } | Self::AttributeMismatch { .. }
        )
    }
}

/// Result type alias using [`WeirError`].
pub type Result<T> = std::result::Result<T, WeirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_correct() {
        let err = WeirError::DuplicateServiceId {
            service_id: ServiceId::new("svcA"),
        };
        assert_eq!(err.code(), "E101");

        let err = WeirError::UnroutedRecord {
            record_id: RecordId::new(),
            count: 2,
        };
        assert_eq!(err.code(), "E201");
    }

    #[test]
    fn error_display() {
        let err = WeirError::ServiceNotFound {
            service_id: ServiceId::new("svcA"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("E102"));
        assert!(msg.contains("svcA"));

        let err = WeirError::ContentMismatch {
            offset: 4,
            expected_len: 10,
            actual_len: 8,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("byte 4"));
        assert!(msg.contains("10 bytes"));
    }

    #[test]
    fn harness_defects() {
        assert!(WeirError::ConcurrentUse.is_harness_defect());
        assert!(
            WeirError::UndeclaredRelationship {
                relationship: "success".to_string()
            }
            .is_harness_defect()
        );
        assert!(
            !WeirError::ProcessorFailure {
                processor: "fetch".to_string(),
                cause: "boom".to_string()
            }
            .is_harness_defect()
        );
    }

    #[test]
    fn assertion_failures() {
        assert!(
            WeirError::AttributeMismatch {
                key: "filename".to_string(),
                expected: "a.txt".to_string(),
                actual: None
            }
            .is_assertion_failure()
        );
        assert!(!WeirError::ConcurrentUse.is_assertion_failure());
    }
}
