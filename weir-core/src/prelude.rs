//! Prelude for convenient imports.
//!
//! ```ignore
//! use weir_core::prelude::*;
//! ```

// Core types
pub use crate::types::{RecordId, ServiceId};

// Error handling
pub use crate::error::{Result, WeirError};

// Records and routing
pub use crate::record::{core_attributes, FlowRecord};
pub use crate::relationship::Relationship;
pub use crate::session::ProcessSession;

// Configuration
pub use crate::property::{validators, PropertyDescriptor, ValidatorFn};
pub use crate::validation::ValidationResult;

// Traits
pub use crate::traits::{
    ControllerService, ProcessContext, Processor, ServiceInitialization, ServiceLookup,
};

// Logging
pub use crate::logging::{ComponentLog, LogEntry, LogLevel};
