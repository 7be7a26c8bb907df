//! Weir Core Library
//!
//! This crate provides the contract surface a pluggable dataflow component
//! depends on at execution time — the surface a real orchestration runtime
//! and the mock harness both honor.
//!
//! # Key Components
//!
//! - **Records**: attribute + content units flowing through a component,
//!   with exact-equality assertion helpers
//! - **Relationships**: named output channels records are routed to
//! - **Properties**: declared configuration descriptors with deferred
//!   validation rules
//! - **Traits**: the `Processor` and `ControllerService` contracts and the
//!   `ServiceLookup` capability
//! - **Logging**: the capturing component logger tests assert against
//!
//! # Example
//!
//! ```ignore
//! use weir_core::prelude::*;
//!
//! struct Passthrough;
//!
//! impl Processor for Passthrough {
//!     fn name(&self) -> &str { "passthrough" }
//!     fn relationships(&self) -> Vec<Relationship> { vec![Relationship::success()] }
//!     fn properties(&self) -> Vec<PropertyDescriptor> { Vec::new() }
//!     fn on_trigger(
//!         &self,
//!         _context: &dyn ProcessContext,
//!         session: &mut ProcessSession,
//!     ) -> Result<()> {
//!         if let Some(record) = session.take() {
//!             session.transfer(record, &Relationship::success())?;
//!         }
//!         Ok(())
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod logging;
pub mod prelude;
pub mod property;
pub mod record;
pub mod relationship;
pub mod session;
pub mod traits;
pub mod types;
pub mod validation;

// Re-export key types at crate root for convenience
pub use error::{Result, WeirError};
pub use record::FlowRecord;
pub use relationship::Relationship;
pub use session::ProcessSession;
pub use traits::{ControllerService, ProcessContext, Processor, ServiceLookup};
pub use types::{RecordId, ServiceId};
pub use validation::ValidationResult;
