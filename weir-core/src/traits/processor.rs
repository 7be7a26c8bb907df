//! Processor trait: the processing contract for pluggable components.

use crate::error::Result;
use crate::property::PropertyDescriptor;
use crate::relationship::Relationship;
use crate::session::ProcessSession;
use crate::traits::context::ProcessContext;
use crate::validation::ValidationResult;

/// A pluggable unit of processing logic.
///
/// A processor declares its relationships and configurable properties ahead
/// of time, then is driven through `on_trigger` with a context (property
/// access + service lookup) and a session (record lifecycle). Processing is
/// synchronous: an invocation runs to completion before the driver moves on.
///
/// # Example
///
/// ```ignore
/// use weir_core::prelude::*;
///
/// struct Passthrough;
///
/// impl Processor for Passthrough {
///     fn name(&self) -> &str {
///         "passthrough"
///     }
///
///     fn relationships(&self) -> Vec<Relationship> {
///         vec![Relationship::success()]
///     }
///
///     fn properties(&self) -> Vec<PropertyDescriptor> {
///         Vec::new()
///     }
///
///     fn on_trigger(
///         &self,
///         _context: &dyn ProcessContext,
///         session: &mut ProcessSession,
///     ) -> Result<()> {
///         if let Some(record) = session.take() {
///             session.transfer(record, &Relationship::success())?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Processor: Send + Sync {
    /// Display name used in log scopes and failure messages.
    fn name(&self) -> &str;

    /// The output relationships this processor routes records to.
    /// Transfers to a relationship not listed here are rejected.
    fn relationships(&self) -> Vec<Relationship>;

    /// The configurable properties this processor understands.
    /// Values set for properties not listed here fail validation.
    fn properties(&self) -> Vec<PropertyDescriptor>;

    /// Cross-property validation rules, evaluated against the full current
    /// configuration after the per-property rules.
    ///
    /// Return one failing [`ValidationResult`] per violated rule, even when
    /// several properties participate in the rule; return an empty vec when
    /// all rules hold.
    fn validate_config(&self, context: &dyn ProcessContext) -> Vec<ValidationResult> {
        let _ = context;
        Vec::new()
    }

    /// The processing entry point, invoked once per driver iteration.
    ///
    /// Input-driven processors take records from the session; source-style
    /// processors create records from outside data. Every record taken or
    /// created must be transferred to a declared relationship before
    /// returning.
    ///
    /// # Errors
    /// Any error propagates to the driver's caller unmodified; no retry or
    /// backoff is simulated.
    fn on_trigger(&self, context: &dyn ProcessContext, session: &mut ProcessSession)
        -> Result<()>;

    /// Called when the component is being shut down.
    fn shutdown(&self) {}
}
