//! Test runner: drives a processor through bounded invocations.

use crate::context::MockProcessContext;
use crate::init_context::ServiceInitContext;
use crate::registry::ServiceRegistry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::sync::Arc;
use weir_core::error::{Result, WeirError};
use weir_core::logging::{ComponentLog, LogEntry};
use weir_core::record::{core_attributes, FlowRecord};
use weir_core::relationship::Relationship;
use weir_core::session::ProcessSession;
use weir_core::traits::{ControllerService, Processor};
use weir_core::types::ServiceId;
use weir_core::validation::ValidationResult;

/// Lifecycle of a runner over one component instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// No configuration has been applied yet.
    Unconfigured,
    /// Properties, services, or input were applied; ready to run.
    Configured,
    /// An invocation loop is in flight.
    Running,
    /// The last requested invocation loop finished.
    Completed,
}

/// Enqueues input records, invokes a processor's entry point a bounded
/// number of times, and partitions resulting output records by declared
/// relationship.
///
/// The runner is single-threaded and synchronous: `run` does not return
/// until all requested iterations complete, and one runner must not be
/// shared across parallel test cases. A misconfigured component is never
/// exercised — failing validation refuses the iteration instead.
///
/// # Example
///
/// ```ignore
/// use weir_harness::TestRunner;
///
/// let mut runner = TestRunner::new(MyProcessor::default());
/// runner.set_property("directory", "/in");
/// runner.enqueue(b"payload".to_vec());
/// runner.run()?;
///
/// let out = runner.records_for(&Relationship::success());
/// assert_eq!(out.len(), 1);
/// out[0].assert_content_equals(b"payload")?;
/// ```
pub struct TestRunner {
    processor: Arc<dyn Processor>,
    identifier: String,
    registry: Arc<ServiceRegistry>,
    context: MockProcessContext,
    logger: ComponentLog,
    declared: HashSet<String>,
    pending: VecDeque<FlowRecord>,
    outputs: HashMap<String, Vec<FlowRecord>>,
    state: RunnerState,
    in_flight: bool,
}

impl TestRunner {
    /// Create a runner for one component instance.
    #[must_use]
    pub fn new(processor: impl Processor + 'static) -> Self {
        let processor: Arc<dyn Processor> = Arc::new(processor);
        let identifier = uuid::Uuid::new_v4().to_string();
        let registry = Arc::new(ServiceRegistry::new());
        let logger = ComponentLog::new(identifier.clone(), processor.name());
        let context = MockProcessContext::new(
            Arc::clone(&processor),
            Arc::clone(&registry),
            logger.clone(),
        );
        let declared = processor
            .relationships()
            .iter()
            .map(|r| r.name().to_string())
            .collect();

        Self {
            processor,
            identifier,
            registry,
            context,
            logger,
            declared,
            pending: VecDeque::new(),
            outputs: HashMap::new(),
            state: RunnerState::Unconfigured,
            in_flight: false,
        }
    }

    /// The generated identifier for the component under test.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// The process context the component sees.
    #[must_use]
    pub fn context(&self) -> &MockProcessContext {
        &self.context
    }

    /// The capture logger scoped to the component under test.
    #[must_use]
    pub fn logger(&self) -> &ComponentLog {
        &self.logger
    }

    /// The captured log entries, in invocation order.
    #[must_use]
    pub fn logs(&self) -> Vec<LogEntry> {
        self.logger.entries()
    }

    /// The registry services are resolved from.
    #[must_use]
    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// Set a property value; legal before or between invocation loops.
    /// Returns the previous value if one was present.
    pub fn set_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.touch_config();
        self.context.set_property(name, value)
    }

    /// Register a controller service and run its setup phase.
    ///
    /// The service is initialized with a [`ServiceInitContext`] over the
    /// runner's shared registry, so it can resolve itself and any siblings
    /// registered earlier.
    ///
    /// # Errors
    /// Returns [`WeirError::DuplicateServiceId`] for an identifier already
    /// registered, or [`WeirError::ServiceInitFailure`] when the service's
    /// setup phase fails.
    pub fn add_controller_service(
        &mut self,
        service_id: impl Into<ServiceId>,
        service: Arc<dyn ControllerService>,
    ) -> Result<()> {
        let service_id = service_id.into();
        let init = ServiceInitContext::with_registry(
            Arc::clone(&service),
            service_id.clone(),
            Arc::clone(&self.registry),
        )?;
        service
            .initialize(&init)
            .map_err(|e| WeirError::ServiceInitFailure {
                service_id,
                cause: e.to_string(),
            })?;
        self.touch_config();
        Ok(())
    }

    /// Mark a registered service enabled.
    ///
    /// # Errors
    /// Returns [`WeirError::ServiceNotFound`] for an unknown identifier.
    pub fn enable_controller_service(&mut self, service_id: &ServiceId) -> Result<()> {
        self.registry.set_enabled(service_id, true)
    }

    /// Mark a registered service disabled, simulating an unavailable
    /// dependency.
    ///
    /// # Errors
    /// Returns [`WeirError::ServiceNotFound`] for an unknown identifier.
    pub fn disable_controller_service(&mut self, service_id: &ServiceId) -> Result<()> {
        self.registry.set_enabled(service_id, false)
    }

    /// Append a record with the given content to the pending-input queue.
    /// Does not invoke the component.
    pub fn enqueue(&mut self, content: impl Into<Vec<u8>>) {
        self.touch_config();
        self.pending.push_back(FlowRecord::new(content.into()));
    }

    /// Append a record with content and an initial attribute map.
    pub fn enqueue_with_attributes(
        &mut self,
        content: impl Into<Vec<u8>>,
        attributes: HashMap<String, String>,
    ) {
        self.touch_config();
        self.pending
            .push_back(FlowRecord::with_attributes(content.into(), attributes));
    }

    /// Append a record whose content is read, as literal bytes, from a
    /// file-backed fixture. Sets the `filename` and `path` attributes from
    /// the fixture location.
    ///
    /// # Errors
    /// Returns [`WeirError::FixtureRead`] when the fixture cannot be read.
    pub fn enqueue_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|e| WeirError::FixtureRead {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

        let mut record = FlowRecord::new(content);
        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            record.put_attribute(core_attributes::FILENAME, filename);
        }
        if let Some(parent) = path.parent().and_then(|p| p.to_str()) {
            record.put_attribute(core_attributes::PATH, parent);
        }

        self.touch_config();
        self.pending.push_back(record);
        Ok(())
    }

    /// Number of input records still pending.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.pending.len()
    }

    /// Evaluate the component's configuration rules; an empty result set
    /// signals a fully valid configuration.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationResult> {
        self.context.validate()
    }

    /// Invoke the processing entry point once.
    ///
    /// # Errors
    /// See [`run_iterations`](Self::run_iterations).
    pub fn run(&mut self) -> Result<()> {
        self.run_iterations(1)
    }

    /// Invoke the processing entry point `iterations` times.
    ///
    /// Before each iteration the configuration is validated; any failing
    /// result refuses the iteration without invoking the component. Every
    /// record the component transfers is appended, in emission order, to
    /// its relationship's accumulated output.
    ///
    /// # Errors
    /// - [`WeirError::ConcurrentUse`] when re-entered while in flight.
    /// - [`WeirError::InvalidConfiguration`] when validation fails.
    /// - [`WeirError::UnroutedRecord`] when the component leaves a record
    ///   in limbo.
    /// - Any failure raised by the component itself, unmodified.
    pub fn run_iterations(&mut self, iterations: usize) -> Result<()> {
        if self.in_flight {
            return Err(WeirError::ConcurrentUse);
        }
        self.in_flight = true;
        self.state = RunnerState::Running;

        let result = self.run_loop(iterations);

        self.in_flight = false;
        self.state = RunnerState::Completed;
        result
    }

    fn run_loop(&mut self, iterations: usize) -> Result<()> {
        for iteration in 0..iterations {
            let failures = self.context.validate();
            if !failures.is_empty() {
                tracing::debug!(
                    processor = self.processor.name(),
                    failing = failures.len(),
                    "refusing to invoke misconfigured processor"
                );
                return Err(WeirError::InvalidConfiguration { failures });
            }

            tracing::debug!(
                processor = self.processor.name(),
                iteration,
                queued = self.pending.len(),
                "invoking processor"
            );

            let mut session =
                ProcessSession::new(std::mem::take(&mut self.pending), self.declared.clone());
            self.processor.on_trigger(&self.context, &mut session)?;

            let (transferred, remaining) = session.finish()?;
            self.pending = remaining;
            for record in transferred {
                let relationship = record.relationship().unwrap_or_default().to_string();
                self.outputs.entry(relationship).or_default().push(record);
            }
        }
        Ok(())
    }

    /// The accumulated, emission-ordered output for a relationship across
    /// all iterations so far. Empty if the relationship was never used.
    #[must_use]
    pub fn records_for(&self, relationship: &Relationship) -> &[FlowRecord] {
        self.outputs
            .get(relationship.name())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Invoke the component's shutdown hook.
    pub fn shutdown(&mut self) {
        self.processor.shutdown();
    }

    fn touch_config(&mut self) {
        if self.state != RunnerState::Running {
            self.state = RunnerState::Configured;
        }
    }
}

impl std::fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestRunner")
            .field("processor", &self.processor.name())
            .field("identifier", &self.identifier)
            .field("state", &self.state)
            .field("queued", &self.pending.len())
            .finish()
    }
}
