//! Core abstractions for components and the runtime surface they depend on.

mod context;
mod processor;
mod service;

pub use context::ProcessContext;
pub use processor::Processor;
pub use service::{ControllerService, ServiceInitialization, ServiceLookup};
