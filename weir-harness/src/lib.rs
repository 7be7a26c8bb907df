//! Weir mock execution harness.
//!
//! Lets a pluggable dataflow component (a processor or a controller
//! service) be exercised in complete isolation from a live orchestration
//! runtime, while still obeying the exact contracts that runtime would
//! impose at execution time: identifier resolution for dependent services,
//! scoped logging, property validation, and record lifecycle semantics.
//!
//! # Overview
//!
//! A test configures the [`ServiceRegistry`] and the property context,
//! enqueues zero or more input records, invokes the [`TestRunner`], and
//! then inspects partitioned output and captured log/validation state.
//!
//! # Example
//!
//! ```ignore
//! use weir_core::prelude::*;
//! use weir_harness::TestRunner;
//!
//! let mut runner = TestRunner::new(FetchDirectory::default());
//! runner.set_property("directory", "/data/in");
//! runner.run()?;
//!
//! let fetched = runner.records_for(&Relationship::success());
//! assert!(!fetched.is_empty());
//! fetched[0].assert_attribute_exists("filename")?;
//! ```
//!
//! The harness is single-threaded and synchronous by design: one test
//! drives one component instance through a deterministic sequence of
//! calls. Do not share one harness instance across parallel test cases.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod context;
mod init_context;
mod registry;
mod runner;

pub use context::MockProcessContext;
pub use init_context::ServiceInitContext;
pub use registry::ServiceRegistry;
pub use runner::{RunnerState, TestRunner};
