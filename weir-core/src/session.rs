//! Record lifecycle for one component invocation.

use crate::error::{Result, WeirError};
use crate::record::FlowRecord;
use crate::relationship::Relationship;
use crate::types::RecordId;
use std::collections::{HashSet, VecDeque};

/// The record-handling surface a component sees during one invocation.
///
/// The component takes pending input records, may create new records, and
/// must transfer every record it took or created to one of its declared
/// relationships. Records still queued (never taken) simply remain pending
/// for the next invocation; records taken or created but never transferred
/// are a contract violation surfaced when the invocation ends.
#[derive(Debug)]
pub struct ProcessSession {
    input: VecDeque<FlowRecord>,
    declared: HashSet<String>,
    outstanding: Vec<RecordId>,
    transferred: Vec<FlowRecord>,
}

impl ProcessSession {
    /// Build a session over the pending-input queue for one invocation.
    /// `declared` is the set of relationship names the component declared.
    #[must_use]
    pub fn new(input: VecDeque<FlowRecord>, declared: HashSet<String>) -> Self {
        Self {
            input,
            declared,
            outstanding: Vec::new(),
            transferred: Vec::new(),
        }
    }

    /// Take the next pending input record, or `None` for a source-style
    /// component with nothing queued.
    pub fn take(&mut self) -> Option<FlowRecord> {
        let record = self.input.pop_front()?;
        self.outstanding.push(record.id());
        Some(record)
    }

    /// Number of input records still pending.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.input.len()
    }

    /// Create a new record with the given content and no attributes.
    /// The record must be transferred before the invocation ends.
    pub fn create(&mut self, content: impl Into<bytes::Bytes>) -> FlowRecord {
        let record = FlowRecord::new(content);
        self.outstanding.push(record.id());
        record
    }

    /// Create a new record with content and an initial attribute map.
    pub fn create_with_attributes(
        &mut self,
        content: impl Into<bytes::Bytes>,
        attributes: std::collections::HashMap<String, String>,
    ) -> FlowRecord {
        let record = FlowRecord::with_attributes(content, attributes);
        self.outstanding.push(record.id());
        record
    }

    /// Route a record to a declared relationship.
    ///
    /// Tags the record, settles its lifecycle obligation, and appends it to
    /// the relationship's output sequence in emission order.
    ///
    /// # Errors
    /// Returns [`WeirError::UndeclaredRelationship`] when the component
    /// never declared the target relationship.
    pub fn transfer(&mut self, mut record: FlowRecord, relationship: &Relationship) -> Result<()> {
        if !self.declared.contains(relationship.name()) {
            return Err(WeirError::UndeclaredRelationship {
                relationship: relationship.name().to_string(),
            });
        }
        self.outstanding.retain(|id| *id != record.id());
        record.set_relationship(relationship.name());
        self.transferred.push(record);
        Ok(())
    }

    /// Records transferred so far, in emission order.
    #[must_use]
    pub fn transferred(&self) -> &[FlowRecord] {
        &self.transferred
    }

    /// Close the invocation: yields the transferred records (emission order)
    /// and the input records left pending for the next invocation.
    ///
    /// # Errors
    /// Returns [`WeirError::UnroutedRecord`] when a record obtained or
    /// created during the invocation was never transferred — a real runtime
    /// would stall that record in limbo.
    pub fn finish(self) -> Result<(Vec<FlowRecord>, VecDeque<FlowRecord>)> {
        if let Some(first) = self.outstanding.first() {
            return Err(WeirError::UnroutedRecord {
                record_id: *first,
                count: self.outstanding.len(),
            });
        }
        Ok((self.transferred, self.input))
    }
}
