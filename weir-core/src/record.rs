//! In-memory representation of a unit of data flowing through a component.

use crate::error::{Result, WeirError};
use crate::types::RecordId;
use bytes::Bytes;
use std::collections::HashMap;

/// Attribute keys the harness and stock components agree on.
pub mod core_attributes {
    /// The record's filename.
    pub const FILENAME: &str = "filename";
    /// The directory path the record was retrieved from.
    pub const PATH: &str = "path";
}

/// One unit of data (attributes + content) flowing through a component.
///
/// Attributes are append/overwrite only and are never deleted implicitly.
/// Content is immutable once set: there is no content mutator, and the
/// backing [`Bytes`] buffer is shared cheaply on clone. The relationship
/// tag is set exactly once, when the record is transferred.
#[derive(Debug, Clone)]
pub struct FlowRecord {
    id: RecordId,
    attributes: HashMap<String, String>,
    content: Bytes,
    relationship: Option<String>,
}

impl FlowRecord {
    /// Create a record with the given content and no attributes.
    #[must_use]
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self {
            id: RecordId::new(),
            attributes: HashMap::new(),
            content: content.into(),
            relationship: None,
        }
    }

    /// Create a record with content and an initial attribute map.
    #[must_use]
    pub fn with_attributes(
        content: impl Into<Bytes>,
        attributes: HashMap<String, String>,
    ) -> Self {
        Self {
            id: RecordId::new(),
            attributes,
            content: content.into(),
            relationship: None,
        }
    }

    /// Get the record's identity.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Get an attribute value, or `None` if the key was never set.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Get the full attribute map.
    #[must_use]
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    /// Set an attribute, overwriting any prior value for the key.
    /// Returns the previous value if one was present.
    pub fn put_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Get the record content.
    #[must_use]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Get the content length in bytes.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Get the relationship this record was routed to, if it has been
    /// transferred.
    #[must_use]
    pub fn relationship(&self) -> Option<&str> {
        self.relationship.as_deref()
    }

    /// Tag the record with the relationship it was routed to.
    /// Called exactly once, by the session performing the transfer.
    pub(crate) fn set_relationship(&mut self, name: impl Into<String>) {
        self.relationship = Some(name.into());
    }

    /// Assert that the record content equals the expected bytes exactly.
    ///
    /// Comparison is byte-for-byte with no normalization. On mismatch the
    /// error carries the offset of the first differing byte (the shorter
    /// length, when one content is a prefix of the other).
    ///
    /// # Errors
    /// Returns [`WeirError::ContentMismatch`] when content differs.
    pub fn assert_content_equals(&self, expected: impl AsRef<[u8]>) -> Result<()> {
        let expected = expected.as_ref();
        let actual = self.content.as_ref();
        if expected == actual {
            return Ok(());
        }
        let offset = expected
            .iter()
            .zip(actual.iter())
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| expected.len().min(actual.len()));
        Err(WeirError::ContentMismatch {
            offset,
            expected_len: expected.len(),
            actual_len: actual.len(),
        })
    }

    /// Assert that an attribute is present and equals the expected value
    /// exactly.
    ///
    /// # Errors
    /// Returns [`WeirError::AttributeMismatch`] when the attribute is
    /// missing or differs.
    pub fn assert_attribute_equals(&self, key: &str, expected: &str) -> Result<()> {
        match self.attribute(key) {
            Some(actual) if actual == expected => Ok(()),
            actual => Err(WeirError::AttributeMismatch {
                key: key.to_string(),
                expected: expected.to_string(),
                actual: actual.map(str::to_string),
            }),
        }
    }

    /// Assert that an attribute is present, regardless of its value.
    ///
    /// # Errors
    /// Returns [`WeirError::AttributeMismatch`] when the attribute is
    /// missing.
    pub fn assert_attribute_exists(&self, key: &str) -> Result<()> {
        if self.attributes.contains_key(key) {
            Ok(())
        } else {
            Err(WeirError::AttributeMismatch {
                key: key.to_string(),
                expected: "<present>".to_string(),
                actual: None,
            })
        }
    }
}
