//! Shared fixture components for harness integration tests.

#![allow(dead_code)]

use regex::Regex;
use std::any::Any;
use std::collections::BTreeMap;
use weir_core::error::{Result, WeirError};
use weir_core::property::{validators, PropertyDescriptor};
use weir_core::record::core_attributes;
use weir_core::relationship::Relationship;
use weir_core::session::ProcessSession;
use weir_core::traits::{ControllerService, ProcessContext, Processor, ServiceInitialization};
use weir_core::types::ServiceId;
use weir_core::validation::ValidationResult;

/// Forwards every queued record to "success" unmodified.
pub struct Passthrough;

impl Processor for Passthrough {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn relationships(&self) -> Vec<Relationship> {
        vec![Relationship::success()]
    }

    fn properties(&self) -> Vec<PropertyDescriptor> {
        Vec::new()
    }

    fn on_trigger(
        &self,
        _context: &dyn ProcessContext,
        session: &mut ProcessSession,
    ) -> Result<()> {
        while let Some(record) = session.take() {
            session.transfer(record, &Relationship::success())?;
        }
        Ok(())
    }
}

/// Parse a file-age value like "10 secs" or "5000 millis" into milliseconds.
///
/// Deliberately small: the harness does no property-type parsing, so test
/// components parse their own values.
pub fn parse_age_millis(value: &str) -> Option<u64> {
    let mut parts = value.split_whitespace();
    let amount: u64 = parts.next()?.parse().ok()?;
    let unit = parts.next()?;
    match unit {
        "millis" => Some(amount),
        "secs" | "sec" => Some(amount * 1_000),
        "mins" | "min" => Some(amount * 60_000),
        _ => None,
    }
}

/// A source-style directory-retrieval fixture in the shape of a real
/// file-fetching component: a required directory, a filename filter, a
/// compression codec restricted to an allowed set, and a min/max age pair
/// validated as one combined rule.
pub struct FetchDirectory;

impl FetchDirectory {
    pub const DIRECTORY: &'static str = "directory";
    pub const FILE_FILTER_REGEX: &'static str = "file-filter-regex";
    pub const COMPRESSION_CODEC: &'static str = "compression-codec";
    pub const MIN_FILE_AGE: &'static str = "min-file-age";
    pub const MAX_FILE_AGE: &'static str = "max-file-age";
}

impl Processor for FetchDirectory {
    fn name(&self) -> &str {
        "fetch-directory"
    }

    fn relationships(&self) -> Vec<Relationship> {
        vec![Relationship::success()]
    }

    fn properties(&self) -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new(Self::DIRECTORY)
                .display_name("Directory")
                .description("Directory to retrieve files from")
                .required(true),
            PropertyDescriptor::new(Self::FILE_FILTER_REGEX)
                .display_name("File Filter Regex")
                .description("Only filenames matching this pattern are retrieved")
                .default_value(".*")
                .validator(validators::regular_expression()),
            PropertyDescriptor::new(Self::COMPRESSION_CODEC)
                .display_name("Compression Codec")
                .allowed_values(["none", "gzip"])
                .default_value("none"),
            PropertyDescriptor::new(Self::MIN_FILE_AGE)
                .display_name("Minimum File Age"),
            PropertyDescriptor::new(Self::MAX_FILE_AGE)
                .display_name("Maximum File Age"),
        ]
    }

    fn validate_config(&self, context: &dyn ProcessContext) -> Vec<ValidationResult> {
        let min = context
            .property(Self::MIN_FILE_AGE)
            .as_deref()
            .and_then(parse_age_millis);
        let max = context
            .property(Self::MAX_FILE_AGE)
            .as_deref()
            .and_then(parse_age_millis);

        // One combined rule even though two properties participate.
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return vec![ValidationResult::invalid(
                    "File Age",
                    None,
                    "Minimum File Age cannot be greater than Maximum File Age",
                )];
            }
        }
        Vec::new()
    }

    fn on_trigger(
        &self,
        context: &dyn ProcessContext,
        session: &mut ProcessSession,
    ) -> Result<()> {
        let directory = context
            .property(Self::DIRECTORY)
            .ok_or_else(|| WeirError::ProcessorFailure {
                processor: self.name().to_string(),
                cause: "directory property resolved to nothing".to_string(),
            })?;
        let pattern = context
            .property(Self::FILE_FILTER_REGEX)
            .unwrap_or_else(|| ".*".to_string());
        let filter = Regex::new(&pattern).map_err(|e| WeirError::ProcessorFailure {
            processor: self.name().to_string(),
            cause: format!("bad filter pattern: {e}"),
        })?;

        // Sorted for deterministic emission order across platforms.
        let mut files = BTreeMap::new();
        let entries = std::fs::read_dir(&directory).map_err(|e| WeirError::ProcessorFailure {
            processor: self.name().to_string(),
            cause: format!("cannot list {directory}: {e}"),
        })?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()).map(str::to_string)
            else {
                continue;
            };
            if !filter.is_match(&filename) {
                continue;
            }
            let content = std::fs::read(&path).map_err(|e| WeirError::ProcessorFailure {
                processor: self.name().to_string(),
                cause: format!("cannot read {}: {e}", path.display()),
            })?;
            files.insert(filename, content);
        }

        for (filename, content) in files {
            let mut record = session.create(content);
            record.put_attribute(core_attributes::FILENAME, filename);
            record.put_attribute(core_attributes::PATH, directory.clone());
            session.transfer(record, &Relationship::success())?;
        }
        Ok(())
    }
}

/// A keyed lookup service fixture.
pub struct KeyLookupService {
    entries: BTreeMap<String, String>,
}

impl KeyLookupService {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl ControllerService for KeyLookupService {
    fn initialize(&self, context: &dyn ServiceInitialization) -> Result<()> {
        // A service frequently resolves itself during setup; the context
        // guarantees that works before any other registration.
        context.lookup().resolve(context.identifier())?;
        context
            .logger()
            .info(format!("lookup service ready with {} entries", self.entries.len()));
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Enriches each record with an attribute resolved through a controller
/// service, routing records with no match to "failure".
pub struct EnrichFromService;

impl EnrichFromService {
    pub const LOOKUP_SERVICE: &'static str = "lookup-service";
}

impl Processor for EnrichFromService {
    fn name(&self) -> &str {
        "enrich-from-service"
    }

    fn relationships(&self) -> Vec<Relationship> {
        vec![Relationship::success(), Relationship::failure()]
    }

    fn properties(&self) -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new(Self::LOOKUP_SERVICE)
                .display_name("Lookup Service")
                .description("Identifier of the key lookup service")
                .required(true),
        ]
    }

    fn on_trigger(
        &self,
        context: &dyn ProcessContext,
        session: &mut ProcessSession,
    ) -> Result<()> {
        let service_id = context
            .property(Self::LOOKUP_SERVICE)
            .map(ServiceId::new)
            .ok_or_else(|| WeirError::ProcessorFailure {
                processor: self.name().to_string(),
                cause: "lookup service not configured".to_string(),
            })?;
        let service = context.services().resolve(&service_id)?;
        let lookup = service
            .as_any()
            .downcast_ref::<KeyLookupService>()
            .ok_or_else(|| WeirError::ProcessorFailure {
                processor: self.name().to_string(),
                cause: format!("'{service_id}' is not a key lookup service"),
            })?;

        while let Some(mut record) = session.take() {
            let key = String::from_utf8_lossy(record.content()).to_string();
            match lookup.get(key.trim()) {
                Some(value) => {
                    record.put_attribute("resolved", value);
                    session.transfer(record, &Relationship::success())?;
                }
                None => session.transfer(record, &Relationship::failure())?,
            }
        }
        Ok(())
    }
}

/// Service fixture holding no state; used for identity assertions.
pub struct MarkerService;

impl ControllerService for MarkerService {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
