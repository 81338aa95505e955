//! Observable events

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Registry preparation
    RegistryPrepareBegin,
    RegistryPrepareComplete,
    /// Preparation failed; the registry is unusable
    RegistryPrepareFailed,

    // Query execution
    QueryReceived,
    QueryExecuted,
    QueryRejected,
    /// A primary row was dropped because its join lookup found nothing
    JoinMiss,

    // Metadata
    MetadataRead,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::RegistryPrepareBegin => "REGISTRY_PREPARE_BEGIN",
            Event::RegistryPrepareComplete => "REGISTRY_PREPARE_COMPLETE",
            Event::RegistryPrepareFailed => "REGISTRY_PREPARE_FAILED",
            Event::QueryReceived => "QUERY_BEGIN",
            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::JoinMiss => "JOIN_MISS",
            Event::MetadataRead => "METADATA_READ",
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::RegistryPrepareFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
