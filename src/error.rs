use thiserror::Error;

use crate::host::BufferId;

#[derive(Debug, Error)]
pub enum BufferSourceError {
    #[error("Invalid keyword pattern for filetype '{filetype}': {source}")]
    InvalidPattern {
        filetype: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reported by a host while answering a query about one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Unknown buffer {0}")]
    UnknownBuffer(BufferId),

    #[error("Host call failed: {0}")]
    Call(String),
}
