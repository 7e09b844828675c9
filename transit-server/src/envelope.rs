//! Tool response envelope.
//!
//! Every tool returns exactly one of two shapes:
//!
//! ```json
//! {"status": "success", "data": ...}
//! {"status": "error", "reason": "..."}
//! ```
//!
//! Tools in this crate always set `reason`; an envelope whose `reason` is
//! `null` still deserializes.

use serde::{Deserialize, Serialize};

/// Tagged success/error result returned by every tool operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    /// The operation produced a payload.
    Success { data: T },
    /// The operation failed; `reason` is a short human-readable explanation.
    Error { reason: Option<String> },
}

impl<T> Envelope<T> {
    /// Wrap a payload as a successful result.
    pub fn success(data: T) -> Self {
        Envelope::Success { data }
    }

    /// Build an error with the given reason.
    pub fn error(reason: impl Into<String>) -> Self {
        Envelope::Error {
            reason: Some(reason.into()),
        }
    }
}
