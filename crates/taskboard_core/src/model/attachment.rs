//! File attachment encoding.
//!
//! # Responsibility
//! - Encode a user-selected file into a text-safe record that fits the
//!   JSON snapshot.
//!
//! # Invariants
//! - `size` is the decoded byte length, not the base64 length.
//! - `content` is standard-alphabet, padded base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// File attached to a task. Opaque to the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFile {
    pub name: String,
    /// MIME type; serialized as `type` for layout compatibility.
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
    #[serde(rename = "base64")]
    pub content: String,
}

impl TaskFile {
    /// Encodes raw file bytes.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            content: STANDARD.encode(bytes),
        }
    }

    /// Decodes the stored content back to raw bytes.
    ///
    /// # Errors
    /// - Returns a decode error when the stored content is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.content.as_bytes())
    }
}
