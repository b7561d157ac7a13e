use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file as delivered by the HTTP boundary, before it is stored
#[derive(Debug, Clone)]
pub struct UploadPayload {
    /// Name supplied by the client; may contain anything
    pub original_name: String,
    pub content: Bytes,
}

impl UploadPayload {
    pub fn new(original_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            original_name: original_name.into(),
            content: content.into(),
        }
    }

    /// "No file chosen": browsers still submit the field, with no content
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A stored file: the client's name paired with the server-generated one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub original_name: String,
    pub stored_name: String,
}
