//! Trait abstraction for attachment storage to enable mocking in tests

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use super::types::{Attachment, AttachmentRef, AttachmentSlot};

#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("{filename} is not an accepted file type for {slot}")]
    UnsupportedType {
        filename: String,
        slot: AttachmentSlot,
    },

    #[error("invalid attachment name `{0}`")]
    InvalidName(String),

    #[error("attachment `{0}` not found")]
    NotFound(String),

    #[error("attachment I/O failed at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Storage for uploaded files, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Store uploaded bytes and return the metadata the form keeps
    async fn put(
        &self,
        slot: AttachmentSlot,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachmentRef, AttachmentError>;

    /// Load the bytes behind a reference
    async fn load(&self, reference: &AttachmentRef) -> Result<Attachment, AttachmentError>;

    /// Check whether a reference still resolves
    async fn exists(&self, reference: &AttachmentRef) -> bool;

    /// Delete the stored bytes
    async fn remove(&self, reference: &AttachmentRef) -> Result<(), AttachmentError>;
}
