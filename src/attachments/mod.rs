//! Attachment storage collaborator
//!
//! The form record only keeps [`AttachmentRef`] metadata; the bytes live in an
//! [`AttachmentStore`] and are loaded on demand.

mod fs_store;
mod store;
mod types;

pub use fs_store::FsAttachmentStore;
pub use store::{AttachmentError, AttachmentStore};
pub use types::{Attachment, AttachmentRef, AttachmentSlot};

#[cfg(test)]
pub use store::MockAttachmentStore;
