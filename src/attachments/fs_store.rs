//! Filesystem-backed attachment store

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use super::store::{AttachmentError, AttachmentStore};
use super::types::{Attachment, AttachmentRef, AttachmentSlot};

/// Stores uploads as `<root>/<slot>/<uuid>-<filename>`
#[derive(Debug, Clone)]
pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to a path, refusing anything that escapes the root
    fn resolve(&self, key: &str) -> Result<PathBuf, AttachmentError> {
        let relative = Path::new(key);
        let safe = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AttachmentError::InvalidName(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

/// Keep only the final path component of an uploaded filename
fn sanitize_filename(filename: &str) -> Option<&str> {
    let name = Path::new(filename).file_name()?.to_str()?;
    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> AttachmentError + '_ {
    move |source| AttachmentError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl AttachmentStore for FsAttachmentStore {
    async fn put(
        &self,
        slot: AttachmentSlot,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<AttachmentRef, AttachmentError> {
        let name = sanitize_filename(filename)
            .ok_or_else(|| AttachmentError::InvalidName(filename.to_string()))?;
        if !slot.accepts(name) {
            return Err(AttachmentError::UnsupportedType {
                filename: name.to_string(),
                slot,
            });
        }

        let key = format!("{}/{}-{}", slot.dir_name(), Uuid::new_v4(), name);
        let path = self.resolve(&key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(io_error(parent))?;
        }
        let size = bytes.len() as u64;
        fs::write(&path, bytes).await.map_err(io_error(&path))?;

        let mime_type = mime_guess::from_path(name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        tracing::debug!(%slot, %key, size, "stored attachment");

        Ok(AttachmentRef {
            filename: name.to_string(),
            mime_type,
            size,
            key,
        })
    }

    async fn load(&self, reference: &AttachmentRef) -> Result<Attachment, AttachmentError> {
        let path = self.resolve(&reference.key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AttachmentError::NotFound(reference.key.clone()))
            }
            Err(e) => return Err(io_error(&path)(e)),
        };
        Ok(Attachment {
            filename: reference.filename.clone(),
            mime_type: reference.mime_type.clone(),
            bytes,
        })
    }

    async fn exists(&self, reference: &AttachmentRef) -> bool {
        match self.resolve(&reference.key) {
            Ok(path) => fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn remove(&self, reference: &AttachmentRef) -> Result<(), AttachmentError> {
        let path = self.resolve(&reference.key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AttachmentError::NotFound(reference.key.clone()))
            }
            Err(e) => Err(io_error(&path)(e)),
        }
    }
}
