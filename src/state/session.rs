//! One user's form session

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::forms::FormRecord;
use crate::attachments::{AttachmentRef, AttachmentSlot, AttachmentStore};
use crate::error::FormError;

/// Owns the form record of a single user session
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    record: FormRecord,
}

impl Session {
    pub fn new() -> Self {
        Self::start(FormRecord::new())
    }

    /// Resume from a saved draft; missing parts are filled in and drafts with
    /// invalid amounts are refused
    pub fn from_record(mut record: FormRecord) -> Result<Self, FormError> {
        record.initialize()?;
        Ok(Self::start(record))
    }

    fn start(record: FormRecord) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            record,
        };
        tracing::info!(session = %session.id, "session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut FormRecord {
        &mut self.record
    }

    pub fn into_record(self) -> FormRecord {
        self.record
    }

    /// Store an uploaded document and record its reference
    pub async fn upload(
        &mut self,
        store: &dyn AttachmentStore,
        slot: AttachmentSlot,
        filename: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<AttachmentRef> {
        let reference = store.put(slot, filename, bytes).await?;
        match self.record.attach(slot, reference.clone()) {
            Ok(displaced) => {
                if let Some(old) = displaced {
                    self.discard(store, &old).await;
                }
            }
            Err(err) => {
                // keep the store consistent with the record
                self.discard(store, &reference).await;
                return Err(err.into());
            }
        }
        tracing::info!(session = %self.id, %slot, file = %reference.filename, "attachment uploaded");
        Ok(reference)
    }

    /// Store a product image and set it on the product at `index`
    pub async fn upload_product_image(
        &mut self,
        store: &dyn AttachmentStore,
        index: usize,
        filename: &str,
        bytes: Vec<u8>,
    ) -> anyhow::Result<AttachmentRef> {
        let reference = store
            .put(AttachmentSlot::ProductImage, filename, bytes)
            .await?;
        match self
            .record
            .set_product_image(index, Some(reference.clone()))
        {
            Ok(Some(old)) => self.discard(store, &old).await,
            Ok(None) => {}
            Err(err) => {
                self.discard(store, &reference).await;
                return Err(err.into());
            }
        }
        Ok(reference)
    }

    /// Delete bytes the record no longer points at
    async fn discard(&self, store: &dyn AttachmentStore, reference: &AttachmentRef) {
        if let Err(err) = store.remove(reference).await {
            tracing::warn!(session = %self.id, key = %reference.key, %err, "orphaned attachment left in store");
        }
    }

    /// References that no longer resolve in the store
    pub async fn missing_attachments(&self, store: &dyn AttachmentStore) -> Vec<AttachmentRef> {
        let mut missing = Vec::new();
        for reference in self.record.attachment_refs() {
            if !store.exists(reference).await {
                tracing::warn!(session = %self.id, key = %reference.key, "attachment missing from store");
                missing.push(reference.clone());
            }
        }
        missing
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
