//! Business plan intake form
//!
//! Typed record of a guided business plan questionnaire with completion
//! tracking, submission checks and a structured JSON export. Rendering is left
//! to the caller; every mutation is a plain method on [`FormRecord`].

pub mod attachments;
pub mod config;
pub mod error;
pub mod state;

pub use error::FormError;
pub use state::{ExportDocument, FormRecord, Session};
