//! Attachment metadata and payloads

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upload slot an attachment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentSlot {
    /// Chamber of commerce extract (single)
    Visura,
    BusinessPlan,
    OwnSiteScreenshot,
    CompetitorScreenshot,
    ProductImage,
    TeamCv,
    FinancialDocument,
}

impl AttachmentSlot {
    /// Directory name inside the store
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Visura => "visura",
            Self::BusinessPlan => "business_plans",
            Self::OwnSiteScreenshot => "own_site",
            Self::CompetitorScreenshot => "competitor_sites",
            Self::ProductImage => "products",
            Self::TeamCv => "team_cv",
            Self::FinancialDocument => "financial",
        }
    }

    /// Accepted file extensions; `None` accepts anything
    pub fn accepted_extensions(&self) -> Option<&'static [&'static str]> {
        match self {
            Self::Visura => Some(&["pdf"]),
            Self::BusinessPlan => Some(&["pdf", "doc", "docx"]),
            Self::OwnSiteScreenshot | Self::CompetitorScreenshot | Self::ProductImage => {
                Some(&["png", "jpg", "jpeg"])
            }
            Self::TeamCv | Self::FinancialDocument => None,
        }
    }

    pub fn accepts(&self, filename: &str) -> bool {
        let Some(allowed) = self.accepted_extensions() else {
            return true;
        };
        std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl fmt::Display for AttachmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Metadata the form keeps for an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    /// Store-relative key used to load the bytes back
    pub key: String,
}

/// A loaded attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
