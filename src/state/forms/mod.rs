//! Form domain layer
//!
//! Typed record of a business plan session: scalar answers grouped by
//! section, repeatable entries, progress, submission checks and export.

mod entries;
mod export;
mod field;
mod financials;
mod progress;
mod record;
mod validation;

pub use entries::{
    Competitor, Entries, EntryField, Product, Repeatable, TeamMember, YearProjection,
};
pub use export::{
    ExportDocument, FinancialExport, GeneralInfoExport, ProductServiceExport, ProjectionExport,
    ValidatedRecord,
};
pub use field::{CompanyStatus, FieldKind, FieldValue, LegalForm, ScalarField};
pub use financials::{FinancialSummary, ProjectionSignal, Totals, YearOutcome};
pub use progress::{ProgressIndicator, Section, SectionStatus};
pub use record::{
    Attachments, Financials, FormRecord, GeneralInfo, MarketAnalysis, OnlineResources,
    ProductService, Strategy, Team, DEFAULT_DURATION_YEARS, MAX_DURATION_YEARS,
    MIN_DURATION_YEARS,
};
pub use validation::{FieldWarning, RequiredField};
