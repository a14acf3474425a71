//! Export document produced on submit

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::field::{CompanyStatus, LegalForm};
use super::record::FormRecord;
use crate::error::FormError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInfoExport {
    pub company_name: String,
    pub bp_motivation: String,
    pub legal_form: LegalForm,
    pub vat_number: String,
    pub share_capital: f64,
    pub email: String,
    pub status: CompanyStatus,
    pub activity_description: String,
    pub company_context: String,
    /// Absent for companies that are still to be created
    pub company_history: Option<String>,
    pub company_goals: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductServiceExport {
    pub product_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionExport {
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialExport {
    /// Keyed by plan year, starting at 1
    pub projections: BTreeMap<u32, ProjectionExport>,
    /// Filenames of the attached financial documents
    pub documents: Vec<String>,
}

/// The structured business plan handed to the user on submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub general_info: GeneralInfoExport,
    pub product_service: ProductServiceExport,
    pub financial: FinancialExport,
}

impl ExportDocument {
    /// Pretty-printed JSON with fields in declaration order and years ascending
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// `business_plan_<company_name>.json`, with path separators replaced
    pub fn file_name(&self) -> String {
        let company: String = self
            .general_info
            .company_name
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!("business_plan_{company}.json")
    }
}

/// A record whose required fields were all present when it was submitted
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRecord<'a> {
    record: &'a FormRecord,
}

impl<'a> ValidatedRecord<'a> {
    pub fn record(&self) -> &'a FormRecord {
        self.record
    }

    /// Assemble the export document
    pub fn export(&self) -> ExportDocument {
        let record = self.record;
        let general = &record.general;
        let product = record.products().first();

        let projections = record
            .financial_summary()
            .years
            .into_iter()
            .map(|y| {
                (
                    y.year,
                    ProjectionExport {
                        revenue: y.revenue,
                        cost: y.cost,
                        profit: y.profit,
                    },
                )
            })
            .collect();

        ExportDocument {
            general_info: GeneralInfoExport {
                company_name: general.company_name.clone(),
                bp_motivation: general.bp_motivation.clone(),
                legal_form: general.legal_form,
                vat_number: general.vat_number.clone(),
                share_capital: general.share_capital,
                email: general.email.clone(),
                status: general.status,
                activity_description: general.activity_description.clone(),
                company_context: general.company_context.clone(),
                company_history: match general.status {
                    CompanyStatus::Existing => Some(general.company_history.clone()),
                    CompanyStatus::ToBeCreated => None,
                },
                company_goals: general.company_goals.clone(),
            },
            product_service: ProductServiceExport {
                product_name: product.map(|p| p.name.clone()).unwrap_or_default(),
                description: product.map(|p| p.description.clone()).unwrap_or_default(),
            },
            financial: FinancialExport {
                projections,
                documents: record
                    .attachments
                    .financial_documents
                    .iter()
                    .map(|d| d.filename.clone())
                    .collect(),
            },
        }
    }
}

impl FormRecord {
    /// Validate and, if nothing required is missing, unlock the export
    pub fn submit(&self) -> Result<ValidatedRecord<'_>, FormError> {
        let missing = self.validate_for_submission();
        if !missing.is_empty() {
            tracing::info!(missing = missing.len(), "submission blocked");
            return Err(FormError::PreconditionViolation { missing });
        }
        Ok(ValidatedRecord { record: self })
    }

    /// Shortcut for `submit()?.export()`
    pub fn export(&self) -> Result<ExportDocument, FormError> {
        let document = self.submit()?.export();
        tracing::info!(file = %document.file_name(), "export produced");
        Ok(document)
    }
}
