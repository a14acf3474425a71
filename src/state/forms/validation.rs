//! Submission checks

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::{is_filled, FormRecord};

/// Fields that must be filled before the plan can be exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    CompanyName,
    BpMotivation,
    ActivityDescription,
    ProductName,
    TargetMarket,
    MarketingStrategy,
    OperationalPlan,
    DistributionChannels,
    FounderName,
    FounderRole,
    TeamExperience,
    /// Corporate entities only
    VatNumber,
    /// Corporate entities only, must be above zero
    ShareCapital,
}

impl RequiredField {
    /// Always required, in the order they are reported
    pub const BASE: [RequiredField; 11] = [
        Self::CompanyName,
        Self::BpMotivation,
        Self::ActivityDescription,
        Self::ProductName,
        Self::TargetMarket,
        Self::MarketingStrategy,
        Self::OperationalPlan,
        Self::DistributionChannels,
        Self::FounderName,
        Self::FounderRole,
        Self::TeamExperience,
    ];

    pub const CORPORATE: [RequiredField; 2] = [Self::VatNumber, Self::ShareCapital];

    pub fn key(&self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::BpMotivation => "bp_motivation",
            Self::ActivityDescription => "activity_description",
            Self::ProductName => "product_name",
            Self::TargetMarket => "target_market",
            Self::MarketingStrategy => "marketing_strategy",
            Self::OperationalPlan => "operational_plan",
            Self::DistributionChannels => "distribution_channels",
            Self::FounderName => "founder_name",
            Self::FounderRole => "founder_role",
            Self::TeamExperience => "team_experience",
            Self::VatNumber => "vat_number",
            Self::ShareCapital => "share_capital",
        }
    }

    fn is_satisfied(&self, record: &FormRecord) -> bool {
        match self {
            Self::CompanyName => is_filled(&record.general.company_name),
            Self::BpMotivation => is_filled(&record.general.bp_motivation),
            Self::ActivityDescription => is_filled(&record.general.activity_description),
            Self::ProductName => is_filled(record.primary_product_name()),
            Self::TargetMarket => is_filled(&record.market.target_market),
            Self::MarketingStrategy => is_filled(&record.strategy.marketing_strategy),
            Self::OperationalPlan => is_filled(&record.strategy.operational_plan),
            Self::DistributionChannels => is_filled(&record.strategy.distribution_channels),
            Self::FounderName => is_filled(&record.team.founder_name),
            Self::FounderRole => is_filled(&record.team.founder_role),
            Self::TeamExperience => is_filled(&record.team.experience),
            Self::VatNumber => is_filled(&record.general.vat_number),
            Self::ShareCapital => record.general.share_capital > 0.0,
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Advisory format problem; never blocks submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldWarning {
    EmailMissingAt,
    VatNumberFormat,
}

impl FieldWarning {
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmailMissingAt => "enter a valid email address",
            Self::VatNumberFormat => "the VAT number must be exactly 11 digits",
        }
    }
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl FormRecord {
    /// Required fields that are still blank; empty means the plan may be exported
    pub fn validate_for_submission(&self) -> Vec<RequiredField> {
        let corporate = self
            .general
            .legal_form
            .is_corporate()
            .then_some(RequiredField::CORPORATE)
            .into_iter()
            .flatten();

        RequiredField::BASE
            .into_iter()
            .chain(corporate)
            .filter(|field| !field.is_satisfied(self))
            .collect()
    }

    /// Format checks on optional fields that hold a value
    pub fn field_warnings(&self) -> Vec<FieldWarning> {
        let mut warnings = Vec::new();
        let email = self.general.email.trim();
        if !email.is_empty() && !email.contains('@') {
            warnings.push(FieldWarning::EmailMissingAt);
        }
        let vat = self.general.vat_number.trim();
        if !vat.is_empty() && (vat.len() != 11 || !vat.chars().all(|c| c.is_ascii_digit())) {
            warnings.push(FieldWarning::VatNumberFormat);
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::entries::{EntryField, Repeatable};
    use crate::state::forms::field::{LegalForm, ScalarField};

    fn complete_record() -> FormRecord {
        let mut record = FormRecord::new();
        for (field, value) in [
            (ScalarField::CompanyName, "Acme Srl"),
            (ScalarField::BpMotivation, "Seed funding"),
            (ScalarField::ActivityDescription, "Consulting"),
            (ScalarField::TargetMarket, "SMEs"),
            (ScalarField::MarketingStrategy, "Digital"),
            (ScalarField::OperationalPlan, "Remote-first"),
            (ScalarField::DistributionChannels, "Online"),
            (ScalarField::FounderName, "Jane Doe"),
            (ScalarField::FounderRole, "CEO"),
            (ScalarField::TeamExperience, "Ten years in consulting"),
        ] {
            record.set_field(field, value).unwrap();
        }
        record
            .set_entry_field(Repeatable::Products, 0, EntryField::Name, "ProjectZen")
            .unwrap();
        record
    }

    #[test]
    fn test_empty_record_misses_every_base_field() {
        let record = FormRecord::new();
        assert_eq!(record.validate_for_submission(), RequiredField::BASE.to_vec());
    }

    #[test]
    fn test_complete_record_passes() {
        assert!(complete_record().validate_for_submission().is_empty());
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let mut record = complete_record();
        record.set_field(ScalarField::FounderRole, "  ").unwrap();
        assert_eq!(
            record.validate_for_submission(),
            vec![RequiredField::FounderRole]
        );
    }

    #[test]
    fn test_corporation_requires_vat_and_capital() {
        let mut record = complete_record();
        record
            .set_field(ScalarField::LegalForm, LegalForm::Corporation)
            .unwrap();
        assert_eq!(
            record.validate_for_submission(),
            vec![RequiredField::VatNumber, RequiredField::ShareCapital]
        );

        record.set_field(ScalarField::VatNumber, "12345678901").unwrap();
        record.set_field(ScalarField::ShareCapital, 10_000.0).unwrap();
        assert!(record.validate_for_submission().is_empty());
    }

    #[test]
    fn test_vat_not_required_for_partnership() {
        let mut record = complete_record();
        record
            .set_field(ScalarField::LegalForm, LegalForm::Partnership)
            .unwrap();
        assert!(record.validate_for_submission().is_empty());
    }

    #[test]
    fn test_field_warnings() {
        let mut record = FormRecord::new();
        assert!(record.field_warnings().is_empty());

        record.set_field(ScalarField::Email, "info.acme.it").unwrap();
        record.set_field(ScalarField::VatNumber, "1234").unwrap();
        assert_eq!(
            record.field_warnings(),
            vec![FieldWarning::EmailMissingAt, FieldWarning::VatNumberFormat]
        );

        record.set_field(ScalarField::Email, "info@acme.it").unwrap();
        record.set_field(ScalarField::VatNumber, "12345678901").unwrap();
        assert!(record.field_warnings().is_empty());
    }

    #[test]
    fn test_warnings_do_not_block_submission() {
        let mut record = complete_record();
        record.set_field(ScalarField::Email, "nope").unwrap();
        assert!(!record.field_warnings().is_empty());
        assert!(record.validate_for_submission().is_empty());
    }
}
