//! Form field value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

/// Whether the company already exists or is yet to be founded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompanyStatus {
    #[default]
    Existing,
    ToBeCreated,
}

impl CompanyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Existing => "Existing",
            Self::ToBeCreated => "To be created",
        }
    }
}

impl FromStr for CompanyStatus {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Existing" | "existing" | "Esistente" => Ok(Self::Existing),
            "ToBeCreated" | "to_be_created" | "Da Creare" => Ok(Self::ToBeCreated),
            other => Err(FormError::validation(
                "status",
                format!("`{other}` is not a company status"),
            )),
        }
    }
}

/// Legal form of the company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegalForm {
    #[default]
    Unselected,
    SoleProprietorship,
    Partnership,
    /// Corporate entity (Società di Capitali); VAT number and share capital become required
    Corporation,
    Other,
}

impl LegalForm {
    pub const CHOICES: [LegalForm; 5] = [
        Self::Unselected,
        Self::SoleProprietorship,
        Self::Partnership,
        Self::Corporation,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unselected => "Select...",
            Self::SoleProprietorship => "Sole proprietorship",
            Self::Partnership => "Partnership",
            Self::Corporation => "Corporate entity",
            Self::Other => "Other",
        }
    }

    pub fn is_corporate(&self) -> bool {
        matches!(self, Self::Corporation)
    }
}

impl FromStr for LegalForm {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(form) = Self::CHOICES.iter().find(|f| f.label() == s) {
            return Ok(*form);
        }
        match s {
            "" | "Seleziona..." => Ok(Self::Unselected),
            "Individuale" => Ok(Self::SoleProprietorship),
            "Società di Persone" => Ok(Self::Partnership),
            "Società di Capitali" => Ok(Self::Corporation),
            "Altro" => Ok(Self::Other),
            other => Err(FormError::validation(
                "legal_form",
                format!("`{other}` is not a legal form"),
            )),
        }
    }
}

/// Kind of value a scalar field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Status,
    LegalForm,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Status => "company status",
            Self::LegalForm => "legal form",
        }
    }
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Signed so that negative input can be seen and rejected
    Integer(i64),
    Decimal(f64),
    Status(CompanyStatus),
    LegalForm(LegalForm),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<CompanyStatus> for FieldValue {
    fn from(value: CompanyStatus) -> Self {
        FieldValue::Status(value)
    }
}

impl From<LegalForm> for FieldValue {
    fn from(value: LegalForm) -> Self {
        FieldValue::LegalForm(value)
    }
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Status(_) => FieldKind::Status,
            FieldValue::LegalForm(_) => FieldKind::LegalForm,
        }
    }

    /// Get the text value (returns empty string for non-text fields)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            _ => "",
        }
    }

    /// Get the integer value (returns 0 for non-integer fields)
    pub fn as_integer(&self) -> i64 {
        match self {
            FieldValue::Integer(n) => *n,
            _ => 0,
        }
    }

    /// Get the decimal value; integers widen, everything else is 0
    pub fn as_decimal(&self) -> f64 {
        match self {
            FieldValue::Decimal(d) => *d,
            FieldValue::Integer(n) => *n as f64,
            _ => 0.0,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Decimal(d) => format!("{d:.2}"),
            FieldValue::Status(s) => s.label().to_string(),
            FieldValue::LegalForm(f) => f.label().to_string(),
        }
    }
}

/// Every scalar field of the business plan record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarField {
    // General info
    CompanyName,
    BpMotivation,
    LegalForm,
    VatNumber,
    ShareCapital,
    Email,
    Status,
    ActivityDescription,
    CompanyContext,
    CompanyHistory,
    CompanyGoals,
    // Product / service
    ProductPrice,
    // Market analysis
    TargetMarket,
    MarketStrengths,
    MarketWeaknesses,
    MarketOpportunities,
    MarketThreats,
    // Strategy
    MarketingStrategy,
    OperationalPlan,
    DistributionChannels,
    MarketingBudget,
    // Team
    FounderName,
    FounderRole,
    TeamExperience,
    // Financial plan
    InitialInvestment,
    DurationYears,
    ProjectionNotes,
    // Online resources
    Website,
    CompetitorSites,
    MarketResearchSources,
}

impl ScalarField {
    pub const ALL: [ScalarField; 30] = [
        Self::CompanyName,
        Self::BpMotivation,
        Self::LegalForm,
        Self::VatNumber,
        Self::ShareCapital,
        Self::Email,
        Self::Status,
        Self::ActivityDescription,
        Self::CompanyContext,
        Self::CompanyHistory,
        Self::CompanyGoals,
        Self::ProductPrice,
        Self::TargetMarket,
        Self::MarketStrengths,
        Self::MarketWeaknesses,
        Self::MarketOpportunities,
        Self::MarketThreats,
        Self::MarketingStrategy,
        Self::OperationalPlan,
        Self::DistributionChannels,
        Self::MarketingBudget,
        Self::FounderName,
        Self::FounderRole,
        Self::TeamExperience,
        Self::InitialInvestment,
        Self::DurationYears,
        Self::ProjectionNotes,
        Self::Website,
        Self::CompetitorSites,
        Self::MarketResearchSources,
    ];

    /// Stable snake_case key used by the UI layer and in error messages
    pub fn key(&self) -> &'static str {
        match self {
            Self::CompanyName => "company_name",
            Self::BpMotivation => "bp_motivation",
            Self::LegalForm => "legal_form",
            Self::VatNumber => "vat_number",
            Self::ShareCapital => "share_capital",
            Self::Email => "email",
            Self::Status => "status",
            Self::ActivityDescription => "activity_description",
            Self::CompanyContext => "company_context",
            Self::CompanyHistory => "company_history",
            Self::CompanyGoals => "company_goals",
            Self::ProductPrice => "product_price",
            Self::TargetMarket => "target_market",
            Self::MarketStrengths => "market_strengths",
            Self::MarketWeaknesses => "market_weaknesses",
            Self::MarketOpportunities => "market_opportunities",
            Self::MarketThreats => "market_threats",
            Self::MarketingStrategy => "marketing_strategy",
            Self::OperationalPlan => "operational_plan",
            Self::DistributionChannels => "distribution_channels",
            Self::MarketingBudget => "marketing_budget",
            Self::FounderName => "founder_name",
            Self::FounderRole => "founder_role",
            Self::TeamExperience => "team_experience",
            Self::InitialInvestment => "initial_investment",
            Self::DurationYears => "duration_years",
            Self::ProjectionNotes => "projection_notes",
            Self::Website => "website",
            Self::CompetitorSites => "competitor_sites",
            Self::MarketResearchSources => "market_research_sources",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "Company name",
            Self::BpMotivation => "Business plan motivation",
            Self::LegalForm => "Legal form",
            Self::VatNumber => "VAT number",
            Self::ShareCapital => "Share capital (€)",
            Self::Email => "Company email",
            Self::Status => "Company status",
            Self::ActivityDescription => "Activity description",
            Self::CompanyContext => "Company context",
            Self::CompanyHistory => "Company history",
            Self::CompanyGoals => "Company goals",
            Self::ProductPrice => "Indicative price",
            Self::TargetMarket => "Market description",
            Self::MarketStrengths => "Strengths",
            Self::MarketWeaknesses => "Weaknesses",
            Self::MarketOpportunities => "Opportunities",
            Self::MarketThreats => "Threats",
            Self::MarketingStrategy => "Marketing strategy",
            Self::OperationalPlan => "Operational plan",
            Self::DistributionChannels => "Distribution channels",
            Self::MarketingBudget => "Marketing budget (€)",
            Self::FounderName => "Founder name",
            Self::FounderRole => "Founder role",
            Self::TeamExperience => "Team experience",
            Self::InitialInvestment => "Initial investment (€)",
            Self::DurationYears => "Business plan duration (years)",
            Self::ProjectionNotes => "Financial projections",
            Self::Website => "Company website",
            Self::CompetitorSites => "Competitor websites",
            Self::MarketResearchSources => "Market research sources",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::MarketingBudget | Self::InitialInvestment | Self::DurationYears => {
                FieldKind::Integer
            }
            Self::ShareCapital => FieldKind::Decimal,
            Self::Status => FieldKind::Status,
            Self::LegalForm => FieldKind::LegalForm,
            _ => FieldKind::Text,
        }
    }

    /// Whether the field is rendered as a text area
    pub fn is_multiline(&self) -> bool {
        matches!(
            self,
            Self::BpMotivation
                | Self::ActivityDescription
                | Self::CompanyContext
                | Self::CompanyHistory
                | Self::CompanyGoals
                | Self::TargetMarket
                | Self::MarketStrengths
                | Self::MarketWeaknesses
                | Self::MarketOpportunities
                | Self::MarketThreats
                | Self::MarketingStrategy
                | Self::OperationalPlan
                | Self::TeamExperience
                | Self::ProjectionNotes
        )
    }
}

impl fmt::Display for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScalarField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|field| field.key() == s)
            .copied()
            .ok_or_else(|| FormError::UnknownField(s.to_string()))
    }
}
