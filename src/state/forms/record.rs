//! The business plan form record and its accessors

use serde::{Deserialize, Serialize};

use super::entries::{
    Competitor, Entries, EntryField, Product, Repeatable, TeamMember, YearProjection,
};
use super::field::{CompanyStatus, FieldKind, FieldValue, LegalForm, ScalarField};
use crate::attachments::{AttachmentRef, AttachmentSlot};
use crate::error::FormError;

pub const MIN_DURATION_YEARS: u8 = 1;
pub const MAX_DURATION_YEARS: u8 = 5;
pub const DEFAULT_DURATION_YEARS: u8 = 3;

/// Non-blank after trimming
pub(crate) fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralInfo {
    pub company_name: String,
    pub bp_motivation: String,
    pub legal_form: LegalForm,
    pub vat_number: String,
    pub(crate) share_capital: f64,
    pub email: String,
    pub status: CompanyStatus,
    pub activity_description: String,
    pub company_context: String,
    /// Only collected while status is `Existing`
    pub company_history: String,
    pub company_goals: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductService {
    pub products: Entries<Product>,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketAnalysis {
    pub target_market: String,
    pub competitors: Entries<Competitor>,
    pub strengths: String,
    pub weaknesses: String,
    pub opportunities: String,
    pub threats: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    pub marketing_strategy: String,
    pub operational_plan: String,
    pub distribution_channels: String,
    pub marketing_budget: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub founder_name: String,
    pub founder_role: String,
    pub experience: String,
    pub members: Entries<TeamMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financials {
    pub(crate) duration_years: u8,
    pub initial_investment: u64,
    /// One entry per plan year, always `duration_years` long once initialized
    pub(crate) projections: Vec<YearProjection>,
    pub notes: String,
}

impl Default for Financials {
    fn default() -> Self {
        Self {
            duration_years: DEFAULT_DURATION_YEARS,
            initial_investment: 0,
            projections: vec![YearProjection::default(); DEFAULT_DURATION_YEARS as usize],
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnlineResources {
    pub website: String,
    pub competitor_sites: String,
    pub market_research_sources: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachments {
    pub visura: Option<AttachmentRef>,
    pub business_plans: Vec<AttachmentRef>,
    pub own_site_screenshots: Vec<AttachmentRef>,
    pub competitor_screenshots: Vec<AttachmentRef>,
    pub team_cvs: Vec<AttachmentRef>,
    pub financial_documents: Vec<AttachmentRef>,
}

/// Every answer of one business plan session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRecord {
    pub general: GeneralInfo,
    pub product_service: ProductService,
    pub market: MarketAnalysis,
    pub strategy: Strategy,
    pub team: Team,
    pub financials: Financials,
    pub resources: OnlineResources,
    pub attachments: Attachments,
}

impl FormRecord {
    /// Empty record with one slot in each collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in whatever is missing without touching entered values.
    ///
    /// Records built with [`FormRecord::new`] are already complete; this repairs
    /// records deserialized from partial drafts and is safe to call repeatedly.
    /// A draft holding a negative or non-finite amount is rejected untouched.
    pub fn initialize(&mut self) -> Result<(), FormError> {
        check_amount(ScalarField::ShareCapital.key(), self.general.share_capital)?;
        for (i, year) in self.financials.projections.iter().enumerate() {
            check_amount(&format!("year_{}_revenue", i + 1), year.revenue)?;
            check_amount(&format!("year_{}_cost", i + 1), year.cost)?;
        }

        let mut repaired = Vec::new();
        if self.product_service.products.ensure_slot() {
            repaired.push(Repeatable::Products.name());
        }
        if self.market.competitors.ensure_slot() {
            repaired.push(Repeatable::Competitors.name());
        }
        if self.team.members.ensure_slot() {
            repaired.push(Repeatable::TeamMembers.name());
        }
        let duration = self.financials.duration_years;
        self.apply_duration(i64::from(duration));
        if !repaired.is_empty() {
            tracing::debug!(?repaired, "initialized empty collections");
        }
        Ok(())
    }

    pub fn share_capital(&self) -> f64 {
        self.general.share_capital
    }

    pub fn duration_years(&self) -> u8 {
        self.financials.duration_years
    }

    /// Read a scalar field
    pub fn get_field(&self, field: ScalarField) -> FieldValue {
        if let Some(text) = self.text_slot(field) {
            return FieldValue::Text(text.clone());
        }
        match field {
            ScalarField::LegalForm => FieldValue::LegalForm(self.general.legal_form),
            ScalarField::Status => FieldValue::Status(self.general.status),
            ScalarField::ShareCapital => FieldValue::Decimal(self.general.share_capital),
            ScalarField::MarketingBudget => {
                FieldValue::Integer(saturating_i64(self.strategy.marketing_budget))
            }
            ScalarField::InitialInvestment => {
                FieldValue::Integer(saturating_i64(self.financials.initial_investment))
            }
            ScalarField::DurationYears => {
                FieldValue::Integer(i64::from(self.financials.duration_years))
            }
            // every remaining field is a text slot
            _ => FieldValue::default(),
        }
    }

    /// Write a scalar field; rejected values leave the field unchanged
    pub fn set_field(
        &mut self,
        field: ScalarField,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let value = value.into();
        let result = self.write_field(field, value);
        if let Err(ref err) = result {
            tracing::warn!(field = field.key(), %err, "rejected field input");
        }
        result
    }

    /// String-keyed entry point for UI layers that address fields by name
    pub fn set_field_by_key(
        &mut self,
        key: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let field: ScalarField = key.parse()?;
        self.set_field(field, value)
    }

    fn write_field(&mut self, field: ScalarField, value: FieldValue) -> Result<(), FormError> {
        let expected = field.kind();
        let mismatch = || FormError::TypeMismatch {
            field: field.key().to_string(),
            expected: expected.name(),
        };

        match (expected, value) {
            (FieldKind::Text, FieldValue::Text(text)) => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = text;
                }
                Ok(())
            }
            (FieldKind::Status, FieldValue::Status(status)) => {
                self.general.status = status;
                Ok(())
            }
            (FieldKind::LegalForm, FieldValue::LegalForm(form)) => {
                self.general.legal_form = form;
                Ok(())
            }
            (FieldKind::Decimal, value @ (FieldValue::Decimal(_) | FieldValue::Integer(_))) => {
                let amount = value.as_decimal();
                if !amount.is_finite() {
                    return Err(FormError::validation(field.key(), "must be a finite number"));
                }
                if amount < 0.0 {
                    return Err(FormError::validation(field.key(), "must not be negative"));
                }
                self.general.share_capital = amount;
                Ok(())
            }
            (FieldKind::Integer, FieldValue::Integer(n)) => {
                if n < 0 {
                    return Err(FormError::validation(field.key(), "must not be negative"));
                }
                match field {
                    ScalarField::MarketingBudget => self.strategy.marketing_budget = n as u64,
                    ScalarField::InitialInvestment => {
                        self.financials.initial_investment = n as u64
                    }
                    ScalarField::DurationYears => self.apply_duration(n),
                    _ => return Err(mismatch()),
                }
                Ok(())
            }
            _ => Err(mismatch()),
        }
    }

    fn text_slot(&self, field: ScalarField) -> Option<&String> {
        let slot = match field {
            ScalarField::CompanyName => &self.general.company_name,
            ScalarField::BpMotivation => &self.general.bp_motivation,
            ScalarField::VatNumber => &self.general.vat_number,
            ScalarField::Email => &self.general.email,
            ScalarField::ActivityDescription => &self.general.activity_description,
            ScalarField::CompanyContext => &self.general.company_context,
            ScalarField::CompanyHistory => &self.general.company_history,
            ScalarField::CompanyGoals => &self.general.company_goals,
            ScalarField::ProductPrice => &self.product_service.price,
            ScalarField::TargetMarket => &self.market.target_market,
            ScalarField::MarketStrengths => &self.market.strengths,
            ScalarField::MarketWeaknesses => &self.market.weaknesses,
            ScalarField::MarketOpportunities => &self.market.opportunities,
            ScalarField::MarketThreats => &self.market.threats,
            ScalarField::MarketingStrategy => &self.strategy.marketing_strategy,
            ScalarField::OperationalPlan => &self.strategy.operational_plan,
            ScalarField::DistributionChannels => &self.strategy.distribution_channels,
            ScalarField::FounderName => &self.team.founder_name,
            ScalarField::FounderRole => &self.team.founder_role,
            ScalarField::TeamExperience => &self.team.experience,
            ScalarField::ProjectionNotes => &self.financials.notes,
            ScalarField::Website => &self.resources.website,
            ScalarField::CompetitorSites => &self.resources.competitor_sites,
            ScalarField::MarketResearchSources => &self.resources.market_research_sources,
            ScalarField::LegalForm
            | ScalarField::Status
            | ScalarField::ShareCapital
            | ScalarField::MarketingBudget
            | ScalarField::InitialInvestment
            | ScalarField::DurationYears => return None,
        };
        Some(slot)
    }

    fn text_slot_mut(&mut self, field: ScalarField) -> Option<&mut String> {
        let slot = match field {
            ScalarField::CompanyName => &mut self.general.company_name,
            ScalarField::BpMotivation => &mut self.general.bp_motivation,
            ScalarField::VatNumber => &mut self.general.vat_number,
            ScalarField::Email => &mut self.general.email,
            ScalarField::ActivityDescription => &mut self.general.activity_description,
            ScalarField::CompanyContext => &mut self.general.company_context,
            ScalarField::CompanyHistory => &mut self.general.company_history,
            ScalarField::CompanyGoals => &mut self.general.company_goals,
            ScalarField::ProductPrice => &mut self.product_service.price,
            ScalarField::TargetMarket => &mut self.market.target_market,
            ScalarField::MarketStrengths => &mut self.market.strengths,
            ScalarField::MarketWeaknesses => &mut self.market.weaknesses,
            ScalarField::MarketOpportunities => &mut self.market.opportunities,
            ScalarField::MarketThreats => &mut self.market.threats,
            ScalarField::MarketingStrategy => &mut self.strategy.marketing_strategy,
            ScalarField::OperationalPlan => &mut self.strategy.operational_plan,
            ScalarField::DistributionChannels => &mut self.strategy.distribution_channels,
            ScalarField::FounderName => &mut self.team.founder_name,
            ScalarField::FounderRole => &mut self.team.founder_role,
            ScalarField::TeamExperience => &mut self.team.experience,
            ScalarField::ProjectionNotes => &mut self.financials.notes,
            ScalarField::Website => &mut self.resources.website,
            ScalarField::CompetitorSites => &mut self.resources.competitor_sites,
            ScalarField::MarketResearchSources => &mut self.resources.market_research_sources,
            ScalarField::LegalForm
            | ScalarField::Status
            | ScalarField::ShareCapital
            | ScalarField::MarketingBudget
            | ScalarField::InitialInvestment
            | ScalarField::DurationYears => return None,
        };
        Some(slot)
    }

    /// Clamp the duration into range and resize projections to match
    fn apply_duration(&mut self, years: i64) {
        let clamped = years.clamp(
            i64::from(MIN_DURATION_YEARS),
            i64::from(MAX_DURATION_YEARS),
        ) as u8;
        self.financials.duration_years = clamped;
        self.financials
            .projections
            .resize(clamped as usize, YearProjection::default());
    }

    /// Length of a repeatable collection
    pub fn entry_count(&self, collection: Repeatable) -> usize {
        match collection {
            Repeatable::Products => self.product_service.products.len(),
            Repeatable::Competitors => self.market.competitors.len(),
            Repeatable::TeamMembers => self.team.members.len(),
        }
    }

    /// Append a default entry, returning the new length
    pub fn add_entry(&mut self, collection: Repeatable) -> usize {
        let len = match collection {
            Repeatable::Products => self.product_service.products.push_default(),
            Repeatable::Competitors => self.market.competitors.push_default(),
            Repeatable::TeamMembers => self.team.members.push_default(),
        };
        tracing::debug!(%collection, len, "added entry");
        len
    }

    /// Remove the last entry; a single remaining entry is kept and `false` returned
    pub fn remove_last_entry(&mut self, collection: Repeatable) -> bool {
        let removed = match collection {
            Repeatable::Products => self.product_service.products.remove_last(),
            Repeatable::Competitors => self.market.competitors.remove_last(),
            Repeatable::TeamMembers => self.team.members.remove_last(),
        };
        if removed {
            tracing::debug!(%collection, "removed last entry");
        }
        removed
    }

    /// Edit one text field of a repeatable entry
    pub fn set_entry_field(
        &mut self,
        collection: Repeatable,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let len = self.entry_count(collection);
        let out_of_range = || FormError::EntryOutOfRange {
            collection: collection.name(),
            index,
            len,
        };
        let unknown = || FormError::UnknownEntryField {
            collection: collection.name(),
            field: field.key(),
        };

        let slot = match collection {
            Repeatable::Products => {
                let product = self
                    .product_service
                    .products
                    .get_mut(index)
                    .ok_or_else(out_of_range)?;
                match field {
                    EntryField::Name => &mut product.name,
                    EntryField::Description => &mut product.description,
                    _ => return Err(unknown()),
                }
            }
            Repeatable::Competitors => {
                let competitor = self
                    .market
                    .competitors
                    .get_mut(index)
                    .ok_or_else(out_of_range)?;
                match field {
                    EntryField::Name => &mut competitor.name,
                    EntryField::Url => &mut competitor.url,
                    EntryField::Notes => &mut competitor.notes,
                    _ => return Err(unknown()),
                }
            }
            Repeatable::TeamMembers => {
                let member = self.team.members.get_mut(index).ok_or_else(out_of_range)?;
                match field {
                    EntryField::Name => &mut member.name,
                    EntryField::Role => &mut member.role,
                    EntryField::Experience => &mut member.experience,
                    _ => return Err(unknown()),
                }
            }
        };
        *slot = value.into();
        Ok(())
    }

    /// Attach or clear the image of a product, returning the image it replaced
    pub fn set_product_image(
        &mut self,
        index: usize,
        image: Option<AttachmentRef>,
    ) -> Result<Option<AttachmentRef>, FormError> {
        let len = self.product_service.products.len();
        let product = self
            .product_service
            .products
            .get_mut(index)
            .ok_or(FormError::EntryOutOfRange {
                collection: Repeatable::Products.name(),
                index,
                len,
            })?;
        Ok(std::mem::replace(&mut product.image, image))
    }

    /// Record the revenue and cost estimate for a 1-based plan year
    pub fn set_projection(&mut self, year: u32, revenue: f64, cost: f64) -> Result<(), FormError> {
        for (name, amount) in [("revenue", revenue), ("cost", cost)] {
            let field = format!("year_{year}_{name}");
            if let Err(err) = check_amount(&field, amount) {
                tracing::warn!(%field, amount, "rejected projection input");
                return Err(err);
            }
        }
        let duration = self.financials.duration_years;
        let slot = (year as usize)
            .checked_sub(1)
            .and_then(|i| self.financials.projections.get_mut(i))
            .ok_or(FormError::YearOutOfRange { year, duration })?;
        *slot = YearProjection { revenue, cost };
        Ok(())
    }

    /// Record an uploaded document; the visura slot holds a single file, so a
    /// second visura displaces the first and the old reference is returned
    pub fn attach(
        &mut self,
        slot: AttachmentSlot,
        reference: AttachmentRef,
    ) -> Result<Option<AttachmentRef>, FormError> {
        let list = match slot {
            AttachmentSlot::Visura => {
                return Ok(self.attachments.visura.replace(reference));
            }
            AttachmentSlot::BusinessPlan => &mut self.attachments.business_plans,
            AttachmentSlot::OwnSiteScreenshot => &mut self.attachments.own_site_screenshots,
            AttachmentSlot::CompetitorScreenshot => &mut self.attachments.competitor_screenshots,
            AttachmentSlot::TeamCv => &mut self.attachments.team_cvs,
            AttachmentSlot::FinancialDocument => &mut self.attachments.financial_documents,
            AttachmentSlot::ProductImage => {
                return Err(FormError::validation(
                    "product_image",
                    "product images belong to a product entry",
                ))
            }
        };
        list.push(reference);
        Ok(None)
    }

    /// Forget a document by store key, returning whether anything was removed
    pub fn detach(&mut self, key: &str) -> bool {
        let attachments = &mut self.attachments;
        if attachments.visura.as_ref().is_some_and(|r| r.key == key) {
            attachments.visura = None;
            return true;
        }
        for list in [
            &mut attachments.business_plans,
            &mut attachments.own_site_screenshots,
            &mut attachments.competitor_screenshots,
            &mut attachments.team_cvs,
            &mut attachments.financial_documents,
        ] {
            if let Some(pos) = list.iter().position(|r| r.key == key) {
                list.remove(pos);
                return true;
            }
        }
        for product in self.product_service.products.iter_mut() {
            if product.image.as_ref().is_some_and(|r| r.key == key) {
                product.image = None;
                return true;
            }
        }
        false
    }

    /// Every attachment reference held by the record, product images included
    pub fn attachment_refs(&self) -> Vec<&AttachmentRef> {
        let a = &self.attachments;
        a.visura
            .iter()
            .chain(&a.business_plans)
            .chain(&a.own_site_screenshots)
            .chain(&a.competitor_screenshots)
            .chain(&a.team_cvs)
            .chain(&a.financial_documents)
            .chain(
                self.product_service
                    .products
                    .iter()
                    .filter_map(|p| p.image.as_ref()),
            )
            .collect()
    }

    pub fn products(&self) -> &[Product] {
        self.product_service.products.as_slice()
    }

    pub fn competitors(&self) -> &[Competitor] {
        self.market.competitors.as_slice()
    }

    pub fn team_members(&self) -> &[TeamMember] {
        self.team.members.as_slice()
    }

    pub fn projections(&self) -> &[YearProjection] {
        &self.financials.projections
    }

    /// Name of the first product, the one the export reports
    pub fn primary_product_name(&self) -> &str {
        self.product_service
            .products
            .first()
            .map(|p| p.name.as_str())
            .unwrap_or("")
    }
}

fn check_amount(field: &str, amount: f64) -> Result<(), FormError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(FormError::validation(field, "must be a non-negative number"))
    }
}

fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
