//! Completion tracking for the progress bar and the section checklist

use std::fmt;

use super::record::{is_filled, FormRecord};

/// The nine indicators behind the overall progress ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressIndicator {
    CompanyName,
    BpMotivation,
    ActivityDescription,
    ProductName,
    TargetMarket,
    MarketingStrategy,
    OperationalPlan,
    DistributionChannels,
    /// At least one team member with both name and role
    TeamMember,
}

impl ProgressIndicator {
    pub const ALL: [ProgressIndicator; 9] = [
        Self::CompanyName,
        Self::BpMotivation,
        Self::ActivityDescription,
        Self::ProductName,
        Self::TargetMarket,
        Self::MarketingStrategy,
        Self::OperationalPlan,
        Self::DistributionChannels,
        Self::TeamMember,
    ];

    pub fn is_satisfied(&self, record: &FormRecord) -> bool {
        match self {
            Self::CompanyName => is_filled(&record.general.company_name),
            Self::BpMotivation => is_filled(&record.general.bp_motivation),
            Self::ActivityDescription => is_filled(&record.general.activity_description),
            Self::ProductName => is_filled(record.primary_product_name()),
            Self::TargetMarket => is_filled(&record.market.target_market),
            Self::MarketingStrategy => is_filled(&record.strategy.marketing_strategy),
            Self::OperationalPlan => is_filled(&record.strategy.operational_plan),
            Self::DistributionChannels => is_filled(&record.strategy.distribution_channels),
            Self::TeamMember => record.team_members().iter().any(|m| m.is_identified()),
        }
    }
}

/// Sections shown in the completion checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    GeneralInfo,
    ProductService,
    MarketAnalysis,
    Strategy,
    Team,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Self::GeneralInfo,
        Self::ProductService,
        Self::MarketAnalysis,
        Self::Strategy,
        Self::Team,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::GeneralInfo => "General Info",
            Self::ProductService => "Product/Service",
            Self::MarketAnalysis => "Market Analysis",
            Self::Strategy => "Strategy",
            Self::Team => "Team",
        }
    }

    /// Values of the fields this section counts
    fn tracked_values<'a>(&self, record: &'a FormRecord) -> Vec<&'a str> {
        match self {
            Self::GeneralInfo => vec![
                record.general.company_name.as_str(),
                record.general.bp_motivation.as_str(),
            ],
            Self::ProductService => vec![record.primary_product_name()],
            Self::MarketAnalysis => vec![record.market.target_market.as_str()],
            Self::Strategy => vec![
                record.strategy.marketing_strategy.as_str(),
                record.strategy.operational_plan.as_str(),
                record.strategy.distribution_channels.as_str(),
            ],
            Self::Team => vec![
                record.team.founder_name.as_str(),
                record.team.founder_role.as_str(),
                record.team.experience.as_str(),
            ],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStatus {
    pub section: Section,
    pub completed: usize,
    pub total: usize,
}

impl SectionStatus {
    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

impl FormRecord {
    /// Share of the nine progress indicators currently satisfied, in `[0, 1]`
    pub fn compute_progress(&self) -> f64 {
        let satisfied = ProgressIndicator::ALL
            .iter()
            .filter(|indicator| indicator.is_satisfied(self))
            .count();
        satisfied as f64 / ProgressIndicator::ALL.len() as f64
    }

    /// Indicators still missing, in checklist order
    pub fn pending_indicators(&self) -> Vec<ProgressIndicator> {
        ProgressIndicator::ALL
            .into_iter()
            .filter(|indicator| !indicator.is_satisfied(self))
            .collect()
    }

    /// Per-section `(completed, total)` counts in display order
    pub fn compute_section_indicators(&self) -> Vec<SectionStatus> {
        Section::ALL
            .into_iter()
            .map(|section| {
                let values = section.tracked_values(self);
                SectionStatus {
                    section,
                    completed: values.iter().filter(|v| is_filled(v)).count(),
                    total: values.len(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::entries::{EntryField, Repeatable};
    use crate::state::forms::field::ScalarField;

    const TEXT_STEPS: [(ScalarField, &str); 7] = [
        (ScalarField::CompanyName, "Acme Srl"),
        (ScalarField::BpMotivation, "Seed funding"),
        (ScalarField::ActivityDescription, "Consulting"),
        (ScalarField::TargetMarket, "SMEs"),
        (ScalarField::MarketingStrategy, "Digital"),
        (ScalarField::OperationalPlan, "Remote-first"),
        (ScalarField::DistributionChannels, "Online"),
    ];

    #[test]
    fn test_empty_record_has_zero_progress() {
        let record = FormRecord::new();
        assert_eq!(record.compute_progress(), 0.0);
        assert_eq!(record.pending_indicators().len(), 9);
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let mut record = FormRecord::new();
        record.set_field(ScalarField::CompanyName, "   \t").unwrap();
        assert_eq!(record.compute_progress(), 0.0);
    }

    #[test]
    fn test_progress_is_monotone_and_reaches_one() {
        let mut record = FormRecord::new();
        let mut last = record.compute_progress();

        for (field, value) in TEXT_STEPS {
            record.set_field(field, value).unwrap();
            let now = record.compute_progress();
            assert!(now > last, "{field} did not advance progress");
            assert!((0.0..=1.0).contains(&now));
            last = now;
        }

        record
            .set_entry_field(Repeatable::Products, 0, EntryField::Name, "ProjectZen")
            .unwrap();
        assert!(record.compute_progress() > last);
        last = record.compute_progress();

        // a member without a role is not enough
        record
            .set_entry_field(Repeatable::TeamMembers, 0, EntryField::Name, "Jane Doe")
            .unwrap();
        assert_eq!(record.compute_progress(), last);
        record
            .set_entry_field(Repeatable::TeamMembers, 0, EntryField::Role, "CEO")
            .unwrap();

        assert_eq!(record.compute_progress(), 1.0);
        assert!(record.pending_indicators().is_empty());
    }

    #[test]
    fn test_any_identified_member_counts() {
        let mut record = FormRecord::new();
        record.add_entry(Repeatable::TeamMembers);
        record
            .set_entry_field(Repeatable::TeamMembers, 1, EntryField::Name, "Jane Doe")
            .unwrap();
        record
            .set_entry_field(Repeatable::TeamMembers, 1, EntryField::Role, "CEO")
            .unwrap();
        assert_eq!(record.pending_indicators(), ProgressIndicator::ALL[..8].to_vec());
    }

    #[test]
    fn test_section_indicators() {
        let mut record = FormRecord::new();
        record.set_field(ScalarField::CompanyName, "Acme Srl").unwrap();
        record.set_field(ScalarField::FounderName, "Jane Doe").unwrap();
        record.set_field(ScalarField::TeamExperience, "10 years").unwrap();

        let sections = record.compute_section_indicators();
        let counts: Vec<_> = sections
            .iter()
            .map(|s| (s.section, s.completed, s.total))
            .collect();
        assert_eq!(
            counts,
            vec![
                (Section::GeneralInfo, 1, 2),
                (Section::ProductService, 0, 1),
                (Section::MarketAnalysis, 0, 1),
                (Section::Strategy, 0, 3),
                (Section::Team, 2, 3),
            ]
        );
        assert!(!sections[4].is_complete());
    }

    #[test]
    fn test_team_members_do_not_fill_team_section() {
        let mut record = FormRecord::new();
        record
            .set_entry_field(Repeatable::TeamMembers, 0, EntryField::Name, "Jane Doe")
            .unwrap();
        record
            .set_entry_field(Repeatable::TeamMembers, 0, EntryField::Role, "CEO")
            .unwrap();
        let team = record.compute_section_indicators()[4];
        assert_eq!(team.completed, 0);
        assert!(ProgressIndicator::TeamMember.is_satisfied(&record));
    }
}
