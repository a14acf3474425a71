//! Repeatable sub-records (products, competitors, team members, yearly projections)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attachments::AttachmentRef;

/// The user-growable collections of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repeatable {
    Products,
    Competitors,
    TeamMembers,
}

impl Repeatable {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Competitors => "competitors",
            Self::TeamMembers => "team_members",
        }
    }

    /// Fields an entry of this collection carries
    pub fn fields(&self) -> &'static [EntryField] {
        match self {
            Self::Products => &[EntryField::Name, EntryField::Description],
            Self::Competitors => &[EntryField::Name, EntryField::Url, EntryField::Notes],
            Self::TeamMembers => &[EntryField::Name, EntryField::Role, EntryField::Experience],
        }
    }
}

impl fmt::Display for Repeatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text fields addressable inside a repeatable entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Name,
    Description,
    Url,
    Notes,
    Role,
    Experience,
}

impl EntryField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Url => "url",
            Self::Notes => "notes",
            Self::Role => "role",
            Self::Experience => "experience",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub name: String,
    pub description: String,
    pub image: Option<AttachmentRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    pub name: String,
    pub url: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub experience: String,
}

impl TeamMember {
    /// A member counts once both name and role hold non-blank text
    pub fn is_identified(&self) -> bool {
        !self.name.trim().is_empty() && !self.role.trim().is_empty()
    }
}

/// Revenue and cost estimate for one plan year
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearProjection {
    pub revenue: f64,
    pub cost: f64,
}

impl YearProjection {
    pub fn profit(&self) -> f64 {
        self.revenue - self.cost
    }
}

/// Ordered collection that keeps at least one slot once initialized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entries<T>(Vec<T>);

impl<T: Default> Default for Entries<T> {
    fn default() -> Self {
        Self(vec![T::default()])
    }
}

impl<T: Default> Entries<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Only true for a deserialized collection that has not been initialized yet
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.0.iter_mut()
    }

    /// Append a default entry, returning the new length
    pub fn push_default(&mut self) -> usize {
        self.0.push(T::default());
        self.0.len()
    }

    /// Drop the last entry unless it is the only one
    pub fn remove_last(&mut self) -> bool {
        if self.0.len() <= 1 {
            return false;
        }
        self.0.pop();
        true
    }

    /// Insert one default entry if the collection is empty
    pub fn ensure_slot(&mut self) -> bool {
        if self.0.is_empty() {
            self.0.push(T::default());
            true
        } else {
            false
        }
    }
}

impl<T> From<Vec<T>> for Entries<T> {
    fn from(entries: Vec<T>) -> Self {
        Self(entries)
    }
}

impl<'a, T> IntoIterator for &'a Entries<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_one_slot() {
        let entries: Entries<Competitor> = Entries::default();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first(), Some(&Competitor::default()));
    }

    #[test]
    fn test_remove_last_keeps_one_slot() {
        let mut entries: Entries<Product> = Entries::default();
        assert_eq!(entries.push_default(), 2);
        assert!(entries.remove_last());
        assert!(!entries.remove_last());
        assert!(!entries.remove_last());
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_ensure_slot_only_fills_empty() {
        let mut entries: Entries<TeamMember> = Vec::new().into();
        assert!(entries.ensure_slot());
        assert!(!entries.ensure_slot());
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_deserialize_is_transparent() {
        let entries: Entries<Competitor> =
            serde_json::from_str(r#"[{"name":"Rival"},{"url":"https://b.example"}]"#).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get(0).unwrap().name, "Rival");
        assert_eq!(entries.get(1).unwrap().url, "https://b.example");
    }

    #[test]
    fn test_team_member_identified_needs_name_and_role() {
        let mut member = TeamMember {
            name: "Jane Doe".into(),
            role: "   ".into(),
            ..Default::default()
        };
        assert!(!member.is_identified());
        member.role = "CEO".into();
        assert!(member.is_identified());
    }

    #[test]
    fn test_profit() {
        let year = YearProjection {
            revenue: 10_000.0,
            cost: 12_000.0,
        };
        assert_eq!(year.profit(), -2_000.0);
    }
}
