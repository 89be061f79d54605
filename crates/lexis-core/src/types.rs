//! Domain types shared by the filter translator and the search aggregator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Canonical category a filter condition targets.
///
/// The declaration order is significant: it is the order of
/// [`EntityType::ALL`], which is handed to the renderer as the visible set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Conference,
    Citation,
    Keyword,
    Bibliography,
    Actant,
    Item,
}

impl EntityType {
    pub const ALL: [EntityType; 6] = [
        EntityType::Conference,
        EntityType::Citation,
        EntityType::Keyword,
        EntityType::Bibliography,
        EntityType::Actant,
        EntityType::Item,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Conference => "conference",
            EntityType::Citation => "citation",
            EntityType::Keyword => "keyword",
            EntityType::Bibliography => "bibliography",
            EntityType::Actant => "actant",
            EntityType::Item => "item",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        EntityType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| Error::InvalidConfig(format!("unknown entity type '{}'", s)))
    }
}

/// How the subject concept relates to the filtered property.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    #[default]
    Contains,
    NotContains,
    Equals,
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Contains => "contains",
            RelationKind::NotContains => "not_contains",
            RelationKind::Equals => "equals",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person (researcher, speaker) known to the content repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actant {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub universities: Vec<String>,
}

impl Actant {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname).trim().to_string()
    }
}

/// A seminar session, colloquium talk or study day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Conference {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actant: Option<String>,
}

/// A work (artwork, publication, installation).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Oeuvre {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// The three conference sub-collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConferenceKind {
    Seminar,
    Colloque,
    StudyDay,
}

impl ConferenceKind {
    pub const ALL: [ConferenceKind; 3] =
        [ConferenceKind::Seminar, ConferenceKind::Colloque, ConferenceKind::StudyDay];

    /// Directory / collection name used by fixture layouts.
    pub fn collection(self) -> &'static str {
        match self {
            ConferenceKind::Seminar => "seminars",
            ConferenceKind::Colloque => "colloques",
            ConferenceKind::StudyDay => "study_days",
        }
    }

    pub fn from_collection(name: &str) -> Option<Self> {
        match name {
            "seminars" | "seminaires" => Some(ConferenceKind::Seminar),
            "colloques" => Some(ConferenceKind::Colloque),
            "study_days" | "studyDays" | "journees_etudes" => Some(ConferenceKind::StudyDay),
            _ => None,
        }
    }
}

/// Conference results split by sub-collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConferenceSlice {
    pub seminars: Vec<Conference>,
    pub colloques: Vec<Conference>,
    pub study_days: Vec<Conference>,
}

impl ConferenceSlice {
    pub fn get(&self, kind: ConferenceKind) -> &[Conference] {
        match kind {
            ConferenceKind::Seminar => &self.seminars,
            ConferenceKind::Colloque => &self.colloques,
            ConferenceKind::StudyDay => &self.study_days,
        }
    }

    pub fn get_mut(&mut self, kind: ConferenceKind) -> &mut Vec<Conference> {
        match kind {
            ConferenceKind::Seminar => &mut self.seminars,
            ConferenceKind::Colloque => &mut self.colloques,
            ConferenceKind::StudyDay => &mut self.study_days,
        }
    }

    pub fn len(&self) -> usize {
        self.seminars.len() + self.colloques.len() + self.study_days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Merged results of one search across every provider.
///
/// `total_results` is always derived from the five leaf arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResults {
    pub actants: Vec<Actant>,
    pub conferences: ConferenceSlice,
    pub oeuvres: Vec<Oeuvre>,
}

impl SearchResults {
    pub fn total_results(&self) -> usize {
        self.actants.len() + self.conferences.len() + self.oeuvres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_results() == 0
    }
}
