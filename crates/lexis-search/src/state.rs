//! Observable state owned by the aggregator.

use serde::Serialize;
use std::fmt;

use lexis_core::types::SearchResults;

/// The three providers a search fans out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Actants,
    Conferences,
    Oeuvres,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Actants, Section::Conferences, Section::Oeuvres];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Actants => "actants",
            Section::Conferences => "conferences",
            Section::Oeuvres => "oeuvres",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-provider loading flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadingState {
    pub actants: bool,
    pub conferences: bool,
    pub oeuvres: bool,
}

impl LoadingState {
    pub fn all(loading: bool) -> Self {
        Self { actants: loading, conferences: loading, oeuvres: loading }
    }

    pub fn get(&self, section: Section) -> bool {
        match section {
            Section::Actants => self.actants,
            Section::Conferences => self.conferences,
            Section::Oeuvres => self.oeuvres,
        }
    }

    pub fn set(&mut self, section: Section, loading: bool) {
        match section {
            Section::Actants => self.actants = loading,
            Section::Conferences => self.conferences = loading,
            Section::Oeuvres => self.oeuvres = loading,
        }
    }

    pub fn any(&self) -> bool {
        self.actants || self.conferences || self.oeuvres
    }
}

/// Outcome of the latest search, distinguishing "nothing found" from "failed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Succeeded,
    Failed { message: String },
}

/// Read-only snapshot of the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    pub results: SearchResults,
    pub loading: LoadingState,
    pub has_searched: bool,
    pub status: SearchStatus,
    pub(crate) generation: u64,
}

impl SearchState {
    pub fn total_results(&self) -> usize {
        self.results.total_results()
    }

    /// Token of the search this state belongs to; bumped by every search and clear.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Back to the initial shape, keeping the generation counter moving forward.
    pub(crate) fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = SearchState { generation, ..SearchState::default() };
    }
}
