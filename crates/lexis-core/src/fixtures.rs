//! JSON-backed resource provider.
//!
//! Records are read from a directory tree; the collection a file belongs to is
//! derived from its path relative to the root:
//!
//! ```text
//! fixtures/
//!   actants/ada.json            -> actants
//!   oeuvres.json                -> oeuvres
//!   conferences/seminars/*.json -> conferences / seminars
//!   colloques/2023.json         -> conferences / colloques
//! ```
//!
//! A file holds either a single record or an array of records.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::traits::{ActantSource, ConferenceCollection, OeuvreSource};
use crate::types::{Actant, Conference, ConferenceKind, ConferenceSlice, Oeuvre};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    Actants,
    Oeuvres,
    Conferences(ConferenceKind),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

#[derive(Debug, Clone, Default)]
pub struct FixtureStore {
    actants: Vec<Actant>,
    conferences: ConferenceSlice,
    oeuvres: Vec<Oeuvre>,
}

impl FixtureStore {
    pub fn new(actants: Vec<Actant>, conferences: ConferenceSlice, oeuvres: Vec<Oeuvre>) -> Self {
        Self { actants, conferences, oeuvres }
    }

    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::NotFound(format!("fixtures directory {}", root.display())));
        }
        let files = Self::list_json_files(root);
        if files.is_empty() {
            warn!("No .json files found under {}", root.display());
        }
        let mut store = Self::default();
        for file_path in &files {
            let relative_path = file_path.strip_prefix(root).unwrap_or(file_path);
            let Some(collection) = Self::collection_from_path(relative_path) else {
                warn!(path = %relative_path.display(), "skipping file outside known collections");
                continue;
            };
            let content = fs::read_to_string(file_path)?;
            match collection {
                Collection::Actants => store.actants.extend(Self::parse_records::<Actant>(&content)?),
                Collection::Oeuvres => store.oeuvres.extend(Self::parse_records::<Oeuvre>(&content)?),
                Collection::Conferences(kind) => {
                    store.conferences.get_mut(kind).extend(Self::parse_records::<Conference>(&content)?)
                }
            }
            debug!(path = %relative_path.display(), ?collection, "loaded fixture file");
        }
        info!(
            files = files.len(),
            actants = store.actants.len(),
            conferences = store.conferences.len(),
            oeuvres = store.oeuvres.len(),
            "fixture store loaded from {}",
            root.display()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.actants.len() + self.conferences.len() + self.oeuvres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
        Ok(match serde_json::from_str::<OneOrMany<T>>(content)? {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        })
    }

    fn collection_from_path(relative_path: &Path) -> Option<Collection> {
        let mut parts: Vec<String> = relative_path
            .parent()
            .map(|p| p.components().map(|c| c.as_os_str().to_string_lossy().to_string()).collect())
            .unwrap_or_default();
        if let Some(stem) = relative_path.file_stem() {
            parts.push(stem.to_string_lossy().to_string());
        }
        match parts.first()?.as_str() {
            "actants" => Some(Collection::Actants),
            "oeuvres" => Some(Collection::Oeuvres),
            "conferences" => parts
                .get(1)
                .and_then(|s| ConferenceKind::from_collection(s))
                .map(Collection::Conferences),
            other => ConferenceKind::from_collection(other).map(Collection::Conferences),
        }
    }

    fn list_json_files(root: &Path) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
        }
        json_files.sort();
        json_files
    }
}

fn matches(fields: &[&str], needle: &str) -> bool {
    needle.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(needle))
}

#[async_trait]
impl ActantSource for FixtureStore {
    async fn search_actants(&self, query: &str) -> Result<Vec<Actant>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .actants
            .iter()
            .filter(|a| {
                let full_name = a.display_name();
                matches(&[a.firstname.as_str(), a.lastname.as_str(), full_name.as_str()], &needle)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OeuvreSource for FixtureStore {
    async fn search_oeuvres(&self, query: &str) -> Result<Vec<Oeuvre>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .oeuvres
            .iter()
            .filter(|o| matches(&[o.title.as_str(), o.genre.as_deref().unwrap_or_default()], &needle))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ConferenceCollection for FixtureStore {
    async fn search_collection(&self, kind: ConferenceKind, query: &str) -> Result<Vec<Conference>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .conferences
            .get(kind)
            .iter()
            .filter(|c| matches(&[c.title.as_str(), c.actant.as_deref().unwrap_or_default()], &needle))
            .cloned()
            .collect())
    }
}
