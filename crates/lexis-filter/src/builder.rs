use tracing::debug;

use lexis_core::config::FilterSettings;
use lexis_core::types::EntityType;

use crate::concept::extract_concept;
use crate::types::{FilterCondition, FilterGroup, PredefinedFilter};
use crate::vocabulary::{detect_relation, detect_type};

/// Property a condition on `item_type` compares against.
pub fn property_for_type(item_type: EntityType) -> &'static str {
    match item_type {
        EntityType::Keyword => "title",
        EntityType::Citation | EntityType::Conference | EntityType::Bibliography => "mot-clé",
        _ => "lié à",
    }
}

/// Builds a [`PredefinedFilter`] from a chat message.
///
/// Never fails: an unrecognized type degrades to the fallback, a missing
/// relation to `contains` and a missing concept to an empty value.
#[derive(Debug, Clone, Copy)]
pub struct FilterBuilder {
    fallback: EntityType,
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self { fallback: EntityType::Item }
    }
}

impl FilterBuilder {
    pub fn new(fallback: EntityType) -> Self {
        Self { fallback }
    }

    pub fn from_settings(settings: &FilterSettings) -> Self {
        Self::new(settings.fallback_type)
    }

    pub fn fallback(&self) -> EntityType {
        self.fallback
    }

    pub fn build(&self, message: &str) -> PredefinedFilter {
        let item_type = detect_type(message).unwrap_or_else(|| {
            debug!(fallback = %self.fallback, "no entity type in message");
            self.fallback
        });
        let relation = detect_relation(message);
        let concept = extract_concept(message);
        if concept.is_empty() {
            debug!("no concept marker in message; filter value left empty");
        }

        let group = FilterGroup {
            name: format!("{} liés à \"{}\"", item_type, concept),
            is_expanded: true,
            item_type,
            conditions: vec![FilterCondition {
                property: property_for_type(item_type).to_string(),
                operator: relation,
                value: concept,
            }],
            visible_types: EntityType::ALL.to_vec(),
        };

        PredefinedFilter { label: format!("Recherche : {}", message), groups: vec![group] }
    }
}

/// [`FilterBuilder::build`] with the default `item` fallback.
pub fn chat_to_filter(message: &str) -> PredefinedFilter {
    FilterBuilder::default().build(message)
}
