//! Filter tree handed to the visualization engine.
//!
//! Field names serialize in the camelCase shape the renderer expects
//! (`isExpanded`, `itemType`, `visibleTypes`).

use serde::{Deserialize, Serialize};

use lexis_core::types::{EntityType, RelationKind};

/// One predicate: `property <operator> value`.
///
/// `property` is derived from the group's entity type, never taken from the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterCondition {
    pub property: String,
    pub operator: RelationKind,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub name: String,
    pub is_expanded: bool,
    pub item_type: EntityType,
    pub conditions: Vec<FilterCondition>,
    pub visible_types: Vec<EntityType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredefinedFilter {
    pub label: String,
    pub groups: Vec<FilterGroup>,
}

impl PredefinedFilter {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
