//! lexis-filter
//!
//! Translates a free-text request ("mots clés sur l'art numérique") into the
//! typed filter tree consumed by the graph renderer. See `vocabulary`,
//! `concept` and `builder`.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod vocabulary;
pub mod concept;
pub mod types;
pub mod builder;

pub use builder::{chat_to_filter, property_for_type, FilterBuilder};
pub use concept::extract_concept;
pub use types::{FilterCondition, FilterGroup, PredefinedFilter};
pub use vocabulary::{detect_relation, detect_type};
