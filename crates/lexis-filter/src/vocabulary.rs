//! Maps free text onto the closed set of entity types and relation kinds.
//!
//! Both tables are scanned in declaration order and the first alias found in
//! the lower-cased text wins. When two aliases can both occur in one query,
//! the more specific one must be listed first.
//!
//! Type aliases match as plain substrings so plurals ("citations") still hit.
//! Relation aliases must stand as whole words: "sans" must not fire inside
//! "Sansonetti".

use lexis_core::types::{EntityType, RelationKind};

pub const TYPE_ALIASES: &[(&str, EntityType)] = &[
    ("mots clés", EntityType::Keyword),
    ("mots-clés", EntityType::Keyword),
    ("mot clé", EntityType::Keyword),
    ("mot-clé", EntityType::Keyword),
    ("keyword", EntityType::Keyword),
    ("bibliographie", EntityType::Bibliography),
    ("bibliography", EntityType::Bibliography),
    ("citation", EntityType::Citation),
    ("conférence", EntityType::Conference),
    ("conference", EntityType::Conference),
    ("colloque", EntityType::Conference),
    ("séminaire", EntityType::Conference),
    ("actant", EntityType::Actant),
    ("intervenant", EntityType::Actant),
    ("chercheur", EntityType::Actant),
    ("élément", EntityType::Item),
    ("item", EntityType::Item),
];

// Negated forms first: "ne contenant pas" also contains "contenant".
pub const RELATION_ALIASES: &[(&str, RelationKind)] = &[
    ("ne contient pas", RelationKind::NotContains),
    ("ne contenant pas", RelationKind::NotContains),
    ("sans", RelationKind::NotContains),
    ("égal à", RelationKind::Equals),
    ("exactement", RelationKind::Equals),
    ("contient", RelationKind::Contains),
    ("contenant", RelationKind::Contains),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Substring,
    Word,
}

fn occurs(haystack: &str, alias: &str, boundary: Boundary) -> bool {
    match boundary {
        Boundary::Substring => haystack.contains(alias),
        Boundary::Word => haystack.match_indices(alias).any(|(start, _)| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[start + alias.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        }),
    }
}

fn first_match<T: Copy>(table: &[(&str, T)], text: &str, boundary: Boundary) -> Option<T> {
    let lower = text.to_lowercase();
    table.iter().find(|(alias, _)| occurs(&lower, alias, boundary)).map(|&(_, value)| value)
}

/// Entity type named in `text`, or `None` when no alias occurs.
pub fn detect_type(text: &str) -> Option<EntityType> {
    first_match(TYPE_ALIASES, text, Boundary::Substring)
}

/// Relation named in `text`; [`RelationKind::Contains`] when none occurs.
pub fn detect_relation(text: &str) -> RelationKind {
    first_match(RELATION_ALIASES, text, Boundary::Word).unwrap_or_default()
}
