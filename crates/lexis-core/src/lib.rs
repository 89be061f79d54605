//! lexis-core
//!
//! Shared vocabulary of the workspace: entity and relation tags, resource
//! records, the merged search envelope, provider traits, configuration and a
//! JSON fixture store usable as a provider.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod fixtures;
pub mod traits;
pub mod types;
