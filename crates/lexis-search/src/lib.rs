//! lexis-search
//!
//! Runs one query against the actant, conference and oeuvre providers at once
//! and exposes the merged results, per-provider loading flags and search
//! status as an observable snapshot. See `aggregator`, `state` and `fanout`.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod aggregator;
pub mod fanout;
pub mod state;

pub use aggregator::{SearchAggregator, SearchOutcome};
pub use fanout::ConferenceFanOut;
pub use state::{LoadingState, SearchState, SearchStatus, Section};
