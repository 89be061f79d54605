//! Fan-out search over the actant, conference and oeuvre providers.
//!
//! A search launches the three provider calls concurrently on the calling
//! task. Each call clears its own loading flag as soon as it settles, but the
//! result envelope is only replaced once all three have succeeded; a single
//! failure leaves the previous envelope in place.
//!
//! Every search and every clear bumps a generation token. Completions carrying
//! an older token are dropped without touching the state, so a slow search can
//! never overwrite a newer one.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use lexis_core::config::SearchSettings;
use lexis_core::error::{Error, Result};
use lexis_core::traits::{ActantSource, ConferenceSource, OeuvreSource};
use lexis_core::types::SearchResults;

use crate::state::{LoadingState, SearchState, SearchStatus, Section};

/// What a call to [`SearchAggregator::perform_search`] ended up doing.
#[derive(Debug)]
pub enum SearchOutcome {
    /// All providers answered; the envelope now holds `total` results.
    Completed { total: usize },
    /// At least one provider failed; the envelope was left untouched.
    Failed(Error),
    /// A newer search or a clear started meanwhile; nothing was applied.
    Stale,
    /// The query was empty and the state was reset.
    Cleared,
}

pub struct SearchAggregator<A, C, O>
where
    A: ActantSource,
    C: ConferenceSource,
    O: OeuvreSource,
{
    actants: A,
    conferences: C,
    oeuvres: O,
    provider_timeout: Option<Duration>,
    state: watch::Sender<SearchState>,
}

impl<A, C, O> SearchAggregator<A, C, O>
where
    A: ActantSource,
    C: ConferenceSource,
    O: OeuvreSource,
{
    pub fn new(actants: A, conferences: C, oeuvres: O) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self { actants, conferences, oeuvres, provider_timeout: None, state }
    }

    pub fn with_settings(mut self, settings: &SearchSettings) -> Self {
        self.provider_timeout = settings.provider_timeout();
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = Some(timeout);
        self
    }

    pub async fn perform_search(&self, query: &str) -> SearchOutcome {
        let query = query.trim();
        if query.is_empty() {
            self.clear_search();
            return SearchOutcome::Cleared;
        }

        let mut token = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            token = s.generation;
            s.loading = LoadingState::all(true);
            s.has_searched = true;
            s.status = SearchStatus::Searching;
        });
        info!(query, token, "search started");

        let (actants, conferences, oeuvres) = tokio::join!(
            self.track(token, Section::Actants, self.actants.search_actants(query)),
            self.track(token, Section::Conferences, self.conferences.search_conferences(query)),
            self.track(token, Section::Oeuvres, self.oeuvres.search_oeuvres(query)),
        );

        let merged = match (actants, conferences, oeuvres) {
            (Ok(actants), Ok(conferences), Ok(oeuvres)) => Ok(SearchResults { actants, conferences, oeuvres }),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => Err(e),
        };

        let (status, envelope, failure) = match merged {
            Ok(results) => (SearchStatus::Succeeded, Some(results), None),
            Err(e) => (SearchStatus::Failed { message: e.to_string() }, None, Some(e)),
        };
        let total = envelope.as_ref().map_or(0, SearchResults::total_results);
        let applied = self.state.send_if_modified(move |s| {
            if s.generation != token {
                return false;
            }
            s.loading = LoadingState::default();
            s.status = status;
            if let Some(results) = envelope {
                s.results = results;
            }
            true
        });
        if !applied {
            debug!(query, token, "search superseded; results discarded");
            return SearchOutcome::Stale;
        }

        match failure {
            None => {
                info!(query, token, total, "search settled");
                SearchOutcome::Completed { total }
            }
            Some(e) => {
                warn!(query, token, error = %e, "search failed; keeping previous results");
                SearchOutcome::Failed(e)
            }
        }
    }

    /// Reset to the initial idle state and orphan any search in flight.
    pub fn clear_search(&self) {
        self.state.send_modify(SearchState::reset);
        debug!("search cleared");
    }

    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn results(&self) -> SearchResults {
        self.state.borrow().results.clone()
    }

    pub fn loading(&self) -> LoadingState {
        self.state.borrow().loading
    }

    pub fn has_searched(&self) -> bool {
        self.state.borrow().has_searched
    }

    pub fn total_results(&self) -> usize {
        self.state.borrow().total_results()
    }

    pub fn status(&self) -> SearchStatus {
        self.state.borrow().status.clone()
    }

    /// Receiver notified on every state change (flag flips, merges, clears).
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    async fn track<T, F>(&self, token: u64, section: Section, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let result = match self.provider_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
                let after_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                Err(Error::Timeout { provider: section.to_string(), after_ms })
            }),
            None => call.await,
        };

        let current = self.state.send_if_modified(|s| {
            if s.generation != token {
                return false;
            }
            s.loading.set(section, false);
            true
        });
        match (&result, current) {
            (_, false) => debug!(provider = %section, token, "stale provider completion ignored"),
            (Ok(_), true) => debug!(provider = %section, token, "provider settled"),
            (Err(e), true) => warn!(provider = %section, token, error = %e, "provider failed"),
        }
        result
    }
}
