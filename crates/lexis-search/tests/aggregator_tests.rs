use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

use lexis_core::config::SearchSettings;
use lexis_core::error::{Error, Result};
use lexis_core::traits::{ActantSource, ConferenceSource, OeuvreSource};
use lexis_core::types::{Actant, Conference, ConferenceSlice, Oeuvre, SearchResults};
use lexis_search::{LoadingState, SearchAggregator, SearchOutcome, SearchStatus};

fn actant(id: String) -> Actant {
    Actant { id, firstname: "Gilbert".into(), lastname: "Simondon".into(), universities: vec![] }
}

fn conference(id: String) -> Conference {
    Conference { id, title: "Séminaire".into(), date: None, actant: None }
}

fn oeuvre(id: String) -> Oeuvre {
    Oeuvre { id, title: "Vague".into(), date: None, genre: None }
}

/// Answers `n` records whose ids echo the query.
struct EchoActants(usize);
struct EchoOeuvres(usize);
/// One record per sub-collection; rejects the query "boom".
struct EchoConferences;

fn echo_slice(query: &str) -> ConferenceSlice {
    ConferenceSlice {
        seminars: vec![conference(format!("{}-s", query))],
        colloques: vec![conference(format!("{}-c", query))],
        study_days: vec![conference(format!("{}-j", query))],
    }
}

#[async_trait]
impl ActantSource for EchoActants {
    async fn search_actants(&self, query: &str) -> Result<Vec<Actant>> {
        Ok((0..self.0).map(|i| actant(format!("{}-{}", query, i))).collect())
    }
}

#[async_trait]
impl OeuvreSource for EchoOeuvres {
    async fn search_oeuvres(&self, query: &str) -> Result<Vec<Oeuvre>> {
        Ok((0..self.0).map(|i| oeuvre(format!("{}-{}", query, i))).collect())
    }
}

#[async_trait]
impl ConferenceSource for EchoConferences {
    async fn search_conferences(&self, query: &str) -> Result<ConferenceSlice> {
        if query == "boom" {
            return Err(Error::provider("conferences", "backend unavailable"));
        }
        Ok(echo_slice(query))
    }
}

#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
}

/// Wraps a provider and holds back the queries that have a gate until released.
struct Gated<P> {
    inner: P,
    gates: Vec<(&'static str, Arc<Gate>)>,
}

impl<P> Gated<P> {
    fn new(inner: P) -> Self {
        Self { inner, gates: Vec::new() }
    }

    fn gate(mut self, query: &'static str, gate: Arc<Gate>) -> Self {
        self.gates.push((query, gate));
        self
    }

    async fn pass(&self, query: &str) {
        if let Some((_, gate)) = self.gates.iter().find(|(q, _)| *q == query) {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

#[async_trait]
impl<P: ActantSource> ActantSource for Gated<P> {
    async fn search_actants(&self, query: &str) -> Result<Vec<Actant>> {
        self.pass(query).await;
        self.inner.search_actants(query).await
    }
}

#[async_trait]
impl<P: ConferenceSource> ConferenceSource for Gated<P> {
    async fn search_conferences(&self, query: &str) -> Result<ConferenceSlice> {
        self.pass(query).await;
        self.inner.search_conferences(query).await
    }
}

#[async_trait]
impl<P: OeuvreSource> OeuvreSource for Gated<P> {
    async fn search_oeuvres(&self, query: &str) -> Result<Vec<Oeuvre>> {
        self.pass(query).await;
        self.inner.search_oeuvres(query).await
    }
}

struct SleepyOeuvres;

#[async_trait]
impl OeuvreSource for SleepyOeuvres {
    async fn search_oeuvres(&self, _query: &str) -> Result<Vec<Oeuvre>> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(vec![])
    }
}

fn echo_aggregator() -> SearchAggregator<EchoActants, EchoConferences, EchoOeuvres> {
    SearchAggregator::new(EchoActants(2), EchoConferences, EchoOeuvres(4))
}

#[tokio::test]
async fn initial_state_is_idle() {
    let agg = echo_aggregator();
    let snap = agg.snapshot();
    assert!(!snap.has_searched);
    assert_eq!(snap.loading, LoadingState::all(false));
    assert_eq!(snap.results, SearchResults::default());
    assert_eq!(snap.status, SearchStatus::Idle);
    assert_eq!(agg.total_results(), 0);
}

#[tokio::test]
async fn all_success_counts_every_leaf() {
    let agg = echo_aggregator();

    let outcome = agg.perform_search("test").await;

    assert!(matches!(outcome, SearchOutcome::Completed { total: 9 }));
    assert_eq!(agg.total_results(), 2 + 3 + 4);
    assert_eq!(agg.loading(), LoadingState::all(false));
    assert!(agg.has_searched());
    assert_eq!(agg.status(), SearchStatus::Succeeded);
    let results = agg.results();
    assert_eq!(results.actants[1].id, "test-1");
    assert_eq!(results.conferences.study_days[0].id, "test-j");
}

#[tokio::test]
async fn query_is_trimmed_before_fan_out() {
    let agg = echo_aggregator();
    agg.perform_search("  deleuze ").await;
    assert_eq!(agg.results().actants[0].id, "deleuze-0");
}

#[tokio::test]
async fn provider_failure_keeps_previous_envelope() {
    let agg = echo_aggregator();
    agg.perform_search("test").await;
    let before = agg.results();

    let outcome = agg.perform_search("boom").await;

    match outcome {
        SearchOutcome::Failed(Error::Provider { provider, .. }) => assert_eq!(provider, "conferences"),
        other => panic!("expected provider failure, got {:?}", other),
    }
    // actants and oeuvres succeeded but are not merged on their own
    assert_eq!(agg.results(), before);
    assert_eq!(agg.loading(), LoadingState::all(false));
    assert!(agg.has_searched());
    assert!(matches!(agg.status(), SearchStatus::Failed { .. }));
}

#[tokio::test]
async fn failure_on_first_search_leaves_envelope_empty() {
    let agg = echo_aggregator();
    let outcome = agg.perform_search("boom").await;
    assert!(matches!(outcome, SearchOutcome::Failed(_)));
    assert_eq!(agg.results(), SearchResults::default());
    assert!(agg.has_searched());
    assert_eq!(agg.total_results(), 0);
}

#[tokio::test]
async fn clear_and_empty_query_return_to_idle() {
    let agg = echo_aggregator();

    agg.perform_search("test").await;
    agg.clear_search();
    let cleared = agg.snapshot();
    assert!(!cleared.has_searched);
    assert_eq!(cleared.loading, LoadingState::all(false));
    assert_eq!(cleared.results, SearchResults::default());
    assert_eq!(cleared.status, SearchStatus::Idle);

    agg.perform_search("test").await;
    assert!(matches!(agg.perform_search("").await, SearchOutcome::Cleared));
    let emptied = agg.snapshot();
    assert!(!emptied.has_searched);
    assert_eq!(emptied.loading, LoadingState::all(false));
    assert_eq!(emptied.results, SearchResults::default());

    assert!(matches!(agg.perform_search("   ").await, SearchOutcome::Cleared));
    agg.clear_search();
    assert!(!agg.has_searched());
}

#[tokio::test]
async fn loading_flags_settle_independently() {
    let gate = Arc::new(Gate::default());
    let agg = Arc::new(SearchAggregator::new(EchoActants(1), Gated::new(EchoConferences).gate("slow", gate.clone()), EchoOeuvres(1)));
    let mut rx = agg.subscribe();

    let task = tokio::spawn({
        let agg = agg.clone();
        async move { agg.perform_search("slow").await }
    });
    gate.entered.notified().await;
    rx.wait_for(|s| s.has_searched && !s.loading.actants && !s.loading.oeuvres).await.unwrap();

    let mid = agg.snapshot();
    assert!(mid.loading.conferences);
    assert!(mid.loading.any());
    assert!(mid.results.is_empty(), "nothing is merged before every provider settles");
    assert_eq!(mid.status, SearchStatus::Searching);

    gate.release.notify_one();
    let outcome = task.await.unwrap();
    assert!(matches!(outcome, SearchOutcome::Completed { total: 5 }));
    assert_eq!(agg.loading(), LoadingState::all(false));
}

#[tokio::test]
async fn stale_completion_is_discarded() {
    let gate = Arc::new(Gate::default());
    let agg = Arc::new(SearchAggregator::new(EchoActants(1), Gated::new(EchoConferences).gate("slow", gate.clone()), EchoOeuvres(1)));

    let slow = tokio::spawn({
        let agg = agg.clone();
        async move { agg.perform_search("slow").await }
    });
    gate.entered.notified().await;

    let fast = agg.perform_search("fast").await;
    assert!(matches!(fast, SearchOutcome::Completed { total: 5 }));

    gate.release.notify_one();
    assert!(matches!(slow.await.unwrap(), SearchOutcome::Stale));

    let snap = agg.snapshot();
    assert_eq!(snap.results.actants[0].id, "fast-0");
    assert_eq!(snap.results.conferences.seminars[0].id, "fast-s");
    assert_eq!(snap.loading, LoadingState::all(false));
    assert_eq!(snap.status, SearchStatus::Succeeded);
    assert_eq!(snap.generation(), 2);
}

#[tokio::test]
async fn clear_during_search_wins() {
    let gate = Arc::new(Gate::default());
    let agg = Arc::new(SearchAggregator::new(EchoActants(1), Gated::new(EchoConferences).gate("slow", gate.clone()), EchoOeuvres(1)));

    let slow = tokio::spawn({
        let agg = agg.clone();
        async move { agg.perform_search("slow").await }
    });
    gate.entered.notified().await;
    agg.clear_search();

    gate.release.notify_one();
    assert!(matches!(slow.await.unwrap(), SearchOutcome::Stale));

    let snap = agg.snapshot();
    assert!(!snap.has_searched);
    assert!(snap.results.is_empty());
    assert_eq!(snap.loading, LoadingState::all(false));
    assert_eq!(snap.status, SearchStatus::Idle);
}

#[tokio::test]
async fn provider_timeout_counts_as_failure() {
    let agg = SearchAggregator::new(EchoActants(1), EchoConferences, SleepyOeuvres)
        .with_provider_timeout(Duration::from_millis(20));

    let outcome = agg.perform_search("test").await;

    match outcome {
        SearchOutcome::Failed(Error::Timeout { provider, after_ms }) => {
            assert_eq!(provider, "oeuvres");
            assert_eq!(after_ms, 20);
        }
        other => panic!("expected timeout, got {:?}", other),
    }
    assert_eq!(agg.loading(), LoadingState::all(false));
    assert!(agg.results().is_empty());
}

#[tokio::test]
async fn timeout_is_read_from_settings() {
    let settings = SearchSettings { provider_timeout_ms: Some(20) };
    let agg = SearchAggregator::new(EchoActants(1), EchoConferences, SleepyOeuvres).with_settings(&settings);
    assert!(matches!(agg.perform_search("test").await, SearchOutcome::Failed(Error::Timeout { .. })));
}

#[tokio::test]
async fn subscribers_see_the_settled_state() {
    let agg = echo_aggregator();
    let mut rx = agg.subscribe();

    agg.perform_search("test").await;

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.total_results(), 9);
    assert_eq!(seen.status, SearchStatus::Succeeded);

    let json = serde_json::to_value(&seen).unwrap();
    assert_eq!(json["hasSearched"], true);
    assert_eq!(json["status"]["state"], "succeeded");
    assert_eq!(json["results"]["conferences"]["studyDays"][0]["id"], "test-j");
}

#[tokio::test]
async fn search_start_raises_every_flag() {
    let (a, c, o) = (Arc::new(Gate::default()), Arc::new(Gate::default()), Arc::new(Gate::default()));
    let agg = Arc::new(SearchAggregator::new(
        Gated::new(EchoActants(1)).gate("test", a.clone()),
        Gated::new(EchoConferences).gate("test", c.clone()),
        Gated::new(EchoOeuvres(1)).gate("test", o.clone()),
    ));
    let mut rx = agg.subscribe();

    let task = tokio::spawn({
        let agg = agg.clone();
        async move { agg.perform_search("test").await }
    });
    for gate in [&a, &c, &o] {
        gate.entered.notified().await;
    }

    assert!(rx.has_changed().unwrap());
    let started = rx.borrow_and_update().clone();
    assert_eq!(started.loading, LoadingState::all(true));
    assert_eq!(started.status, SearchStatus::Searching);
    assert!(started.has_searched);
    assert!(started.results.is_empty());

    for gate in [&a, &c, &o] {
        gate.release.notify_one();
    }
    assert!(matches!(task.await.unwrap(), SearchOutcome::Completed { total: 5 }));
    assert_eq!(agg.loading(), LoadingState::all(false));
}

#[tokio::test]
async fn stale_provider_does_not_clear_the_newer_flag() {
    let (old, new) = (Arc::new(Gate::default()), Arc::new(Gate::default()));
    let agg = Arc::new(SearchAggregator::new(
        Gated::new(EchoActants(1)).gate("old", old.clone()).gate("new", new.clone()),
        EchoConferences,
        EchoOeuvres(1),
    ));

    let first = tokio::spawn({
        let agg = agg.clone();
        async move { agg.perform_search("old").await }
    });
    old.entered.notified().await;
    let second = tokio::spawn({
        let agg = agg.clone();
        async move { agg.perform_search("new").await }
    });
    new.entered.notified().await;

    old.release.notify_one();
    assert!(matches!(first.await.unwrap(), SearchOutcome::Stale));

    let mid = agg.snapshot();
    assert!(mid.loading.actants, "the newer search still waits on actants");
    assert!(!mid.loading.conferences);
    assert!(!mid.loading.oeuvres);
    assert_eq!(mid.status, SearchStatus::Searching);
    assert!(mid.results.is_empty());
    assert_eq!(mid.generation(), 2);

    new.release.notify_one();
    assert!(matches!(second.await.unwrap(), SearchOutcome::Completed { total: 5 }));
    let done = agg.snapshot();
    assert_eq!(done.results.actants[0].id, "new-0");
    assert_eq!(done.loading, LoadingState::all(false));
}
