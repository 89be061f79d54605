use async_trait::async_trait;

use lexis_core::error::Result;
use lexis_core::traits::{ConferenceCollection, ConferenceSource};
use lexis_core::types::{ConferenceKind, ConferenceSlice};

/// Presents a per-collection backend as a single conference provider.
///
/// Seminars, colloques and study days are queried concurrently; the call fails
/// as soon as any of the three does.
pub struct ConferenceFanOut<P> {
    inner: P,
}

impl<P: ConferenceCollection> ConferenceFanOut<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: ConferenceCollection> ConferenceSource for ConferenceFanOut<P> {
    async fn search_conferences(&self, query: &str) -> Result<ConferenceSlice> {
        let (seminars, colloques, study_days) = futures::try_join!(
            self.inner.search_collection(ConferenceKind::Seminar, query),
            self.inner.search_collection(ConferenceKind::Colloque, query),
            self.inner.search_collection(ConferenceKind::StudyDay, query)
        )?;
        Ok(ConferenceSlice { seminars, colloques, study_days })
    }
}
