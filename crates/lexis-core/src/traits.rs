use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Actant, Conference, ConferenceKind, ConferenceSlice, Oeuvre};

/// People (researchers, speakers) matching a query.
#[async_trait]
pub trait ActantSource: Send + Sync {
    async fn search_actants(&self, query: &str) -> Result<Vec<Actant>>;
}

/// Conferences matching a query, already split by sub-collection.
#[async_trait]
pub trait ConferenceSource: Send + Sync {
    async fn search_conferences(&self, query: &str) -> Result<ConferenceSlice>;
}

/// Works matching a query.
#[async_trait]
pub trait OeuvreSource: Send + Sync {
    async fn search_oeuvres(&self, query: &str) -> Result<Vec<Oeuvre>>;
}

/// A backend able to search one conference sub-collection at a time.
#[async_trait]
pub trait ConferenceCollection: Send + Sync {
    async fn search_collection(&self, kind: ConferenceKind, query: &str) -> Result<Vec<Conference>>;
}

#[async_trait]
impl<T: ActantSource + ?Sized> ActantSource for Arc<T> {
    async fn search_actants(&self, query: &str) -> Result<Vec<Actant>> {
        (**self).search_actants(query).await
    }
}

#[async_trait]
impl<T: ConferenceSource + ?Sized> ConferenceSource for Arc<T> {
    async fn search_conferences(&self, query: &str) -> Result<ConferenceSlice> {
        (**self).search_conferences(query).await
    }
}

#[async_trait]
impl<T: OeuvreSource + ?Sized> OeuvreSource for Arc<T> {
    async fn search_oeuvres(&self, query: &str) -> Result<Vec<Oeuvre>> {
        (**self).search_oeuvres(query).await
    }
}

#[async_trait]
impl<T: ConferenceCollection + ?Sized> ConferenceCollection for Arc<T> {
    async fn search_collection(&self, kind: ConferenceKind, query: &str) -> Result<Vec<Conference>> {
        (**self).search_collection(kind, query).await
    }
}
