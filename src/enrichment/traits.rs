//! Trait definitions for metadata sources.
//!
//! Every scraped site sits behind [`SourceFetcher`]. Implementors only write
//! [`SourceFetcher::lookup`], which may fail; the provided
//! [`SourceFetcher::fetch`] turns that into "fragment or nothing" and emits
//! exactly one fetch-attempt event. Tests substitute the mocks below.
//!
//! # Example
//!
//! ```ignore
//! use practice_minder::enrichment::traits::SourceFetcher;
//!
//! async fn bpm_of<F: SourceFetcher>(fetcher: &F, query: &MetadataQuery) -> Option<u32> {
//!     fetcher.fetch(query, Lookup::Track).await?.bpm
//! }
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::FutureExt;

use super::domain::{Lookup, MetadataError, MetadataFragment, MetadataQuery, SourceKind};
use super::genius::GeniusClient;
use super::lastfm::LastFmClient;
use super::songbpm::SongBpmClient;
use super::wikipedia::WikipediaClient;

/// Tracing target for fetch-attempt events.
pub const FETCH_TARGET: &str = "practice_minder::fetch";

/// A metadata source consulted by the aggregator.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Which site this is, for provenance and logs.
    fn source(&self) -> SourceKind;

    /// Raw lookup. Errors stay inside the fetcher boundary.
    async fn lookup(
        &self,
        query: &MetadataQuery,
        lookup: Lookup,
    ) -> Result<Option<MetadataFragment>, MetadataError>;

    /// Look up and report. Never fails: errors, panics and empty pages
    /// become `None`.
    async fn fetch(&self, query: &MetadataQuery, lookup: Lookup) -> Option<MetadataFragment> {
        let result = AssertUnwindSafe(self.lookup(query, lookup))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| {
                Err(MetadataError::Panicked(panic_message(payload.as_ref())))
            });
        report(self.source(), lookup, result)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Emit the fetch-attempt event and reduce the result to a usable fragment.
pub fn report(
    source: SourceKind,
    lookup: Lookup,
    result: Result<Option<MetadataFragment>, MetadataError>,
) -> Option<MetadataFragment> {
    match result {
        Ok(Some(fragment)) if !fragment.is_empty() => {
            tracing::info!(
                target: FETCH_TARGET,
                source = source.name(),
                lookup = lookup.as_str(),
                outcome = "found",
                fields = %fragment.fields().names().join(","),
                "fetch attempt"
            );
            Some(fragment)
        }
        Ok(_) => {
            tracing::info!(
                target: FETCH_TARGET,
                source = source.name(),
                lookup = lookup.as_str(),
                outcome = "empty",
                fields = "",
                "fetch attempt"
            );
            None
        }
        Err(e) => {
            tracing::warn!(
                target: FETCH_TARGET,
                source = source.name(),
                lookup = lookup.as_str(),
                outcome = e.outcome(),
                fields = "",
                error = %e,
                "fetch attempt"
            );
            None
        }
    }
}

// Implement the trait for real clients

#[async_trait]
impl SourceFetcher for SongBpmClient {
    fn source(&self) -> SourceKind {
        SourceKind::Tempo
    }

    async fn lookup(
        &self,
        query: &MetadataQuery,
        lookup: Lookup,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        match lookup {
            Lookup::Track => SongBpmClient::lookup(self, query).await,
            Lookup::Artist => Err(MetadataError::Unsupported(SourceKind::Tempo.name())),
        }
    }
}

#[async_trait]
impl SourceFetcher for GeniusClient {
    fn source(&self) -> SourceKind {
        SourceKind::Lyrics
    }

    async fn lookup(
        &self,
        query: &MetadataQuery,
        lookup: Lookup,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        match lookup {
            Lookup::Track => GeniusClient::lookup(self, query).await,
            Lookup::Artist => Err(MetadataError::Unsupported(SourceKind::Lyrics.name())),
        }
    }
}

#[async_trait]
impl SourceFetcher for WikipediaClient {
    fn source(&self) -> SourceKind {
        SourceKind::Encyclopedia
    }

    async fn lookup(
        &self,
        query: &MetadataQuery,
        lookup: Lookup,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        match lookup {
            Lookup::Track => WikipediaClient::lookup(self, query).await,
            Lookup::Artist => Err(MetadataError::Unsupported(SourceKind::Encyclopedia.name())),
        }
    }
}

#[async_trait]
impl SourceFetcher for LastFmClient {
    fn source(&self) -> SourceKind {
        SourceKind::Tagging
    }

    async fn lookup(
        &self,
        query: &MetadataQuery,
        lookup: Lookup,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        LastFmClient::lookup(self, query, lookup).await
    }
}
