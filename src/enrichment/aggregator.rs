//! Aggregator - merges source fragments into one metadata record
//!
//! Sources are consulted in a fixed order described by a list of [`Step`]s:
//! 1. Tempo/key site: bpm, key, mode, time signature
//! 2. Lyrics site: album and genres
//! 3. Encyclopedia, only while no album is known: album, then genres
//! 4. Tagging site track page, only while no genres are known
//! 5. Tagging site artist page, only while still no genres are known
//!
//! Each field keeps the first non-empty value offered for it. Genres are
//! merged as raw tags and normalized once after the last step, so a source
//! that offered any tags is credited and ends the genre fallbacks even when
//! none of its tags map onto the taxonomy.

use std::sync::Arc;

use super::domain::{
    AggregatedMetadata, FieldSet, Lookup, MetadataFragment, MetadataQuery, NO_SOURCE, SourceKind,
};
use super::genius::GeniusClient;
use super::genres::{GenreNormalizer, GenreTaxonomy};
use super::http::PageClient;
use super::lastfm::LastFmClient;
use super::songbpm::SongBpmClient;
use super::traits::SourceFetcher;
use super::wikipedia::WikipediaClient;
use crate::config::Config;
use crate::error::Result;

/// Separator between source names in the provenance string.
pub const SOURCE_SEPARATOR: &str = ", ";

/// When a step runs, judged against what has been merged so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunIf {
    Always,
    MissingAlbum,
    MissingGenres,
}

impl RunIf {
    fn holds(self, merged: &AggregatedMetadata) -> bool {
        match self {
            Self::Always => true,
            Self::MissingAlbum => merged.album.is_none(),
            Self::MissingGenres => merged.genres.is_none(),
        }
    }
}

/// When a step's source is named in the provenance string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credit {
    /// Whenever the step ran, even if it found nothing
    WhenRan,
    /// Only when it supplied an album or genres
    WhenContributed,
}

/// One entry of the precedence list.
#[derive(Clone)]
pub struct Step {
    pub fetcher: Arc<dyn SourceFetcher>,
    pub lookup: Lookup,
    pub run_if: RunIf,
    /// Fields this step may fill
    pub adopts: FieldSet,
    pub credit: Credit,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("source", &self.fetcher.source())
            .field("lookup", &self.lookup)
            .field("run_if", &self.run_if)
            .field("adopts", &self.adopts)
            .field("credit", &self.credit)
            .finish()
    }
}

/// The four sources, any of which may be switched off.
#[derive(Clone, Default)]
pub struct Sources {
    pub tempo: Option<Arc<dyn SourceFetcher>>,
    pub lyrics: Option<Arc<dyn SourceFetcher>>,
    pub encyclopedia: Option<Arc<dyn SourceFetcher>>,
    pub tagging: Option<Arc<dyn SourceFetcher>>,
}

impl Sources {
    /// Build the scraping clients from configuration, sharing one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let page_client = PageClient::new(&config.http)?;
        let enabled = |kind: SourceKind| {
            let source = config.sources.get(kind);
            source.enabled.then(|| source.base_url_for(kind))
        };

        Ok(Self {
            tempo: enabled(SourceKind::Tempo).map(|url| {
                Arc::new(SongBpmClient::new(page_client.clone(), url)) as Arc<dyn SourceFetcher>
            }),
            lyrics: enabled(SourceKind::Lyrics).map(|url| {
                Arc::new(GeniusClient::new(page_client.clone(), url)) as Arc<dyn SourceFetcher>
            }),
            encyclopedia: enabled(SourceKind::Encyclopedia).map(|url| {
                Arc::new(WikipediaClient::new(page_client.clone(), url)) as Arc<dyn SourceFetcher>
            }),
            tagging: enabled(SourceKind::Tagging).map(|url| {
                Arc::new(LastFmClient::new(page_client.clone(), url)) as Arc<dyn SourceFetcher>
            }),
        })
    }

    /// The standard precedence list over whichever sources are present.
    pub fn into_steps(self) -> Vec<Step> {
        let mut steps = Vec::with_capacity(5);
        if let Some(fetcher) = self.tempo {
            steps.push(Step {
                fetcher,
                lookup: Lookup::Track,
                run_if: RunIf::Always,
                adopts: FieldSet::TEMPO,
                credit: Credit::WhenRan,
            });
        }
        if let Some(fetcher) = self.lyrics {
            steps.push(Step {
                fetcher,
                lookup: Lookup::Track,
                run_if: RunIf::Always,
                adopts: FieldSet::CATALOG,
                credit: Credit::WhenContributed,
            });
        }
        if let Some(fetcher) = self.encyclopedia {
            steps.push(Step {
                fetcher,
                lookup: Lookup::Track,
                run_if: RunIf::MissingAlbum,
                adopts: FieldSet::CATALOG,
                credit: Credit::WhenContributed,
            });
        }
        if let Some(fetcher) = self.tagging {
            steps.push(Step {
                fetcher: fetcher.clone(),
                lookup: Lookup::Track,
                run_if: RunIf::MissingGenres,
                adopts: FieldSet::GENRES,
                credit: Credit::WhenContributed,
            });
            steps.push(Step {
                fetcher,
                lookup: Lookup::Artist,
                run_if: RunIf::MissingGenres,
                adopts: FieldSet::GENRES,
                credit: Credit::WhenContributed,
            });
        }
        steps
    }
}

/// Runs the precedence list for one query at a time.
///
/// Holds no per-request state, so one aggregator serves any number of
/// concurrent lookups.
#[derive(Debug, Clone)]
pub struct Aggregator {
    steps: Vec<Step>,
    normalizer: GenreNormalizer,
}

impl Aggregator {
    /// Aggregator over the configured scraping sources.
    pub fn new(config: &Config, taxonomy: Arc<GenreTaxonomy>) -> Result<Self> {
        let steps = Sources::from_config(config)?.into_steps();
        tracing::debug!(steps = steps.len(), "Built metadata aggregator");
        Ok(Self::with_steps(steps, GenreNormalizer::new(taxonomy)))
    }

    /// Aggregator over an explicit step list.
    pub fn with_steps(steps: Vec<Step>, normalizer: GenreNormalizer) -> Self {
        Self { steps, normalizer }
    }

    /// Look up one song. Never fails; invalid input gives the empty record
    /// without any network call.
    pub async fn aggregate(&self, query: &MetadataQuery) -> AggregatedMetadata {
        if !query.is_valid() {
            tracing::debug!("Skipping metadata lookup: title or artist is empty");
            return AggregatedMetadata::empty();
        }

        let mut merged = AggregatedMetadata::empty();
        let mut credited: Vec<&'static str> = Vec::new();

        for step in &self.steps {
            if !step.run_if.holds(&merged) {
                continue;
            }

            let adopted = match step.fetcher.fetch(query, step.lookup).await {
                Some(fragment) => self.adopt(&mut merged, fragment, step.adopts),
                None => FieldSet::empty(),
            };

            let credit = match step.credit {
                Credit::WhenRan => true,
                Credit::WhenContributed => adopted.intersects(FieldSet::CATALOG),
            };
            let name = step.fetcher.source().name();
            if credit && !credited.contains(&name) {
                credited.push(name);
            }
        }

        // Raw tags until here; an empty normalized list is reported as null
        merged.genres = self
            .normalizer
            .normalize(merged.genres.as_deref())
            .filter(|g| !g.is_empty());
        merged.source = if credited.is_empty() {
            NO_SOURCE.to_string()
        } else {
            credited.join(SOURCE_SEPARATOR)
        };

        tracing::debug!(
            title = %query.title,
            artist = %query.artist,
            source = %merged.source,
            "Metadata lookup complete"
        );
        merged
    }

    /// Fill empty fields of `merged` from `fragment`, limited to `allowed`.
    fn adopt(
        &self,
        merged: &mut AggregatedMetadata,
        fragment: MetadataFragment,
        allowed: FieldSet,
    ) -> FieldSet {
        let mut adopted = FieldSet::empty();

        if allowed.contains(FieldSet::BPM) && fill(&mut merged.bpm, fragment.bpm) {
            adopted |= FieldSet::BPM;
        }
        if allowed.contains(FieldSet::KEY) && fill(&mut merged.key, fragment.key) {
            adopted |= FieldSet::KEY;
        }
        if allowed.contains(FieldSet::MODE) && fill(&mut merged.mode, fragment.mode) {
            adopted |= FieldSet::MODE;
        }
        if allowed.contains(FieldSet::TIME_SIGNATURE)
            && fill(&mut merged.time_signature, fragment.time_signature)
        {
            adopted |= FieldSet::TIME_SIGNATURE;
        }
        if allowed.contains(FieldSet::ALBUM) && fill(&mut merged.album, fragment.album) {
            adopted |= FieldSet::ALBUM;
        }
        if allowed.contains(FieldSet::GENRES)
            && fill(&mut merged.genres, fragment.genres.filter(|g| !g.is_empty()))
        {
            adopted |= FieldSet::GENRES;
        }

        adopted
    }
}

/// First non-empty value wins.
fn fill<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    if slot.is_some() || value.is_none() {
        return false;
    }
    *slot = value;
    true
}
