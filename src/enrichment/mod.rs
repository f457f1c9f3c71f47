//! Song metadata enrichment - scrapes music sites and merges what they know.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **Source DTOs** (`wikipedia/dto.rs`) - Exact API response shapes
//! - **Parsers** - Convert scraped pages to domain fragments
//! - **Clients** - HTTP clients for each site, sharing one [`PageClient`]
//! - **Genres** - Taxonomy and normalizer for free-text tags
//! - **Aggregator** - Ordered precedence list that merges fragments
//!
//! This decoupling means:
//! 1. Markup changes on a site stay inside that site's parser
//! 2. We can test page parsing without the network
//! 3. We can add or drop a source without touching the merge rules
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use enrichment::{Aggregator, GenreTaxonomy, MetadataQuery};
//!
//! let aggregator = Aggregator::new(&config, Arc::new(GenreTaxonomy::standard()))?;
//! let result = aggregator.aggregate(&MetadataQuery::new("Hey Jude", "The Beatles")).await;
//! println!("{:?} BPM in {:?}, from {}", result.bpm, result.key, result.source);
//! ```

pub mod aggregator;
pub mod domain;
pub mod fields;
pub mod genius;
pub mod genres;
pub mod html;
pub mod http;
pub mod lastfm;
pub mod songbpm;
pub mod traits;
pub mod wikipedia;

pub use aggregator::{Aggregator, Sources, Step};
pub use domain::{
    AggregatedMetadata, FieldSet, Lookup, MetadataError, MetadataFragment, MetadataQuery, Mode,
    PitchClass, SourceKind, TimeSignature,
};
pub use genres::{GenreNormalizer, GenreTaxonomy};
pub use http::PageClient;
pub use traits::SourceFetcher;
