//! genius.com HTTP client

use super::parser::{self, MIN_PAGE_BYTES};
use crate::enrichment::domain::{MetadataError, MetadataFragment, MetadataQuery};
use crate::enrichment::fields::{capitalized_slug, slugify};
use crate::enrichment::http::{PageClient, join_url};

/// Lyrics annotation site client
pub struct GeniusClient {
    page_client: PageClient,
    base_url: String,
}

impl GeniusClient {
    pub fn new(page_client: PageClient, base_url: impl Into<String>) -> Self {
        Self {
            page_client,
            base_url: base_url.into(),
        }
    }

    /// Lyrics page URL, or `None` when either slug comes out empty.
    pub fn song_url(&self, query: &MetadataQuery) -> Option<String> {
        let artist = capitalized_slug(&query.artist);
        let title = slugify(&query.title);
        if artist.is_empty() || title.is_empty() {
            return None;
        }
        Some(join_url(&self.base_url, &format!("{artist}-{title}-lyrics")))
    }

    /// Fetch and parse the lyrics page.
    pub async fn lookup(
        &self,
        query: &MetadataQuery,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        let Some(url) = self.song_url(query) else {
            return Ok(None);
        };
        let page = self.page_client.get_text(&url).await?;
        if page.len() <= MIN_PAGE_BYTES {
            return Err(MetadataError::SoftNotFound(page.len()));
        }
        Ok(parser::parse_song_page(&page))
    }
}
