//! songbpm.com HTTP client

use super::parser;
use crate::enrichment::domain::{MetadataError, MetadataFragment, MetadataQuery};
use crate::enrichment::fields::slugify;
use crate::enrichment::http::{PageClient, join_url};

/// Tempo/key site client
pub struct SongBpmClient {
    page_client: PageClient,
    base_url: String,
}

impl SongBpmClient {
    pub fn new(page_client: PageClient, base_url: impl Into<String>) -> Self {
        Self {
            page_client,
            base_url: base_url.into(),
        }
    }

    /// Song page URL, or `None` when either slug comes out empty.
    pub fn song_url(&self, query: &MetadataQuery) -> Option<String> {
        let artist = slugify(&query.artist);
        let title = slugify(&query.title);
        if artist.is_empty() || title.is_empty() {
            return None;
        }
        Some(join_url(&self.base_url, &format!("@{artist}/{title}")))
    }

    /// Fetch and parse the song page.
    pub async fn lookup(
        &self,
        query: &MetadataQuery,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        let Some(url) = self.song_url(query) else {
            return Ok(None);
        };
        let page = self.page_client.get_text(&url).await?;
        Ok(parser::parse_song_page(&page))
    }
}
