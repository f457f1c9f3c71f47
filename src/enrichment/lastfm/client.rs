//! last.fm HTTP client

use super::parser;
use crate::enrichment::domain::{Lookup, MetadataError, MetadataFragment, MetadataQuery};
use crate::enrichment::fields::slugify;
use crate::enrichment::http::{PageClient, join_url};

/// Tagging site client
pub struct LastFmClient {
    page_client: PageClient,
    base_url: String,
}

impl LastFmClient {
    pub fn new(page_client: PageClient, base_url: impl Into<String>) -> Self {
        Self {
            page_client,
            base_url: base_url.into(),
        }
    }

    /// Track or artist page URL, or `None` when a needed slug is empty.
    pub fn page_url(&self, query: &MetadataQuery, lookup: Lookup) -> Option<String> {
        let artist = slugify(&query.artist);
        if artist.is_empty() {
            return None;
        }
        let path = match lookup {
            Lookup::Artist => format!("music/{artist}"),
            Lookup::Track => {
                let title = slugify(&query.title);
                if title.is_empty() {
                    return None;
                }
                format!("music/{artist}/_/{title}")
            }
        };
        Some(join_url(&self.base_url, &path))
    }

    /// Fetch tags from the track page or the artist page.
    pub async fn lookup(
        &self,
        query: &MetadataQuery,
        lookup: Lookup,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        let Some(url) = self.page_url(query, lookup) else {
            return Ok(None);
        };
        let page = self.page_client.get_text(&url).await?;
        Ok(parser::parse_tag_page(&page).map(|tags| MetadataFragment {
            genres: Some(tags),
            ..Default::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::test_utils::lastfm_page;
    use httpmock::prelude::*;

    fn client(base_url: &str) -> LastFmClient {
        LastFmClient::new(PageClient::new(&HttpConfig::default()).unwrap(), base_url)
    }

    #[test]
    fn test_page_urls() {
        let client = client("https://www.last.fm");
        let query = MetadataQuery::new("Hey Jude", "The Beatles");
        assert_eq!(
            client.page_url(&query, Lookup::Track).as_deref(),
            Some("https://www.last.fm/music/the-beatles/_/hey-jude")
        );
        assert_eq!(
            client.page_url(&query, Lookup::Artist).as_deref(),
            Some("https://www.last.fm/music/the-beatles")
        );
    }

    #[tokio::test]
    async fn test_artist_lookup() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/music/radiohead");
            then.status(200)
                .body(lastfm_page(&["alternative", "rock", "british"]));
        });

        let fragment = client(&server.base_url())
            .lookup(&MetadataQuery::new("Unknown B-side", "Radiohead"), Lookup::Artist)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            fragment.genres,
            Some(vec!["alternative".to_string(), "rock".to_string()])
        );
        mock.assert();
    }

    #[tokio::test]
    async fn test_track_page_without_tags() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/music/radiohead/_/creep");
            then.status(200).body(lastfm_page(&[]));
        });

        let result = client(&server.base_url())
            .lookup(&MetadataQuery::new("Creep", "Radiohead"), Lookup::Track)
            .await
            .unwrap();
        assert_eq!(result, None);
    }
}
