//! wikipedia.org HTTP client

use super::dto::SearchResponse;
use super::parser::{self, AlbumRef};
use crate::enrichment::domain::{MetadataError, MetadataFragment, MetadataQuery};
use crate::enrichment::http::{PageClient, join_url};

/// Encyclopedia client
pub struct WikipediaClient {
    page_client: PageClient,
    base_url: String,
}

impl WikipediaClient {
    pub fn new(page_client: PageClient, base_url: impl Into<String>) -> Self {
        Self {
            page_client,
            base_url: base_url.into(),
        }
    }

    /// Full-text search URL for `"<artist> <title>"`.
    pub fn search_url(&self, query: &MetadataQuery) -> String {
        let terms = format!("{} {}", query.artist, query.title);
        join_url(
            &self.base_url,
            &format!(
                "w/api.php?action=query&list=search&format=json&srlimit=1&srsearch={}",
                urlencoding::encode(&terms)
            ),
        )
    }

    /// Article URL for a page title ("Hey Jude" -> `/wiki/Hey_Jude`).
    pub fn article_url(&self, title: &str) -> String {
        let path = title.trim().replace(' ', "_");
        join_url(&self.base_url, &format!("wiki/{}", urlencoding::encode(&path)))
    }

    /// Search, read the song article, then the album article.
    ///
    /// A failed album article fetch keeps the album and drops the genres.
    pub async fn lookup(
        &self,
        query: &MetadataQuery,
    ) -> Result<Option<MetadataFragment>, MetadataError> {
        let response: SearchResponse = self.page_client.get_json(&self.search_url(query)).await?;
        let Some(title) = response.top_title() else {
            return Ok(None);
        };

        let song_page = self.page_client.get_text(&self.article_url(title)).await?;
        let Some(album) = parser::parse_song_page(&song_page) else {
            return Ok(None);
        };

        let genres = match self.album_genres(&album).await {
            Ok(genres) => genres,
            Err(e) => {
                tracing::debug!(album = %album.name, "Album article lookup failed: {}", e);
                None
            }
        };

        Ok(Some(MetadataFragment {
            album: Some(album.name),
            genres,
            ..Default::default()
        }))
    }

    async fn album_genres(&self, album: &AlbumRef) -> Result<Option<Vec<String>>, MetadataError> {
        let url = match &album.path {
            Some(path) => join_url(&self.base_url, path),
            None => self.article_url(&album.name),
        };
        let page = self.page_client.get_text(&url).await?;
        Ok(parser::parse_album_genres(&page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::test_utils::{wikipedia_album_page, wikipedia_song_page};
    use httpmock::prelude::*;

    fn client(base_url: &str) -> WikipediaClient {
        WikipediaClient::new(PageClient::new(&HttpConfig::default()).unwrap(), base_url)
    }

    fn search_body(titles: &[&str]) -> serde_json::Value {
        let hits: Vec<_> = titles
            .iter()
            .map(|t| serde_json::json!({"ns": 0, "title": t}))
            .collect();
        serde_json::json!({"query": {"search": hits}})
    }

    #[test]
    fn test_urls() {
        let client = client("https://en.wikipedia.org");
        let query = MetadataQuery::new("Hey Jude", "The Beatles");
        assert_eq!(
            client.search_url(&query),
            "https://en.wikipedia.org/w/api.php?action=query&list=search&format=json&srlimit=1&srsearch=The%20Beatles%20Hey%20Jude"
        );
        assert_eq!(
            client.article_url("Hey Jude"),
            "https://en.wikipedia.org/wiki/Hey_Jude"
        );
    }

    #[tokio::test]
    async fn test_lookup_follows_album_link() {
        let server = MockServer::start();
        let search = server.mock(|when, then| {
            when.method(GET)
                .path("/w/api.php")
                .query_param("srsearch", "The Beatles Something");
            then.status(200).json_body(search_body(&["Something"]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/wiki/Something");
            then.status(200).body(wikipedia_song_page(
                r#"<tr><th>Album</th><td><a href="/wiki/Abbey_Road">Abbey Road</a></td></tr>"#,
                "",
            ));
        });
        let album = server.mock(|when, then| {
            when.method(GET).path("/wiki/Abbey_Road");
            then.status(200).body(wikipedia_album_page(
                r#"<a href="/wiki/Rock_music">Rock</a>, <a href="/wiki/Pop_music">pop</a>"#,
            ));
        });

        let fragment = client(&server.base_url())
            .lookup(&MetadataQuery::new("Something", "The Beatles"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fragment.album.as_deref(), Some("Abbey Road"));
        assert_eq!(
            fragment.genres,
            Some(vec!["Rock".to_string(), "pop".to_string()])
        );
        search.assert();
        album.assert();
    }

    #[tokio::test]
    async fn test_lookup_without_hits_stops_early() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/w/api.php");
            then.status(200).json_body(search_body(&[]));
        });
        let article = server.mock(|when, then| {
            when.method(GET).path_contains("/wiki/");
            then.status(200).body("");
        });

        let result = client(&server.base_url())
            .lookup(&MetadataQuery::new("Nothing", "Nobody"))
            .await
            .unwrap();
        assert_eq!(result, None);
        article.assert_hits(0);
    }

    #[tokio::test]
    async fn test_album_page_failure_keeps_album() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/w/api.php");
            then.status(200).json_body(search_body(&["Taxman"]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/wiki/Taxman");
            then.status(200).body(wikipedia_song_page(
                "",
                "<p>\"Taxman\" is a song from the album <i>Revolver</i>.</p>",
            ));
        });
        server.mock(|when, then| {
            when.method(GET).path("/wiki/Revolver");
            then.status(500);
        });

        let fragment = client(&server.base_url())
            .lookup(&MetadataQuery::new("Taxman", "The Beatles"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fragment.album.as_deref(), Some("Revolver"));
        assert_eq!(fragment.genres, None);
    }
}
