//! Song page parser: HTML -> album/genre fragment

use crate::enrichment::domain::MetadataFragment;
use crate::enrichment::fields;
use crate::enrichment::html::{self, Anchor};

/// Real song pages are far larger than this; anything smaller is a soft 404.
pub const MIN_PAGE_BYTES: usize = 5000;

/// Extract album and genre tags from a song page.
pub fn parse_song_page(page: &str) -> Option<MetadataFragment> {
    let anchors = html::anchors(page);

    let album = primary_album(&anchors).or_else(|| any_album(&anchors));
    let tags = fields::collect_tags(
        anchors
            .iter()
            .filter(|a| a.href.contains("/tags/"))
            .map(|a| a.text.as_str()),
    );

    let fragment = MetadataFragment {
        album,
        genres: (!tags.is_empty()).then_some(tags),
        ..Default::default()
    };
    (!fragment.is_empty()).then_some(fragment)
}

/// The anchor the page marks as the song's primary album.
fn primary_album(anchors: &[Anchor]) -> Option<String> {
    anchors
        .iter()
        .filter(|a| a.href.contains("#primary-album"))
        .find_map(|a| fields::clean_album(&a.text))
}

/// Any link into the album catalog.
fn any_album(anchors: &[Anchor]) -> Option<String> {
    anchors
        .iter()
        .filter(|a| a.href.contains("/albums/"))
        .find_map(|a| fields::clean_album(&a.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::genius_page;

    #[test]
    fn test_primary_album_and_tags() {
        let page = genius_page(Some("Hey Jude"), &["Pop Rock", "Rock", "1968", "UK"]);
        let fragment = parse_song_page(&page).unwrap();
        assert_eq!(fragment.album.as_deref(), Some("Hey Jude"));
        assert_eq!(
            fragment.genres,
            Some(vec!["Pop Rock".to_string(), "Rock".to_string()])
        );
    }

    #[test]
    fn test_falls_back_to_album_catalog_link() {
        let page = r#"<a href="https://genius.com/albums/The-beatles/Abbey-road">Abbey Road</a>"#;
        let fragment = parse_song_page(page).unwrap();
        assert_eq!(fragment.album.as_deref(), Some("Abbey Road"));
        assert!(fragment.genres.is_none());
    }

    #[test]
    fn test_primary_album_preferred_over_catalog_links() {
        let page = r##"<a href="/albums/x/Other">Other Album</a>
            <a href="#primary-album">Primary Album</a>"##;
        let fragment = parse_song_page(page).unwrap();
        assert_eq!(fragment.album.as_deref(), Some("Primary Album"));
    }

    #[test]
    fn test_rejects_implausible_album_text() {
        let long = "x".repeat(150);
        let page = format!(r##"<a href="#primary-album">{long}</a><a href="/albums/a/b">Y</a>"##);
        assert_eq!(parse_song_page(&page), None);
    }

    #[test]
    fn test_tags_capped_at_five() {
        let page = genius_page(None, &["a1", "a2", "a3", "a4", "a5", "a6"]);
        let fragment = parse_song_page(&page).unwrap();
        assert_eq!(fragment.genres.unwrap().len(), 5);
        assert!(fragment.album.is_none());
    }
}
