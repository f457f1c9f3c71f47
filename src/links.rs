//! Search links for listening to and learning a song.
//!
//! These are plain search URLs; nothing is fetched.

use crate::enrichment::MetadataQuery;

/// Where a link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Streaming,
    Tabs,
}

/// A site searched for a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSite {
    Spotify,
    YouTube,
    AppleMusic,
    UltimateGuitar,
    Songsterr,
}

impl LinkSite {
    pub const ALL: [LinkSite; 5] = [
        Self::Spotify,
        Self::YouTube,
        Self::AppleMusic,
        Self::UltimateGuitar,
        Self::Songsterr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Spotify => "Spotify",
            Self::YouTube => "YouTube",
            Self::AppleMusic => "Apple Music",
            Self::UltimateGuitar => "Ultimate Guitar",
            Self::Songsterr => "Songsterr",
        }
    }

    pub fn kind(self) -> LinkKind {
        match self {
            Self::Spotify | Self::YouTube | Self::AppleMusic => LinkKind::Streaming,
            Self::UltimateGuitar | Self::Songsterr => LinkKind::Tabs,
        }
    }

    /// Search URL for `"<title> <artist>"`.
    pub fn search_url(self, query: &MetadataQuery) -> String {
        let terms = format!("{} {}", query.title, query.artist);
        let encoded = urlencoding::encode(terms.trim());
        match self {
            Self::Spotify => format!("https://open.spotify.com/search/{encoded}"),
            Self::YouTube => format!("https://www.youtube.com/results?search_query={encoded}"),
            Self::AppleMusic => format!("https://music.apple.com/us/search?term={encoded}"),
            Self::UltimateGuitar => format!(
                "https://www.ultimate-guitar.com/search.php?search_type=title&value={encoded}"
            ),
            Self::Songsterr => format!("https://www.songsterr.com/?pattern={encoded}"),
        }
    }
}

/// A generated search link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchLink {
    pub site: LinkSite,
    pub url: String,
}

/// Links for every site, streaming first. Empty for an invalid query.
pub fn search_links(query: &MetadataQuery) -> Vec<SearchLink> {
    if !query.is_valid() {
        return Vec::new();
    }
    LinkSite::ALL
        .into_iter()
        .map(|site| SearchLink {
            site,
            url: site.search_url(query),
        })
        .collect()
}
