//! Test utilities and fixtures for practice-minder tests.
//!
//! This module provides canned pages for each scraped site plus record
//! factories, so parser and client tests don't repeat markup.
//!
//! # Example
//!
//! ```ignore
//! use practice_minder::test_utils::songbpm_page;
//!
//! #[test]
//! fn test_something() {
//!     let page = songbpm_page(Some("72"), Some("F"), None, None);
//!     // ... test logic
//! }
//! ```

use crate::enrichment::{AggregatedMetadata, PitchClass};
use crate::model::SongRecord;

/// A tempo site song page.
///
/// Tempo and key go into the `<dt>/<dd>` list; mode and beats per bar go
/// into the prose paragraph the site writes under it.
pub fn songbpm_page(
    bpm: Option<&str>,
    key: Option<&str>,
    mode: Option<&str>,
    beats: Option<u8>,
) -> String {
    let mut facts = String::new();
    if let Some(bpm) = bpm {
        facts.push_str(&format!("<dt>Tempo</dt><dd>{bpm} BPM</dd>\n"));
    }
    if let Some(key) = key {
        facts.push_str(&format!("<dt>Key</dt><dd>{key}</dd>\n"));
    }
    facts.push_str("<dt>Duration</dt><dd>7:11</dd>\n");

    let mut prose = String::from("This track is very popular.");
    if let Some(mode) = mode {
        prose.push_str(&format!(
            " It is played in the {} key and a {mode} mode.",
            key.unwrap_or("unknown")
        ));
    }
    if let Some(beats) = beats {
        prose.push_str(&format!(
            " It has a time signature of {beats} beats per bar."
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html><head><title>Song BPM</title></head>
<body>
<nav><a href="/">SongBPM</a> <a href="/search">Search</a></nav>
<main>
<h1>Song BPM and Key</h1>
<dl class="facts">
{facts}</dl>
<p>{prose}</p>
</main>
</body></html>"#
    )
}

/// A lyrics site song page, padded past the soft-404 threshold.
pub fn genius_page(album: Option<&str>, tags: &[&str]) -> String {
    let album_link = album
        .map(|a| format!(r##"<a href="#primary-album" class="album-link">{a}</a>"##))
        .unwrap_or_default();
    let tag_links: String = tags
        .iter()
        .map(|t| format!(r#"<a href="/tags/{}">{t}</a> "#, urlencoding::encode(&t.to_lowercase())))
        .collect();
    let lyrics = "<p>Na na na, na na na na, hey Jude</p>\n".repeat(200);

    format!(
        r#"<!DOCTYPE html>
<html><head><title>Lyrics</title></head>
<body>
<header><a href="/">Genius</a></header>
<div class="song-header">{album_link}</div>
<div class="song-tags">{tag_links}</div>
<div class="lyrics">
{lyrics}</div>
</body></html>"#
    )
}

/// An encyclopedia song article: the given infobox rows under a title
/// header, followed by the article body.
pub fn wikipedia_song_page(infobox_rows_html: &str, body_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Song - Wikipedia</title></head>
<body>
<div id="content">
<h1 id="firstHeading">Song</h1>
<table class="infobox vevent">
<tr><th colspan="2" class="infobox-above summary">Song title</th></tr>
{infobox_rows_html}
</table>
{body_html}
</div>
</body></html>"#
    )
}

/// An encyclopedia album article whose infobox genre cell holds `genre_value_html`.
pub fn wikipedia_album_page(genre_value_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>Album - Wikipedia</title></head>
<body>
<table class="infobox vevent haudio">
<tr><th colspan="2" class="infobox-above summary">Album title</th></tr>
<tr><th scope="row">Released</th><td>1969</td></tr>
<tr><th scope="row">Genre</th><td class="category">{genre_value_html}</td></tr>
<tr><th scope="row">Length</th><td>47:03</td></tr>
</table>
<p>An album.</p>
</body></html>"#
    )
}

/// A tagging site track or artist page listing `tags`.
pub fn lastfm_page(tags: &[&str]) -> String {
    let items: String = tags
        .iter()
        .map(|t| {
            format!(
                r#"<li class="tag"><a href="/tag/{}">{t}</a></li>"#,
                urlencoding::encode(t)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html><head><title>Last.fm</title></head>
<body>
<header><a href="/home">Last.fm</a> <a href="/music">Music</a></header>
<section class="catalogue-tags">
<h2>Related Tags</h2>
<ul class="tags-list">{items}</ul>
</section>
</body></html>"#
    )
}

/// A song record with only title and artist filled in.
pub fn mock_song_record() -> SongRecord {
    SongRecord::new("Hey Jude", "The Beatles")
}

/// Aggregated metadata as the standard sources report "Hey Jude".
pub fn mock_aggregated_metadata() -> AggregatedMetadata {
    AggregatedMetadata {
        bpm: Some(72),
        key: Some(PitchClass::F),
        album: Some("Hey Jude".to_string()),
        genres: Some(vec!["Rock".to_string()]),
        source: "tempo-site, lyrics-site".to_string(),
        ..AggregatedMetadata::empty()
    }
}
