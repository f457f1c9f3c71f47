//! Encyclopedia lookup (wikipedia.org)
//!
//! Two-stage lookup: a full-text search finds the song's article, whose
//! infobox (or lead paragraph) names the album. The album's own article then
//! supplies genres from its infobox.
//!
//! API docs: https://www.mediawiki.org/wiki/API:Search

pub mod dto;
mod client;
mod parser;

pub use client::WikipediaClient;
pub use parser::{AlbumRef, parse_album_genres, parse_song_page};
