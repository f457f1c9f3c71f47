//! Lyrics annotation site lookup (genius.com)
//!
//! Song pages live at `/{Artist-slug}-{title-slug}-lyrics`. The page links
//! to its primary album and to a handful of `/tags/` pages, which is all we
//! read from it. Unknown songs often come back as 200 with a boilerplate
//! page, so short bodies are treated as "not found".

mod client;
mod parser;

pub use client::GeniusClient;
pub use parser::{MIN_PAGE_BYTES, parse_song_page};
