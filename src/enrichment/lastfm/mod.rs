//! Social tagging site lookup (last.fm)
//!
//! Track pages live at `/music/{artist-slug}/_/{title-slug}` and artist
//! pages at `/music/{artist-slug}`. Both list the most popular user tags,
//! which are noisy: years, sentiment and listening-habit tags are filtered
//! before anything reaches the genre normalizer.

mod client;
mod parser;

pub use client::LastFmClient;
pub use parser::parse_tag_page;
