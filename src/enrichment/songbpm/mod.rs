//! Tempo and key lookup (songbpm.com)
//!
//! Song pages live at `/@{artist-slug}/{title-slug}` and carry BPM and key
//! in a definition list, plus a prose summary that mentions the mode and
//! the time signature.

mod client;
mod parser;

pub use client::SongBpmClient;
pub use parser::parse_song_page;
