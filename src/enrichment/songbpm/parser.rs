//! Song page parser: HTML -> tempo fragment
//!
//! This is the only place that knows the song page layout. If the site is
//! redesigned, only this file changes.

use crate::enrichment::domain::MetadataFragment;
use crate::enrichment::fields;
use crate::enrichment::html;

/// Extract BPM, key, mode and time signature from a song page.
///
/// Returns `None` unless BPM or key was found; mode and time signature on
/// their own are not enough to trust the page.
pub fn parse_song_page(page: &str) -> Option<MetadataFragment> {
    let mut bpm = None;
    let mut key = None;

    for (label, value) in html::definition_pairs(page) {
        let label = label.trim().to_lowercase();
        if bpm.is_none() && (label.contains("tempo") || label.contains("bpm")) {
            bpm = fields::parse_bpm(&value);
        } else if key.is_none() && label == "key" {
            key = fields::parse_key(&value);
        }
    }

    if bpm.is_none() && key.is_none() {
        return None;
    }

    let text = html::text_content(page);
    Some(MetadataFragment {
        bpm,
        key,
        mode: fields::parse_mode(&text),
        time_signature: fields::parse_time_signature(&text),
        ..Default::default()
    })
}
