//! Core data model for the practice tracker.
//!
//! A [`SongRecord`] is one song in the practice catalog: what a player
//! enters by hand (tuning, technique) next to what can be looked up
//! (tempo, key, album, genres). Records are stored as JSON files.
//!
//! Looked-up metadata never overwrites what the player already entered:
//! [`SongRecord::fill_from`] only fills fields that are still empty.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enrichment::{AggregatedMetadata, MetadataQuery, Mode, PitchClass, TimeSignature};
use crate::error::{Error, Result, ResultExt};

/// A song in the practice catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SongRecord {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub bpm: Option<u32>,
    pub key: Option<PitchClass>,
    pub mode: Option<Mode>,
    pub time_signature: Option<TimeSignature>,
    /// Empty when unknown
    pub genres: Vec<String>,
    /// Instrument tuning, e.g. "Drop D"
    pub tuning: Option<String>,
    /// Technique being practiced, e.g. "fingerpicking"
    pub technique: Option<String>,
}

impl SongRecord {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Default::default()
        }
    }

    /// The lookup this record would trigger.
    pub fn query(&self) -> MetadataQuery {
        MetadataQuery::new(&self.title, &self.artist)
    }

    /// Fill empty fields from looked-up metadata.
    ///
    /// Fields that already hold a value are left alone. Returns the names of
    /// the fields that were filled, in record order.
    pub fn fill_from(&mut self, metadata: &AggregatedMetadata) -> Vec<&'static str> {
        let mut filled = Vec::new();

        if is_blank(self.album.as_deref())
            && let Some(album) = &metadata.album
        {
            self.album = Some(album.clone());
            filled.push("album");
        }
        if fill_copy(&mut self.bpm, metadata.bpm) {
            filled.push("bpm");
        }
        if fill_copy(&mut self.key, metadata.key) {
            filled.push("key");
        }
        if fill_copy(&mut self.mode, metadata.mode) {
            filled.push("mode");
        }
        if fill_copy(&mut self.time_signature, metadata.time_signature) {
            filled.push("timeSignature");
        }
        if self.genres.is_empty()
            && let Some(genres) = metadata.genres.as_ref().filter(|g| !g.is_empty())
        {
            self.genres = genres.clone();
            filled.push("genres");
        }

        filled
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn fill_copy<T: Copy>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match (*slot, value) {
        (None, Some(v)) => {
            *slot = Some(v);
            true
        }
        _ => false,
    }
}

/// Read a song record from a JSON file.
///
/// A record without a title or artist cannot be looked up and is rejected.
pub fn load(path: &Path) -> Result<SongRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(format!("reading song record {}", path.display()))?;
    let record: SongRecord = serde_json::from_str(&text)
        .with_context(format!("parsing song record {}", path.display()))?;
    if !record.query().is_valid() {
        return Err(Error::invalid_record(path, "title and artist are required"));
    }
    Ok(record)
}

/// Write a song record as pretty-printed JSON.
pub fn save(record: &SongRecord, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json + "\n")
        .with_context(format!("writing song record {}", path.display()))?;
    tracing::debug!("Saved song record to {:?}", path);
    Ok(())
}
