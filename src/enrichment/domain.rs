//! Internal domain models for song metadata lookup.
//!
//! These types are OUR types - they don't change when a scraped site changes
//! its markup. Every source parser converts page content into these types,
//! and each type only admits validated values.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Provenance value used when nothing contributed to a result.
pub const NO_SOURCE: &str = "none";

/// A metadata request for one song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataQuery {
    pub title: String,
    pub artist: String,
}

impl MetadataQuery {
    /// Build a query, trimming both parts.
    pub fn new(title: impl AsRef<str>, artist: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            artist: artist.as_ref().trim().to_string(),
        }
    }

    /// Both title and artist are present after trimming.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.artist.trim().is_empty()
    }
}

/// One of the 17 accepted pitch-class spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "Db")]
    DFlat,
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "Eb")]
    EFlat,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "Gb")]
    GFlat,
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "Ab")]
    AFlat,
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "Bb")]
    BFlat,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 17] = [
        Self::C,
        Self::CSharp,
        Self::DFlat,
        Self::D,
        Self::DSharp,
        Self::EFlat,
        Self::E,
        Self::F,
        Self::FSharp,
        Self::GFlat,
        Self::G,
        Self::GSharp,
        Self::AFlat,
        Self::A,
        Self::ASharp,
        Self::BFlat,
        Self::B,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::CSharp => "C#",
            Self::DFlat => "Db",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::EFlat => "Eb",
            Self::E => "E",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::GFlat => "Gb",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::AFlat => "Ab",
            Self::A => "A",
            Self::ASharp => "A#",
            Self::BFlat => "Bb",
            Self::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchClass {
    type Err = MetadataError;

    /// Exact spelling match ("C#", "Db", ...). Anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pc| pc.as_str() == s)
            .ok_or_else(|| MetadataError::Parse(format!("not a pitch class: {s:?}")))
    }
}

/// Tonal mode of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => f.write_str("Major"),
            Self::Minor => f.write_str("Minor"),
        }
    }
}

/// Time signature rendered as `N/M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSignature {
    pub beats: u8,
    pub unit: u8,
}

impl TimeSignature {
    /// A signature counted in quarter notes, the only unit scraped pages state.
    pub fn quarters(beats: u8) -> Option<Self> {
        (beats > 0).then_some(Self { beats, unit: 4 })
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.unit)
    }
}

impl FromStr for TimeSignature {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MetadataError::Parse(format!("not a time signature: {s:?}"));
        let (beats, unit) = s.trim().split_once('/').ok_or_else(invalid)?;
        let beats: u8 = beats.parse().map_err(|_| invalid())?;
        let unit: u8 = unit.parse().map_err(|_| invalid())?;
        if beats == 0 || unit == 0 {
            return Err(invalid());
        }
        Ok(Self { beats, unit })
    }
}

impl TryFrom<String> for TimeSignature {
    type Error = MetadataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSignature> for String {
    fn from(value: TimeSignature) -> Self {
        value.to_string()
    }
}

bitflags! {
    /// Set of metadata fields, used for merge rules and fetch reports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldSet: u8 {
        const BPM = 1 << 0;
        const KEY = 1 << 1;
        const MODE = 1 << 2;
        const TIME_SIGNATURE = 1 << 3;
        const ALBUM = 1 << 4;
        const GENRES = 1 << 5;

        /// Everything the tempo/key site reports
        const TEMPO = Self::BPM.bits()
            | Self::KEY.bits()
            | Self::MODE.bits()
            | Self::TIME_SIGNATURE.bits();
        /// Fields that earn a source credit in the provenance string
        const CATALOG = Self::ALBUM.bits() | Self::GENRES.bits();
    }
}

impl FieldSet {
    /// Field names for logs, e.g. `bpm,key`.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::BPM) {
            names.push("bpm");
        }
        if self.contains(Self::KEY) {
            names.push("key");
        }
        if self.contains(Self::MODE) {
            names.push("mode");
        }
        if self.contains(Self::TIME_SIGNATURE) {
            names.push("timeSignature");
        }
        if self.contains(Self::ALBUM) {
            names.push("album");
        }
        if self.contains(Self::GENRES) {
            names.push("genres");
        }
        names
    }
}

/// Partial metadata produced by one source for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataFragment {
    pub bpm: Option<u32>,
    pub key: Option<PitchClass>,
    pub mode: Option<Mode>,
    pub time_signature: Option<TimeSignature>,
    pub album: Option<String>,
    /// Raw genre/tag strings, normalized later by the aggregator
    pub genres: Option<Vec<String>>,
}

impl MetadataFragment {
    /// Fields that carry a usable value.
    pub fn fields(&self) -> FieldSet {
        let mut set = FieldSet::empty();
        set.set(FieldSet::BPM, self.bpm.is_some());
        set.set(FieldSet::KEY, self.key.is_some());
        set.set(FieldSet::MODE, self.mode.is_some());
        set.set(FieldSet::TIME_SIGNATURE, self.time_signature.is_some());
        set.set(FieldSet::ALBUM, self.album.is_some());
        set.set(
            FieldSet::GENRES,
            self.genres.as_ref().is_some_and(|g| !g.is_empty()),
        );
        set
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

/// The unified record returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedMetadata {
    pub bpm: Option<u32>,
    pub key: Option<PitchClass>,
    pub mode: Option<Mode>,
    pub time_signature: Option<TimeSignature>,
    pub album: Option<String>,
    /// Canonical taxonomy names, at most five
    pub genres: Option<Vec<String>>,
    /// Comma-joined contributing source names, or `"none"`
    pub source: String,
}

impl AggregatedMetadata {
    /// The canonical empty result.
    pub fn empty() -> Self {
        Self {
            bpm: None,
            key: None,
            mode: None,
            time_signature: None,
            album: None,
            genres: None,
            source: NO_SOURCE.to_string(),
        }
    }

    /// True when no metadata field is set, regardless of provenance.
    pub fn has_no_data(&self) -> bool {
        self.bpm.is_none()
            && self.key.is_none()
            && self.mode.is_none()
            && self.time_signature.is_none()
            && self.album.is_none()
            && self.genres.is_none()
    }
}

/// External sites consulted during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Tempo and key site (songbpm.com)
    Tempo,
    /// Lyrics annotation site (genius.com)
    Lyrics,
    /// Encyclopedia (wikipedia.org)
    Encyclopedia,
    /// Social tagging site (last.fm)
    Tagging,
}

impl SourceKind {
    /// Name used in provenance strings and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Tempo => "tempo-site",
            Self::Lyrics => "lyrics-site",
            Self::Encyclopedia => "encyclopedia",
            Self::Tagging => "tagging-site",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Tempo => "https://songbpm.com",
            Self::Lyrics => "https://genius.com",
            Self::Encyclopedia => "https://en.wikipedia.org",
            Self::Tagging => "https://www.last.fm",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which page a fetcher should consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The song's own page
    Track,
    /// The artist's page, used as a last resort for tags
    Artist,
}

impl Lookup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Artist => "artist",
        }
    }
}

/// Errors raised inside a fetcher. They never cross the fetcher boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetadataError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Page looks like a soft 404 ({0} bytes)")]
    SoftNotFound(usize),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Lookup not supported by {0}")]
    Unsupported(&'static str),

    #[error("Fetcher panicked: {0}")]
    Panicked(String),
}

impl MetadataError {
    /// Outcome label for fetch attempt events.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            _ => "failed",
        }
    }
}
