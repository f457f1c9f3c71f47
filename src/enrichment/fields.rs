//! Field normalizers shared by the source parsers.
//!
//! Scraped text never reaches a result directly: every value passes through
//! one of these functions, which either produce a validated value or `None`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::domain::{Mode, PitchClass, TimeSignature};

/// Most tags a single source may contribute.
pub const MAX_TAGS: usize = 5;

/// Album titles outside this character window are scraping noise.
const ALBUM_MIN_CHARS: usize = 2;
const ALBUM_MAX_CHARS: usize = 100;

static SLUG_DROP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s_-]").unwrap());
static SLUG_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());
static MODE_SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bkey\s+and\s+an?\s+([a-z]+)\s+mode\b").unwrap());
static TIME_SIGNATURE_SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)time\s+signature\s+of\s+(\d+)\s+beats?\s+per\s+bar").unwrap());
static YEAR_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\d{4}s?|\d{2}s)$").unwrap());
static DISAMBIGUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").unwrap());

/// Tags that describe the listener rather than the music.
const META_TAGS: &[&str] = &[
    "favorites",
    "favourites",
    "favorite",
    "favourite",
    "favorite songs",
    "seen live",
    "love",
    "loved",
    "awesome",
    "amazing",
    "beautiful",
    "best",
    "cool",
    "good",
    "great",
    "my music",
    "albums i own",
    "under 2000 listeners",
    "spotify",
    "genius",
    "lyrics",
    "non-music",
];

/// Region and nationality tags.
const REGION_TAGS: &[&str] = &[
    "uk",
    "us",
    "usa",
    "british",
    "english",
    "american",
    "canadian",
    "canada",
    "australian",
    "australia",
    "irish",
    "scottish",
    "german",
    "french",
    "swedish",
    "norwegian",
    "finnish",
    "japanese",
    "korean",
    "brazilian",
    "international",
];

/// URL slug: lowercase, punctuation stripped, runs of whitespace, underscores
/// and hyphens collapsed to one hyphen, no leading/trailing hyphen.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase().replace('&', "and");
    let kept = SLUG_DROP.replace_all(&lower, "");
    let joined = SLUG_SEPARATORS.replace_all(&kept, "-");
    joined.trim_matches('-').to_string()
}

/// Slug with its first letter upper-cased (`The-beatles`).
pub fn capitalized_slug(text: &str) -> String {
    let slug = slugify(text);
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => slug,
    }
}

/// First number in the text, rounded to a whole BPM.
pub fn parse_bpm(text: &str) -> Option<u32> {
    let value: f64 = NUMBER.find(text)?.as_str().parse().ok()?;
    let rounded = value.round();
    (rounded >= 1.0 && rounded < 1000.0).then_some(rounded as u32)
}

/// Key from a label value such as `F`, `F♯`, `Bb Minor` or `C♯/D♭`.
///
/// Only the leading spelling is considered; anything outside the 17
/// accepted spellings yields `None`.
pub fn parse_key(text: &str) -> Option<PitchClass> {
    let cleaned = text.trim().replace('♯', "#").replace('♭', "b");
    let first = cleaned
        .split(|c: char| c.is_whitespace() || c == '/' || c == ',')
        .find(|part| !part.is_empty())?;
    first.parse().ok()
}

/// Mode from a sentence like "... in the F key and a major mode".
pub fn parse_mode(text: &str) -> Option<Mode> {
    let caps = MODE_SENTENCE.captures(text)?;
    match caps[1].to_ascii_lowercase().as_str() {
        "major" => Some(Mode::Major),
        "minor" => Some(Mode::Minor),
        _ => None,
    }
}

/// Time signature from "... time signature of N beats per bar", as `N/4`.
pub fn parse_time_signature(text: &str) -> Option<TimeSignature> {
    let caps = TIME_SIGNATURE_SENTENCE.captures(text)?;
    let beats: u8 = caps[1].parse().ok()?;
    TimeSignature::quarters(beats)
}

/// Album title cleaned of disambiguation suffixes and checked for length.
pub fn clean_album(text: &str) -> Option<String> {
    let stripped = DISAMBIGUATION.replace(text.trim(), "");
    let album = stripped.trim().trim_matches(|c| c == '"' || c == '“' || c == '”');
    let chars = album.chars().count();
    (ALBUM_MIN_CHARS..=ALBUM_MAX_CHARS)
        .contains(&chars)
        .then(|| album.to_string())
}

/// Year-like tags: `1968`, `1990s`, `80s`.
pub fn is_year_like(tag: &str) -> bool {
    YEAR_LIKE.is_match(tag.trim())
}

/// Tags that say nothing about genre (sentiment, listening habits, regions).
pub fn is_meta_tag(tag: &str) -> bool {
    let lower = tag.trim().to_lowercase();
    META_TAGS.contains(&lower.as_str()) || REGION_TAGS.contains(&lower.as_str())
}

/// Filter raw tags, deduplicate case-insensitively and cap at [`MAX_TAGS`].
pub fn collect_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || tag.chars().count() > 50 || is_year_like(tag) || is_meta_tag(tag) {
            continue;
        }
        if tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        tags.push(tag.to_string());
        if tags.len() == MAX_TAGS {
            break;
        }
    }
    tags
}
