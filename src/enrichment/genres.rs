//! Genre normalization onto a fixed taxonomy.
//!
//! Free-text tags from every source ("nu metal", "britpop", "Hip Hop") are
//! mapped onto a small set of canonical display names. Matching is exact
//! first, then the first taxonomy key (in table order) that occurs inside
//! the tag. Table order is therefore significant: specific keys come before
//! the general ones they contain.

use std::collections::HashMap;

/// Most genres kept after normalization.
pub const MAX_GENRES: usize = 5;

/// Lower-cased synonym -> canonical name, in matching order.
const STANDARD_TABLE: &[(&str, &str)] = &[
    // Metal family
    ("nu metal", "Metal"),
    ("nu-metal", "Metal"),
    ("heavy metal", "Metal"),
    ("metalcore", "Metal"),
    ("thrash", "Metal"),
    ("metal", "Metal"),
    // Punk and heavier rock offshoots
    ("pop punk", "Punk"),
    ("pop-punk", "Punk"),
    ("post-hardcore", "Hardcore"),
    ("hardcore", "Hardcore"),
    ("punk", "Punk"),
    ("grunge", "Grunge"),
    ("emo", "Emo"),
    // Rock sub-genres before plain rock
    ("hard rock", "Hard Rock"),
    ("classic rock", "Classic Rock"),
    ("progressive rock", "Progressive Rock"),
    ("prog rock", "Progressive Rock"),
    ("prog", "Progressive Rock"),
    ("post-rock", "Post-Rock"),
    ("post rock", "Post-Rock"),
    ("shoegaze", "Shoegaze"),
    ("psychedelic", "Psychedelic"),
    ("alternative rock", "Alternative"),
    ("alternative", "Alternative"),
    ("alt-rock", "Alternative"),
    ("indie rock", "Indie"),
    ("indie pop", "Indie"),
    ("indie", "Indie"),
    ("pop rock", "Rock"),
    ("soft rock", "Rock"),
    ("rock and roll", "Rock"),
    ("rock & roll", "Rock"),
    ("rock", "Rock"),
    // Electronic family
    ("synth-pop", "Synth-pop"),
    ("synthpop", "Synth-pop"),
    ("synth pop", "Synth-pop"),
    ("new wave", "New Wave"),
    ("drum and bass", "Drum and Bass"),
    ("drum & bass", "Drum and Bass"),
    ("dnb", "Drum and Bass"),
    ("house", "House"),
    ("techno", "Techno"),
    ("trance", "Electronic"),
    ("dubstep", "Electronic"),
    ("edm", "Electronic"),
    ("electronica", "Electronic"),
    ("electronic", "Electronic"),
    ("ambient", "Ambient"),
    ("disco", "Disco"),
    ("dance", "Dance"),
    // Black American music
    ("hip-hop", "Hip-Hop"),
    ("hip hop", "Hip-Hop"),
    ("hiphop", "Hip-Hop"),
    ("rap", "Hip-Hop"),
    ("r&b", "R&B"),
    ("rnb", "R&B"),
    ("rhythm and blues", "R&B"),
    ("neo-soul", "Soul"),
    ("motown", "Soul"),
    ("soul", "Soul"),
    ("funk", "Funk"),
    ("gospel", "Gospel"),
    ("blues", "Blues"),
    ("jazz", "Jazz"),
    // Roots and acoustic
    ("singer-songwriter", "Singer-Songwriter"),
    ("singer songwriter", "Singer-Songwriter"),
    ("bluegrass", "Bluegrass"),
    ("americana", "Country"),
    ("country", "Country"),
    ("folk", "Folk"),
    ("acoustic", "Acoustic"),
    // Elsewhere
    ("reggaeton", "Latin"),
    ("reggae", "Reggae"),
    ("ska", "Ska"),
    ("latin", "Latin"),
    ("salsa", "Latin"),
    ("bossa nova", "Latin"),
    ("world", "World"),
    ("classical", "Classical"),
    ("orchestral", "Classical"),
    ("opera", "Classical"),
    ("soundtrack", "Soundtrack"),
    ("score", "Soundtrack"),
    ("experimental", "Experimental"),
    ("avant-garde", "Experimental"),
    ("k-pop", "Pop"),
    ("j-pop", "Pop"),
    ("pop", "Pop"),
];

/// Immutable synonym table. Build once and share.
#[derive(Debug, Clone)]
pub struct GenreTaxonomy {
    /// Ordered (synonym, canonical) pairs for substring scans
    entries: Vec<(String, String)>,
    /// Synonym -> index into `entries` for exact lookups
    exact: HashMap<String, usize>,
}

impl GenreTaxonomy {
    /// Build a taxonomy from ordered `(synonym, canonical)` pairs.
    ///
    /// Synonyms are lower-cased; the first occurrence of a synonym wins.
    /// Every canonical name also maps to itself so normalization is
    /// idempotent.
    pub fn new<I, S, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: Into<String>,
    {
        let mut taxonomy = Self {
            entries: Vec::new(),
            exact: HashMap::new(),
        };
        for (synonym, canonical) in pairs {
            taxonomy.insert(synonym.as_ref().trim().to_lowercase(), canonical.into());
        }

        let canonical: Vec<String> = taxonomy.canonical_names().map(str::to_string).collect();
        for name in canonical {
            taxonomy.insert(name.to_lowercase(), name);
        }
        taxonomy
    }

    /// The built-in taxonomy.
    pub fn standard() -> Self {
        Self::new(STANDARD_TABLE.iter().copied())
    }

    fn insert(&mut self, synonym: String, canonical: String) {
        if synonym.is_empty() || self.exact.contains_key(&synonym) {
            return;
        }
        self.exact.insert(synonym.clone(), self.entries.len());
        self.entries.push((synonym, canonical));
    }

    /// Canonical name for one raw tag, if any.
    pub fn lookup(&self, raw: &str) -> Option<&str> {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() {
            return None;
        }
        if let Some(&idx) = self.exact.get(&tag) {
            return Some(&self.entries[idx].1);
        }
        self.entries
            .iter()
            .find(|(synonym, _)| tag.contains(synonym.as_str()))
            .map(|(_, canonical)| canonical.as_str())
    }

    /// Distinct canonical names in first-appearance order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        let mut seen = Vec::new();
        self.entries.iter().filter_map(move |(_, canonical)| {
            if seen.contains(canonical) {
                None
            } else {
                seen.push(canonical.clone());
                Some(canonical.as_str())
            }
        })
    }

    /// Ordered `(synonym, canonical)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), c.as_str()))
    }
}

/// Maps raw tag lists onto a [`GenreTaxonomy`].
#[derive(Debug, Clone)]
pub struct GenreNormalizer {
    taxonomy: std::sync::Arc<GenreTaxonomy>,
}

impl GenreNormalizer {
    pub fn new(taxonomy: std::sync::Arc<GenreTaxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &GenreTaxonomy {
        &self.taxonomy
    }

    /// Normalize raw tags: unmatched tags dropped, duplicates removed in
    /// first-occurrence order, at most [`MAX_GENRES`] entries.
    ///
    /// `None` in gives `None` out.
    pub fn normalize<S: AsRef<str>>(&self, raw: Option<&[S]>) -> Option<Vec<String>> {
        let raw = raw?;
        let mut genres: Vec<String> = Vec::new();
        for tag in raw {
            let Some(canonical) = self.taxonomy.lookup(tag.as_ref()) else {
                continue;
            };
            if genres.iter().any(|g| g == canonical) {
                continue;
            }
            genres.push(canonical.to_string());
            if genres.len() == MAX_GENRES {
                break;
            }
        }
        Some(genres)
    }
}

impl Default for GenreNormalizer {
    fn default() -> Self {
        Self::new(std::sync::Arc::new(GenreTaxonomy::standard()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn normalize(tags: &[&str]) -> Option<Vec<String>> {
        GenreNormalizer::default().normalize(Some(tags))
    }

    #[test]
    fn test_none_input_gives_none() {
        let normalizer = GenreNormalizer::default();
        assert_eq!(normalizer.normalize::<String>(None), None);
    }

    #[test]
    fn test_exact_match_and_case_insensitive_dedup() {
        assert_eq!(
            normalize(&["Nu Metal", "nu metal", "pop"]),
            Some(vec!["Metal".to_string(), "Pop".to_string()])
        );
    }

    #[test]
    fn test_pop_rock_maps_to_rock() {
        assert_eq!(normalize(&["pop rock"]), Some(vec!["Rock".to_string()]));
    }

    #[test]
    fn test_substring_match_uses_table_order() {
        // "symphonic metal" contains both "metal" and nothing earlier
        assert_eq!(normalize(&["Symphonic Metal"]), Some(vec!["Metal".to_string()]));
        // "britpop" only contains "pop"
        assert_eq!(normalize(&["britpop"]), Some(vec!["Pop".to_string()]));
        // "garage rock revival" hits "rock" before anything else
        assert_eq!(
            normalize(&["garage rock revival"]),
            Some(vec!["Rock".to_string()])
        );
    }

    #[test]
    fn test_unmatched_tags_dropped() {
        assert_eq!(normalize(&["zzz", "  "]), Some(vec![]));
    }

    #[test]
    fn test_caps_at_five() {
        let result = normalize(&["rock", "jazz", "blues", "funk", "soul", "folk", "pop"]).unwrap();
        assert_eq!(result, vec!["Rock", "Jazz", "Blues", "Funk", "Soul"]);
    }

    #[test]
    fn test_canonical_names_map_to_themselves() {
        let taxonomy = GenreTaxonomy::standard();
        let names: Vec<&str> = taxonomy.canonical_names().collect();
        assert!(names.len() >= 35, "taxonomy has {} names", names.len());
        for name in names {
            assert_eq!(taxonomy.lookup(name), Some(name), "{name} is not a fixed point");
        }
    }

    #[test]
    fn test_custom_taxonomy_first_synonym_wins() {
        let taxonomy = GenreTaxonomy::new([("Rock", "Rock"), ("rock", "Stone")]);
        assert_eq!(taxonomy.lookup("ROCK"), Some("Rock"));
        assert_eq!(taxonomy.entries().count(), 1);
    }

    fn canonical_strategy() -> impl Strategy<Value = Vec<String>> {
        let names: Vec<String> = GenreTaxonomy::standard()
            .canonical_names()
            .map(str::to_string)
            .collect();
        proptest::collection::vec(proptest::sample::select(names), 0..20)
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent_on_canonical_lists(tags in canonical_strategy()) {
            let normalizer = GenreNormalizer::default();
            let once = normalizer.normalize(Some(tags.as_slice())).unwrap();
            let twice = normalizer.normalize(Some(once.as_slice())).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_normalize_caps_and_dedups(tags in proptest::collection::vec("[a-z &-]{0,16}", 0..30)) {
            let normalizer = GenreNormalizer::default();
            let result = normalizer.normalize(Some(tags.as_slice())).unwrap();
            prop_assert!(result.len() <= MAX_GENRES);
            for (i, genre) in result.iter().enumerate() {
                prop_assert!(!result[i + 1..].contains(genre));
            }
        }
    }
}
