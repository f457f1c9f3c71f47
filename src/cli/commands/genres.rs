//! Genre normalization command.

use std::collections::BTreeMap;

use crate::enrichment::{GenreNormalizer, GenreTaxonomy};

/// Normalize tags, or list the taxonomy
pub fn cmd_genres(tags: &[String], list: bool) -> anyhow::Result<()> {
    let taxonomy = GenreTaxonomy::standard();

    if list {
        let mut by_name: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (synonym, canonical) in taxonomy.entries() {
            let synonyms = by_name.entry(canonical).or_default();
            if !synonym.eq_ignore_ascii_case(canonical) {
                synonyms.push(synonym);
            }
        }
        for (canonical, synonyms) in by_name {
            if synonyms.is_empty() {
                println!("{}", canonical);
            } else {
                println!("{:<20} {}", canonical, synonyms.join(", "));
            }
        }
        return Ok(());
    }

    if tags.is_empty() {
        eprintln!("Error: give one or more tags, or use --list.");
        std::process::exit(1);
    }

    let normalizer = GenreNormalizer::new(std::sync::Arc::new(taxonomy));
    for tag in tags {
        let mapped = normalizer.taxonomy().lookup(tag);
        match mapped {
            Some(canonical) => println!("  {:<24} -> {}", tag, canonical),
            None => println!("  {:<24} -> (dropped)", tag),
        }
    }

    let normalized = normalizer.normalize(Some(tags)).unwrap_or_default();
    println!();
    if normalized.is_empty() {
        println!("✗ No recognized genres.");
    } else {
        println!("✓ {}", normalized.join(", "));
    }
    Ok(())
}
