//! Metadata lookup and song record commands.

use std::path::Path;
use tokio::runtime::Runtime;

use crate::enrichment::{AggregatedMetadata, Aggregator, MetadataQuery};
use crate::model;

/// Look up one song and print a report or JSON
pub fn cmd_lookup(
    rt: &Runtime,
    aggregator: &Aggregator,
    title: &str,
    artist: &str,
    json: bool,
) -> anyhow::Result<()> {
    let query = MetadataQuery::new(title, artist);
    if !query.is_valid() && !json {
        eprintln!("Error: both title and artist are required.");
        std::process::exit(1);
    }

    let result = rt.block_on(aggregator.aggregate(&query));

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{} - {}", query.artist, query.title);
    println!();
    print_metadata(&result);
    Ok(())
}

/// Fill empty fields of a song record file
pub fn cmd_fill(
    rt: &Runtime,
    aggregator: &Aggregator,
    path: &Path,
    write: bool,
) -> anyhow::Result<()> {
    let mut record = model::load(path)?;
    println!("Looking up: {} - {}", record.artist, record.title);

    let result = rt.block_on(aggregator.aggregate(&record.query()));
    let filled = record.fill_from(&result);

    if filled.is_empty() {
        println!("✗ Nothing to fill (source: {})", result.source);
        return Ok(());
    }

    println!("✓ Filled {} field(s): {}", filled.len(), filled.join(", "));
    println!("  Source: {}", result.source);
    println!();

    if write {
        model::save(&record, path)?;
        println!("✓ Saved {:?}", path);
    } else {
        println!("{}", serde_json::to_string_pretty(&record)?);
        println!();
        println!("(preview only, use --write to save)");
    }
    Ok(())
}

fn print_metadata(result: &AggregatedMetadata) {
    if result.has_no_data() {
        println!("✗ No metadata found.");
    }
    if let Some(bpm) = result.bpm {
        println!("  BPM:      {}", bpm);
    }
    match (result.key, result.mode) {
        (Some(key), Some(mode)) => println!("  Key:      {} {}", key, mode),
        (Some(key), None) => println!("  Key:      {}", key),
        (None, Some(mode)) => println!("  Mode:     {}", mode),
        (None, None) => {}
    }
    if let Some(time_signature) = result.time_signature {
        println!("  Time:     {}", time_signature);
    }
    if let Some(album) = &result.album {
        println!("  Album:    {}", album);
    }
    if let Some(genres) = &result.genres {
        println!("  Genres:   {}", genres.join(", "));
    }
    println!();
    println!("  Source:   {}", result.source);
}
