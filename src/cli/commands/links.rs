//! Search link command.

use crate::enrichment::MetadataQuery;
use crate::links::{self, LinkKind};

/// Print search links for a song
pub fn cmd_links(title: &str, artist: &str) -> anyhow::Result<()> {
    let query = MetadataQuery::new(title, artist);
    let found = links::search_links(&query);
    if found.is_empty() {
        eprintln!("Error: both title and artist are required.");
        std::process::exit(1);
    }

    for (heading, kind) in [("Listen", LinkKind::Streaming), ("Learn", LinkKind::Tabs)] {
        println!("{}:", heading);
        for link in found.iter().filter(|l| l.site.kind() == kind) {
            println!("  {:<16} {}", link.site.name(), link.url);
        }
        println!();
    }
    Ok(())
}
