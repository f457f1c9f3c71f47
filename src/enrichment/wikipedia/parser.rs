//! Article parsers: song article -> album, album article -> genres

use once_cell::sync::Lazy;
use regex::Regex;

use crate::enrichment::fields;
use crate::enrichment::html::{self, Anchor};

/// "from the album <a>Name</a>", optionally "from the 1969 album" or "from their debut album"
static FROM_ALBUM_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)from\s+(?:the|their|his|her)\s+(?:[a-z0-9-]+\s+){0,2}album,?\s*(?:<i>\s*)?<a\b([^>]*)>(.*?)</a>",
    )
    .unwrap()
});
/// Plain-text variant: the title runs over capitalized words, with short
/// lowercase joiners allowed only between them ("The Dark Side of the Moon").
static FROM_ALBUM_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i:from\s+(?:the|their|his|her)\s+(?:[a-z0-9-]+\s+){0,2}album,?\s+)["“]?([\p{Lu}\d][^\s,.;:()"”]*(?:\s+(?:(?:of|the|and|a|an|in|on|at|to|for|with|from|or)\s+)*[\p{Lu}\d][^\s,.;:()"”]*)*)"#,
    )
    .unwrap()
});
static HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r#"href\s*=\s*["']([^"']*)["']"#).unwrap());
static LIST_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</li>").unwrap());
static CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\s*(?:\d+|[a-z])\s*\]").unwrap());

/// The album an article points at, with its article path when linked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRef {
    pub name: String,
    /// Article path such as `/wiki/Abbey_Road`
    pub path: Option<String>,
}

/// Find the album of a song article.
///
/// Looks at the infobox first (an "album" row, or the "from the album"
/// header), then at the lead paragraph.
pub fn parse_song_page(page: &str) -> Option<AlbumRef> {
    if let Some(infobox) = html::infobox(page) {
        let from_rows = html::table_rows(infobox)
            .into_iter()
            .filter(|row| row.label.to_lowercase().contains("album"))
            .find_map(|row| album_from_markup(&row.value_html));
        if from_rows.is_some() {
            return from_rows;
        }

        let from_header = html::header_cells(infobox)
            .into_iter()
            .find_map(album_from_sentence);
        if from_header.is_some() {
            return from_header;
        }
    }

    html::first_paragraph(page).and_then(album_from_sentence)
}

/// Genres from an album article's infobox "genre" row.
///
/// Link texts are preferred; plain comma/line separated text is the fallback.
pub fn parse_album_genres(page: &str) -> Option<Vec<String>> {
    let infobox = html::infobox(page)?;
    let row = html::table_rows(infobox)
        .into_iter()
        .find(|row| row.label.trim().to_lowercase().starts_with("genre"))?;

    let linked: Vec<String> = html::anchors(&row.value_html)
        .into_iter()
        .filter(is_article_link)
        .map(|a| a.text)
        .collect();

    let genres = if linked.is_empty() {
        let separated = LIST_BREAK.replace_all(&row.value_html, ",");
        let text = CITATION.replace_all(&html::text_content(&separated), "").into_owned();
        fields::collect_tags(text.split([',', '\n']).map(str::trim))
    } else {
        fields::collect_tags(linked)
    };

    (!genres.is_empty()).then_some(genres)
}

/// First article link in a cell, or the cell's plain text.
fn album_from_markup(value_html: &str) -> Option<AlbumRef> {
    let linked = html::anchors(value_html)
        .into_iter()
        .filter(is_article_link)
        .find_map(|a| {
            fields::clean_album(&a.text).map(|name| AlbumRef {
                name,
                path: Some(a.href),
            })
        });
    linked.or_else(|| {
        let text = CITATION.replace_all(&html::text_content(value_html), "").into_owned();
        fields::clean_album(&text).map(|name| AlbumRef { name, path: None })
    })
}

/// "from the album X" inside a header cell or paragraph.
fn album_from_sentence(markup: &str) -> Option<AlbumRef> {
    if let Some(caps) = FROM_ALBUM_LINK.captures(markup) {
        let path = HREF
            .captures(&caps[1])
            .map(|h| html::decode_entities(&h[1]))
            .filter(|href| href.starts_with("/wiki/"));
        if let Some(name) = fields::clean_album(&html::text_content(&caps[2])) {
            return Some(AlbumRef { name, path });
        }
    }

    let text = html::text_content(markup);
    let caps = FROM_ALBUM_TEXT.captures(&text)?;
    fields::clean_album(&caps[1]).map(|name| AlbumRef { name, path: None })
}

fn is_article_link(anchor: &Anchor) -> bool {
    anchor.href.starts_with("/wiki/") && !anchor.text.starts_with('[') && !anchor.text.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{wikipedia_album_page, wikipedia_song_page};

    #[test]
    fn test_album_row_in_infobox() {
        let page = wikipedia_song_page(
            r##"<tr><th>Album</th><td><a href="/wiki/Abbey_Road">Abbey Road</a><sup><a href="#cite_note-1">[1]</a></sup></td></tr>"##,
            "<p>A song.</p>",
        );
        assert_eq!(
            parse_song_page(&page),
            Some(AlbumRef {
                name: "Abbey Road".to_string(),
                path: Some("/wiki/Abbey_Road".to_string()),
            })
        );
    }

    #[test]
    fn test_disambiguation_suffix_stripped() {
        let page = wikipedia_song_page(
            r#"<tr><th>from the album</th><td><a href="/wiki/Help!_(album)">Help! (album)</a></td></tr>"#,
            "",
        );
        assert_eq!(parse_song_page(&page).unwrap().name, "Help!");
    }

    #[test]
    fn test_header_only_album_line() {
        let page = wikipedia_song_page(
            r#"<tr><th colspan="2" class="infobox-header">from the album <i><a href="/wiki/Revolver_(Beatles_album)">Revolver</a></i></th></tr>"#,
            "",
        );
        let album = parse_song_page(&page).unwrap();
        assert_eq!(album.name, "Revolver");
        assert_eq!(album.path.as_deref(), Some("/wiki/Revolver_(Beatles_album)"));
    }

    #[test]
    fn test_plain_text_album_row() {
        let page = wikipedia_song_page("<tr><th>Album</th><td>Let It Be[2]</td></tr>", "");
        assert_eq!(
            parse_song_page(&page),
            Some(AlbumRef {
                name: "Let It Be".to_string(),
                path: None
            })
        );
    }

    #[test]
    fn test_lead_paragraph_fallback() {
        let page = wikipedia_song_page(
            "<tr><th>Released</th><td>1966</td></tr>",
            r#"<p>"Taxman" is a song from the album <i>Revolver</i>, released in 1966.</p>"#,
        );
        assert_eq!(
            parse_song_page(&page),
            Some(AlbumRef {
                name: "Revolver".to_string(),
                path: None
            })
        );
    }

    #[test]
    fn test_lead_paragraph_album_stops_at_prose() {
        let page = wikipedia_song_page(
            "",
            "<p>It was released from the album Abbey Road by the Beatles in 1969.</p>",
        );
        assert_eq!(parse_song_page(&page).unwrap().name, "Abbey Road");

        let page = wikipedia_song_page(
            "",
            "<p>\"Time\" is a song from their album <i>The Dark Side of the Moon</i> and a single.</p>",
        );
        assert_eq!(parse_song_page(&page).unwrap().name, "The Dark Side of the Moon");
    }

    #[test]
    fn test_lowercase_prose_is_not_an_album() {
        let page = wikipedia_song_page("", "<p>It is the only track from the album that charted.</p>");
        assert_eq!(parse_song_page(&page), None);
    }

    #[test]
    fn test_lead_paragraph_linked_album() {
        let page = wikipedia_song_page(
            "",
            r#"<p>It is a track from their 1969 album <a href="/wiki/Abbey_Road" title="Abbey Road">Abbey Road</a>.</p>"#,
        );
        let album = parse_song_page(&page).unwrap();
        assert_eq!(album.name, "Abbey Road");
        assert_eq!(album.path.as_deref(), Some("/wiki/Abbey_Road"));
    }

    #[test]
    fn test_no_album_anywhere() {
        let page = wikipedia_song_page(
            "<tr><th>Released</th><td>1968</td></tr>",
            "<p>A non-album single released in 1968.</p>",
        );
        assert_eq!(parse_song_page(&page), None);
    }

    #[test]
    fn test_album_genres_from_links() {
        let page = wikipedia_album_page(
            r##"<div class="hlist"><ul><li><a href="/wiki/Rock_music">Rock</a></li><li><a href="/wiki/Pop_music">pop</a><sup><a href="#cite_note-3">[3]</a></sup></li></ul></div>"##,
        );
        assert_eq!(
            parse_album_genres(&page),
            Some(vec!["Rock".to_string(), "pop".to_string()])
        );
    }

    #[test]
    fn test_album_genres_from_plain_text() {
        let page = wikipedia_album_page("Rock, blues<br/>psychedelia[4]");
        assert_eq!(
            parse_album_genres(&page),
            Some(vec![
                "Rock".to_string(),
                "blues".to_string(),
                "psychedelia".to_string()
            ])
        );
    }

    #[test]
    fn test_album_without_genre_row() {
        let page = r#"<table class="infobox"><tr><th>Released</th><td>1969</td></tr></table>"#;
        assert_eq!(parse_album_genres(page), None);
    }
}
