//! Tag page parser: HTML -> genre tags

use crate::enrichment::fields;
use crate::enrichment::html;

/// Extract up to five usable tags from a track or artist page.
///
/// `/tag/` links are read first; when a page has none, tag container
/// elements (`class="tag"`) are tried instead.
pub fn parse_tag_page(page: &str) -> Option<Vec<String>> {
    let linked: Vec<String> = html::anchors(page)
        .into_iter()
        .filter(|a| a.href.contains("/tag/"))
        .map(|a| a.text)
        .collect();

    let raw = if linked.is_empty() {
        html::tag_class_elements(page)
            .iter()
            .map(|inner| html::text_content(inner))
            .collect()
    } else {
        linked
    };

    let tags = fields::collect_tags(raw);
    (!tags.is_empty()).then_some(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::lastfm_page;

    #[test]
    fn test_tag_links() {
        let page = lastfm_page(&["classic rock", "60s", "rock", "seen live", "beatles"]);
        assert_eq!(
            parse_tag_page(&page),
            Some(vec![
                "classic rock".to_string(),
                "rock".to_string(),
                "beatles".to_string()
            ])
        );
    }

    #[test]
    fn test_alternate_tag_containers() {
        let page = r#"<section><ul class="tags-list"><li class="tag">Pop</li><li class="tag">2009</li><li class="tag">synthpop</li></ul></section>"#;
        assert_eq!(
            parse_tag_page(page),
            Some(vec!["Pop".to_string(), "synthpop".to_string()])
        );
    }

    #[test]
    fn test_no_tags() {
        assert_eq!(parse_tag_page("<html><body>No tags yet</body></html>"), None);
        assert_eq!(parse_tag_page(&lastfm_page(&["favorites", "1999"])), None);
    }
}
