//! Best-effort HTML fragment extraction.
//!
//! Scraped pages are not parsed into a DOM. Each helper pulls one kind of
//! structure (anchors, definition lists, table rows, paragraphs) out of the
//! raw markup with a small regex, which is enough for the handful of
//! elements the source parsers look at and degrades to "nothing found" when
//! a site changes its markup.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>").unwrap()
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static ANCHOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a>").unwrap());
static HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());
static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<dt\b[^>]*>(.*?)</dt>\s*<dd\b[^>]*>(.*?)</dd>").unwrap()
});
static TABLE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());
static ROW_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<th\b[^>]*>(.*?)</th>").unwrap());
static ROW_VALUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").unwrap());
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").unwrap());
static INFOBOX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<table\b[^>]*class\s*=\s*["'][^"']*\binfobox\b[^"']*["'][^>]*>(.*?)</table>"#)
        .unwrap()
});
static TAG_CLASS_ELEMENTS: Lazy<[Regex; 3]> = Lazy::new(|| {
    ["li", "span", "a"].map(|tag| {
        Regex::new(&format!(
            r#"(?is)<{tag}\b[^>]*class\s*=\s*["'](?:[^"']*\s)?tag(?:\s[^"']*)?["'][^>]*>(.*?)</{tag}>"#
        ))
        .unwrap()
    })
});
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(?:x([0-9a-fA-F]+)|([0-9]+));").unwrap());

/// A hyperlink with its decoded target and visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// A labeled table row (`<th>label</th><td>value</td>`), value kept as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub label: String,
    pub value_html: String,
}

/// Decode the character references scraped pages actually use.
pub fn decode_entities(text: &str) -> String {
    let decoded = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures<'_>| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    decoded
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Visible text of a fragment: tags removed, entities decoded, whitespace collapsed.
pub fn text_content(html: &str) -> String {
    let without_code = SCRIPT_OR_STYLE.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_code, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// All anchors in document order.
pub fn anchors(html: &str) -> Vec<Anchor> {
    ANCHOR
        .captures_iter(html)
        .filter_map(|caps| {
            let attrs = caps.get(1)?.as_str();
            let href_caps = HREF.captures(attrs)?;
            let href = href_caps.get(1).or_else(|| href_caps.get(2))?.as_str();
            Some(Anchor {
                href: decode_entities(href),
                text: text_content(caps.get(2)?.as_str()),
            })
        })
        .collect()
}

/// `(label, value)` text pairs from `<dt>`/`<dd>` definition lists.
pub fn definition_pairs(html: &str) -> Vec<(String, String)> {
    DEFINITION
        .captures_iter(html)
        .map(|caps| (text_content(&caps[1]), text_content(&caps[2])))
        .collect()
}

/// Rows that have both a header cell and a data cell.
pub fn table_rows(html: &str) -> Vec<TableRow> {
    TABLE_ROW
        .captures_iter(html)
        .filter_map(|row| {
            let inner = row.get(1)?.as_str();
            let label = ROW_LABEL.captures(inner)?;
            let value = ROW_VALUE.captures(inner)?;
            Some(TableRow {
                label: text_content(&label[1]),
                value_html: value[1].to_string(),
            })
        })
        .collect()
}

/// Inner markup of the first infobox table.
pub fn infobox(html: &str) -> Option<&str> {
    INFOBOX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Inner markup of the first paragraph that has any visible text.
pub fn first_paragraph(html: &str) -> Option<&str> {
    PARAGRAPH
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|inner| !text_content(inner).is_empty())
}

/// Inner markup of every header cell, including rows without a data cell.
pub fn header_cells(html: &str) -> Vec<&str> {
    ROW_LABEL
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Inner markup of `<li>`, `<span>` and `<a>` elements carrying the `tag`
/// class as a whole word, grouped by element name.
pub fn tag_class_elements(html: &str) -> Vec<String> {
    TAG_CLASS_ELEMENTS
        .iter()
        .flat_map(|re| re.captures_iter(html).map(|caps| caps[1].to_string()))
        .collect()
}
