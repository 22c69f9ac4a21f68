// src/html.rs
//! Minimal HTML text helpers for scraped ranking and search pages.

use once_cell::sync::OnceCell;
use regex::Regex;

fn re_tags() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"))
}

fn re_attrs() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("attribute regex")
    })
}

/// Visible text of a fragment: tags stripped, entities decoded, whitespace folded.
pub fn inner_text(fragment: &str) -> String {
    let no_tags = re_tags().replace_all(fragment, " ");
    let decoded = html_escape::decode_html_entities(&no_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decoded value of attribute `name` inside an opening tag.
pub fn attr(tag: &str, name: &str) -> Option<String> {
    re_attrs().captures_iter(tag).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        let raw = caps.get(2).or_else(|| caps.get(3))?.as_str();
        Some(html_escape::decode_html_entities(raw).to_string())
    })
}

/// Whitespace-separated class names of an opening tag.
pub fn classes(tag: &str) -> Vec<String> {
    attr(tag, "class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// True when the tag carries every class in `wanted`.
pub fn has_classes(tag: &str, wanted: &[&str]) -> bool {
    let have = classes(tag);
    wanted.iter().all(|w| have.iter().any(|h| h == w))
}
