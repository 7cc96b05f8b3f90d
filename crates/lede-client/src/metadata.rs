//! Page metadata extraction: title, authors, publish date, keywords, images.
//!
//! Each field is tried against a candidate list, most reliable source
//! first — OpenGraph/meta tags, then JSON-LD, then visible elements.
//! Everything degrades to an empty value instead of failing: a page with
//! no usable metadata still extracts.

use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::jsonld;

/// Number of inline `<img>` tags considered after the OpenGraph image.
const MAX_INLINE_IMAGES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub keywords: Vec<String>,
    /// Image URLs, document order, resolved against the page URL.
    pub images: Vec<String>,
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// First non-empty `content` attribute among elements matching `css`.
fn meta_content(doc: &Html, css: &str) -> Option<String> {
    doc.select(&sel(css))
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// Visible text of the first element matching `css`, whitespace-collapsed.
fn element_text(doc: &Html, css: &str) -> Option<String> {
    doc.select(&sel(css))
        .map(|el| collapse(&el.text().collect::<String>()))
        .find(|t| !t.is_empty())
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract all page metadata in one pass over the parsed document.
pub fn extract(doc: &Html, base: &Url, ld: &[Value]) -> PageMetadata {
    PageMetadata {
        title: title(doc),
        authors: authors(doc, ld),
        publish_date: publish_date(doc, ld),
        keywords: keywords(doc),
        images: images(doc, base),
    }
}

fn title(doc: &Html) -> String {
    meta_content(doc, r#"meta[property="og:title"]"#)
        .or_else(|| meta_content(doc, r#"meta[name="twitter:title"]"#))
        .or_else(|| element_text(doc, "h1"))
        .or_else(|| element_text(doc, "title"))
        .unwrap_or_default()
}

fn authors(doc: &Html, ld: &[Value]) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        let name = collapse(name);
        // article:author frequently carries a profile URL, not a name.
        if name.is_empty() || name.starts_with("http://") || name.starts_with("https://") {
            return;
        }
        if !found.iter().any(|a| a.eq_ignore_ascii_case(&name)) {
            found.push(name);
        }
    };

    for css in [r#"meta[name="author"]"#, r#"meta[property="article:author"]"#] {
        for el in doc.select(&sel(css)) {
            if let Some(content) = el.value().attr("content") {
                push(content);
            }
        }
    }
    for name in jsonld::authors(ld) {
        push(&name);
    }
    for css in [r#"a[rel="author"]"#, r#"[itemprop="author"]"#] {
        for el in doc.select(&sel(css)) {
            push(&el.text().collect::<String>());
        }
    }

    found
}

fn publish_date(doc: &Html, ld: &[Value]) -> Option<String> {
    meta_content(doc, r#"meta[property="article:published_time"]"#)
        .or_else(|| meta_content(doc, r#"meta[name="publish_date"]"#))
        .or_else(|| meta_content(doc, r#"meta[name="date"]"#))
        .or_else(|| {
            doc.select(&sel("time[datetime]"))
                .filter_map(|el| el.value().attr("datetime"))
                .map(str::trim)
                .find(|d| !d.is_empty())
                .map(str::to_string)
        })
        .or_else(|| jsonld::date_published(ld))
}

fn keywords(doc: &Html) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |keyword: &str| {
        let keyword = keyword.trim().to_string();
        if !keyword.is_empty() && !found.iter().any(|k| k.eq_ignore_ascii_case(&keyword)) {
            found.push(keyword);
        }
    };

    if let Some(meta) = meta_content(doc, r#"meta[name="keywords"]"#) {
        for keyword in meta.split(',') {
            push(keyword);
        }
    }
    for el in doc.select(&sel(r#"meta[property="article:tag"]"#)) {
        if let Some(tag) = el.value().attr("content") {
            push(tag);
        }
    }

    found
}

fn images(doc: &Html, base: &Url) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |src: &str| {
        let src = src.trim();
        if src.is_empty() || src.starts_with("data:") {
            return;
        }
        let Ok(resolved) = base.join(src) else {
            return;
        };
        let resolved = resolved.to_string();
        if !found.contains(&resolved) {
            found.push(resolved);
        }
    };

    for el in doc.select(&sel(r#"meta[property="og:image"]"#)) {
        if let Some(content) = el.value().attr("content") {
            push(content);
        }
    }
    for el in doc.select(&sel("img[src]")).take(MAX_INLINE_IMAGES) {
        if let Some(src) = el.value().attr("src") {
            push(src);
        }
    }

    found
}
