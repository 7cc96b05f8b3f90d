//! Body-text extraction strategies.
//!
//! Strategies are tried in order and the first one that produces enough
//! text wins:
//!
//! 1. `json-ld` — schema.org `articleBody`, when the publisher embeds it.
//! 2. `selectors` — paragraph harvest under semantic article containers.
//! 3. `full-text` — the whole document minus script/style/nav chrome.

use std::collections::HashSet;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::jsonld;

/// Minimum accepted body length for the targeted strategies.
const MIN_BODY_LEN: usize = 100;
/// Minimum accepted body length for the whole-document fallback.
const MIN_RAW_LEN: usize = 50;
/// Fragments shorter than this are navigation debris, not prose.
const MIN_FRAGMENT_LEN: usize = 20;

/// Containers that usually hold the article body, most specific first.
const CONTENT_CONTAINERS: &[&str] = &[
    "article",
    r#"[itemprop="articleBody"]"#,
    r#"[role="main"]"#,
    "main",
    r#"div[class*="article"]"#,
    r#"div[class*="content"]"#,
    r#"div[class*="post"]"#,
    r#"div[class*="entry"]"#,
    r#"div[class*="story"]"#,
    r#"div[id*="article"]"#,
    r#"div[id*="content"]"#,
];

/// Non-content elements dropped before whole-document text extraction.
const CHROME_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "iframe", "noscript", "svg",
];

/// Phrases injected by consent banners and signup walls, stripped from text.
const BOILERPLATE: &[&str] = &[
    "accept all cookies",
    "subscribe to newsletter",
    "sign up",
    "login",
    "register",
];

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Run the strategy cascade. Returns the body text and the winning
/// strategy's name, or `None` when every strategy came up short.
pub fn body_text(doc: &Html, ld: &[Value]) -> Option<(String, &'static str)> {
    if let Some(body) = jsonld::article_body(ld) {
        let body = clean_text(&body);
        if body.len() > MIN_BODY_LEN {
            return Some((body, "json-ld"));
        }
    }

    if let Some(body) = from_selectors(doc) {
        if body.len() > MIN_BODY_LEN {
            return Some((body, "selectors"));
        }
    }

    if let Some(body) = full_text(doc) {
        if body.len() > MIN_RAW_LEN {
            return Some((body, "full-text"));
        }
    }

    None
}

/// Harvest prose fragments (paragraphs, subheadings, list items) under
/// known article containers, in document order, deduplicated — nested
/// containers would otherwise double-count.
pub fn from_selectors(doc: &Html) -> Option<String> {
    let fragment_sel = sel("p, h2, h3, h4, li");
    let mut seen: HashSet<String> = HashSet::new();
    let mut fragments: Vec<String> = Vec::new();

    for container_css in CONTENT_CONTAINERS {
        for container in doc.select(&sel(container_css)) {
            for el in container.select(&fragment_sel) {
                let fragment = clean_text(&el.text().collect::<String>());
                if fragment.len() > MIN_FRAGMENT_LEN && seen.insert(fragment.clone()) {
                    fragments.push(fragment);
                }
            }
        }
    }

    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join("\n\n"))
    }
}

/// Last resort: every text node in the document except those under
/// script/style/navigation chrome.
pub fn full_text(doc: &Html) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut stack = vec![doc.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            scraper::Node::Element(el) if CHROME_TAGS.contains(&el.name()) => {}
            scraper::Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            _ => {
                // Reverse so popping preserves document order.
                for child in node.children().rev() {
                    stack.push(child);
                }
            }
        }
    }

    if parts.is_empty() {
        return None;
    }
    let joined = clean_text(&parts.join(" "));
    if joined.is_empty() { None } else { Some(joined) }
}

/// Collapse whitespace and strip known boilerplate phrases.
pub fn clean_text(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let collapsed = strip_boilerplate(line);
        let collapsed = collapsed.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
    }
    lines.join("\n")
}

fn strip_boilerplate(line: &str) -> String {
    let mut out = line.to_string();
    for phrase in BOILERPLATE {
        loop {
            let lower = out.to_ascii_lowercase();
            match lower.find(phrase) {
                Some(start) => out.replace_range(start..start + phrase.len(), ""),
                None => break,
            }
        }
    }
    out
}

/// Leading ~500 characters of the body, char-boundary safe.
pub fn summarize(text: &str) -> String {
    const MAX_CHARS: usize = 500;
    let mut summary: String = text.chars().take(MAX_CHARS).collect();
    if text.chars().count() > MAX_CHARS {
        summary.push_str("...");
    }
    summary
}
