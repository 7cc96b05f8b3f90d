//! JSON-LD (`script[type="application/ld+json"]`) parsing.
//!
//! News sites routinely embed schema.org `NewsArticle`/`Article` objects
//! carrying authors, publish date, and sometimes the full body text.
//! Blocks that fail to parse are skipped; `@graph` wrappers and top-level
//! arrays are flattened.

use scraper::{Html, Selector};
use serde_json::Value;

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Parse every JSON-LD block in the document into a flat list of objects.
pub fn blocks(doc: &Html) -> Vec<Value> {
    let mut out = Vec::new();
    for script in doc.select(&sel(r#"script[type="application/ld+json"]"#)) {
        let raw = script.text().collect::<String>();
        let Ok(parsed) = serde_json::from_str::<Value>(raw.trim()) else {
            continue;
        };
        flatten_into(parsed, &mut out);
    }
    out
}

fn flatten_into(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        Value::Object(mut obj) => {
            if let Some(graph) = obj.remove("@graph") {
                flatten_into(graph, out);
            }
            out.push(Value::Object(obj));
        }
        _ => {}
    }
}

/// Author names from JSON-LD `author` fields, in document order.
///
/// `author` may be a string, an object with a `name`, or an array of either.
pub fn authors(blocks: &[Value]) -> Vec<String> {
    let mut names = Vec::new();
    for block in blocks {
        let Some(author) = block.get("author") else {
            continue;
        };
        collect_author_names(author, &mut names);
    }
    names
}

fn collect_author_names(author: &Value, names: &mut Vec<String>) {
    match author {
        Value::String(s) => {
            let s = s.trim();
            if !s.is_empty() {
                names.push(s.to_string());
            }
        }
        Value::Object(obj) => {
            if let Some(name) = obj.get("name").and_then(Value::as_str) {
                let name = name.trim();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_author_names(item, names);
            }
        }
        _ => {}
    }
}

/// First non-empty `datePublished` across all blocks.
pub fn date_published(blocks: &[Value]) -> Option<String> {
    blocks
        .iter()
        .filter_map(|b| b.get("datePublished").and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First non-empty `articleBody` across all blocks.
pub fn article_body(blocks: &[Value]) -> Option<String> {
    blocks
        .iter()
        .filter_map(|b| b.get("articleBody").and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
