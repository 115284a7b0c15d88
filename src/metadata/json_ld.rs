//! JSON-LD Metadata Parsing
//!
//! Reads Schema.org objects embedded as `<script type="application/ld+json">`.
//! Only the facts the other metadata sources cannot supply reliably are
//! taken from here: the publication date and the article's authors.

use chrono::{DateTime, Utc};
use dom_query::Document;
use serde_json::{Map, Value};

use crate::dom;

use super::meta_tags::{parse_meta_date, validate_metadata_name};

/// Facts recovered from the JSON-LD blocks of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonLdFacts {
    /// `datePublished` of the first article-like object that has one.
    pub date_published: Option<DateTime<Utc>>,
    /// Names listed under `author` of article-like objects, in order.
    pub authors: Vec<String>,
}

/// Collect JSON-LD facts from every parseable script block.
///
/// Invalid JSON is skipped; a broken block never affects the others.
#[must_use]
pub fn extract_json_ld(doc: &Document) -> JsonLdFacts {
    let mut articles: Vec<Map<String, Value>> = Vec::new();

    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let json_text = dom::text_content(script);
        let json_text = json_text.trim();
        if json_text.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(json_text) {
            Ok(value) => collect_articles(&value, &mut articles),
            Err(err) => tracing::trace!(error = %err, "skipping invalid JSON-LD block"),
        }
    }

    let mut facts = JsonLdFacts::default();
    for article in &articles {
        if facts.date_published.is_none() {
            facts.date_published = get_single_string_value(article, "datePublished")
                .and_then(|date| parse_meta_date(&date));
        }
        for name in author_names(article) {
            if !facts.authors.contains(&name) {
                facts.authors.push(name);
            }
        }
    }

    facts
}

/// Recursively gather article-like objects, descending into `@graph` arrays.
fn collect_articles(value: &Value, out: &mut Vec<Map<String, Value>>) {
    match value {
        Value::Object(map) => {
            if is_article_type(&get_schema_types(map)) {
                out.push(map.clone());
            }
            for (key, val) in map {
                if key != "author" {
                    collect_articles(val, out);
                }
            }
        }
        Value::Array(arr) => {
            for item in arr {
                collect_articles(item, out);
            }
        }
        _ => {}
    }
}

/// Lowercased `@type` values of a schema object.
fn get_schema_types(data: &Map<String, Value>) -> Vec<String> {
    match data.get("@type") {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

fn is_article_type(types: &[String]) -> bool {
    types.iter().any(|t| {
        matches!(
            t.as_str(),
            "article" | "newsarticle" | "blogposting" | "report" | "techarticle"
                | "scholarlyarticle" | "socialmediaposting" | "reportagenewsarticle"
                | "analysisnewsarticle" | "opinionnewsarticle"
        )
    })
}

/// Name of a person object: `name`, or `givenName` + `familyName`.
fn get_schema_name(data: &Map<String, Value>) -> Option<String> {
    if let Some(name) = get_single_string_value(data, "name") {
        return Some(name);
    }

    let given = data.get("givenName").and_then(Value::as_str).unwrap_or("");
    let family = data.get("familyName").and_then(Value::as_str).unwrap_or("");
    let full_name = format!("{} {}", given.trim(), family.trim()).trim().to_string();

    (!full_name.is_empty()).then_some(full_name)
}

/// Names under an article's `author` key, which may be a string, an object or a list.
fn author_names(article: &Map<String, Value>) -> Vec<String> {
    let Some(author) = article.get("author") else {
        return Vec::new();
    };

    let entries: Vec<&Value> = match author {
        Value::Array(arr) => arr.iter().collect(),
        other => vec![other],
    };

    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(obj) => get_schema_name(obj),
            _ => None,
        })
        .filter(|name| validate_metadata_name(name))
        .collect()
}

/// Get a single string value from an object property.
fn get_single_string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    let value = data.get(key)?;

    let s = match value {
        Value::String(s) => s.as_str(),
        Value::Array(arr) => arr.first().and_then(Value::as_str)?,
        _ => return None,
    };

    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
