//! Content shape classification.
//!
//! Post bodies are stored in whatever shape the producing client wrote:
//! an editor document, a syndicated article object, freeform markup or
//! plain text. [`RichContent::classify`] settles the shape once so the rest
//! of the pipeline can match on it instead of probing fields.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// The shapes a post body can take.
#[derive(Debug, Clone, PartialEq)]
pub enum RichContent {
    /// Editor document; holds the root's children as raw nodes, decoded
    /// during rendering so a malformed tree fails the render, not the classify.
    StructuredDocument(Vec<Value>),
    /// Article object imported from an external feed.
    LegacyArticle(LegacyArticle),
    /// Author-supplied HTML.
    RawMarkup(String),
    PlainText(String),
}

/// Syndicated article as written by the old feed importer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyArticle {
    pub title: Option<String>,
    pub link: Option<String>,
    #[serde(alias = "image_url", alias = "thumbnail")]
    pub image_url: Option<String>,
    #[serde(alias = "description")]
    pub summary: Option<String>,
    #[serde(alias = "sourceName")]
    pub source: Option<String>,
    #[serde(alias = "pubDate")]
    pub published_at: Option<String>,
}

static TAG_LIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z!/]").expect("tag pattern is valid"));

impl RichContent {
    /// Classify a stored body. Never fails.
    pub fn classify(raw: &Value) -> Self {
        match raw {
            Value::String(s) => Self::classify_str(s),
            Value::Object(_) => Self::classify_object(raw).unwrap_or_else(|| {
                tracing::debug!("unrecognized content object rendered as text");
                Self::PlainText(raw.to_string())
            }),
            Value::Null => Self::PlainText(String::new()),
            other => Self::PlainText(other.to_string()),
        }
    }

    /// Classify a string body.
    ///
    /// Only strings that look like a JSON object are parsed; everything else
    /// goes straight to the markup/text split.
    pub fn classify_str(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.starts_with('{')
            && trimmed.ends_with('}')
            && let Ok(value) = serde_json::from_str::<Value>(trimmed)
            && let Some(content) = Self::classify_object(&value)
        {
            return content;
        }

        if TAG_LIKE.is_match(trimmed) {
            Self::RawMarkup(raw.to_string())
        } else {
            Self::PlainText(raw.to_string())
        }
    }

    fn classify_object(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let is_doc = object.get("type").is_some_and(|kind| kind == "doc");
        match object.get("content") {
            Some(Value::Array(children)) if is_doc || !object.contains_key("type") => {
                return Some(Self::StructuredDocument(children.clone()));
            }
            None if is_doc => return Some(Self::StructuredDocument(Vec::new())),
            _ => {}
        }

        let has_body = ["link", "summary", "description"]
            .iter()
            .any(|key| object.get(*key).is_some_and(Value::is_string));
        if object.get("title").is_some_and(Value::is_string) && has_body {
            let article = LegacyArticle::deserialize(value).ok()?;
            return Some(Self::LegacyArticle(article));
        }

        None
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::StructuredDocument(children) => children.is_empty(),
            Self::LegacyArticle(_) => false,
            Self::RawMarkup(s) | Self::PlainText(s) => s.trim().is_empty(),
        }
    }
}
