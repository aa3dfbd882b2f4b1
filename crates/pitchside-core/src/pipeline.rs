//! Classify → render → sanitize.

use serde_json::Value;

use crate::content::RichContent;
use crate::document::render_document;
use crate::sanitize::sanitize_html;

/// Render a stored post body to display-safe HTML.
pub fn render_content(raw: &Value) -> String {
    render_rich_content(&RichContent::classify(raw))
}

/// Render a body stored as a string (JSON document, markup or text).
pub fn render_content_str(raw: &str) -> String {
    render_rich_content(&RichContent::classify_str(raw))
}

/// Render already-classified content. Renderer output is sanitized like any
/// other markup.
pub fn render_rich_content(content: &RichContent) -> String {
    if content.is_empty() {
        return String::new();
    }
    sanitize_html(&render_document(content))
}
