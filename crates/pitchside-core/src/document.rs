//! Document renderer.
//!
//! Turns every [`RichContent`] shape into an HTML string. The output is not
//! trusted: callers always pass it through the sanitizer (see
//! [`render_content`](crate::render_content)).
//!
//! Structured documents are trees of [`Node`]s in the editor's JSON format
//! (`{"type": "paragraph", "attrs": {...}, "content": [...]}`). Node kinds
//! the renderer does not know degrade to an escaped JSON dump; they are
//! never dropped and never interpreted as markup.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec::{WidgetKind, encode};
use crate::config::{MAX_NODE_DEPTH, classes};
use crate::content::{LegacyArticle, RichContent};
use crate::embed::{embed_host, youtube_embed_url};
use crate::error::RenderError;

/// One node of a structured document.
///
/// Children stay raw JSON until they are rendered: only recognized kinds are
/// decoded, so an unknown node of any shape can still be dumped as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// Inline formatting applied to a text node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attrs: Map<String, Value>,
}

impl Node {
    fn attr_str(&self, name: &str) -> Option<&str> {
        self.attrs
            .get(name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// An attribute as a plain id: strings are trimmed, numbers stringified.
    fn attr_id(&self, name: &str) -> Option<String> {
        match self.attrs.get(name)? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

/// Render any content shape to (unsanitized) HTML.
///
/// Never fails: a document that cannot be rendered becomes one inert
/// "cannot display" fragment for the whole body.
pub fn render_document(content: &RichContent) -> String {
    match try_render(content) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(error = %e, "post body could not be rendered");
            RenderError::fallback_html()
        }
    }
}

/// Render content, surfacing failures to the caller.
pub fn try_render(content: &RichContent) -> Result<String, RenderError> {
    match content {
        RichContent::StructuredDocument(children) => {
            let mut out = String::new();
            for child in children {
                render_value(child, 1, &mut out)?;
            }
            Ok(out)
        }
        RichContent::LegacyArticle(article) => Ok(render_legacy_article(article)),
        RichContent::RawMarkup(markup) => Ok(markup.clone()),
        RichContent::PlainText(text) => Ok(render_plain_text(text)),
    }
}

fn render_children(node: &Node, depth: usize, out: &mut String) -> Result<(), RenderError> {
    for child in &node.content {
        render_value(child, depth + 1, out)?;
    }
    Ok(())
}

/// Node kinds with a dedicated rendering.
const KNOWN_KINDS: &[&str] = &[
    "doc",
    "text",
    "paragraph",
    "heading",
    "bulletList",
    "orderedList",
    "listItem",
    "blockquote",
    "codeBlock",
    "horizontalRule",
    "hardBreak",
    "image",
    "video",
    "youtube",
    "matchCard",
    "socialEmbed",
];

/// Dispatch on the raw `type` before decoding anything else.
fn render_value(value: &Value, depth: usize, out: &mut String) -> Result<(), RenderError> {
    if depth > MAX_NODE_DEPTH {
        return Err(RenderError::TooDeep(MAX_NODE_DEPTH));
    }

    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
    if !KNOWN_KINDS.contains(&kind) {
        return render_unknown(kind, value, out);
    }

    let node = Node::deserialize(value).map_err(|e| RenderError::Malformed(e.to_string()))?;
    render_node(&node, value, depth, out)
}

fn wrap(
    tag: &str,
    attrs: &str,
    node: &Node,
    depth: usize,
    out: &mut String,
) -> Result<(), RenderError> {
    out.push('<');
    out.push_str(tag);
    out.push_str(attrs);
    out.push('>');
    render_children(node, depth, out)?;
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    Ok(())
}

fn render_node(
    node: &Node,
    raw: &Value,
    depth: usize,
    out: &mut String,
) -> Result<(), RenderError> {
    match node.kind.as_str() {
        "doc" => render_children(node, depth, out)?,
        "text" => render_text(node, out),
        "paragraph" => wrap("p", &align_style(node), node, depth, out)?,
        "heading" => {
            let level = node
                .attrs
                .get("level")
                .and_then(Value::as_u64)
                .unwrap_or(2)
                .clamp(1, 6);
            wrap(&format!("h{}", level), &align_style(node), node, depth, out)?;
        }
        "bulletList" => wrap("ul", "", node, depth, out)?,
        "orderedList" => {
            let start = match node.attrs.get("start").and_then(Value::as_u64) {
                Some(start) if start != 1 => format!(r#" start="{}""#, start),
                _ => String::new(),
            };
            wrap("ol", &start, node, depth, out)?;
        }
        "listItem" => wrap("li", "", node, depth, out)?,
        "blockquote" => wrap("blockquote", "", node, depth, out)?,
        "codeBlock" => {
            let class = node
                .attr_str("language")
                .filter(|lang| lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
                .map(|lang| format!(r#" class="language-{}""#, lang))
                .unwrap_or_default();
            out.push_str("<pre><code");
            out.push_str(&class);
            out.push('>');
            render_children(node, depth, out)?;
            out.push_str("</code></pre>");
        }
        "horizontalRule" => out.push_str("<hr>"),
        "hardBreak" => out.push_str("<br>"),
        "image" => render_image(node, out),
        "video" => render_video(node, out),
        "youtube" => render_youtube(node, out),
        "matchCard" => render_match_placeholder(node, out),
        "socialEmbed" => render_social_placeholder(node, out),
        _ => render_unknown(&node.kind, raw, out)?,
    }
    Ok(())
}

fn align_style(node: &Node) -> String {
    node.attr_str("textAlign")
        .filter(|align| *align != "left")
        .map(|align| format!(r#" style="text-align: {}""#, escape_html(align)))
        .unwrap_or_default()
}

fn render_text(node: &Node, out: &mut String) {
    let Some(text) = &node.text else {
        return;
    };

    let mut open = String::new();
    let mut close = Vec::new();
    for mark in &node.marks {
        let (start, end) = match mark.kind.as_str() {
            "bold" => ("<strong>".to_string(), "</strong>"),
            "italic" => ("<em>".to_string(), "</em>"),
            "underline" => ("<u>".to_string(), "</u>"),
            "strike" => ("<s>".to_string(), "</s>"),
            "code" => ("<code>".to_string(), "</code>"),
            "highlight" => ("<mark>".to_string(), "</mark>"),
            "link" => {
                let href = mark
                    .attrs
                    .get("href")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                (
                    format!(r#"<a href="{}" target="_blank">"#, escape_html(href)),
                    "</a>",
                )
            }
            "textStyle" => match mark.attrs.get("color").and_then(Value::as_str) {
                Some(color) => (
                    format!(r#"<span style="color: {}">"#, escape_html(color)),
                    "</span>",
                ),
                None => continue,
            },
            _ => continue,
        };
        open.push_str(&start);
        close.push(end);
    }

    out.push_str(&open);
    out.push_str(&escape_html(text));
    for end in close.iter().rev() {
        out.push_str(end);
    }
}

fn render_image(node: &Node, out: &mut String) {
    let Some(src) = node.attr_str("src") else {
        return;
    };
    out.push_str(&format!(r#"<img src="{}""#, escape_html(src)));
    if let Some(alt) = node.attr_str("alt") {
        out.push_str(&format!(r#" alt="{}""#, escape_html(alt)));
    }
    if let Some(title) = node.attr_str("title") {
        out.push_str(&format!(r#" title="{}""#, escape_html(title)));
    }
    if let Some(width) = node.attrs.get("width").and_then(Value::as_u64) {
        out.push_str(&format!(r#" style="width: {}px""#, width));
    }
    out.push_str(r#" loading="lazy">"#);
}

fn render_iframe(src: &str, out: &mut String) {
    out.push_str(&format!(
        r#"<iframe src="{}" width="640" height="360" allowfullscreen></iframe>"#,
        escape_html(src)
    ));
}

fn render_video(node: &Node, out: &mut String) {
    let Some(src) = node.attr_str("src") else {
        return;
    };
    if let Some(embed) = youtube_embed_url(src) {
        render_iframe(&embed, out);
    } else if embed_host(src).is_some() {
        render_iframe(src, out);
    } else {
        out.push_str(&format!(
            r#"<video src="{}" controls playsinline preload="metadata"></video>"#,
            escape_html(src)
        ));
    }
}

fn render_youtube(node: &Node, out: &mut String) {
    let Some(src) = node.attr_str("src") else {
        return;
    };
    match youtube_embed_url(src) {
        Some(embed) => render_iframe(&embed, out),
        None => out.push_str(&format!(
            r#"<p><a href="{}" target="_blank">{}</a></p>"#,
            escape_html(src),
            escape_html(src)
        )),
    }
}

fn render_match_placeholder(node: &Node, out: &mut String) {
    let id = node.attr_id("matchId").or_else(|| node.attr_id("id"));
    let payload = node.attrs.get("matchData").or_else(|| node.attrs.get("data"));
    out.push_str(&encode(WidgetKind::Match, payload, id.as_deref()).to_placeholder_html());
}

fn render_social_placeholder(node: &Node, out: &mut String) {
    let payload = node.attr_str("url").map(|url| {
        serde_json::json!({
            "provider": node.attr_str("provider").unwrap_or_default(),
            "url": url,
        })
    });
    out.push_str(&encode(WidgetKind::Social, payload.as_ref(), None).to_placeholder_html());
}

fn render_unknown(kind: &str, raw: &Value, out: &mut String) -> Result<(), RenderError> {
    tracing::debug!(kind = %kind, "rendering unknown node as text");
    let dump =
        serde_json::to_string_pretty(raw).map_err(|e| RenderError::Malformed(e.to_string()))?;
    out.push_str(&format!(
        r#"<pre class="{}">{}</pre>"#,
        classes::UNKNOWN_NODE,
        escape_html(&dump)
    ));
    Ok(())
}

fn render_legacy_article(article: &LegacyArticle) -> String {
    let mut out = format!(r#"<div class="{}">"#, classes::SYNDICATED);

    let source = article
        .source
        .as_deref()
        .map(str::to_string)
        .or_else(|| article.link.as_deref().and_then(link_host))
        .unwrap_or_else(|| "an external source".to_string());

    out.push_str(&format!(
        r#"<header class="{}"><span>Originally published by {}</span>"#,
        classes::SYNDICATED_HEADER,
        escape_html(&source)
    ));
    if let Some(published) = &article.published_at {
        out.push_str(&format!(
            r#" <time datetime="{}">{}</time>"#,
            escape_html(published),
            escape_html(published)
        ));
    }
    if let Some(link) = &article.link {
        out.push_str(&format!(
            r#" <a href="{}" target="_blank">Read the original</a>"#,
            escape_html(link)
        ));
    }
    out.push_str("</header>");

    if let Some(title) = &article.title {
        out.push_str(&format!("<h2>{}</h2>", escape_html(title)));
    }
    if let Some(image) = &article.image_url {
        out.push_str(&format!(
            r#"<img src="{}" alt="" loading="lazy">"#,
            escape_html(image)
        ));
    }
    if let Some(summary) = &article.summary {
        // Feed summaries are markup; the sanitizer decides what survives.
        out.push_str(summary);
    }
    out.push_str("</div>");
    out
}

fn link_host(link: &str) -> Option<String> {
    let rest = link
        .trim()
        .split_once("://")
        .map_or(link.trim(), |(_, rest)| rest);
    let host = rest.split(['/', '?', '#']).next()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    (!host.is_empty()).then(|| host.to_string())
}

fn render_plain_text(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            let lines: Vec<String> = paragraph.lines().map(escape_html).collect();
            format!("<p>{}</p>", lines.join("<br>"))
        })
        .collect()
}

/// Escape text for use in HTML element content or quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
