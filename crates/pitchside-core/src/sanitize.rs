//! Allow-list markup sanitizer.
//!
//! This is the single security boundary for post bodies: raw author markup
//! and the document renderer's own output both pass through
//! [`sanitize_html`] before display. The policy in
//! [`config::policy`](crate::config::policy) is deny-by-default; anything
//! unlisted is removed, never escaped and kept.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::{Builder, UrlRelative};
use regex::Regex;

use crate::config::policy;

static POLICY: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let tag_attributes: HashMap<&str, HashSet<&str>> = policy::TAG_ATTRIBUTES
        .iter()
        .map(|(tag, attrs)| (*tag, attrs.iter().copied().collect()))
        .collect();

    let mut builder = Builder::empty();
    builder
        .tags(policy::TAGS.iter().copied().collect())
        .generic_attributes(policy::GENERIC_ATTRIBUTES.iter().copied().collect())
        .tag_attributes(tag_attributes)
        .url_schemes(policy::URL_SCHEMES.iter().copied().collect())
        .url_relative(UrlRelative::PassThrough)
        .link_rel(Some(policy::LINK_REL))
        .strip_comments(true)
        .clean_content_tags(HashSet::from(["script", "style"]))
        .attribute_filter(filter_attribute);
    builder
});

/// Strips every tag; used for user-derived fields interpolated into widgets.
static TEXT_ONLY: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::empty();
    builder
        .strip_comments(true)
        .clean_content_tags(HashSet::from(["script", "style"]));
    builder
});

struct StyleRule {
    element: &'static str,
    property: &'static str,
    value: Regex,
}

static STYLE_RULES: LazyLock<Vec<StyleRule>> = LazyLock::new(|| {
    policy::STYLE_PROPERTIES
        .iter()
        .map(|&(element, property, pattern)| StyleRule {
            element,
            property,
            value: Regex::new(&format!("^(?:{})$", pattern)).expect("style pattern is valid"),
        })
        .collect()
});

// Runs on serializer output, where every attribute value is double-quoted;
// a `>` inside a quoted value does not end the tag.
static EMPTY_IFRAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<iframe\b((?:[^>"]|"[^"]*")*)>.*?</iframe>"#)
        .expect("iframe pattern is valid")
});

/// Sanitize an HTML string against the policy.
///
/// Empty input short-circuits without touching the sanitizer.
pub fn sanitize_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let cleaned = POLICY.clean(html).to_string();

    // The attribute filter can only drop `src`; an iframe left pointing
    // nowhere is removed as a whole.
    EMPTY_IFRAME
        .replace_all(&cleaned, |caps: &regex::Captures<'_>| {
            if caps[1].contains(" src=\"") {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Reduce a user-derived field to HTML-safe text.
///
/// The result is safe both as element text and inside a quoted attribute.
pub fn sanitize_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    TEXT_ONLY
        .clean(input)
        .to_string()
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Accept only absolute http(s) or root-relative URLs.
pub fn safe_url(url: &str) -> Option<&str> {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();
    let root_relative = url.starts_with('/') && !url.starts_with("//");

    (root_relative || lower.starts_with("https://") || lower.starts_with("http://"))
        .then_some(url)
}

fn filter_attribute<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    if attribute == "style" {
        return filter_style(element, value);
    }

    let schemes = policy::ELEMENT_URL_SCHEMES
        .iter()
        .find(|(tag, attr, _)| *tag == element && *attr == attribute)
        .map(|(_, _, schemes)| *schemes);

    match schemes {
        Some(schemes) if url_allowed(element, value, schemes) => Some(Cow::Borrowed(value)),
        Some(_) => None,
        None => Some(Cow::Borrowed(value)),
    }
}

fn url_allowed(element: &str, url: &str, schemes: &[&str]) -> bool {
    let url = url.trim();
    let lower = url.to_ascii_lowercase();

    let Some(scheme) = url_scheme(&lower) else {
        // Relative URLs are fine everywhere except iframes.
        return element != "iframe";
    };

    if !schemes.contains(&scheme) {
        return false;
    }

    match scheme {
        "data" => policy::DATA_URL_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix)),
        _ if element == "iframe" => iframe_host(&lower)
            .is_some_and(|host| policy::IFRAME_HOSTS.contains(&host)),
        _ => true,
    }
}

/// Scheme of an absolute URL; `None` for relative references.
fn url_scheme(url: &str) -> Option<&str> {
    let end = url.find(|c: char| matches!(c, ':' | '/' | '?' | '#'))?;
    if url[end..].starts_with(':') && end > 0 {
        Some(&url[..end])
    } else {
        None
    }
}

fn iframe_host(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    // Userinfo is never legitimate in an embed URL.
    if authority.contains('@') {
        return None;
    }
    authority.split(':').next().filter(|host| !host.is_empty())
}

fn filter_style<'u>(element: &str, value: &'u str) -> Option<Cow<'u, str>> {
    let kept: Vec<String> = value
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim().to_ascii_lowercase();

            if value.contains("url(") || value.contains("expression") || value.contains('\\') {
                return None;
            }

            STYLE_RULES
                .iter()
                .any(|rule| {
                    (rule.element == "*" || rule.element == element)
                        && rule.property == property
                        && rule.value.is_match(&value)
                })
                .then(|| format!("{}: {}", property, value))
        })
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(Cow::Owned(kept.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_html(""), "");
        assert_eq!(sanitize_html("   \n"), "");
    }

    #[test]
    fn test_script_removed_with_content() {
        let out = sanitize_html("<p>hi</p><script>alert(1)</script>");
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    fn test_event_handler_stripped_src_kept() {
        assert_eq!(sanitize_html("<img src=x onerror=alert(1)>"), r#"<img src="x">"#);
    }

    #[test]
    fn test_javascript_urls_removed() {
        let out = sanitize_html(r#"<a href="javascript:alert(1)">x</a><a href=" JaVaScRiPt:alert(1)">y</a>"#);
        assert!(!out.to_lowercase().contains("javascript"));
        assert!(out.contains(">x</a>"));
    }

    #[test]
    fn test_links_get_rel() {
        let out = sanitize_html(r#"<a href="https://example.com" target="_blank">x</a>"#);
        assert!(out.contains(r#"rel="noopener noreferrer nofollow""#));
        assert!(out.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_iframe_host_allow_list() {
        let ok = r#"<iframe src="https://www.youtube-nocookie.com/embed/abc"></iframe>"#;
        assert!(sanitize_html(ok).contains("youtube-nocookie.com/embed/abc"));

        for bad in [
            r#"<iframe src="https://evil.example/x"></iframe>"#,
            r#"<iframe src="http://www.youtube.com/embed/abc"></iframe>"#,
            r#"<iframe src="https://www.youtube.com@evil.example/"></iframe>"#,
            r#"<iframe src="//www.youtube.com/embed/abc"></iframe>"#,
            r#"<iframe srcdoc="<script>alert(1)</script>"></iframe>"#,
        ] {
            let out = sanitize_html(bad);
            assert!(!out.contains("<iframe"), "{bad} -> {out}");
            assert!(!out.contains("evil"), "{bad} -> {out}");
        }
    }

    #[test]
    fn test_iframe_attribute_containing_angle_bracket() {
        let out = sanitize_html(
            r#"<iframe title="1 > 0" src="https://www.youtube-nocookie.com/embed/abc"></iframe>"#,
        );
        assert!(out.contains(r#"src="https://www.youtube-nocookie.com/embed/abc""#));

        let out = sanitize_html(r#"<iframe title="a > b" src="https://evil.example/x"></iframe>"#);
        assert!(!out.contains("<iframe"));
    }

    #[test]
    fn test_per_element_schemes() {
        let png = "data:image/png;base64,iVBORw0KGgo=";
        assert!(sanitize_html(&format!(r#"<img src="{png}">"#)).contains(png));
        assert!(!sanitize_html(r#"<img src="data:text/html;base64,PHNjcmlwdD4=">"#).contains("data:"));
        assert!(!sanitize_html(r#"<a href="data:text/html,hi">x</a>"#).contains("data:"));
        assert!(sanitize_html(r#"<a href="mailto:a@b.c">x</a>"#).contains("mailto:"));
        assert!(!sanitize_html(r#"<img src="mailto:a@b.c">"#).contains("mailto:"));
    }

    #[test]
    fn test_style_filtered_per_property() {
        let out = sanitize_html(
            r#"<p style="color: red; position: fixed; background-color: url(x); text-align: CENTER">x</p>"#,
        );
        assert_eq!(out, r#"<p style="color: red; text-align: center">x</p>"#);

        let out = sanitize_html(r#"<p style="position: absolute">x</p>"#);
        assert_eq!(out, "<p>x</p>");
    }

    #[test]
    fn test_style_keyed_by_element() {
        assert!(sanitize_html(r#"<img src="a.png" style="width: 50%">"#).contains("width: 50%"));
        assert!(!sanitize_html(r#"<p style="width: 50%">x</p>"#).contains("width"));
    }

    #[test]
    fn test_unlisted_elements_and_attributes_removed() {
        let out = sanitize_html(
            r#"<form action="/x"><input value="y"></form><object data="z"></object><div id="a" onclick="b">ok</div><!-- c -->"#,
        );
        assert_eq!(out, "<div>ok</div>");
    }

    #[test]
    fn test_widget_placeholders_survive() {
        let html = r#"<div data-type="match" data-match-id="5" data-payload="%7B%7D"></div>"#;
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn test_hydrated_marker_cannot_be_forged() {
        let out = sanitize_html(r#"<div data-type="match" data-hydrated="true"></div>"#);
        assert!(!out.contains("data-hydrated"));
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("<b>Ajax</b> & Co"), "Ajax &amp; Co");
        assert_eq!(sanitize_text("<script>alert(1)</script>PSV"), "PSV");
        assert_eq!(sanitize_text(r#"x" onerror="y"#), "x&quot; onerror=&quot;y");
    }

    #[test]
    fn test_safe_url() {
        assert_eq!(safe_url("https://a.b/c"), Some("https://a.b/c"));
        assert_eq!(safe_url("/assets/x.svg"), Some("/assets/x.svg"));
        assert_eq!(safe_url("//evil.example/x"), None);
        assert_eq!(safe_url("javascript:alert(1)"), None);
    }

    #[test]
    fn test_url_scheme() {
        assert_eq!(url_scheme("https://x"), Some("https"));
        assert_eq!(url_scheme("/a:b"), None);
        assert_eq!(url_scheme("a/b:c"), None);
        assert_eq!(url_scheme("plain"), None);
    }
}
