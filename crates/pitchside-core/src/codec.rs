//! Widget placeholder codec.
//!
//! A placeholder is a plain element whose attributes carry everything needed
//! to materialize the widget later:
//!
//! - `data-type`: the widget kind
//! - `data-payload`: `encodeURIComponent(JSON.stringify(payload))`
//! - `data-match-id`: the plain match id (match widgets only), readable
//!   without decoding the payload
//!
//! Anything that embeds a widget in stored markup must emit exactly this shape.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde_json::Value;

use crate::config::{widget_attrs, widget_kinds};
use crate::document::escape_html;
use crate::error::WidgetError;

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Known widget kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Live match score card.
    Match,
    /// Third-party social/video post.
    Social,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 2] = [WidgetKind::Match, WidgetKind::Social];

    /// Tag written to `data-type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Match => widget_kinds::MATCH,
            Self::Social => widget_kinds::SOCIAL,
        }
    }

    /// CSS selector for placeholders of this kind not yet materialized.
    pub fn pending_selector(self) -> String {
        format!(
            r#"[{}="{}"]:not([{}])"#,
            widget_attrs::KIND,
            self.as_str(),
            widget_attrs::HYDRATED
        )
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            widget_kinds::MATCH => Ok(Self::Match),
            widget_kinds::SOCIAL => Ok(Self::Social),
            other => Err(WidgetError::UnknownKind(other.to_string())),
        }
    }
}

/// Read access to an element's attributes.
///
/// Implemented for plain maps here; the browser client wraps DOM elements.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for [(&str, &str)] {
    fn attribute(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| (*value).to_string())
    }
}

/// Encoded placeholder attributes for one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetAttributes {
    pub kind: WidgetKind,
    /// Plain id, only ever set for match widgets.
    pub id: Option<String>,
    /// Encoded payload; `None` emits a placeholder without data.
    pub payload: Option<String>,
}

impl WidgetAttributes {
    /// Attribute pairs in emission order.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![(widget_attrs::KIND, self.kind.as_str().to_string())];
        if let Some(id) = &self.id {
            pairs.push((widget_attrs::MATCH_ID, id.clone()));
        }
        if let Some(payload) = &self.payload {
            pairs.push((widget_attrs::PAYLOAD, payload.clone()));
        }
        pairs
    }

    /// Minimal placeholder element standing in for the widget until hydration.
    pub fn to_placeholder_html(&self) -> String {
        let mut html = String::from("<div");
        for (name, value) in self.pairs() {
            html.push_str(&format!(r#" {}="{}""#, name, escape_html(&value)));
        }
        html.push_str("></div>");
        html
    }
}

impl AttributeSource for WidgetAttributes {
    fn attribute(&self, name: &str) -> Option<String> {
        self.pairs()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// A successfully decoded placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedWidget {
    pub kind: WidgetKind,
    pub payload: Value,
    pub id: Option<String>,
}

/// Percent-encode a string exactly like `encodeURIComponent`.
pub fn encode_uri_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Encode a widget payload into placeholder attributes.
///
/// The id is kept only for match widgets; other kinds carry their identity
/// inside the payload.
pub fn encode(kind: WidgetKind, payload: Option<&Value>, id: Option<&str>) -> WidgetAttributes {
    let id = match kind {
        WidgetKind::Match => id.map(str::trim).filter(|id| !id.is_empty()).map(String::from),
        WidgetKind::Social => None,
    };
    let payload = payload
        .filter(|value| !value.is_null())
        .map(|value| encode_uri_component(&value.to_string()));

    WidgetAttributes { kind, id, payload }
}

/// Decode a placeholder's attributes.
pub fn decode<A: AttributeSource + ?Sized>(element: &A) -> Result<DecodedWidget, WidgetError> {
    let kind: WidgetKind = element
        .attribute(widget_attrs::KIND)
        .unwrap_or_default()
        .parse()?;

    let id = element
        .attribute(widget_attrs::MATCH_ID)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());

    let raw = element
        .attribute(widget_attrs::PAYLOAD)
        .ok_or(WidgetError::MissingData)?;

    let json = percent_decode_str(&raw)
        .decode_utf8()
        .map_err(|e| WidgetError::Malformed(e.to_string()))?;
    let payload: Value =
        serde_json::from_str(&json).map_err(|e| WidgetError::Malformed(e.to_string()))?;

    if payload.is_null() {
        return Err(WidgetError::MissingData);
    }

    Ok(DecodedWidget { kind, payload, id })
}
