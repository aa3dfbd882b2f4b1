//! Error types for rendering and widget materialization.
//!
//! Neither type ever reaches the viewer as-is: each is converted into a
//! legible placeholder by the component that detected it.
//!
//! - [`RenderError`] - a post body that cannot be rendered at all
//! - [`WidgetError`] - one widget placeholder that cannot be materialized

use thiserror::Error;

use crate::config::{classes, messages};
use crate::document::escape_html;

/// Failures while turning a document into HTML.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The document tree does not have the expected node shape.
    #[error("malformed document: {0}")]
    Malformed(String),
    /// The document nests deeper than the renderer accepts.
    #[error("document nesting exceeds {0} levels")]
    TooDeep(usize),
}

impl RenderError {
    /// The single inert fragment shown in place of the whole body.
    pub fn fallback_html() -> String {
        format!(
            r#"<p class="{}">{}</p>"#,
            classes::RENDER_ERROR,
            messages::CANNOT_DISPLAY
        )
    }
}

/// Failures while materializing a single widget placeholder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    /// The placeholder has no payload attribute.
    #[error("widget payload missing")]
    MissingData,
    /// The payload could not be percent-decoded or parsed as JSON.
    #[error("malformed widget payload: {0}")]
    Malformed(String),
    /// `data-type` is absent or names no known widget.
    #[error("unknown widget kind: {0:?}")]
    UnknownKind(String),
    /// The embed points somewhere it may not be shown.
    #[error("unsupported embed: {0}")]
    UnsupportedEmbed(String),
}

impl WidgetError {
    /// User-visible text for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingData => messages::DATA_UNAVAILABLE,
            Self::Malformed(_) | Self::UnknownKind(_) | Self::UnsupportedEmbed(_) => {
                messages::PROCESSING_ERROR
            }
        }
    }

    /// Local placeholder markup replacing the broken widget.
    ///
    /// Carries the hydrated marker so later passes leave it alone.
    pub fn placeholder_html(&self, kind: &str) -> String {
        format!(
            r#"<div class="{}" data-type="{}" data-hydrated="error">{}</div>"#,
            classes::WIDGET_ERROR,
            escape_html(kind),
            self.message()
        )
    }
}
