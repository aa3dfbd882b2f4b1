//! Placeholder materialization.
//!
//! One placeholder in, one widget's markup out. Failures stay local: a
//! broken placeholder renders its own error box and nothing else is affected.

use crate::card::render_match_card;
use crate::codec::{AttributeSource, DecodedWidget, WidgetKind, decode};
use crate::config::widget_attrs;
use crate::embed::{SocialPayload, render_social_embed};
use crate::error::WidgetError;
use crate::snapshot::normalize;
use crate::theme::Theme;

/// Markup replacing one placeholder.
pub fn materialize<A: AttributeSource + ?Sized>(
    placeholder: &A,
    theme: Theme,
    editable: bool,
) -> String {
    match try_materialize(placeholder, theme, editable) {
        Ok(html) => html,
        Err(e) => {
            let kind = placeholder.attribute(widget_attrs::KIND).unwrap_or_default();
            tracing::warn!(error = %e, kind = %kind, "widget could not be materialized");
            e.placeholder_html(&kind)
        }
    }
}

/// Decode, normalize and render one placeholder.
pub fn try_materialize<A: AttributeSource + ?Sized>(
    placeholder: &A,
    theme: Theme,
    editable: bool,
) -> Result<String, WidgetError> {
    let DecodedWidget { kind, payload, id } = decode(placeholder)?;

    match kind {
        WidgetKind::Match => {
            let snapshot = normalize(&payload, id.as_deref());
            Ok(render_match_card(&snapshot, theme, editable))
        }
        WidgetKind::Social => {
            let social: SocialPayload = serde_json::from_value(payload)
                .map_err(|e| WidgetError::Malformed(e.to_string()))?;
            render_social_embed(&social, editable)
        }
    }
}
