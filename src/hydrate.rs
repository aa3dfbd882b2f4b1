//! Hydration pass.
//!
//! Replaces widget placeholders inside a rendered post with their
//! materialized markup and normalizes embedded players. Placeholders are
//! selected only while they lack `data-hydrated`, so running the pass again
//! over the same container changes nothing.

use pitchside_core::config::{
    IFRAME_PLAYBACK_ATTRIBUTES, VIDEO_PLAYBACK_ATTRIBUTES, classes, widget_attrs,
};
use pitchside_core::{Theme, WidgetKind, try_materialize};
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::utils::DomElement;
use crate::utils::dom::{document, query_all, set_missing_attribute};

/// Outcome of one hydration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Placeholders replaced by a working widget.
    pub materialized: usize,
    /// Placeholders replaced by a local error box.
    pub failed: usize,
    /// Iframes newly wrapped in the responsive container.
    pub wrapped: usize,
}

impl HydrationReport {
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Materialize every pending placeholder under `container`, in document
/// order, then normalize embeds.
pub fn hydrate(container: &Element, theme: Theme, editable: bool) -> HydrationReport {
    let mut report = HydrationReport::default();

    let selector = WidgetKind::ALL
        .iter()
        .map(|kind| kind.pending_selector())
        .collect::<Vec<_>>()
        .join(", ");

    for placeholder in query_all(container, &selector) {
        let html = match try_materialize(&DomElement(&placeholder), theme, editable) {
            Ok(html) => {
                report.materialized += 1;
                html
            }
            Err(e) => {
                report.failed += 1;
                let kind = placeholder
                    .get_attribute(widget_attrs::KIND)
                    .unwrap_or_default();
                #[cfg(target_arch = "wasm32")]
                web_sys::console::warn_1(
                    &format!("Widget '{}' not materialized: {}", kind, e).into(),
                );
                e.placeholder_html(&kind)
            }
        };
        placeholder.set_outer_html(&html);
    }

    report.wrapped = normalize_embeds(container);
    report
}

/// Ensure playback attributes on every iframe and video, and wrap bare
/// iframes in the responsive container.
///
/// Returns how many iframes were wrapped by this call.
pub fn normalize_embeds(container: &Element) -> usize {
    for video in query_all(container, "video") {
        for (name, value) in VIDEO_PLAYBACK_ATTRIBUTES {
            set_missing_attribute(&video, name, value);
        }
    }

    let mut wrapped = 0;
    for iframe in query_all(container, "iframe") {
        for (name, value) in IFRAME_PLAYBACK_ATTRIBUTES {
            set_missing_attribute(&iframe, name, value);
        }

        if is_wrapped(&iframe) {
            continue;
        }
        match wrap_responsive(&iframe) {
            Ok(()) => wrapped += 1,
            Err(_e) => {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::warn_2(&"Failed to wrap iframe".into(), &_e);
            }
        }
    }
    wrapped
}

fn is_wrapped(iframe: &Element) -> bool {
    let marker = format!(".{}", classes::EMBED_RESPONSIVE);
    iframe
        .parent_element()
        .is_some_and(|parent| parent.matches(&marker).unwrap_or(false))
}

fn wrap_responsive(iframe: &Element) -> Result<(), JsValue> {
    let parent = iframe
        .parent_node()
        .ok_or_else(|| JsValue::from_str("iframe is detached"))?;
    let document = document().ok_or_else(|| JsValue::from_str("no document"))?;

    let wrapper = document.create_element("div")?;
    wrapper.set_class_name(classes::EMBED_RESPONSIVE);
    parent.insert_before(&wrapper, Some(iframe))?;
    wrapper.append_child(iframe)?;
    Ok(())
}
