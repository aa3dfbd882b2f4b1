//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use pitchside_core::AttributeSource;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get the current document.
#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Collect every element under `root` matching `selector`, in document order.
///
/// An invalid selector yields an empty list.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Set an attribute only when the element does not carry it yet.
///
/// Returns `true` if the attribute was written.
pub fn set_missing_attribute(element: &Element, name: &str, value: &str) -> bool {
    if element.has_attribute(name) {
        return false;
    }
    element.set_attribute(name, value).is_ok()
}

/// Borrowed element exposed to the core's attribute-driven logic.
pub struct DomElement<'a>(pub &'a Element);

impl AttributeSource for DomElement<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}
