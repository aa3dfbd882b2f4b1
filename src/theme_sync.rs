//! Theme synchronization for logo images.
//!
//! [`sync_images`] is one bounded pass over a container. [`ThemeSyncObserver`]
//! owns the subscriptions that keep a mounted container in sync: a
//! `MutationObserver` catching widgets inserted later, and a capture-phase
//! `error` listener that swaps broken logos to their fallback. Dropping the
//! observer releases both.

use std::cell::Cell;
use std::rc::Rc;

use pitchside_core::config::image_attrs;
use pitchside_core::{Theme, plan_image_sync};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::{Closure, JsValue};
use web_sys::{
    AddEventListenerOptions, Element, Event, MutationObserver, MutationObserverInit,
    MutationRecord,
};

use crate::config::THEMED_IMAGE_SELECTOR;
use crate::utils::DomElement;
use crate::utils::dom::query_all;

/// Point every themed image under `container` at its variant for `theme`.
///
/// Returns how many images were touched.
pub fn sync_images(container: &Element, theme: Theme) -> usize {
    query_all(container, THEMED_IMAGE_SELECTOR)
        .iter()
        .filter(|image| sync_image(image, theme))
        .count()
}

fn sync_image(image: &Element, theme: Theme) -> bool {
    let Some(plan) = plan_image_sync(&DomElement(image), theme) else {
        return false;
    };
    if plan.is_noop() {
        return false;
    }

    if let Some(variants) = &plan.cache_variants {
        let _ = image.set_attribute(image_attrs::LIGHT, &variants.light);
        let _ = image.set_attribute(image_attrs::DARK, &variants.dark);
    }
    if let Some(src) = &plan.src {
        let _ = image.set_attribute("src", src);
    }
    true
}

/// Swap a failed image to its fallback, once.
fn swap_to_fallback(event: &Event) {
    let Some(image) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    if !image.tag_name().eq_ignore_ascii_case("img") || image.has_attribute(image_attrs::FAILED) {
        return;
    }
    let Some(fallback) = image.get_attribute(image_attrs::FALLBACK) else {
        return;
    };

    // Marked first so the theme pass leaves the fallback alone and a failing
    // fallback does not loop.
    let _ = image.set_attribute(image_attrs::FAILED, "true");
    let _ = image.set_attribute("src", &fallback);
}

type MutationCallback = dyn FnMut(js_sys::Array, MutationObserver);

/// Keeps one content container's images in sync with the theme.
pub struct ThemeSyncObserver {
    container: Element,
    theme: Rc<Cell<Theme>>,
    observer: MutationObserver,
    _on_mutation: Closure<MutationCallback>,
    on_error: Closure<dyn FnMut(Event)>,
}

impl ThemeSyncObserver {
    /// Subscribe to `container` and run an initial sync.
    pub fn attach(container: Element, theme: Theme) -> Result<Self, JsValue> {
        let shared = Rc::new(Cell::new(theme));

        let on_mutation = {
            let container = container.clone();
            let theme = Rc::clone(&shared);
            Closure::<MutationCallback>::new(move |records: js_sys::Array, _: MutationObserver| {
                let inserted = records.iter().any(|record| {
                    record
                        .unchecked_into::<MutationRecord>()
                        .added_nodes()
                        .length()
                        > 0
                });
                if inserted {
                    sync_images(&container, theme.get());
                }
            })
        };

        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(&container, &init)?;

        let on_error = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            swap_to_fallback(&event);
        });
        let options = AddEventListenerOptions::new();
        options.set_capture(true);
        if let Err(e) = container.add_event_listener_with_callback_and_add_event_listener_options(
            "error",
            on_error.as_ref().unchecked_ref(),
            &options,
        ) {
            observer.disconnect();
            return Err(e);
        }

        let this = Self {
            container,
            theme: shared,
            observer,
            _on_mutation: on_mutation,
            on_error,
        };
        this.sync();
        Ok(this)
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Switch theme and resync. Returns how many images changed.
    pub fn set_theme(&self, theme: Theme) -> usize {
        self.theme.set(theme);
        self.sync()
    }

    /// Run a pass with the current theme.
    pub fn sync(&self) -> usize {
        sync_images(&self.container, self.theme.get())
    }
}

impl Drop for ThemeSyncObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
        let _ = self.container.remove_event_listener_with_callback_and_bool(
            "error",
            self.on_error.as_ref().unchecked_ref(),
            true,
        );
    }
}
