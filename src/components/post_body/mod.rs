//! Post body component.
//!
//! Renders a stored body to sanitized HTML, then hands the mounted container
//! to the hydration and theme passes.
//!
//! ## Lifecycle
//!
//! | Event | Action |
//! |-------|--------|
//! | mount / body change | attach observer (once), hydrate, sync logos |
//! | theme change | sync logos |
//! | unmount | drop observer (disconnects and removes listener) |

use leptos::html::Div;
use leptos::prelude::*;
use pitchside_core::{Theme, render_content};
use serde_json::Value;

use crate::hydrate::hydrate;
use crate::theme_sync::ThemeSyncObserver;

stylance::import_crate_style!(css, "src/components/post_body/post_body.module.css");

/// Display one post body.
///
/// `editable` renders widgets inert for use inside an authoring surface.
#[component]
pub fn PostBody(
    #[prop(into)] body: Signal<Value>,
    #[prop(into)] theme: Signal<Theme>,
    #[prop(optional)] editable: bool,
) -> impl IntoView {
    let html = Memo::new(move |_| body.with(render_content));
    let container = NodeRef::<Div>::new();
    let observer = StoredValue::new_local(None::<ThemeSyncObserver>);

    // Hydrate whenever new markup lands in the container
    Effect::new(move |_| {
        html.track();
        let Some(element) = container.get() else {
            return;
        };
        let theme = theme.get_untracked();

        observer.update_value(|slot| {
            if slot.is_none() {
                match ThemeSyncObserver::attach(element.clone().into(), theme) {
                    Ok(attached) => *slot = Some(attached),
                    Err(_e) => {
                        #[cfg(target_arch = "wasm32")]
                        web_sys::console::warn_2(&"Theme sync unavailable:".into(), &_e);
                    }
                }
            }
        });

        let _report = hydrate(&element, theme, editable);
        #[cfg(target_arch = "wasm32")]
        if _report.failed > 0 {
            web_sys::console::warn_1(
                &format!("{} widget(s) failed to materialize", _report.failed).into(),
            );
        }

        observer.with_value(|slot| {
            if let Some(observer) = slot {
                observer.sync();
            }
        });
    });

    // Theme changes only touch logo sources
    Effect::new(move |_| {
        let theme = theme.get();
        observer.with_value(|slot| {
            if let Some(observer) = slot
                && observer.theme() != theme
            {
                observer.set_theme(theme);
            }
        });
    });

    on_cleanup(move || {
        let _ = observer.try_update_value(|slot| slot.take());
    });

    let class = if editable {
        format!("{} {}", css::body, css::editable)
    } else {
        css::body.to_string()
    };

    view! {
        <div
            class=class
            node_ref=container
            inner_html=move || html.get()
        />
    }
}
