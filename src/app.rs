//! Root application module.
//!
//! Mounts a feed of demo posts and owns the viewer's theme: the system
//! preference until the user picks one with the toggle.

use leptos::prelude::*;
use leptos_use::use_media_query;
use pitchside_core::Theme;
use serde::Deserialize;
use serde_json::Value;

use crate::components::{PostBody, ThemeToggle};
use crate::config::{APP_NAME, DARK_MODE_QUERY, DEMO_POSTS};

stylance::import_crate_style!(css, "src/app.module.css");

/// One entry of the demo feed.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoPost {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub editable: bool,
    /// Stored body in any supported shape.
    pub body: Value,
}

/// Parse the bundled demo feed. A broken asset yields an empty feed.
pub fn demo_posts() -> Vec<DemoPost> {
    serde_json::from_str(DEMO_POSTS).unwrap_or_else(|_e| {
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!("Invalid demo feed: {}", _e).into());
        Vec::new()
    })
}

/// Root component.
#[component]
pub fn App() -> impl IntoView {
    let prefers_dark = use_media_query(DARK_MODE_QUERY);
    let chosen = RwSignal::new(None::<Theme>);
    let theme = Signal::derive(move || {
        chosen
            .get()
            .unwrap_or_else(|| Theme::from_dark(prefers_dark.get()))
    });
    let on_toggle = Callback::new(move |next: Theme| chosen.set(Some(next)));
    let data_theme = move || if theme.get().is_dark() { "dark" } else { "light" };

    let posts = demo_posts();

    view! {
        <div class=css::app data-theme=data_theme>
            <header class=css::header>
                <h1 class=css::title>{APP_NAME}</h1>
                <ThemeToggle theme=theme on_toggle=on_toggle />
            </header>
            <main class=css::feed>
                {posts
                    .into_iter()
                    .map(|post| {
                        view! {
                            <article class=css::post id=format!("post-{}", post.id)>
                                <p class=css::author>{post.author}</p>
                                <PostBody body=post.body theme=theme editable=post.editable />
                            </article>
                        }
                    })
                    .collect_view()}
            </main>
        </div>
    }
}
