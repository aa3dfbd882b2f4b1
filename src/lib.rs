//! Browser client for pitchside.
//!
//! Post bodies are rendered and sanitized by `pitchside-core`; this crate
//! mounts them and does the work that needs a live DOM:
//!
//! - [`hydrate`] - replaces widget placeholders and normalizes embeds
//! - [`theme_sync`] - keeps logo images on the viewer's theme
//! - [`components`] - `PostBody` and the theme toggle
//!
//! Browser logging goes through `web_sys::console` on wasm32 only.

mod app;
pub mod components;
pub mod config;
pub mod hydrate;
pub mod theme_sync;
pub mod utils;

pub use app::{App, DemoPost, demo_posts};
pub use hydrate::{HydrationReport, hydrate, normalize_embeds};
pub use theme_sync::{ThemeSyncObserver, sync_images};
