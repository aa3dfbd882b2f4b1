//! UI components built with Leptos.
//!
//! - [`post_body`] - Sanitized post content with live widgets
//! - [`theme_toggle`] - Light/dark switch

pub mod post_body;
pub mod theme_toggle;

pub use post_body::PostBody;
pub use theme_toggle::ThemeToggle;
