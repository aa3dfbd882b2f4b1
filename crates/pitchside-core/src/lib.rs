//! Rich post rendering for match-day forums.
//!
//! Post bodies are untrusted and arrive in several shapes. This crate turns
//! any of them into HTML that cannot run author script, while keeping enough
//! structured data in widget placeholders for the browser client to
//! materialize live match cards without another request.
//!
//! # Pipeline
//!
//! ```text
//! stored body ─► RichContent::classify ─► render_document ─► sanitize_html ─► HTML
//!                                                                      │
//!                       placeholder ─► decode ─► normalize ─► render_match_card
//! ```
//!
//! - [`content`]: shape classification ([`RichContent`])
//! - [`document`]: structured/legacy/plain rendering
//! - [`sanitize`]: the allow-list boundary
//! - [`codec`]: the widget placeholder protocol
//! - [`snapshot`], [`card`], [`embed`]: widget data and markup
//! - [`theme`]: light/dark logo variants
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let body = json!({
//!     "type": "doc",
//!     "content": [{"type": "paragraph", "content": [{"type": "text", "text": "hello"}]}]
//! });
//! assert_eq!(pitchside_core::render_content(&body), "<p>hello</p>");
//! ```

pub mod card;
pub mod codec;
pub mod config;
pub mod content;
pub mod document;
pub mod embed;
pub mod error;
mod pipeline;
pub mod sanitize;
pub mod snapshot;
pub mod theme;
mod widget;

pub use card::{MatchState, render_match_card};
pub use codec::{AttributeSource, DecodedWidget, WidgetAttributes, WidgetKind, decode, encode};
pub use content::{LegacyArticle, RichContent};
pub use document::{Node, escape_html, render_document};
pub use error::{RenderError, WidgetError};
pub use pipeline::{render_content, render_content_str, render_rich_content};
pub use sanitize::{sanitize_html, sanitize_text};
pub use snapshot::{MatchSnapshot, normalize};
pub use theme::{ImageSync, LogoVariants, Theme, plan_image_sync};
pub use widget::{materialize, try_materialize};
