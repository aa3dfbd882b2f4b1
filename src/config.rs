//! Client configuration.
//!
//! Rendering constants live in `pitchside_core::config`; this module only
//! holds what the browser shell needs. Demo data is loaded at compile time
//! using `include_str!`.

// =============================================================================
// Demo Assets (loaded at compile time)
// =============================================================================

/// Demo feed rendered by [`App`](crate::App): a JSON array of posts whose
/// bodies cover every stored content shape.
pub const DEMO_POSTS: &str = include_str!("../assets/demo/posts.json");

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the header.
pub const APP_NAME: &str = "pitchside";

/// Id of the element the app mounts into.
pub const MOUNT_ELEMENT_ID: &str = "app";

// =============================================================================
// Theme
// =============================================================================

/// Media query used for the initial light/dark choice.
pub const DARK_MODE_QUERY: &str = "(prefers-color-scheme: dark)";

/// Images the theme pass inspects: anything already carrying variants, every
/// card logo, and raw CDN logos inserted by authors.
pub const THEMED_IMAGE_SELECTOR: &str =
    r#"img[data-src-light], img.pc-logo, img[src*="/football/"]"#;
