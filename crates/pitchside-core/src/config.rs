//! Rendering configuration.
//!
//! Centralizes the widget protocol, the sanitization policy and every fixed
//! string the renderers emit.

// =============================================================================
// Widget Protocol
// =============================================================================

/// Placeholder attribute names shared by every producer of stored markup.
pub mod widget_attrs {
    /// Widget kind (`match`, `social`).
    pub const KIND: &str = "data-type";
    /// `encodeURIComponent(JSON.stringify(payload))`.
    pub const PAYLOAD: &str = "data-payload";
    /// Plain match identifier, kept outside the encoded payload.
    pub const MATCH_ID: &str = "data-match-id";
    /// Set on materialized widgets; hydration skips anything carrying it.
    pub const HYDRATED: &str = "data-hydrated";
}

/// Widget kind tags as they appear in `data-type`.
pub mod widget_kinds {
    pub const MATCH: &str = "match";
    pub const SOCIAL: &str = "social";
}

/// Detail page linked from non-editable match cards.
pub const MATCH_DETAIL_PATH: &str = "/matches";

// =============================================================================
// Logos & Theme Variants
// =============================================================================

/// Image attributes used by the theme sync pass.
pub mod image_attrs {
    pub const LIGHT: &str = "data-src-light";
    pub const DARK: &str = "data-src-dark";
    pub const FALLBACK: &str = "data-fallback-src";
    /// Set by the client once an image fell back; theme sync leaves it alone.
    pub const FAILED: &str = "data-logo-failed";
}

/// Logo CDN base. Team and league crests live under `{base}/{teams|leagues}/`,
/// dark variants under an extra `dark/` segment.
pub const LOGO_CDN_BASE: &str = "https://media.api-sports.io/football";

/// Shown whenever an upstream crest is missing or fails to load.
pub const FALLBACK_LOGO: &str = "/assets/img/crest-placeholder.svg";

// =============================================================================
// Placeholder Text
// =============================================================================

/// Fixed, user-visible text for degraded output.
pub mod messages {
    pub const CANNOT_DISPLAY: &str = "This content cannot be displayed.";
    pub const DATA_UNAVAILABLE: &str = "Match data unavailable.";
    pub const PROCESSING_ERROR: &str = "Error processing embedded content.";
    pub const UNKNOWN_LEAGUE: &str = "Unknown league";
    pub const HOME_TEAM: &str = "Home";
    pub const AWAY_TEAM: &str = "Away";
}

/// Match status labels.
pub mod status_labels {
    pub const SCHEDULED: &str = "Scheduled";
    pub const FINAL: &str = "Full time";
    pub const LIVE: &str = "Live";
    pub const HALFTIME: &str = "Half time";
    pub const RESULT: &str = "Result";
}

// =============================================================================
// CSS Classes
// =============================================================================

/// Class names emitted by the renderers.
pub mod classes {
    pub const UNKNOWN_NODE: &str = "pc-unknown-node";
    pub const RENDER_ERROR: &str = "pc-render-error";
    pub const WIDGET_ERROR: &str = "pc-widget-error";
    pub const SYNDICATED: &str = "pc-syndicated";
    pub const SYNDICATED_HEADER: &str = "pc-syndicated-header";
    pub const MATCH_CARD: &str = "pc-match-card";
    pub const MATCH_CARD_INERT: &str = "pc-match-card--inert";
    pub const LOGO: &str = "pc-logo";
    pub const TEAM: &str = "pc-team";
    pub const TEAM_WINNER: &str = "pc-team--winner";
    pub const STATUS: &str = "pc-status";
    pub const STATUS_LIVE: &str = "pc-status--live";
    pub const SOCIAL_EMBED: &str = "pc-social-embed";
    /// Marker class on the responsive iframe wrapper.
    pub const EMBED_RESPONSIVE: &str = "pc-embed-responsive";
}

// =============================================================================
// Document Limits
// =============================================================================

/// Documents nested deeper than this are rejected as a whole.
pub const MAX_NODE_DEPTH: usize = 64;

// =============================================================================
// Sanitization Policy
// =============================================================================

/// Allow-lists applied by the markup sanitizer. Anything unlisted is removed.
pub mod policy {
    /// Elements that survive sanitization.
    pub const TAGS: &[&str] = &[
        "a", "b", "blockquote", "br", "code", "del", "div", "em", "figcaption", "figure", "h1",
        "h2", "h3", "h4", "h5", "h6", "header", "hr", "i", "iframe", "img", "li", "mark", "ol",
        "p", "pre", "s", "small", "span", "strong", "sub", "sup", "table", "tbody", "td", "th",
        "thead", "time", "tr", "u", "ul", "video",
    ];

    /// Attributes allowed on every element.
    pub const GENERIC_ATTRIBUTES: &[&str] = &["class", "style", "title"];

    /// Per-element attribute allow-list.
    pub const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
        ("a", &["href", "target"]),
        ("img", &["src", "alt", "width", "height", "loading"]),
        (
            "iframe",
            &[
                "src",
                "width",
                "height",
                "allow",
                "allowfullscreen",
                "frameborder",
                "loading",
            ],
        ),
        (
            "video",
            &[
                "src", "controls", "playsinline", "preload", "poster", "width", "height",
            ],
        ),
        ("div", &["data-type", "data-payload", "data-match-id"]),
        ("ol", &["start"]),
        ("td", &["colspan", "rowspan"]),
        ("th", &["colspan", "rowspan"]),
        ("time", &["datetime"]),
    ];

    /// Schemes accepted on any URL attribute before per-element checks.
    pub const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "data"];

    /// Per-element scheme restrictions, checked after the global list.
    pub const ELEMENT_URL_SCHEMES: &[(&str, &str, &[&str])] = &[
        ("a", "href", &["http", "https", "mailto"]),
        ("img", "src", &["http", "https", "data"]),
        ("video", "src", &["http", "https"]),
        ("video", "poster", &["http", "https"]),
        ("iframe", "src", &["https"]),
    ];

    /// Only `data:` URLs with one of these media type prefixes are kept.
    pub const DATA_URL_PREFIXES: &[&str] = &["data:image/png", "data:image/jpeg", "data:image/gif", "data:image/webp"];

    /// Hosts an `iframe` may point at.
    pub const IFRAME_HOSTS: &[&str] = &[
        "www.youtube.com",
        "www.youtube-nocookie.com",
        "player.vimeo.com",
        "platform.twitter.com",
        "www.instagram.com",
        "www.tiktok.com",
        "www.facebook.com",
    ];

    /// `rel` forced on every link.
    pub const LINK_REL: &str = "noopener noreferrer nofollow";

    /// CSS properties allowed inside `style`, keyed by element (`*` for all).
    /// Values must fully match the paired pattern.
    pub const STYLE_PROPERTIES: &[(&str, &str, &str)] = &[
        ("*", "color", COLOR),
        ("*", "background-color", COLOR),
        ("*", "text-align", r"left|right|center|justify"),
        ("*", "font-weight", r"normal|bold|[1-9]00"),
        ("*", "font-style", r"normal|italic"),
        ("*", "text-decoration", r"none|underline|line-through"),
        ("img", "width", LENGTH),
        ("img", "height", LENGTH),
        ("img", "max-width", LENGTH),
        ("iframe", "width", LENGTH),
        ("iframe", "height", LENGTH),
        ("iframe", "aspect-ratio", r"\d{1,2}\s*/\s*\d{1,2}"),
        ("video", "width", LENGTH),
        ("video", "max-width", LENGTH),
    ];

    const COLOR: &str = r"#[0-9a-f]{3,8}|rgba?\(\s*\d{1,3}%?\s*,\s*\d{1,3}%?\s*,\s*\d{1,3}%?\s*(,\s*(0|1|0?\.\d+)\s*)?\)|[a-z]{3,20}";
    const LENGTH: &str = r"\d{1,4}(\.\d+)?(px|%|em|rem)?|auto";
}

// =============================================================================
// Embeds
// =============================================================================

/// Hosts whose posts may be shown as social embeds.
pub const SOCIAL_HOSTS: &[&str] = &[
    "twitter.com",
    "x.com",
    "instagram.com",
    "youtube.com",
    "youtu.be",
    "tiktok.com",
    "facebook.com",
];

/// Attributes every embedded iframe must carry, with the value set when absent.
pub const IFRAME_PLAYBACK_ATTRIBUTES: &[(&str, &str)] = &[
    ("allowfullscreen", ""),
    (
        "allow",
        "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
    ),
    ("loading", "lazy"),
    ("frameborder", "0"),
];

/// Attributes every embedded `<video>` must carry.
pub const VIDEO_PLAYBACK_ATTRIBUTES: &[(&str, &str)] =
    &[("controls", ""), ("playsinline", ""), ("preload", "metadata")];
