//! Theme state and logo variant derivation.
//!
//! Logos carry both variant URLs as attributes so the client can swap `src`
//! when the theme changes without re-deriving anything. Images rendered
//! before variants existed get them derived once from `src`.

use std::sync::LazyLock;

use regex::Regex;

use crate::codec::AttributeSource;
use crate::config::{LOGO_CDN_BASE, image_attrs};

/// Viewer color scheme. Owned by the host application and passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Crest category on the logo CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoKind {
    Team,
    League,
}

impl LogoKind {
    fn segment(self) -> &'static str {
        match self {
            Self::Team => "teams",
            Self::League => "leagues",
        }
    }
}

static LOGO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^{}/(?P<kind>teams|leagues)/(?:dark/)?(?P<id>\d+)\.png(?:\?.*)?$",
        regex::escape(LOGO_CDN_BASE)
    ))
    .expect("logo pattern is valid")
});

/// Light and dark URLs for one logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoVariants {
    pub light: String,
    pub dark: String,
}

impl LogoVariants {
    /// Variants for a CDN crest id.
    pub fn for_id(kind: LogoKind, id: &str) -> Self {
        let segment = kind.segment();
        Self {
            light: format!("{}/{}/{}.png", LOGO_CDN_BASE, segment, id),
            dark: format!("{}/{}/dark/{}.png", LOGO_CDN_BASE, segment, id),
        }
    }

    /// Derive both variants from either variant's URL.
    ///
    /// Returns `None` for URLs outside the CDN pattern; such images are never
    /// given guessed URLs.
    pub fn derive(src: &str) -> Option<Self> {
        let caps = LOGO_PATTERN.captures(src.trim())?;
        let kind = match &caps["kind"] {
            "teams" => LogoKind::Team,
            _ => LogoKind::League,
        };
        Some(Self::for_id(kind, &caps["id"]))
    }

    pub fn resolve(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

/// Attribute writes needed to bring one image in line with the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSync {
    /// Derived variants to cache back onto the element.
    pub cache_variants: Option<LogoVariants>,
    /// New `src`, when it differs from the current one.
    pub src: Option<String>,
}

impl ImageSync {
    pub fn is_noop(&self) -> bool {
        self.cache_variants.is_none() && self.src.is_none()
    }
}

/// Decide how to sync one image with the theme.
///
/// Returns `None` when the image must be left untouched: it already fell
/// back after a load error, or its variants are unknown and `src` does not
/// match the logo pattern.
pub fn plan_image_sync<A: AttributeSource + ?Sized>(image: &A, theme: Theme) -> Option<ImageSync> {
    if image.attribute(image_attrs::FAILED).is_some() {
        return None;
    }

    let current = image.attribute("src").unwrap_or_default();
    let light = image.attribute(image_attrs::LIGHT).filter(|v| !v.is_empty());
    let dark = image.attribute(image_attrs::DARK).filter(|v| !v.is_empty());

    let (variants, cache) = match (light, dark) {
        (Some(light), Some(dark)) => (LogoVariants { light, dark }, false),
        _ => (LogoVariants::derive(&current)?, true),
    };

    let wanted = variants.resolve(theme);
    let src = (wanted != current).then(|| wanted.to_string());

    Some(ImageSync {
        cache_variants: cache.then_some(variants),
        src,
    })
}
