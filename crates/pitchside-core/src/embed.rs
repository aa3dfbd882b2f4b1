//! Video and social embeds.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::config::{SOCIAL_HOSTS, classes, policy};
use crate::document::escape_html;
use crate::error::WidgetError;
use crate::sanitize::{safe_url, sanitize_text};

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:(?:www\.|m\.)?youtube(?:-nocookie)?\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/|live/)|youtu\.be/)(?P<id>[A-Za-z0-9_-]{11})(?:[?&#/].*)?$",
    )
    .expect("youtube pattern is valid")
});

static TWEET_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.|mobile\.)?(?:twitter|x)\.com/[A-Za-z0-9_]+/status/(?P<id>\d+)")
        .expect("tweet pattern is valid")
});

static INSTAGRAM_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:www\.)?instagram\.com/(?P<kind>p|reel)/(?P<code>[A-Za-z0-9_-]+)")
        .expect("instagram pattern is valid")
});

/// Privacy-enhanced embed URL for any YouTube watch/short/share link.
pub fn youtube_embed_url(src: &str) -> Option<String> {
    let caps = YOUTUBE_ID.captures(src.trim())?;
    Some(format!(
        "https://www.youtube-nocookie.com/embed/{}",
        &caps["id"]
    ))
}

/// Host of an https URL that may be framed as-is, if any.
pub fn embed_host(src: &str) -> Option<&'static str> {
    let rest = src.trim().strip_prefix("https://")?;
    let host = rest.split(['/', '?', '#']).next()?;
    policy::IFRAME_HOSTS.iter().copied().find(|allowed| *allowed == host)
}

/// Payload of a social embed placeholder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SocialPayload {
    pub provider: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    Twitter,
    Instagram,
    YouTube,
    TikTok,
    Facebook,
}

impl SocialProvider {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Some(Self::Twitter),
            "instagram" => Some(Self::Instagram),
            "youtube" => Some(Self::YouTube),
            "tiktok" => Some(Self::TikTok),
            "facebook" => Some(Self::Facebook),
            _ => None,
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Self::Twitter => "X",
            Self::Instagram => "Instagram",
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
            Self::Facebook => "Facebook",
        }
    }
}

/// Host of a URL with any `www.`/`m.`/`mobile.` prefix removed.
fn social_host(url: &str) -> Option<&'static str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#', ':']).next()?.to_ascii_lowercase();
    let host = ["www.", "m.", "mobile."]
        .iter()
        .find_map(|prefix| host.strip_prefix(*prefix))
        .unwrap_or(host.as_str())
        .to_string();
    SOCIAL_HOSTS.iter().copied().find(|allowed| *allowed == host)
}

/// Iframe source for posts the provider offers an embed page for.
fn frame_url(provider: SocialProvider, url: &str) -> Option<String> {
    match provider {
        SocialProvider::YouTube => youtube_embed_url(url),
        SocialProvider::Twitter => TWEET_ID.captures(url).map(|caps| {
            format!(
                "https://platform.twitter.com/embed/Tweet.html?id={}",
                &caps["id"]
            )
        }),
        SocialProvider::Instagram => INSTAGRAM_CODE.captures(url).map(|caps| {
            format!(
                "https://www.instagram.com/{}/{}/embed",
                &caps["kind"], &caps["code"]
            )
        }),
        SocialProvider::TikTok | SocialProvider::Facebook => None,
    }
}

/// Render a social embed widget.
///
/// Posts from known providers become an iframe when the provider has an
/// embed page, otherwise a link card. URLs outside the social host list are
/// rejected.
pub fn render_social_embed(payload: &SocialPayload, editable: bool) -> Result<String, WidgetError> {
    let url = safe_url(&payload.url)
        .filter(|url| url.starts_with("http"))
        .ok_or_else(|| WidgetError::UnsupportedEmbed(payload.url.clone()))?;
    let host = social_host(url).ok_or_else(|| WidgetError::UnsupportedEmbed(url.to_string()))?;

    let provider = SocialProvider::from_name(&payload.provider);
    let inert = if editable { r#" contenteditable="false""# } else { "" };

    let inner = match provider.and_then(|p| frame_url(p, url)) {
        Some(frame) => format!(
            r#"<div class="{}"><iframe src="{}" width="550" height="620" allowfullscreen></iframe></div>"#,
            classes::EMBED_RESPONSIVE,
            escape_html(&frame)
        ),
        None => {
            let label = provider.map_or_else(|| sanitize_text(host), |p| p.display_name().to_string());
            format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer nofollow">View post on {}</a>"#,
                escape_html(url),
                label
            )
        }
    };

    Ok(format!(
        r#"<div class="{}" data-type="social" data-hydrated="true"{}>{}</div>"#,
        classes::SOCIAL_EMBED,
        inert,
        inner
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn payload(provider: &str, url: &str) -> SocialPayload {
        SocialPayload {
            provider: provider.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_youtube_ids() {
        let expected = Some("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ".to_string());
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?t=10",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
        ] {
            assert_eq!(youtube_embed_url(url), expected, "{url}");
        }
        assert_eq!(youtube_embed_url("https://evil.example/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(youtube_embed_url("https://www.youtube.com/watch?v=short"), None);
    }

    #[test]
    fn test_embed_host() {
        assert_eq!(
            embed_host("https://player.vimeo.com/video/1"),
            Some("player.vimeo.com")
        );
        assert_eq!(embed_host("http://player.vimeo.com/video/1"), None);
        assert_eq!(embed_host("https://cdn.example/a.mp4"), None);
    }

    #[test]
    fn test_tweet_becomes_iframe() {
        let html =
            render_social_embed(&payload("twitter", "https://x.com/club/status/12345"), false)
                .unwrap();
        assert!(html.contains(
            r#"<iframe src="https://platform.twitter.com/embed/Tweet.html?id=12345""#
        ));
        assert!(html.contains(r#"data-hydrated="true""#));
        assert!(html.contains(classes::EMBED_RESPONSIVE));
    }

    #[test]
    fn test_tiktok_becomes_link_card() {
        let html =
            render_social_embed(&payload("tiktok", "https://www.tiktok.com/@club/video/1"), true)
                .unwrap();
        assert!(html.contains("View post on TikTok"));
        assert!(html.contains(r#"contenteditable="false""#));
        assert!(!html.contains("<iframe"));
    }

    #[test]
    fn test_unknown_provider_on_social_host() {
        let html =
            render_social_embed(&payload("", "https://instagram.com/p/abc"), false).unwrap();
        assert!(html.contains("View post on instagram.com"));
    }

    #[test]
    fn test_rejects_foreign_and_unsafe_urls() {
        for url in [
            "https://evil.example/status/1",
            "javascript:alert(1)",
            "/relative/path",
            "https://x.com.evil.example/a/status/1",
        ] {
            assert!(
                matches!(
                    render_social_embed(&payload("twitter", url), false),
                    Err(WidgetError::UnsupportedEmbed(_))
                ),
                "{url}"
            );
        }
    }
}
