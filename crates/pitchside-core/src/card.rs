//! Match card markup.
//!
//! [`render_match_card`] is a pure function of the snapshot, the theme and
//! the editable flag. Names and URLs pulled from the snapshot are treated as
//! untrusted and pass through the sanitizer before interpolation.

use crate::codec::encode_uri_component;
use crate::config::{FALLBACK_LOGO, MATCH_DETAIL_PATH, classes, image_attrs, status_labels};
use crate::document::escape_html;
use crate::sanitize::{safe_url, sanitize_text};
use crate::snapshot::{MatchSnapshot, Team};
use crate::theme::{LogoVariants, Theme};

/// Display state derived from a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Scheduled,
    /// In play; `minute` is shown when known.
    Live { minute: Option<u32> },
    Halftime,
    Final,
    /// Any code without a dedicated state (postponed, abandoned, ...).
    Other,
}

impl MatchState {
    pub fn from_status(code: &str, elapsed: Option<u32>) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "NS" | "TBD" => Self::Scheduled,
            "FT" | "AET" | "PEN" => Self::Final,
            "HT" => Self::Halftime,
            "1H" | "2H" | "ET" => Self::Live { minute: elapsed },
            "LIVE" => Self::Live { minute: None },
            _ => Self::Other,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Self::Live { .. } | Self::Halftime)
    }

    pub fn label(self) -> String {
        match self {
            Self::Scheduled => status_labels::SCHEDULED.to_string(),
            Self::Final => status_labels::FINAL.to_string(),
            Self::Halftime => status_labels::HALFTIME.to_string(),
            Self::Live { minute: Some(minute) } => format!("{} {}'", status_labels::LIVE, minute),
            Self::Live { minute: None } => status_labels::LIVE.to_string(),
            Self::Other => status_labels::RESULT.to_string(),
        }
    }
}

/// Render the full card for one match.
///
/// `editable` renders an inert container for the authoring surface;
/// otherwise the card links to the match detail page.
pub fn render_match_card(snapshot: &MatchSnapshot, theme: Theme, editable: bool) -> String {
    let state = MatchState::from_status(&snapshot.status.code, snapshot.status.elapsed);
    let id = escape_html(&snapshot.id);

    let mut status_class = classes::STATUS.to_string();
    if state.is_live() {
        status_class.push(' ');
        status_class.push_str(classes::STATUS_LIVE);
    }

    let centre = match state {
        MatchState::Scheduled => kickoff_html(snapshot),
        _ => format!(
            r#"<span class="pc-score">{} - {}</span>"#,
            score(snapshot.goals.home),
            score(snapshot.goals.away)
        ),
    };

    let body = format!(
        concat!(
            r#"<div class="pc-match-league">{league_logo}<span>{league}</span></div>"#,
            r#"<div class="pc-match-body">{home}<div class="pc-match-centre">{centre}"#,
            r#"<span class="{status_class}">{label}</span></div>{away}</div>"#,
        ),
        league_logo = logo_html(&snapshot.league.logo, &snapshot.league.name, theme),
        league = sanitize_text(&snapshot.league.name),
        home = team_html(&snapshot.teams.home, theme),
        away = team_html(&snapshot.teams.away, theme),
        centre = centre,
        status_class = status_class,
        label = state.label(),
    );

    if editable {
        format!(
            r#"<div class="{} {}" data-type="match" data-match-id="{}" data-hydrated="true" contenteditable="false">{}</div>"#,
            classes::MATCH_CARD,
            classes::MATCH_CARD_INERT,
            id,
            body
        )
    } else {
        format!(
            r#"<a class="{}" href="{}/{}" data-type="match" data-match-id="{}" data-hydrated="true">{}</a>"#,
            classes::MATCH_CARD,
            MATCH_DETAIL_PATH,
            encode_uri_component(&snapshot.id),
            id,
            body
        )
    }
}

fn score(goals: Option<u32>) -> String {
    goals.map_or_else(|| "-".to_string(), |g| g.to_string())
}

fn kickoff_html(snapshot: &MatchSnapshot) -> String {
    match &snapshot.kickoff {
        Some(kickoff) => {
            let kickoff = sanitize_text(kickoff);
            format!(
                r#"<time class="pc-kickoff" datetime="{}">{}</time>"#,
                kickoff, kickoff
            )
        }
        None => r#"<span class="pc-score">vs</span>"#.to_string(),
    }
}

fn team_html(team: &Team, theme: Theme) -> String {
    let class = if team.winner == Some(true) {
        format!("{} {}", classes::TEAM, classes::TEAM_WINNER)
    } else {
        classes::TEAM.to_string()
    };
    format!(
        r#"<div class="{}">{}<span class="pc-team-name">{}</span></div>"#,
        class,
        logo_html(&team.logo, &team.name, theme),
        sanitize_text(&team.name)
    )
}

/// Logo image with both theme variants and a load-error fallback.
fn logo_html(logo: &str, name: &str, theme: Theme) -> String {
    let alt = sanitize_text(name);
    let logo = safe_url(logo).unwrap_or(FALLBACK_LOGO);

    match LogoVariants::derive(logo) {
        Some(variants) => format!(
            r#"<img class="{}" src="{}" {}="{}" {}="{}" {}="{}" alt="{}" loading="lazy">"#,
            classes::LOGO,
            escape_html(variants.resolve(theme)),
            image_attrs::LIGHT,
            escape_html(&variants.light),
            image_attrs::DARK,
            escape_html(&variants.dark),
            image_attrs::FALLBACK,
            FALLBACK_LOGO,
            alt
        ),
        None => format!(
            r#"<img class="{}" src="{}" {}="{}" alt="{}" loading="lazy">"#,
            classes::LOGO,
            escape_html(logo),
            image_attrs::FALLBACK,
            FALLBACK_LOGO,
            alt
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::normalize;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_status_labels_are_distinct() {
        let labels = [
            MatchState::from_status("NS", None).label(),
            MatchState::from_status("FT", None).label(),
            MatchState::from_status("1H", Some(37)).label(),
            MatchState::from_status("HT", Some(45)).label(),
            MatchState::from_status("ABC", None).label(),
        ];
        assert_eq!(
            labels,
            ["Scheduled", "Full time", "Live 37'", "Half time", "Result"]
        );
    }

    #[test]
    fn test_live_states() {
        assert!(MatchState::from_status("2H", Some(80)).is_live());
        assert!(MatchState::from_status("live", None).is_live());
        assert!(MatchState::from_status("HT", None).is_live());
        assert!(!MatchState::from_status("FT", None).is_live());
        assert_eq!(MatchState::from_status("2H", None).label(), "Live");
    }

    #[test]
    fn test_linked_card() {
        let snapshot = normalize(
            &json!({"teams": {"home": {"id": 33, "name": "United"}}, "goals": {"home": 2, "away": 1}, "status": {"short": "FT"}}),
            Some("812"),
        );
        let html = render_match_card(&snapshot, Theme::Light, false);

        assert!(html.starts_with(r#"<a class="pc-match-card" href="/matches/812""#));
        assert!(html.contains(r#"data-hydrated="true""#));
        assert!(html.contains(r#"<span class="pc-score">2 - 1</span>"#));
        assert!(html.contains("Full time"));
        assert!(!html.contains(classes::STATUS_LIVE));
    }

    #[test]
    fn test_editable_card_is_inert() {
        let snapshot = normalize(&json!({"status": "1H", "elapsed": 12}), Some("5"));
        let html = render_match_card(&snapshot, Theme::Light, true);

        assert!(html.starts_with("<div "));
        assert!(html.contains(r#"contenteditable="false""#));
        assert!(!html.contains("href="));
        assert!(html.contains(classes::STATUS_LIVE));
        assert!(html.contains("Live 12'"));
    }

    #[test]
    fn test_logo_carries_variants_resolved_for_theme() {
        let snapshot = normalize(&json!({"teams": {"home": {"id": 33}}}), None);
        let html = render_match_card(&snapshot, Theme::Dark, false);

        assert!(html.contains(
            r#"src="https://media.api-sports.io/football/teams/dark/33.png" data-src-light="https://media.api-sports.io/football/teams/33.png""#
        ));
    }

    #[test]
    fn test_every_image_has_fallback() {
        let snapshot = normalize(&json!({}), None);
        let html = render_match_card(&snapshot, Theme::Light, false);
        assert_eq!(
            html.matches("<img ").count(),
            html.matches(image_attrs::FALLBACK).count()
        );
        assert_eq!(html.matches("<img ").count(), 3);
    }

    #[test]
    fn test_names_are_sanitized() {
        let snapshot = normalize(
            &json!({"teams": {"home": {"name": "<script>alert(1)</script>Ajax"}, "away": {"name": "<b onclick=x>PSV</b>", "logo": "javascript:alert(1)"}}}),
            None,
        );
        let html = render_match_card(&snapshot, Theme::Light, false);

        assert!(!html.contains("<script"));
        assert!(!html.contains("onclick"));
        assert!(!html.contains("javascript:"));
        assert!(html.contains("Ajax"));
        assert!(html.contains("PSV"));
    }

    #[test]
    fn test_scheduled_shows_kickoff() {
        let snapshot = normalize(&json!({"fixture": {"date": "2024-08-16T19:00:00+00:00"}}), None);
        let html = render_match_card(&snapshot, Theme::Light, false);
        assert!(html.contains(r#"<time class="pc-kickoff" datetime="2024-08-16T19:00:00+00:00">"#));
        assert!(html.contains("Scheduled"));
    }
}
