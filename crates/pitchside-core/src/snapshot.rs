//! Match snapshot normalization.
//!
//! Upstream match objects arrive in several shapes (the nested feed format
//! with a `fixture` object, flat objects written by older posts, scores and
//! ids as strings or numbers). [`normalize`] folds all of them into one
//! fully-defaulted [`MatchSnapshot`] and never fails.

use serde::Serialize;
use serde_json::Value;

use crate::config::{FALLBACK_LOGO, messages};
use crate::theme::{LogoKind, LogoVariants};

/// Canonical match data consumed by the card renderer.
///
/// Defaults: empty ids, `"Unknown league"`, `"Home"`/`"Away"`, CDN logos
/// derived from ids (or the fallback crest), no goals, status `NS`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub id: String,
    pub league: League,
    pub teams: Teams,
    pub goals: Goals,
    pub status: MatchStatus,
    /// Kickoff timestamp as supplied upstream (RFC 3339 in practice).
    pub kickoff: Option<String>,
    pub venue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct League {
    pub id: String,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teams {
    pub home: Team,
    pub away: Team,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub winner: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Goals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStatus {
    /// Upper-cased short status code (`NS`, `1H`, `HT`, `FT`, ...).
    pub code: String,
    pub elapsed: Option<u32>,
}

impl Default for MatchStatus {
    fn default() -> Self {
        Self {
            code: "NS".to_string(),
            elapsed: None,
        }
    }
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        normalize(&Value::Null, None)
    }
}

/// Normalize a raw match object.
///
/// `id_override` comes from the placeholder's plain id attribute and wins
/// over any id inside the payload, since the rest of the page keys on it.
pub fn normalize(raw: &Value, id_override: Option<&str>) -> MatchSnapshot {
    let id = id_override
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .or_else(|| pick_map(raw, &[&["fixture", "id"], &["id"], &["matchId"]], as_id))
        .unwrap_or_default();

    let league_raw = pick(raw, &[&["league"], &["competition"]]);
    let league = league_from(league_raw);

    let teams = Teams {
        home: team_from(
            pick(raw, &[&["teams", "home"], &["homeTeam"], &["home"]]),
            messages::HOME_TEAM,
        ),
        away: team_from(
            pick(raw, &[&["teams", "away"], &["awayTeam"], &["away"]]),
            messages::AWAY_TEAM,
        ),
    };

    let goals = Goals {
        home: pick_map(raw, &[&["goals", "home"], &["score", "home"], &["homeScore"]], as_count),
        away: pick_map(raw, &[&["goals", "away"], &["score", "away"], &["awayScore"]], as_count),
    };

    let status = MatchStatus {
        code: pick_map(
            raw,
            &[
                &["fixture", "status", "short"],
                &["status", "short"],
                &["status", "code"],
                &["status"],
                &["statusCode"],
            ],
            as_text,
        )
        .map(|code| code.to_ascii_uppercase())
        .unwrap_or_else(|| MatchStatus::default().code),
        elapsed: pick_map(
            raw,
            &[
                &["fixture", "status", "elapsed"],
                &["status", "elapsed"],
                &["elapsed"],
                &["minute"],
            ],
            as_count,
        ),
    };

    MatchSnapshot {
        id,
        league,
        teams,
        goals,
        status,
        kickoff: pick_map(raw, &[&["fixture", "date"], &["kickoff"], &["date"]], as_text),
        venue: pick_map(
            raw,
            &[&["fixture", "venue", "name"], &["venue", "name"], &["venue"]],
            as_text,
        ),
    }
}

fn league_from(raw: Option<&Value>) -> League {
    // A bare string is taken as the league name.
    if let Some(name) = raw.and_then(as_text) {
        return League {
            id: String::new(),
            name,
            logo: FALLBACK_LOGO.to_string(),
        };
    }

    let id = raw.and_then(|l| l.get("id")).and_then(as_id).unwrap_or_default();
    League {
        name: raw
            .and_then(|l| l.get("name"))
            .and_then(as_text)
            .unwrap_or_else(|| messages::UNKNOWN_LEAGUE.to_string()),
        logo: logo_from(raw, LogoKind::League, &id),
        id,
    }
}

fn team_from(raw: Option<&Value>, default_name: &str) -> Team {
    if let Some(name) = raw.and_then(as_text) {
        return Team {
            id: String::new(),
            name,
            logo: FALLBACK_LOGO.to_string(),
            winner: None,
        };
    }

    let id = raw.and_then(|t| t.get("id")).and_then(as_id).unwrap_or_default();
    Team {
        name: raw
            .and_then(|t| t.get("name"))
            .and_then(as_text)
            .unwrap_or_else(|| default_name.to_string()),
        logo: logo_from(raw, LogoKind::Team, &id),
        winner: raw.and_then(|t| t.get("winner")).and_then(Value::as_bool),
        id,
    }
}

fn logo_from(raw: Option<&Value>, kind: LogoKind, id: &str) -> String {
    if let Some(logo) = raw.and_then(|v| v.get("logo")).and_then(as_text) {
        return logo;
    }
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        return LogoVariants::for_id(kind, id).light;
    }
    FALLBACK_LOGO.to_string()
}

/// First value along any of the paths that `convert` accepts. A path holding
/// the wrong type falls through to the next one.
fn pick_map<'a, T>(
    raw: &'a Value,
    paths: &[&[&str]],
    convert: impl Fn(&'a Value) -> Option<T>,
) -> Option<T> {
    paths.iter().find_map(|path| {
        path.iter()
            .try_fold(raw, |value, key| value.get(key))
            .and_then(&convert)
    })
}

/// First object or non-empty string along any of the paths.
fn pick<'a>(raw: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    pick_map(raw, paths, |value| {
        (value.is_object() || as_text(value).is_some()).then_some(value)
    })
}

fn as_id(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn as_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
