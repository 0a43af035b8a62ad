//! Match domain model.
//!
//! A [`Match`] is an immutable snapshot of one fixture as reported by the
//! backend. Snapshots are fetched on list load and on manual refresh, and
//! each fetch supersedes the previous list wholesale; nothing is merged or
//! mutated locally.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a match, as reported by the server.
///
/// The server sends free-form status strings; anything unrecognized maps to
/// [`MatchStatus::Unknown`] rather than failing the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Scheduled but not yet open for scanning.
    Upcoming,
    /// Gates open; scanning in progress.
    Active,
    /// Played and closed.
    Finished,
    /// Status string the client does not recognize.
    Unknown,
}

impl MatchStatus {
    /// Parses a server status string, case-insensitively.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_lowercase).as_deref() {
            Some("upcoming") => Self::Upcoming,
            Some("active") => Self::Active,
            Some("finished") => Self::Finished,
            _ => Self::Unknown,
        }
    }

    /// Short label for table rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Finished => "finished",
            Self::Unknown => "unknown",
        }
    }
}

/// One fixture as listed by the `/games` endpoint.
///
/// Fields the server may omit are optional here and rendered as placeholders
/// rather than defaulted to fabricated values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Server-assigned match identifier, used for scan submission and
    /// statistics lookup.
    pub id: String,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    /// Kick-off date as supplied by the server (display only).
    pub date: Option<String>,
    /// Kick-off time as supplied by the server (display only).
    pub time: Option<String>,
    pub stadium: Option<String>,
    pub status: MatchStatus,
    /// Timestamp of when scanning was activated for this match, if ever.
    pub activation_timestamp: Option<String>,
}

impl Match {
    /// Display title of the fixture, e.g. `"Club Africain vs ES Tunis"`.
    ///
    /// Missing team names render as `?` so a partially filled snapshot is
    /// still listable.
    #[must_use]
    pub fn title(&self) -> String {
        let home = self.home_team.as_deref().unwrap_or("?");
        let away = self.away_team.as_deref().unwrap_or("?");
        format!("{home} vs {away}")
    }

    /// Date and time joined for table rendering.
    #[must_use]
    pub fn schedule(&self) -> String {
        match (self.date.as_deref(), self.time.as_deref()) {
            (Some(d), Some(t)) => format!("{d} {t}"),
            (Some(d), None) => d.to_string(),
            (None, Some(t)) => t.to_string(),
            (None, None) => "-".to_string(),
        }
    }

    /// Whether this match belongs on the upcoming tab.
    ///
    /// `Active` fixtures are listed with upcoming ones so gate operators see
    /// the match they are currently scanning first.
    #[must_use]
    pub const fn is_upcoming(&self) -> bool {
        matches!(self.status, MatchStatus::Upcoming | MatchStatus::Active)
    }

    /// Whether this match belongs on the finished tab.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.status, MatchStatus::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_known_values_case_insensitively() {
        assert_eq!(MatchStatus::parse(Some("Upcoming")), MatchStatus::Upcoming);
        assert_eq!(MatchStatus::parse(Some("ACTIVE")), MatchStatus::Active);
        assert_eq!(MatchStatus::parse(Some("finished")), MatchStatus::Finished);
    }

    #[test]
    fn status_falls_back_to_unknown() {
        assert_eq!(MatchStatus::parse(Some("postponed")), MatchStatus::Unknown);
        assert_eq!(MatchStatus::parse(None), MatchStatus::Unknown);
    }

    #[test]
    fn title_tolerates_missing_teams() {
        let m = Match {
            id: "42".to_string(),
            home_team: Some("Club Africain".to_string()),
            away_team: None,
            date: None,
            time: None,
            stadium: None,
            status: MatchStatus::Upcoming,
            activation_timestamp: None,
        };
        assert_eq!(m.title(), "Club Africain vs ?");
        assert_eq!(m.schedule(), "-");
    }

    #[test]
    fn active_matches_list_as_upcoming() {
        let mut m = Match {
            id: "1".to_string(),
            home_team: None,
            away_team: None,
            date: None,
            time: None,
            stadium: None,
            status: MatchStatus::Active,
            activation_timestamp: None,
        };
        assert!(m.is_upcoming());
        m.status = MatchStatus::Finished;
        assert!(m.is_finished());
        assert!(!m.is_upcoming());
    }
}
