//! Wire types for the access-control API.
//!
//! These structs mirror the backend's JSON shapes exactly, optional fields
//! included; conversion into the stricter domain types happens at the client
//! boundary so the rest of the crate never sees a half-populated response.

use crate::domain::matches::{Match, MatchStatus};
use crate::domain::stats::{MatchInfo, MatchStatistics, StatsSummary, UsageTimeStats, ZoneStatistic};
use crate::domain::Ticket;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Wire user record inside the login response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserDto>,
}

/// One fixture as serialized by `GET /games`.
///
/// The backend mixes camelCase and stray names (`dateTimeScann`); renames are
/// pinned here so the domain type can use clean field names.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchDto {
    pub id: String,
    #[serde(default, rename = "homeTeam")]
    pub home_team: Option<String>,
    #[serde(default, rename = "awayTeam")]
    pub away_team: Option<String>,
    #[serde(default, rename = "homeTeam_logo")]
    pub home_team_logo: Option<String>,
    #[serde(default, rename = "awayTeam_logo")]
    pub away_team_logo: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub stadium: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "dateTimeScann")]
    pub date_time_scann: Option<String>,
}

impl From<MatchDto> for Match {
    fn from(dto: MatchDto) -> Self {
        Self {
            id: dto.id,
            home_team: dto.home_team,
            away_team: dto.away_team,
            date: dto.date,
            time: dto.time,
            stadium: dto.stadium,
            status: MatchStatus::parse(dto.status.as_deref()),
            activation_timestamp: dto.date_time_scann,
        }
    }
}

/// Response of `GET /games`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchesResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub matches: Option<Vec<MatchDto>>,
}

/// Body of `POST /stadium-access/scan`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest {
    pub game_id: String,
    pub qr_code_data: String,
    pub scanned_by: String,
}

/// Wire ticket record inside the scan response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TicketDto {
    pub id: String,
    #[serde(rename = "matchId")]
    pub match_id: String,
    #[serde(rename = "seatNumber")]
    pub seat_number: String,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

impl From<TicketDto> for Ticket {
    fn from(dto: TicketDto) -> Self {
        Self {
            id: dto.id,
            match_id: dto.match_id,
            seat_number: dto.seat_number,
            is_valid: dto.is_valid,
        }
    }
}

/// Response of `POST /stadium-access/scan`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ticket: Option<TicketDto>,
}

/// One zone row inside the statistics response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneStatsDto {
    pub zone: String,
    pub zone_raw: String,
    pub total_qrcodes: u64,
    pub used_qrcodes: u64,
    pub fraud_qrcodes: u64,
    pub unused_qrcodes: u64,
    pub usage_percentage: f64,
    pub fraud_percentage: f64,
    pub avg_usage_time_minutes: f64,
}

impl From<ZoneStatsDto> for ZoneStatistic {
    fn from(dto: ZoneStatsDto) -> Self {
        Self {
            zone: dto.zone,
            zone_raw: dto.zone_raw,
            total_qrcodes: dto.total_qrcodes,
            used_qrcodes: dto.used_qrcodes,
            fraud_qrcodes: dto.fraud_qrcodes,
            unused_qrcodes: dto.unused_qrcodes,
            usage_percentage: dto.usage_percentage,
            fraud_percentage: dto.fraud_percentage,
            avg_usage_time_minutes: dto.avg_usage_time_minutes,
        }
    }
}

/// Usage-time block inside the match info.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UsageTimeStatsDto {
    pub earliest_usage_minutes: f64,
    pub latest_usage_minutes: f64,
    pub avg_usage_time_minutes: f64,
}

/// Match-level aggregate block inside the statistics response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchInfoDto {
    pub id: i64,
    pub home_team: String,
    pub away_team: String,
    pub match_name: String,
    pub game_date: String,
    pub game_date_formatted: String,
    pub season: String,
    pub match_day: i64,
    pub total_qr_codes: u64,
    pub used_qr_codes: u64,
    pub fraud_qr_codes: u64,
    pub unused_qr_codes: u64,
    pub usage_percentage: f64,
    pub fraud_percentage: f64,
    pub usage_time_stats: UsageTimeStatsDto,
}

impl From<MatchInfoDto> for MatchInfo {
    fn from(dto: MatchInfoDto) -> Self {
        Self {
            id: dto.id,
            home_team: dto.home_team,
            away_team: dto.away_team,
            match_name: dto.match_name,
            game_date: dto.game_date,
            game_date_formatted: dto.game_date_formatted,
            season: dto.season,
            match_day: dto.match_day,
            total_qr_codes: dto.total_qr_codes,
            used_qr_codes: dto.used_qr_codes,
            fraud_qr_codes: dto.fraud_qr_codes,
            unused_qr_codes: dto.unused_qr_codes,
            usage_percentage: dto.usage_percentage,
            fraud_percentage: dto.fraud_percentage,
            usage_time_stats: UsageTimeStats {
                earliest_usage_minutes: dto.usage_time_stats.earliest_usage_minutes,
                latest_usage_minutes: dto.usage_time_stats.latest_usage_minutes,
                avg_usage_time_minutes: dto.usage_time_stats.avg_usage_time_minutes,
            },
        }
    }
}

/// Summary block inside the statistics response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsSummaryDto {
    pub total_zones: u64,
    pub zones_with_data: u64,
    pub zones_without_data: u64,
    pub most_used_zone: ZoneStatsDto,
    pub least_used_zone: ZoneStatsDto,
    pub highest_fraud_zone: ZoneStatsDto,
}

impl From<StatsSummaryDto> for StatsSummary {
    fn from(dto: StatsSummaryDto) -> Self {
        Self {
            total_zones: dto.total_zones,
            zones_with_data: dto.zones_with_data,
            zones_without_data: dto.zones_without_data,
            most_used_zone: dto.most_used_zone.into(),
            least_used_zone: dto.least_used_zone.into(),
            highest_fraud_zone: dto.highest_fraud_zone.into(),
        }
    }
}

/// Response of `GET /stats/matches/{matchId}`.
///
/// Any of the three payload blocks may be absent even when `success` is true.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchStatsResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "match")]
    pub match_info: Option<MatchInfoDto>,
    #[serde(default)]
    pub zones: Option<Vec<ZoneStatsDto>>,
    #[serde(default)]
    pub summary: Option<StatsSummaryDto>,
}

impl From<MatchStatsResponse> for MatchStatistics {
    fn from(resp: MatchStatsResponse) -> Self {
        Self {
            match_info: resp.match_info.map(Into::into),
            zones: resp
                .zones
                .map(|zs| zs.into_iter().map(Into::into).collect())
                .unwrap_or_default(),
            summary: resp.summary.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_with_all_fields() {
        let json = r#"{
            "success": true,
            "token": "abc",
            "user": { "id": "7", "email": "jean@example.com", "name": "Jean" }
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("parse");
        assert!(resp.success);
        assert_eq!(resp.token.as_deref(), Some("abc"));
        assert_eq!(resp.user.expect("user").name, "Jean");
    }

    #[test]
    fn login_failure_omits_token_and_user() {
        let json = r#"{ "success": false, "message": "bad credentials" }"#;
        let resp: LoginResponse = serde_json::from_str(json).expect("parse");
        assert!(!resp.success);
        assert!(resp.token.is_none());
        assert!(resp.user.is_none());
    }

    #[test]
    fn match_dto_maps_wire_names_and_status() {
        let json = r#"{
            "id": "42",
            "homeTeam": "Club Africain",
            "awayTeam": "ES Tunis",
            "date": "2025-09-12",
            "time": "18:00",
            "stadium": "Rades",
            "status": "Active",
            "dateTimeScann": "2025-09-12T16:00:00Z"
        }"#;
        let dto: MatchDto = serde_json::from_str(json).expect("parse");
        let m: Match = dto.into();
        assert_eq!(m.id, "42");
        assert_eq!(m.status, MatchStatus::Active);
        assert_eq!(m.title(), "Club Africain vs ES Tunis");
        assert_eq!(
            m.activation_timestamp.as_deref(),
            Some("2025-09-12T16:00:00Z")
        );
    }

    #[test]
    fn matches_response_tolerates_missing_list() {
        let json = r#"{ "success": false, "message": "expired token" }"#;
        let resp: MatchesResponse = serde_json::from_str(json).expect("parse");
        assert!(resp.matches.is_none());
        assert_eq!(resp.message.as_deref(), Some("expired token"));
    }

    #[test]
    fn scan_request_uses_backend_field_names() {
        let req = ScanRequest {
            game_id: "42".to_string(),
            qr_code_data: "QR123".to_string(),
            scanned_by: "Jean".to_string(),
        };
        let json = serde_json::to_value(&req).expect("serialize");
        assert_eq!(json["game_id"], "42");
        assert_eq!(json["qr_code_data"], "QR123");
        assert_eq!(json["scanned_by"], "Jean");
    }

    #[test]
    fn scan_response_with_ticket() {
        let json = r#"{
            "success": true,
            "ticket": { "id": "t1", "matchId": "42", "seatNumber": "A12", "isValid": true }
        }"#;
        let resp: ScanResponse = serde_json::from_str(json).expect("parse");
        let ticket: Ticket = resp.ticket.expect("ticket").into();
        assert_eq!(ticket.seat_number, "A12");
        assert!(ticket.is_valid);
    }

    #[test]
    fn stats_response_with_partial_blocks() {
        // The server can answer success without zones or summary.
        let json = r#"{ "success": true, "match": null, "zones": null }"#;
        let resp: MatchStatsResponse = serde_json::from_str(json).expect("parse");
        let stats: MatchStatistics = resp.into();
        assert!(stats.match_info.is_none());
        assert!(stats.zones.is_empty());
        assert!(stats.summary.is_none());
    }

    #[test]
    fn stats_response_full_round_trip_to_domain() {
        let zone = r#"{
            "zone": "North Stand", "zone_raw": "north",
            "total_qrcodes": 100, "used_qrcodes": 60, "fraud_qrcodes": 3,
            "unused_qrcodes": 37, "usage_percentage": 60.0,
            "fraud_percentage": 3.0, "avg_usage_time_minutes": 42.5
        }"#;
        let json = format!(
            r#"{{
                "success": true,
                "zones": [{zone}],
                "summary": {{
                    "total_zones": 4, "zones_with_data": 1, "zones_without_data": 3,
                    "most_used_zone": {zone},
                    "least_used_zone": {zone},
                    "highest_fraud_zone": {zone}
                }}
            }}"#
        );
        let resp: MatchStatsResponse = serde_json::from_str(&json).expect("parse");
        let stats: MatchStatistics = resp.into();
        assert_eq!(stats.zones.len(), 1);
        assert_eq!(stats.zones[0].zone, "North Stand");
        let summary = stats.summary.expect("summary");
        assert_eq!(summary.total_zones, 4);
        assert_eq!(summary.highest_fraud_zone.fraud_percentage, 3.0);
    }
}
