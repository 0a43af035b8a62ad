//! Per-match usage and fraud statistics.
//!
//! Read-only aggregate snapshots fetched on demand when the operator opens
//! the statistics view for one match. Nothing here is cached across views;
//! every open refetches.

use serde::{Deserialize, Serialize};

/// Aggregate QR usage for one stadium zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatistic {
    /// Normalized zone label for display.
    pub zone: String,
    /// Raw zone identifier as stored server-side.
    pub zone_raw: String,
    pub total_qrcodes: u64,
    pub used_qrcodes: u64,
    pub fraud_qrcodes: u64,
    pub unused_qrcodes: u64,
    pub usage_percentage: f64,
    pub fraud_percentage: f64,
    pub avg_usage_time_minutes: f64,
}

/// Usage-time spread for a whole match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageTimeStats {
    pub earliest_usage_minutes: f64,
    pub latest_usage_minutes: f64,
    pub avg_usage_time_minutes: f64,
}

/// Match-level aggregates accompanying the zone breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
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
    pub usage_time_stats: UsageTimeStats,
}

/// Cross-zone summary: coverage plus the notable outlier zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_zones: u64,
    pub zones_with_data: u64,
    pub zones_without_data: u64,
    pub most_used_zone: ZoneStatistic,
    pub least_used_zone: ZoneStatistic,
    pub highest_fraud_zone: ZoneStatistic,
}

/// The complete statistics snapshot for one match.
///
/// The server sometimes omits `match_info`, `zones`, or `summary` even on a
/// successful response; callers must handle each independently rather than
/// assuming the trio arrives together.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatistics {
    pub match_info: Option<MatchInfo>,
    pub zones: Vec<ZoneStatistic>,
    pub summary: Option<StatsSummary>,
}

/// Outcome of a statistics fetch.
///
/// The statistics path is contracted to never raise: transport and parse
/// failures arrive as [`StatsOutcome::Unavailable`] with a message, exactly
/// like a structured server failure.
#[derive(Debug, Clone, PartialEq)]
pub enum StatsOutcome {
    Loaded(MatchStatistics),
    Unavailable { message: String },
}
