//! Leagues and matches shown in listings. Not involved in money movement.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::money;

pub const MATCH_SCHEDULED: &str = "Scheduled";
pub const MATCH_LIVE: &str = "Live";

#[derive(Debug, Clone)]
pub struct League {
    pub id: String,
    pub name: String,
    pub country: String,
    pub logo: String,
    pub is_featured: bool,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: String,
    pub league_id: String,
    pub home_team_id: String,
    pub home_team_name: String,
    pub home_team_logo: String,
    pub home_team_score: Option<i32>,
    pub away_team_id: String,
    pub away_team_name: String,
    pub away_team_logo: String,
    pub away_team_score: Option<i32>,
    pub kickoff_time: DateTime<Utc>,
    /// `Scheduled`, `Live`, `Finished`, `Postponed` or `Cancelled`.
    pub status: String,
    pub minute: Option<i32>,
    pub home_win_odds: BigDecimal,
    pub draw_odds: BigDecimal,
    pub away_win_odds: BigDecimal,
    pub is_featured: bool,
    pub is_live: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Live and scheduled matches count towards a league's active total.
    pub fn is_active(&self) -> bool {
        self.status == MATCH_LIVE || self.status == MATCH_SCHEDULED
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    pub id: String,
    pub name: String,
    pub country: String,
    pub logo: String,
    pub is_featured: bool,
    pub active_matches: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeagueRef {
    pub id: String,
    pub name: String,
    pub logo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub id: String,
    pub home_team_id: String,
    pub home_team_name: String,
    pub home_team_logo: String,
    pub home_team_score: Option<i32>,
    pub away_team_id: String,
    pub away_team_name: String,
    pub away_team_logo: String,
    pub away_team_score: Option<i32>,
    pub kickoff_time: DateTime<Utc>,
    pub status: String,
    pub minute: Option<i32>,
    #[schema(value_type = f64, example = 1.85)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub home_win_odds: BigDecimal,
    #[schema(value_type = f64, example = 3.40)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub draw_odds: BigDecimal,
    #[schema(value_type = f64, example = 4.50)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub away_win_odds: BigDecimal,
    pub is_featured: bool,
    pub is_live: bool,
    pub league: LeagueRef,
}

impl MatchView {
    pub fn new(m: &Match, league: &League) -> Self {
        Self {
            id: m.id.clone(),
            home_team_id: m.home_team_id.clone(),
            home_team_name: m.home_team_name.clone(),
            home_team_logo: m.home_team_logo.clone(),
            home_team_score: m.home_team_score,
            away_team_id: m.away_team_id.clone(),
            away_team_name: m.away_team_name.clone(),
            away_team_logo: m.away_team_logo.clone(),
            away_team_score: m.away_team_score,
            kickoff_time: m.kickoff_time,
            status: m.status.clone(),
            minute: m.minute,
            home_win_odds: m.home_win_odds.clone(),
            draw_odds: m.draw_odds.clone(),
            away_win_odds: m.away_win_odds.clone(),
            is_featured: m.is_featured,
            is_live: m.is_live,
            league: LeagueRef {
                id: league.id.clone(),
                name: league.name.clone(),
                logo: league.logo.clone(),
            },
        }
    }
}
