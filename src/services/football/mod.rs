//! Football listings and statistics. The only provider shipped is
//! [`MockFootballData`]; a real feed can be plugged in by implementing
//! [`FootballDataProvider`].

pub mod mock;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::money;

pub use mock::MockFootballData;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("football data unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait FootballDataProvider: Send + Sync {
    async fn search_players(&self, query: &str) -> Result<PlayerSearchResponse, ProviderError>;
    async fn live_matches(&self) -> Result<Vec<MatchDto>, ProviderError>;
    async fn upcoming_matches(&self, window: UpcomingWindow) -> Result<Vec<MatchDto>, ProviderError>;
    async fn teams(&self) -> Result<Vec<TeamInfo>, ProviderError>;
    async fn team_stats(&self) -> Result<Vec<TeamStatsDto>, ProviderError>;
    async fn player_stats(&self) -> Result<Vec<PlayerStatsDto>, ProviderError>;
    async fn league_stats(&self) -> Result<Vec<LeagueStatsDto>, ProviderError>;
}

/// How far ahead `/upcoming` looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpcomingWindow {
    Today,
    Tomorrow,
    Week,
    Month,
}

impl UpcomingWindow {
    /// Unknown values fall back to `Today`.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "tomorrow" => UpcomingWindow::Tomorrow,
            "week" => UpcomingWindow::Week,
            "month" => UpcomingWindow::Month,
            _ => UpcomingWindow::Today,
        }
    }

    /// Last day (inclusive) covered by the window.
    pub fn horizon(self, today: NaiveDate) -> NaiveDate {
        match self {
            UpcomingWindow::Today => today,
            UpcomingWindow::Tomorrow => today + chrono::Duration::days(1),
            UpcomingWindow::Week => today + chrono::Duration::days(7),
            UpcomingWindow::Month => today
                .checked_add_months(Months::new(1))
                .unwrap_or(today + chrono::Duration::days(30)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub id: String,
    pub tournament: String,
    pub tournament_logo: String,
    pub region: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub team1: TeamDto,
    pub team2: TeamDto,
    /// Set while the match is in play.
    pub minute: Option<i32>,
    pub odds: MatchOddsDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub score: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchOddsDto {
    #[serde(rename = "team1Win")]
    #[schema(value_type = f64, example = 1.85)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub team1_win: BigDecimal,
    #[schema(value_type = f64, example = 3.40)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub draw: BigDecimal,
    #[serde(rename = "team2Win")]
    #[schema(value_type = f64, example = 4.50)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub team2_win: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub league: String,
    pub league_logo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsDto {
    pub team_name: String,
    pub league: String,
    pub mp: i32,
    pub w: i32,
    pub d: i32,
    pub l: i32,
    pub gf: i32,
    pub ga: i32,
    pub cs: i32,
    pub form: Vec<String>,
    pub logo: String,
    pub league_logo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsDto {
    pub id: String,
    pub name: String,
    pub position: String,
    pub team: String,
    pub team_logo: String,
    pub league: String,
    pub league_logo: String,
    pub matches: i32,
    pub goals: i32,
    pub assists: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub minutes_played: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStatsDto {
    pub id: String,
    pub name: String,
    pub logo: String,
    pub region: String,
    pub teams: i32,
    pub matches: i32,
    pub goals_per_match: f64,
    pub avg_cards: f64,
    pub top_scorer: TopScorer,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopScorer {
    pub name: String,
    pub goals: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub common_name: Option<String>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub current_team: Option<String>,
    pub age: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSearchResponse {
    pub success: bool,
    pub players: Vec<Player>,
}
