use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::services::football::{
    LeagueStatsDto, MatchDto, PlayerSearchResponse, PlayerStatsDto, TeamInfo, TeamStatsDto,
    UpcomingWindow,
};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct UpcomingQuery {
    /// `today`, `tomorrow`, `week` or `month`. Anything else means `today`.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/football/players/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Players whose name matches", body = PlayerSearchResponse),
        (status = 400, description = "Empty query")
    ),
    tag = "Football"
)]
pub async fn search_players(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<PlayerSearchResponse>, AppError> {
    let query = params.query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query cannot be empty".to_string()));
    }

    Ok(Json(state.football.search_players(query).await?))
}

#[utoipa::path(
    get,
    path = "/api/football/live",
    responses((status = 200, description = "Matches in play", body = [MatchDto])),
    tag = "Football"
)]
pub async fn live(State(state): State<AppState>) -> Result<Json<Vec<MatchDto>>, AppError> {
    Ok(Json(state.football.live_matches().await?))
}

#[utoipa::path(
    get,
    path = "/api/football/upcoming",
    params(UpcomingQuery),
    responses((status = 200, description = "Matches not yet started, by date then time", body = [MatchDto])),
    tag = "Football"
)]
pub async fn upcoming(
    State(state): State<AppState>,
    Query(params): Query<UpcomingQuery>,
) -> Result<Json<Vec<MatchDto>>, AppError> {
    let window = params
        .date
        .as_deref()
        .map(UpcomingWindow::parse)
        .unwrap_or(UpcomingWindow::Today);

    Ok(Json(state.football.upcoming_matches(window).await?))
}

#[utoipa::path(
    get,
    path = "/api/football/teams",
    responses((status = 200, description = "Known teams", body = [TeamInfo])),
    tag = "Football"
)]
pub async fn teams(State(state): State<AppState>) -> Result<Json<Vec<TeamInfo>>, AppError> {
    Ok(Json(state.football.teams().await?))
}

#[utoipa::path(
    get,
    path = "/api/football/stats",
    responses((status = 200, description = "Season statistics per team", body = [TeamStatsDto])),
    tag = "Football"
)]
pub async fn team_stats(State(state): State<AppState>) -> Result<Json<Vec<TeamStatsDto>>, AppError> {
    Ok(Json(state.football.team_stats().await?))
}

#[utoipa::path(
    get,
    path = "/api/football/playerstats",
    responses((status = 200, description = "Season statistics per player", body = [PlayerStatsDto])),
    tag = "Football"
)]
pub async fn player_stats(State(state): State<AppState>) -> Result<Json<Vec<PlayerStatsDto>>, AppError> {
    Ok(Json(state.football.player_stats().await?))
}

#[utoipa::path(
    get,
    path = "/api/football/leaguestats",
    responses((status = 200, description = "Season statistics per league", body = [LeagueStatsDto])),
    tag = "Football"
)]
pub async fn league_stats(State(state): State<AppState>) -> Result<Json<Vec<LeagueStatsDto>>, AppError> {
    Ok(Json(state.football.league_stats().await?))
}
