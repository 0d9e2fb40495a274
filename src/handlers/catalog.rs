//! League and match listings backed by the catalog tables.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{LeagueSummary, MatchView};
use crate::error::AppError;
use crate::ports::MatchFilter;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusQuery {
    /// Exact status, e.g. `Live` or `Scheduled`.
    pub status: Option<String>,
}

impl StatusQuery {
    fn status(&self) -> Option<&str> {
        self.status.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[utoipa::path(
    get,
    path = "/api/leagues",
    responses((status = 200, description = "Leagues by priority", body = [LeagueSummary])),
    tag = "Catalog"
)]
pub async fn leagues(State(state): State<AppState>) -> Result<Json<Vec<LeagueSummary>>, AppError> {
    Ok(Json(state.catalog.leagues(false).await?))
}

#[utoipa::path(
    get,
    path = "/api/leagues/featured",
    responses((status = 200, description = "Featured leagues by priority", body = [LeagueSummary])),
    tag = "Catalog"
)]
pub async fn featured_leagues(State(state): State<AppState>) -> Result<Json<Vec<LeagueSummary>>, AppError> {
    Ok(Json(state.catalog.leagues(true).await?))
}

#[utoipa::path(
    get,
    path = "/api/leagues/{league_id}/matches",
    params(("league_id" = String, Path, description = "League id"), StatusQuery),
    responses((status = 200, description = "League matches by kickoff", body = [MatchView])),
    tag = "Catalog"
)]
pub async fn league_matches(
    State(state): State<AppState>,
    Path(league_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<MatchView>>, AppError> {
    Ok(Json(state.catalog.league_matches(&league_id, query.status()).await?))
}

#[utoipa::path(
    get,
    path = "/api/matches",
    params(StatusQuery),
    responses((status = 200, description = "Matches by kickoff", body = [MatchView])),
    tag = "Catalog"
)]
pub async fn matches(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<Vec<MatchView>>, AppError> {
    let filter = match query.status() {
        Some(status) => MatchFilter::Status(status.to_string()),
        None => MatchFilter::All,
    };
    Ok(Json(state.catalog.matches(filter).await?))
}

#[utoipa::path(
    get,
    path = "/api/matches/live",
    responses((status = 200, description = "Matches in play", body = [MatchView])),
    tag = "Catalog"
)]
pub async fn live_matches(State(state): State<AppState>) -> Result<Json<Vec<MatchView>>, AppError> {
    Ok(Json(state.catalog.matches(MatchFilter::Live).await?))
}

#[utoipa::path(
    get,
    path = "/api/matches/featured",
    responses((status = 200, description = "Featured matches", body = [MatchView])),
    tag = "Catalog"
)]
pub async fn featured_matches(State(state): State<AppState>) -> Result<Json<Vec<MatchView>>, AppError> {
    Ok(Json(state.catalog.matches(MatchFilter::Featured).await?))
}
