use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::ApiJson;
use crate::domain::UserProfile;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::services::football::TeamInfo;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    #[serde(default)]
    pub team_id: String,
}

#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<UserProfile>, AppError> {
    let found = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(found.profile()))
}

#[utoipa::path(
    get,
    path = "/api/users/favorites",
    responses(
        (status = 200, description = "Favourite teams, oldest first", body = [TeamInfo]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<TeamInfo>>, AppError> {
    Ok(Json(state.favorites.list(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/users/favorites",
    request_body = AddFavoriteRequest,
    responses(
        (status = 200, description = "Team added", body = TeamInfo),
        (status = 400, description = "Unknown team or already a favourite"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<AddFavoriteRequest>,
) -> Result<Json<TeamInfo>, AppError> {
    Ok(Json(state.favorites.add(user.id, &req.team_id).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/favorites/{team_id}",
    params(("team_id" = String, Path, description = "Team id, e.g. `mci`")),
    responses(
        (status = 200, description = "Team removed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Team not found in favorites")
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    user: AuthUser,
    Path(team_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.favorites.remove(user.id, &team_id).await?;
    Ok(StatusCode::OK)
}
