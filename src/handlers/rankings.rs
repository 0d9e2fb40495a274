use axum::{extract::State, Json};

use crate::error::AppError;
use crate::services::rankings::{sorted_by_balance, RankingEntry};
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/userrankings/sorted",
    responses(
        (status = 200, description = "Every user, lowest balance first", body = [RankingEntry])
    ),
    tag = "Rankings"
)]
pub async fn sorted(State(state): State<AppState>) -> Result<Json<Vec<RankingEntry>>, AppError> {
    Ok(Json(sorted_by_balance(state.users.as_ref()).await?))
}
