use axum::{extract::State, Json};

use crate::domain::Transaction;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/transactions/user",
    responses(
        (status = 200, description = "The caller's ledger, newest first", body = [Transaction]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Transactions"
)]
pub async fn user_transactions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Transaction>>, AppError> {
    Ok(Json(state.ledger.transactions_for_user(user.id).await?))
}
