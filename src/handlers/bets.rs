use axum::{
    extract::{Path, State},
    Json,
};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ApiJson;
use crate::domain::{Bet, UserProfile};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::use_cases::PlaceBetInput;
use crate::validation::ValidationError;
use crate::AppState;

/// Odds and stake accept JSON numbers or decimal strings.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBetRequest {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub match_name: String,
    pub tournament: Option<String>,
    pub match_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub selection: String,
    #[schema(value_type = Option<f64>, example = 1.85)]
    pub odds: Option<BigDecimal>,
    #[schema(value_type = Option<f64>, example = 50.00)]
    pub stake: Option<BigDecimal>,
    #[serde(default)]
    pub is_live: bool,
}

impl PlaceBetRequest {
    fn into_input(self) -> Result<PlaceBetInput, ValidationError> {
        Ok(PlaceBetInput {
            match_id: self.match_id,
            match_name: self.match_name,
            tournament: self.tournament,
            match_date: self.match_date,
            selection: self.selection,
            odds: self.odds.ok_or_else(|| ValidationError::new("odds", "is required"))?,
            stake: self.stake.ok_or_else(|| ValidationError::new("stake", "is required"))?,
            is_live: self.is_live,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CashoutResponse {
    pub bet: Bet,
    pub user: UserProfile,
}

#[utoipa::path(
    get,
    path = "/api/bets/user",
    responses(
        (status = 200, description = "The caller's bets, newest first", body = [Bet]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Bets"
)]
pub async fn user_bets(State(state): State<AppState>, user: AuthUser) -> Result<Json<Vec<Bet>>, AppError> {
    Ok(Json(state.ledger.bets_for_user(user.id).await?))
}

#[utoipa::path(
    post,
    path = "/api/bets",
    request_body = PlaceBetRequest,
    responses(
        (status = 200, description = "Bet placed", body = Bet),
        (status = 400, description = "Invalid slip or insufficient balance"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Bets"
)]
pub async fn place_bet(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<PlaceBetRequest>,
) -> Result<Json<Bet>, AppError> {
    let placement = state.place_bet.execute(user.id, req.into_input()?).await?;
    Ok(Json(placement.bet))
}

#[utoipa::path(
    post,
    path = "/api/bets/{id}/cashout",
    params(("id" = String, Path, description = "Bet id")),
    responses(
        (status = 200, description = "Bet cashed out at 75% of the potential win", body = CashoutResponse),
        (status = 400, description = "Malformed id, settled bet or live bet"),
        (status = 401, description = "Missing token or bet owned by someone else"),
        (status = 404, description = "Bet not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Bets"
)]
pub async fn cashout(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CashoutResponse>, AppError> {
    let bet_id = Uuid::parse_str(&id).map_err(|_| AppError::BadRequest("Invalid bet ID format".to_string()))?;

    let receipt = state.cashout_bet.execute(user.id, bet_id).await?;

    Ok(Json(CashoutResponse {
        bet: receipt.bet,
        user: receipt.user.profile(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_request_accepts_numbers_and_strings() {
        let req: PlaceBetRequest = serde_json::from_str(
            r#"{"matchId":"1","matchName":"A vs B","selection":"draw","odds":1.85,"stake":"50.00"}"#,
        )
        .unwrap();
        let input = req.into_input().unwrap();

        assert_eq!(input.odds, BigDecimal::from_str("1.85").unwrap());
        assert_eq!(input.stake, BigDecimal::from_str("50").unwrap());
        assert!(!input.is_live);
        assert!(input.tournament.is_none());
    }

    #[test]
    fn test_missing_stake_is_a_validation_error() {
        let req: PlaceBetRequest =
            serde_json::from_str(r#"{"matchId":"1","matchName":"A vs B","selection":"draw","odds":2}"#).unwrap();
        let err = req.into_input().unwrap_err();

        assert_eq!(err.to_string(), "stake: is required");
    }
}
