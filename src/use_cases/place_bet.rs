//! Place bet use case.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::UseCaseError;
use crate::domain::{BetSlip, Placement};
use crate::ports::LedgerRepository;
use crate::validation::{
    sanitize_string, validate_max_len, validate_odds, validate_required, validate_stake,
    MATCH_FIELD_MAX_LEN, SELECTION_MAX_LEN,
};

#[derive(Debug, Clone)]
pub struct PlaceBetInput {
    pub match_id: String,
    pub match_name: String,
    pub tournament: Option<String>,
    pub match_date: Option<DateTime<Utc>>,
    pub selection: String,
    pub odds: BigDecimal,
    pub stake: BigDecimal,
    pub is_live: bool,
}

impl PlaceBetInput {
    fn into_slip(self) -> Result<BetSlip, UseCaseError> {
        let match_id = sanitize_string(&self.match_id);
        let match_name = sanitize_string(&self.match_name);
        let selection = sanitize_string(&self.selection);
        let tournament = self
            .tournament
            .map(|t| sanitize_string(&t))
            .unwrap_or_default();

        validate_required("matchId", &match_id)?;
        validate_max_len("matchId", &match_id, MATCH_FIELD_MAX_LEN)?;
        validate_required("matchName", &match_name)?;
        validate_max_len("matchName", &match_name, MATCH_FIELD_MAX_LEN)?;
        validate_max_len("tournament", &tournament, MATCH_FIELD_MAX_LEN)?;
        validate_required("selection", &selection)?;
        validate_max_len("selection", &selection, SELECTION_MAX_LEN)?;
        validate_odds(&self.odds)?;
        validate_stake(&self.stake)?;

        Ok(BetSlip {
            match_id,
            match_name,
            tournament,
            match_date: self.match_date,
            selection,
            odds: self.odds,
            stake: self.stake,
            is_live: self.is_live,
        })
    }
}

pub struct PlaceBet {
    ledger: Arc<dyn LedgerRepository>,
}

impl PlaceBet {
    pub fn new(ledger: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger }
    }

    pub async fn execute(&self, user_id: Uuid, input: PlaceBetInput) -> Result<Placement, UseCaseError> {
        let slip = input.into_slip()?;
        let placement = self.ledger.place_bet(user_id, slip).await?;

        tracing::info!(
            user_id = %user_id,
            bet_id = %placement.bet.id,
            match_id = %placement.bet.match_id,
            stake = %placement.bet.stake,
            odds = %placement.bet.odds,
            balance = %placement.user.balance,
            "Bet placed"
        );
        Ok(placement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use crate::domain::{BettingError, User};
    use crate::ports::{RepositoryError, UserRepository};
    use std::str::FromStr;

    fn input(stake: &str, odds: &str) -> PlaceBetInput {
        PlaceBetInput {
            match_id: "1".to_string(),
            match_name: "  Manchester City vs Arsenal ".to_string(),
            tournament: None,
            match_date: None,
            selection: "team1Win".to_string(),
            odds: BigDecimal::from_str(odds).unwrap(),
            stake: BigDecimal::from_str(stake).unwrap(),
            is_live: false,
        }
    }

    async fn setup() -> (PlaceBet, Arc<InMemoryStore>, Uuid) {
        let store = Arc::new(InMemoryStore::new());
        let user = User::new("p@example.com".to_string(), "p".to_string(), "h".to_string());
        store.insert(&user).await.unwrap();
        (PlaceBet::new(store.clone()), store, user.id)
    }

    #[tokio::test]
    async fn test_places_and_trims_fields() {
        let (place_bet, _, user_id) = setup().await;
        let placement = place_bet.execute(user_id, input("50", "1.85")).await.unwrap();

        assert_eq!(placement.bet.match_name, "Manchester City vs Arsenal");
        assert_eq!(placement.bet.tournament, "");
        assert_eq!(placement.user.balance.to_string(), "50.00");
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_the_ledger() {
        let (place_bet, store, user_id) = setup().await;

        for bad in [input("0", "1.85"), input("10", "1.00"), input("10.001", "2.00")] {
            let err = place_bet.execute(user_id, bad).await.unwrap_err();
            assert!(matches!(err, UseCaseError::Validation(_)));
        }

        let mut missing_selection = input("10", "2.00");
        missing_selection.selection = " ".to_string();
        let err = place_bet.execute(user_id, missing_selection).await.unwrap_err();
        assert!(matches!(err, UseCaseError::Validation(ref v) if v.field == "selection"));

        assert!(store.bets_for_user(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_balance() {
        let (place_bet, _, user_id) = setup().await;
        let err = place_bet.execute(user_id, input("150", "2.00")).await.unwrap_err();
        assert!(matches!(
            err,
            UseCaseError::Repository(RepositoryError::Rejected(BettingError::InsufficientFunds))
        ));
    }
}
