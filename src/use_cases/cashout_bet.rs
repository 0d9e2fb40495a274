//! Cashout use case.

use std::sync::Arc;
use uuid::Uuid;

use super::UseCaseError;
use crate::domain::CashoutReceipt;
use crate::ports::LedgerRepository;

pub struct CashoutBet {
    ledger: Arc<dyn LedgerRepository>,
}

impl CashoutBet {
    pub fn new(ledger: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger }
    }

    pub async fn execute(&self, user_id: Uuid, bet_id: Uuid) -> Result<CashoutReceipt, UseCaseError> {
        let receipt = self.ledger.cashout_bet(user_id, bet_id).await.map_err(|e| {
            tracing::warn!(user_id = %user_id, bet_id = %bet_id, error = %e, "Cashout rejected");
            e
        })?;

        tracing::info!(
            user_id = %user_id,
            bet_id = %bet_id,
            amount = ?receipt.bet.cashout_amount,
            balance = %receipt.user.balance,
            "Bet cashed out"
        );
        Ok(receipt)
    }
}
