//! Ledger entry domain entity.
//! Every balance change appends exactly one of these; they are never updated.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::money;

pub const KIND_BET: &str = "bet";
pub const KIND_CASHOUT: &str = "cashout";

/// Domain entity representing a balance-affecting event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bet_id: Option<Uuid>,
    /// Open set: `bet`, `cashout`, `deposit`, `win`, `bonus`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Negative for stakes, positive for credits.
    #[schema(value_type = f64, example = -50.00)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub amount: BigDecimal,
    /// Balance snapshot right after `amount` was applied.
    #[schema(value_type = f64, example = 50.00)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub balance_after: BigDecimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        bet_id: Option<Uuid>,
        kind: &str,
        amount: BigDecimal,
        balance_after: BigDecimal,
        description: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            bet_id,
            kind: kind.to_string(),
            amount,
            balance_after,
            description,
            created_at,
        }
    }
}
