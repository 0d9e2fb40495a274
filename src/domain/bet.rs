//! Bet lifecycle: placement and early cashout.
//!
//! The functions here are pure. Adapters load and lock the rows, call into
//! this module, then persist whatever comes back inside one transaction.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use super::money::{self, round_money};
use super::transaction::{Transaction, KIND_BET, KIND_CASHOUT};
use super::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BetStatus {
    Active,
    Won,
    Lost,
    Cashout,
}

impl BetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BetStatus::Active => "active",
            BetStatus::Won => "won",
            BetStatus::Lost => "lost",
            BetStatus::Cashout => "cashout",
        }
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(BetStatus::Active),
            "won" => Ok(BetStatus::Won),
            "lost" => Ok(BetStatus::Lost),
            "cashout" => Ok(BetStatus::Cashout),
            other => Err(format!("unknown bet status '{}'", other)),
        }
    }
}

/// Rule violations raised while moving money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BettingError {
    #[error("Insufficient balance")]
    InsufficientFunds,

    #[error("User not found")]
    UserNotFound,

    #[error("Bet not found")]
    BetNotFound,

    #[error("You are not authorized to cashout this bet")]
    NotOwner,

    #[error("Bet cannot be cashed out")]
    NotActive,

    #[error("Live bets cannot be cashed out")]
    LiveBet,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub match_id: String,
    pub match_name: String,
    pub tournament: String,
    pub match_date: Option<DateTime<Utc>>,
    /// e.g. `team1Win`, `draw`, `team2Win`, or a team name.
    pub selection: String,
    #[schema(value_type = f64, example = 1.85)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub odds: BigDecimal,
    #[schema(value_type = f64, example = 50.00)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub stake: BigDecimal,
    /// `stake × odds`, fixed at placement.
    #[schema(value_type = f64, example = 92.50)]
    #[serde(serialize_with = "money::serialize_amount")]
    pub potential_win: BigDecimal,
    pub status: BetStatus,
    #[schema(value_type = Option<f64>, example = 69.38)]
    #[serde(serialize_with = "money::serialize_optional_amount")]
    pub cashout_amount: Option<BigDecimal>,
    pub is_live: bool,
    pub created_at: DateTime<Utc>,
    pub settled_at: Option<DateTime<Utc>>,
}

impl Bet {
    pub fn can_cashout(&self) -> bool {
        self.status == BetStatus::Active && !self.is_live
    }
}

/// What the bettor asked for. Match metadata is copied onto the bet so the
/// history stays readable after catalog data changes.
#[derive(Debug, Clone)]
pub struct BetSlip {
    pub match_id: String,
    pub match_name: String,
    pub tournament: String,
    pub match_date: Option<DateTime<Utc>>,
    pub selection: String,
    pub odds: BigDecimal,
    pub stake: BigDecimal,
    pub is_live: bool,
}

#[derive(Debug, Clone)]
pub struct Placement {
    pub bet: Bet,
    pub transaction: Transaction,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct CashoutReceipt {
    pub bet: Bet,
    pub transaction: Transaction,
    pub user: User,
}

/// Debits the stake and opens an active bet.
pub fn place(mut user: User, slip: BetSlip, now: DateTime<Utc>) -> Result<Placement, BettingError> {
    if slip.stake > user.balance {
        return Err(BettingError::InsufficientFunds);
    }

    let stake = slip.stake.with_scale(money::MONEY_SCALE);
    let odds = slip.odds.with_scale(money::MONEY_SCALE);
    let potential_win = round_money(&(stake.clone() * odds.clone()));

    user.balance = (user.balance - stake.clone()).with_scale(money::MONEY_SCALE);

    let bet = Bet {
        id: Uuid::new_v4(),
        user_id: user.id,
        match_id: slip.match_id,
        match_name: slip.match_name,
        tournament: slip.tournament,
        match_date: slip.match_date,
        selection: slip.selection,
        odds,
        stake: stake.clone(),
        potential_win,
        status: BetStatus::Active,
        cashout_amount: None,
        is_live: slip.is_live,
        created_at: now,
        settled_at: None,
    };

    let transaction = Transaction::new(
        user.id,
        Some(bet.id),
        KIND_BET,
        -stake,
        user.balance.clone(),
        format!("Bet placed on {}", bet.match_name),
        now,
    );

    Ok(Placement {
        bet,
        transaction,
        user,
    })
}

/// Checks that `caller` may cash out `bet` right now.
pub fn ensure_cashout_allowed(bet: &Bet, caller: Uuid) -> Result<(), BettingError> {
    if bet.user_id != caller {
        return Err(BettingError::NotOwner);
    }
    if bet.status != BetStatus::Active {
        return Err(BettingError::NotActive);
    }
    if bet.is_live {
        return Err(BettingError::LiveBet);
    }
    Ok(())
}

/// Settles `bet` early at 75% of its potential win and credits `user`.
pub fn cash_out(
    mut bet: Bet,
    mut user: User,
    now: DateTime<Utc>,
) -> Result<CashoutReceipt, BettingError> {
    ensure_cashout_allowed(&bet, user.id)?;

    let amount = round_money(&(bet.potential_win.clone() * money::cashout_rate()));

    bet.status = BetStatus::Cashout;
    bet.cashout_amount = Some(amount.clone());
    bet.settled_at = Some(now);

    user.balance = (user.balance + amount.clone()).with_scale(money::MONEY_SCALE);

    let transaction = Transaction::new(
        user.id,
        Some(bet.id),
        KIND_CASHOUT,
        amount,
        user.balance.clone(),
        format!("Cashout from bet on {}", bet.match_name),
        now,
    );

    Ok(CashoutReceipt {
        bet,
        transaction,
        user,
    })
}
