//! Postgres implementation of LedgerRepository.
//!
//! Placement and cashout each run in a single database transaction. The
//! user row is locked with `FOR UPDATE` before the balance is read, so two
//! requests for the same user are applied one after the other.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::domain::bet::{self, BetStatus};
use crate::domain::{Bet, BetSlip, BettingError, CashoutReceipt, Placement, Transaction, User};
use crate::ports::{LedgerRepository, RepositoryError, RepositoryResult};

use super::postgres_user_repository::{UserRow, USER_COLUMNS};

const BET_COLUMNS: &str = "id, user_id, match_id, match_name, tournament, match_date, selection, \
    odds, stake, potential_win, status, cashout_amount, is_live, created_at, settled_at";

const TRANSACTION_COLUMNS: &str =
    "id, user_id, bet_id, kind, amount, balance_after, description, created_at";

#[derive(Clone)]
pub struct PostgresLedgerRepository {
    pool: PgPool,
}

impl PostgresLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn lock_user(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    user_id: Uuid,
) -> RepositoryResult<User> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {} FROM users WHERE id = $1 FOR UPDATE",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?;

    row.map(UserRow::into_domain)
        .ok_or(RepositoryError::Rejected(BettingError::UserNotFound))
}

async fn write_balance(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    user: &User,
) -> RepositoryResult<()> {
    sqlx::query("UPDATE users SET balance = $2 WHERE id = $1")
        .bind(user.id)
        .bind(&user.balance)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn append_entry(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    entry: &Transaction,
) -> RepositoryResult<()> {
    sqlx::query(
        r#"
        INSERT INTO transactions (id, user_id, bet_id, kind, amount, balance_after, description, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(entry.id)
    .bind(entry.user_id)
    .bind(entry.bet_id)
    .bind(&entry.kind)
    .bind(&entry.amount)
    .bind(&entry.balance_after)
    .bind(&entry.description)
    .bind(entry.created_at)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn place_bet(&self, user_id: Uuid, slip: BetSlip) -> RepositoryResult<Placement> {
        let mut tx = self.pool.begin().await?;

        let user = lock_user(&mut tx, user_id).await?;
        // Dropping `tx` on any early return rolls everything back.
        let placement = bet::place(user, slip, Utc::now())?;
        let b = &placement.bet;

        write_balance(&mut tx, &placement.user).await?;

        sqlx::query(&format!(
            "INSERT INTO bets ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
            BET_COLUMNS
        ))
        .bind(b.id)
        .bind(b.user_id)
        .bind(&b.match_id)
        .bind(&b.match_name)
        .bind(&b.tournament)
        .bind(b.match_date)
        .bind(&b.selection)
        .bind(&b.odds)
        .bind(&b.stake)
        .bind(&b.potential_win)
        .bind(b.status.as_str())
        .bind(&b.cashout_amount)
        .bind(b.is_live)
        .bind(b.created_at)
        .bind(b.settled_at)
        .execute(&mut *tx)
        .await?;

        append_entry(&mut tx, &placement.transaction).await?;

        tx.commit().await?;
        Ok(placement)
    }

    async fn cashout_bet(&self, user_id: Uuid, bet_id: Uuid) -> RepositoryResult<CashoutReceipt> {
        let mut tx = self.pool.begin().await?;

        let bet = sqlx::query_as::<_, BetRow>(&format!(
            "SELECT {} FROM bets WHERE id = $1 FOR UPDATE",
            BET_COLUMNS
        ))
        .bind(bet_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(RepositoryError::Rejected(BettingError::BetNotFound))?
        .try_into_domain()?;

        // Ownership is checked before touching the caller's row so a
        // stranger's request never waits on the owner's lock.
        bet::ensure_cashout_allowed(&bet, user_id)?;

        let user = lock_user(&mut tx, user_id).await?;
        let receipt = bet::cash_out(bet, user, Utc::now())?;

        let updated = sqlx::query(
            r#"
            UPDATE bets SET status = $2, cashout_amount = $3, settled_at = $4
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(receipt.bet.id)
        .bind(receipt.bet.status.as_str())
        .bind(&receipt.bet.cashout_amount)
        .bind(receipt.bet.settled_at)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() != 1 {
            return Err(BettingError::NotActive.into());
        }

        write_balance(&mut tx, &receipt.user).await?;
        append_entry(&mut tx, &receipt.transaction).await?;

        tx.commit().await?;
        Ok(receipt)
    }

    async fn bets_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Bet>> {
        let rows = sqlx::query_as::<_, BetRow>(&format!(
            "SELECT {} FROM bets WHERE user_id = $1 ORDER BY created_at DESC",
            BET_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BetRow::try_into_domain).collect()
    }

    async fn transactions_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {} FROM transactions WHERE user_id = $1 ORDER BY created_at DESC",
            TRANSACTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionRow::into_domain).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BetRow {
    id: Uuid,
    user_id: Uuid,
    match_id: String,
    match_name: String,
    tournament: String,
    match_date: Option<DateTime<Utc>>,
    selection: String,
    odds: BigDecimal,
    stake: BigDecimal,
    potential_win: BigDecimal,
    status: String,
    cashout_amount: Option<BigDecimal>,
    is_live: bool,
    created_at: DateTime<Utc>,
    settled_at: Option<DateTime<Utc>>,
}

impl BetRow {
    fn try_into_domain(self) -> RepositoryResult<Bet> {
        let status: BetStatus = self.status.parse().map_err(RepositoryError::InvalidData)?;
        Ok(Bet {
            id: self.id,
            user_id: self.user_id,
            match_id: self.match_id,
            match_name: self.match_name,
            tournament: self.tournament,
            match_date: self.match_date,
            selection: self.selection,
            odds: self.odds,
            stake: self.stake,
            potential_win: self.potential_win,
            status,
            cashout_amount: self.cashout_amount,
            is_live: self.is_live,
            created_at: self.created_at,
            settled_at: self.settled_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    bet_id: Option<Uuid>,
    kind: String,
    amount: BigDecimal,
    balance_after: BigDecimal,
    description: String,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_domain(self) -> Transaction {
        Transaction {
            id: self.id,
            user_id: self.user_id,
            bet_id: self.bet_id,
            kind: self.kind,
            amount: self.amount,
            balance_after: self.balance_after,
            description: self.description,
            created_at: self.created_at,
        }
    }
}
