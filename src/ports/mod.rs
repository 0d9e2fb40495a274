//! Persistence seams. Handlers and use cases only see these traits; the
//! Postgres and in-memory adapters implement them.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    Bet, BetSlip, BettingError, CashoutReceipt, FavoriteTeam, League, LeagueSummary, Match,
    MatchView, Placement, Transaction, User,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not found: {0}")]
    NotFound(String),

    /// A unique constraint rejected the write. Carries the constraint name.
    #[error("conflict on {0}")]
    Conflict(String),

    #[error(transparent)]
    Rejected(#[from] BettingError),

    #[error("invalid stored data: {0}")]
    InvalidData(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("row".to_string()),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.constraint().unwrap_or("unique").to_string())
            }
            e => RepositoryError::Database(e),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

pub const USERS_EMAIL_KEY: &str = "users_email_key";
pub const USERS_USERNAME_KEY: &str = "users_username_key";
pub const FAVORITE_TEAMS_KEY: &str = "favorite_teams_user_id_team_id_key";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] naming the violated key.
    async fn insert(&self, user: &User) -> RepositoryResult<User>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn email_exists(&self, email: &str) -> RepositoryResult<bool>;
    async fn username_exists(&self, username: &str) -> RepositoryResult<bool>;
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> RepositoryResult<()>;
    async fn list_all(&self) -> RepositoryResult<Vec<User>>;
}

/// Money-moving operations. Implementations run each call as one atomic
/// unit and serialize concurrent calls touching the same user.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn place_bet(&self, user_id: Uuid, slip: BetSlip) -> RepositoryResult<Placement>;
    async fn cashout_bet(&self, user_id: Uuid, bet_id: Uuid) -> RepositoryResult<CashoutReceipt>;
    /// Newest first.
    async fn bets_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Bet>>;
    /// Newest first.
    async fn transactions_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>>;
}

#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Oldest first.
    async fn list(&self, user_id: Uuid) -> RepositoryResult<Vec<FavoriteTeam>>;
    async fn add(&self, favorite: &FavoriteTeam) -> RepositoryResult<()>;
    /// Returns false when nothing was removed.
    async fn remove(&self, user_id: Uuid, team_id: &str) -> RepositoryResult<bool>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Ordered by priority.
    async fn leagues(&self, featured_only: bool) -> RepositoryResult<Vec<LeagueSummary>>;
    /// Ordered by kickoff time.
    async fn league_matches(
        &self,
        league_id: &str,
        status: Option<&str>,
    ) -> RepositoryResult<Vec<MatchView>>;
    async fn matches(&self, filter: MatchFilter) -> RepositoryResult<Vec<MatchView>>;
    /// Inserts rows that are not present yet. Returns how many were added.
    async fn seed(&self, leagues: &[League], matches: &[Match]) -> RepositoryResult<u64>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFilter {
    All,
    Status(String),
    Live,
    Featured,
}
