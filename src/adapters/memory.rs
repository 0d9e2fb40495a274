//! In-memory implementation of every port. Used when no `DATABASE_URL` is
//! configured and by the test suite.
//!
//! One async mutex guards the whole store, so each ledger operation is
//! applied atomically and operations on the same user never interleave.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::bet;
use crate::domain::{
    Bet, BetSlip, BettingError, CashoutReceipt, FavoriteTeam, League, LeagueSummary, Match,
    MatchView, Placement, Transaction, User,
};
use crate::ports::{
    CatalogRepository, FavoriteRepository, LedgerRepository, MatchFilter, RepositoryError,
    RepositoryResult, UserRepository, FAVORITE_TEAMS_KEY, USERS_EMAIL_KEY, USERS_USERNAME_KEY,
};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    bets: HashMap<Uuid, Bet>,
    /// Bet ids in placement order.
    bet_order: Vec<Uuid>,
    transactions: Vec<Transaction>,
    favorites: Vec<FavoriteTeam>,
    leagues: Vec<League>,
    matches: Vec<Match>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> RepositoryResult<User> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(USERS_EMAIL_KEY.to_string()));
        }
        if state.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(USERS_USERNAME_KEY.to_string()));
        }
        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn email_exists(&self, email: &str) -> RepositoryResult<bool> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> RepositoryResult<bool> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.username == username))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> RepositoryResult<()> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        user.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<User>> {
        let mut users: Vec<User> = self.state.lock().await.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}

#[async_trait]
impl LedgerRepository for InMemoryStore {
    async fn place_bet(&self, user_id: Uuid, slip: BetSlip) -> RepositoryResult<Placement> {
        let mut state = self.state.lock().await;
        let user = state
            .users
            .get(&user_id)
            .cloned()
            .ok_or(BettingError::UserNotFound)?;

        let placement = bet::place(user, slip, Utc::now())?;

        state.users.insert(user_id, placement.user.clone());
        state.bets.insert(placement.bet.id, placement.bet.clone());
        state.bet_order.push(placement.bet.id);
        state.transactions.push(placement.transaction.clone());
        Ok(placement)
    }

    async fn cashout_bet(&self, user_id: Uuid, bet_id: Uuid) -> RepositoryResult<CashoutReceipt> {
        let mut state = self.state.lock().await;
        let bet = state
            .bets
            .get(&bet_id)
            .cloned()
            .ok_or(BettingError::BetNotFound)?;
        bet::ensure_cashout_allowed(&bet, user_id)?;

        let user = state
            .users
            .get(&user_id)
            .cloned()
            .ok_or(BettingError::UserNotFound)?;

        let receipt = bet::cash_out(bet, user, Utc::now())?;

        state.users.insert(user_id, receipt.user.clone());
        state.bets.insert(bet_id, receipt.bet.clone());
        state.transactions.push(receipt.transaction.clone());
        Ok(receipt)
    }

    async fn bets_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Bet>> {
        let state = self.state.lock().await;
        Ok(state
            .bet_order
            .iter()
            .rev()
            .filter_map(|id| state.bets.get(id))
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn transactions_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Transaction>> {
        let state = self.state.lock().await;
        // Entries are appended in order, so reversing gives newest first.
        Ok(state
            .transactions
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn list(&self, user_id: Uuid) -> RepositoryResult<Vec<FavoriteTeam>> {
        let state = self.state.lock().await;
        Ok(state
            .favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add(&self, favorite: &FavoriteTeam) -> RepositoryResult<()> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&favorite.user_id) {
            return Err(RepositoryError::NotFound(favorite.user_id.to_string()));
        }
        if state
            .favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.team_id == favorite.team_id)
        {
            return Err(RepositoryError::Conflict(FAVORITE_TEAMS_KEY.to_string()));
        }
        state.favorites.push(favorite.clone());
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, team_id: &str) -> RepositoryResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.favorites.len();
        state
            .favorites
            .retain(|f| !(f.user_id == user_id && f.team_id == team_id));
        Ok(state.favorites.len() < before)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn leagues(&self, featured_only: bool) -> RepositoryResult<Vec<LeagueSummary>> {
        let state = self.state.lock().await;
        let mut leagues: Vec<&League> = state
            .leagues
            .iter()
            .filter(|l| !featured_only || l.is_featured)
            .collect();
        leagues.sort_by_key(|l| l.priority);

        Ok(leagues
            .into_iter()
            .map(|l| LeagueSummary {
                id: l.id.clone(),
                name: l.name.clone(),
                country: l.country.clone(),
                logo: l.logo.clone(),
                is_featured: l.is_featured,
                active_matches: state
                    .matches
                    .iter()
                    .filter(|m| m.league_id == l.id && m.is_active())
                    .count() as i64,
            })
            .collect())
    }

    async fn league_matches(
        &self,
        league_id: &str,
        status: Option<&str>,
    ) -> RepositoryResult<Vec<MatchView>> {
        let state = self.state.lock().await;
        Ok(collect_matches(&state, |m| {
            m.league_id == league_id && status.map_or(true, |s| m.status == s)
        }))
    }

    async fn matches(&self, filter: MatchFilter) -> RepositoryResult<Vec<MatchView>> {
        let state = self.state.lock().await;
        Ok(collect_matches(&state, |m| match &filter {
            MatchFilter::All => true,
            MatchFilter::Status(status) => &m.status == status,
            MatchFilter::Live => m.is_live,
            MatchFilter::Featured => m.is_featured,
        }))
    }

    async fn seed(&self, leagues: &[League], matches: &[Match]) -> RepositoryResult<u64> {
        let mut state = self.state.lock().await;
        let mut added = 0;
        for league in leagues {
            if !state.leagues.iter().any(|l| l.id == league.id) {
                state.leagues.push(league.clone());
                added += 1;
            }
        }
        for m in matches {
            let league_known = state.leagues.iter().any(|l| l.id == m.league_id);
            if league_known && !state.matches.iter().any(|existing| existing.id == m.id) {
                state.matches.push(m.clone());
                added += 1;
            }
        }
        Ok(added)
    }
}

fn collect_matches(state: &State, keep: impl Fn(&Match) -> bool) -> Vec<MatchView> {
    let mut views: Vec<MatchView> = state
        .matches
        .iter()
        .filter(|m| keep(m))
        .filter_map(|m| {
            state
                .leagues
                .iter()
                .find(|l| l.id == m.league_id)
                .map(|league| MatchView::new(m, league))
        })
        .collect();
    views.sort_by_key(|v| v.kickoff_time);
    views
}

impl InMemoryStore {
    /// Test hook: overwrite a bet's status, e.g. to simulate settlement.
    #[cfg(test)]
    pub(crate) async fn force_status(&self, bet_id: Uuid, status: bet::BetStatus) {
        if let Some(bet) = self.state.lock().await.bets.get_mut(&bet_id) {
            bet.status = status;
        }
    }
}
