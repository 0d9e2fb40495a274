//! Favourite teams. The team catalog is static; only the user/team pairs
//! are stored.

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::FavoriteTeam;
use crate::ports::{FavoriteRepository, RepositoryError};
use crate::services::football::TeamInfo;

/// `(id, name, league, league logo)`
const TEAMS: &[(&str, &str, &str, &str)] = &[
    ("mci", "Manchester City", "Premier League", "pl.svg"),
    ("ars", "Arsenal", "Premier League", "pl.svg"),
    ("liv", "Liverpool", "Premier League", "pl.svg"),
    ("mad", "Real Madrid", "La Liga", "laliga.svg"),
    ("bar", "Barcelona", "La Liga", "laliga.svg"),
    ("bay", "Bayern Munich", "Bundesliga", "bundesliga.svg"),
];

pub fn find_team(team_id: &str) -> Option<TeamInfo> {
    TEAMS
        .iter()
        .find(|(id, _, _, _)| *id == team_id)
        .map(|(id, name, league, league_logo)| TeamInfo {
            id: id.to_string(),
            name: name.to_string(),
            logo: format!("{}.svg", id),
            league: league.to_string(),
            league_logo: league_logo.to_string(),
        })
}

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Invalid team ID")]
    UnknownTeam,

    #[error("Team already in favorites")]
    AlreadyFavorite,

    #[error("Team not found in favorites")]
    NotFavorite,

    #[error("User not found")]
    UserNotFound,

    #[error(transparent)]
    Repository(RepositoryError),
}

pub struct FavoritesService {
    repository: Arc<dyn FavoriteRepository>,
}

impl FavoritesService {
    pub fn new(repository: Arc<dyn FavoriteRepository>) -> Self {
        Self { repository }
    }

    /// Oldest first. Stored ids that are no longer in the catalog are skipped.
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<TeamInfo>, FavoritesError> {
        let favorites = self
            .repository
            .list(user_id)
            .await
            .map_err(FavoritesError::Repository)?;

        Ok(favorites
            .iter()
            .filter_map(|f| find_team(&f.team_id))
            .collect())
    }

    pub async fn add(&self, user_id: Uuid, team_id: &str) -> Result<TeamInfo, FavoritesError> {
        let team = find_team(team_id.trim()).ok_or(FavoritesError::UnknownTeam)?;

        self.repository
            .add(&FavoriteTeam::new(user_id, team.id.clone()))
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => FavoritesError::AlreadyFavorite,
                RepositoryError::NotFound(_) => FavoritesError::UserNotFound,
                // Postgres reports a missing user as a foreign key violation.
                RepositoryError::Database(sqlx::Error::Database(db))
                    if db.is_foreign_key_violation() =>
                {
                    FavoritesError::UserNotFound
                }
                other => FavoritesError::Repository(other),
            })?;

        tracing::info!(user_id = %user_id, team_id = %team.id, "Favorite team added");
        Ok(team)
    }

    pub async fn remove(&self, user_id: Uuid, team_id: &str) -> Result<(), FavoritesError> {
        let removed = self
            .repository
            .remove(user_id, team_id)
            .await
            .map_err(FavoritesError::Repository)?;

        if !removed {
            return Err(FavoritesError::NotFavorite);
        }

        tracing::info!(user_id = %user_id, team_id = %team_id, "Favorite team removed");
        Ok(())
    }
}
