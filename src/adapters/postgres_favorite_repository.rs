//! Postgres implementation of FavoriteRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::FavoriteTeam;
use crate::ports::{FavoriteRepository, RepositoryResult};

#[derive(Clone)]
pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn list(&self, user_id: Uuid) -> RepositoryResult<Vec<FavoriteTeam>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT id, user_id, team_id, created_at FROM favorite_teams WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FavoriteRow::into_domain).collect())
    }

    async fn add(&self, favorite: &FavoriteTeam) -> RepositoryResult<()> {
        sqlx::query(
            "INSERT INTO favorite_teams (id, user_id, team_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(favorite.id)
        .bind(favorite.user_id)
        .bind(&favorite.team_id)
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, user_id: Uuid, team_id: &str) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM favorite_teams WHERE user_id = $1 AND team_id = $2")
            .bind(user_id)
            .bind(team_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    id: Uuid,
    user_id: Uuid,
    team_id: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl FavoriteRow {
    fn into_domain(self) -> FavoriteTeam {
        FavoriteTeam {
            id: self.id,
            user_id: self.user_id,
            team_id: self.team_id,
            created_at: self.created_at,
        }
    }
}
