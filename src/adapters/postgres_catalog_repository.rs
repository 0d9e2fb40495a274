//! Postgres implementation of CatalogRepository.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{League, LeagueRef, LeagueSummary, Match, MatchView};
use crate::domain::catalog::{MATCH_LIVE, MATCH_SCHEDULED};
use crate::ports::{CatalogRepository, MatchFilter, RepositoryResult};

const MATCH_VIEW_SELECT: &str = r#"
    SELECT m.id, m.home_team_id, m.home_team_name, m.home_team_logo, m.home_team_score,
        m.away_team_id, m.away_team_name, m.away_team_logo, m.away_team_score,
        m.kickoff_time, m.status, m.minute, m.home_win_odds, m.draw_odds, m.away_win_odds,
        m.is_featured, m.is_live,
        l.id AS league_id, l.name AS league_name, l.logo AS league_logo
    FROM matches m
    JOIN leagues l ON l.id = m.league_id
"#;

#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn leagues(&self, featured_only: bool) -> RepositoryResult<Vec<LeagueSummary>> {
        let rows = sqlx::query_as::<_, LeagueSummaryRow>(
            r#"
            SELECT l.id, l.name, l.country, l.logo, l.is_featured,
                COUNT(m.id) FILTER (WHERE m.status IN ($2, $3)) AS active_matches
            FROM leagues l
            LEFT JOIN matches m ON m.league_id = l.id
            WHERE ($1 = FALSE OR l.is_featured)
            GROUP BY l.id
            ORDER BY l.priority
            "#,
        )
        .bind(featured_only)
        .bind(MATCH_LIVE)
        .bind(MATCH_SCHEDULED)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LeagueSummaryRow::into_domain).collect())
    }

    async fn league_matches(
        &self,
        league_id: &str,
        status: Option<&str>,
    ) -> RepositoryResult<Vec<MatchView>> {
        let sql = format!(
            "{} WHERE m.league_id = $1 AND ($2::TEXT IS NULL OR m.status = $2) ORDER BY m.kickoff_time",
            MATCH_VIEW_SELECT
        );
        let rows = sqlx::query_as::<_, MatchViewRow>(&sql)
            .bind(league_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(MatchViewRow::into_domain).collect())
    }

    async fn matches(&self, filter: MatchFilter) -> RepositoryResult<Vec<MatchView>> {
        let (clause, status) = match filter {
            MatchFilter::All => ("TRUE", None),
            MatchFilter::Status(status) => ("m.status = $1", Some(status)),
            MatchFilter::Live => ("m.is_live", None),
            MatchFilter::Featured => ("m.is_featured", None),
        };
        let sql = format!("{} WHERE {} ORDER BY m.kickoff_time", MATCH_VIEW_SELECT, clause);

        let mut query = sqlx::query_as::<_, MatchViewRow>(&sql);
        if let Some(status) = status {
            query = query.bind(status);
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(MatchViewRow::into_domain).collect())
    }

    async fn seed(&self, leagues: &[League], matches: &[Match]) -> RepositoryResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut added = 0;

        for league in leagues {
            let result = sqlx::query(
                r#"
                INSERT INTO leagues (id, name, country, logo, is_featured, priority, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&league.id)
            .bind(&league.name)
            .bind(&league.country)
            .bind(&league.logo)
            .bind(league.is_featured)
            .bind(league.priority)
            .bind(league.created_at)
            .bind(league.updated_at)
            .execute(&mut *tx)
            .await?;
            added += result.rows_affected();
        }

        for m in matches {
            let result = sqlx::query(
                r#"
                INSERT INTO matches (
                    id, league_id, home_team_id, home_team_name, home_team_logo, home_team_score,
                    away_team_id, away_team_name, away_team_logo, away_team_score,
                    kickoff_time, status, minute, home_win_odds, draw_odds, away_win_odds,
                    is_featured, is_live, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
                ON CONFLICT (id) DO NOTHING
                "#,
            )
            .bind(&m.id)
            .bind(&m.league_id)
            .bind(&m.home_team_id)
            .bind(&m.home_team_name)
            .bind(&m.home_team_logo)
            .bind(m.home_team_score)
            .bind(&m.away_team_id)
            .bind(&m.away_team_name)
            .bind(&m.away_team_logo)
            .bind(m.away_team_score)
            .bind(m.kickoff_time)
            .bind(&m.status)
            .bind(m.minute)
            .bind(&m.home_win_odds)
            .bind(&m.draw_odds)
            .bind(&m.away_win_odds)
            .bind(m.is_featured)
            .bind(m.is_live)
            .bind(m.created_at)
            .bind(m.updated_at)
            .execute(&mut *tx)
            .await?;
            added += result.rows_affected();
        }

        tx.commit().await?;
        Ok(added)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LeagueSummaryRow {
    id: String,
    name: String,
    country: String,
    logo: String,
    is_featured: bool,
    active_matches: i64,
}

impl LeagueSummaryRow {
    fn into_domain(self) -> LeagueSummary {
        LeagueSummary {
            id: self.id,
            name: self.name,
            country: self.country,
            logo: self.logo,
            is_featured: self.is_featured,
            active_matches: self.active_matches,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MatchViewRow {
    id: String,
    home_team_id: String,
    home_team_name: String,
    home_team_logo: String,
    home_team_score: Option<i32>,
    away_team_id: String,
    away_team_name: String,
    away_team_logo: String,
    away_team_score: Option<i32>,
    kickoff_time: DateTime<Utc>,
    status: String,
    minute: Option<i32>,
    home_win_odds: BigDecimal,
    draw_odds: BigDecimal,
    away_win_odds: BigDecimal,
    is_featured: bool,
    is_live: bool,
    league_id: String,
    league_name: String,
    league_logo: String,
}

impl MatchViewRow {
    fn into_domain(self) -> MatchView {
        MatchView {
            id: self.id,
            home_team_id: self.home_team_id,
            home_team_name: self.home_team_name,
            home_team_logo: self.home_team_logo,
            home_team_score: self.home_team_score,
            away_team_id: self.away_team_id,
            away_team_name: self.away_team_name,
            away_team_logo: self.away_team_logo,
            away_team_score: self.away_team_score,
            kickoff_time: self.kickoff_time,
            status: self.status,
            minute: self.minute,
            home_win_odds: self.home_win_odds,
            draw_odds: self.draw_odds,
            away_win_odds: self.away_win_odds,
            is_featured: self.is_featured,
            is_live: self.is_live,
            league: LeagueRef {
                id: self.league_id,
                name: self.league_name,
                logo: self.league_logo,
            },
        }
    }
}
