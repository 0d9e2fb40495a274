//! Default league and match catalog, built from the mock football fixtures
//! so listings and `/api/football` agree.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::catalog::{MATCH_LIVE, MATCH_SCHEDULED};
use crate::domain::money::from_cents;
use crate::domain::{League, Match};
use crate::ports::{CatalogRepository, RepositoryResult};
use crate::services::football::mock::{league_logo, team_logo, FIXTURES, LEAGUES};

/// Leagues listed first on the home page.
const FEATURED_LEAGUES: &[&str] = &["Premier League", "La Liga", "Champions League"];

pub fn league_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

pub fn default_catalog(today: NaiveDate) -> (Vec<League>, Vec<Match>) {
    let now = Utc::now();

    let leagues = LEAGUES
        .iter()
        .enumerate()
        .map(|(i, (name, region, _))| League {
            id: league_id(name),
            name: name.to_string(),
            country: region.to_string(),
            logo: league_logo(name),
            is_featured: FEATURED_LEAGUES.contains(name),
            priority: i as i32 + 1,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let matches = FIXTURES
        .iter()
        .map(|f| {
            let time = NaiveTime::parse_from_str(f.time, "%H:%M").unwrap_or(NaiveTime::MIN);
            let is_live = f.minute.is_some();
            Match {
                id: f.id.to_string(),
                league_id: league_id(f.tournament),
                home_team_id: f.home.id.to_string(),
                home_team_name: f.home.name.to_string(),
                home_team_logo: team_logo(f.home.name),
                home_team_score: f.home.score,
                away_team_id: f.away.id.to_string(),
                away_team_name: f.away.name.to_string(),
                away_team_logo: team_logo(f.away.name),
                away_team_score: f.away.score,
                kickoff_time: Utc.from_utc_datetime(&f.date(today).and_time(time)),
                status: if is_live { MATCH_LIVE } else { MATCH_SCHEDULED }.to_string(),
                minute: f.minute,
                home_win_odds: from_cents(f.odds.0),
                draw_odds: from_cents(f.odds.1),
                away_win_odds: from_cents(f.odds.2),
                is_featured: is_live || f.tournament == "Champions League",
                is_live,
                created_at: now,
                updated_at: now,
            }
        })
        .collect();

    (leagues, matches)
}

/// Inserts the default catalog rows that are missing. Safe to run on every start.
pub async fn seed_catalog(catalog: &dyn CatalogRepository) -> RepositoryResult<u64> {
    let (leagues, matches) = default_catalog(Utc::now().date_naive());
    let inserted = catalog.seed(&leagues, &matches).await?;
    tracing::info!(inserted, "Catalog seeded");
    Ok(inserted)
}
