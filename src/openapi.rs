use axum::Json;
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::domain::{Bet, BetStatus, LeagueRef, LeagueSummary, MatchView, Transaction, UserProfile};
use crate::handlers;
use crate::health::HealthResponse;
use crate::services::football::{
    LeagueStatsDto, MatchDto, MatchOddsDto, Player, PlayerSearchResponse, PlayerStatsDto, TeamDto,
    TeamInfo, TeamStatsDto, TopScorer,
};
use crate::services::rankings::RankingEntry;
use crate::services::AuthSession;

#[derive(OpenApi)]
#[openapi(
    info(title = "FootballX API", description = "Virtual-coin football betting"),
    paths(
        handlers::health,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::change_password,
        handlers::users::me,
        handlers::users::list_favorites,
        handlers::users::add_favorite,
        handlers::users::remove_favorite,
        handlers::bets::user_bets,
        handlers::bets::place_bet,
        handlers::bets::cashout,
        handlers::transactions::user_transactions,
        handlers::football::search_players,
        handlers::football::live,
        handlers::football::upcoming,
        handlers::football::teams,
        handlers::football::team_stats,
        handlers::football::player_stats,
        handlers::football::league_stats,
        handlers::catalog::leagues,
        handlers::catalog::featured_leagues,
        handlers::catalog::league_matches,
        handlers::catalog::matches,
        handlers::catalog::live_matches,
        handlers::catalog::featured_matches,
        handlers::rankings::sorted,
    ),
    components(schemas(
        HealthResponse,
        AuthSession,
        UserProfile,
        Bet,
        BetStatus,
        Transaction,
        LeagueSummary,
        LeagueRef,
        MatchView,
        MatchDto,
        TeamDto,
        MatchOddsDto,
        TeamInfo,
        TeamStatsDto,
        PlayerStatsDto,
        LeagueStatsDto,
        TopScorer,
        Player,
        PlayerSearchResponse,
        RankingEntry,
        handlers::auth::RegisterRequest,
        handlers::auth::LoginRequest,
        handlers::auth::ChangePasswordRequest,
        handlers::auth::MessageResponse,
        handlers::users::AddFavoriteRequest,
        handlers::bets::PlaceBetRequest,
        handlers::bets::CashoutResponse,
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_money_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/bets"));
        assert!(doc.paths.paths.contains_key("/api/bets/{id}/cashout"));
        assert!(doc.paths.paths.contains_key("/api/userrankings/sorted"));
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
