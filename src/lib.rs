pub mod adapters;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod openapi;
pub mod ports;
pub mod services;
pub mod startup;
pub mod use_cases;
pub mod utils;
pub mod validation;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::adapters::{
    InMemoryStore, PostgresCatalogRepository, PostgresFavoriteRepository, PostgresLedgerRepository,
    PostgresUserRepository,
};
use crate::config::{AllowedOrigins, Config};
use crate::health::{DependencyChecker, FootballDataChecker, InMemoryChecker, PostgresChecker};
use crate::middleware::request_logger::{request_logger_middleware, RequestLogConfig};
use crate::ports::{CatalogRepository, FavoriteRepository, LedgerRepository, UserRepository};
use crate::services::{
    AuthService, FavoritesService, FootballDataProvider, MockFootballData, TokenIssuer,
};
use crate::use_cases::{CashoutBet, PlaceBet};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub football: Arc<dyn FootballDataProvider>,
    pub auth: Arc<AuthService>,
    pub favorites: Arc<FavoritesService>,
    pub place_bet: Arc<PlaceBet>,
    pub cashout_bet: Arc<CashoutBet>,
    pub health_checkers: Arc<[Arc<dyn DependencyChecker>]>,
    pub start_time: Instant,
}

/// The storage ports an [`AppState`] is assembled from.
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub storage_checker: Arc<dyn DependencyChecker>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            ledger: Arc::new(PostgresLedgerRepository::new(pool.clone())),
            favorites: Arc::new(PostgresFavoriteRepository::new(pool.clone())),
            catalog: Arc::new(PostgresCatalogRepository::new(pool.clone())),
            storage_checker: Arc::new(PostgresChecker::new(pool)),
        }
    }

    /// Non-durable storage for demos and tests.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            ledger: store.clone(),
            favorites: store.clone(),
            catalog: store,
            storage_checker: Arc::new(InMemoryChecker),
        }
    }
}

impl AppState {
    pub fn new(repositories: Repositories, football: Arc<dyn FootballDataProvider>, config: &Config) -> Self {
        let tokens = TokenIssuer::new(&config.jwt);
        let health_checkers: Vec<Arc<dyn DependencyChecker>> = vec![
            repositories.storage_checker,
            Arc::new(FootballDataChecker::new(football.clone())),
        ];

        Self {
            auth: Arc::new(AuthService::new(
                repositories.users.clone(),
                tokens,
                config.bcrypt_cost,
            )),
            favorites: Arc::new(FavoritesService::new(repositories.favorites)),
            place_bet: Arc::new(PlaceBet::new(repositories.ledger.clone())),
            cashout_bet: Arc::new(CashoutBet::new(repositories.ledger.clone())),
            users: repositories.users,
            ledger: repositories.ledger,
            catalog: repositories.catalog,
            football,
            health_checkers: health_checkers.into(),
            start_time: Instant::now(),
        }
    }

    pub fn postgres(pool: PgPool, config: &Config) -> Self {
        Self::new(Repositories::postgres(pool), Arc::new(MockFootballData::new()), config)
    }

    pub fn in_memory(config: &Config) -> Self {
        Self::new(Repositories::in_memory(), Arc::new(MockFootballData::new()), config)
    }
}

pub fn create_app(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/change-password", post(handlers::auth::change_password))
        .route("/users/me", get(handlers::users::me))
        .route(
            "/users/favorites",
            get(handlers::users::list_favorites).post(handlers::users::add_favorite),
        )
        .route("/users/favorites/:team_id", delete(handlers::users::remove_favorite))
        .route("/bets", post(handlers::bets::place_bet))
        .route("/bets/user", get(handlers::bets::user_bets))
        .route("/bets/:id/cashout", post(handlers::bets::cashout))
        .route("/transactions/user", get(handlers::transactions::user_transactions))
        .route("/football/players/search", get(handlers::football::search_players))
        .route("/football/live", get(handlers::football::live))
        .route("/football/upcoming", get(handlers::football::upcoming))
        .route("/football/teams", get(handlers::football::teams))
        .route("/football/stats", get(handlers::football::team_stats))
        .route("/football/playerstats", get(handlers::football::player_stats))
        .route("/football/leaguestats", get(handlers::football::league_stats))
        .route("/leagues", get(handlers::catalog::leagues))
        .route("/leagues/featured", get(handlers::catalog::featured_leagues))
        .route("/leagues/:league_id/matches", get(handlers::catalog::league_matches))
        .route("/matches", get(handlers::catalog::matches))
        .route("/matches/live", get(handlers::catalog::live_matches))
        .route("/matches/featured", get(handlers::catalog::featured_matches))
        .route("/userrankings/sorted", get(handlers::rankings::sorted));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .nest("/api", api)
        .layer(axum::middleware::from_fn_with_state(
            RequestLogConfig {
                log_body: config.log_request_body,
            },
            request_logger_middleware,
        ))
        .layer(cors_layer(&config.cors_allowed_origins))
        .with_state(state)
}

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok())
                .collect();
            layer.allow_origin(AllowOrigin::list(values)).allow_credentials(true)
        }
    }
}
