pub mod auth;
pub mod favorites;
pub mod football;
pub mod rankings;

pub use auth::{AuthError, AuthService, AuthSession, TokenIssuer};
pub use favorites::{FavoritesError, FavoritesService};
pub use football::{FootballDataProvider, MockFootballData};
