//! Framework-agnostic domain entities and rules.

pub mod bet;
pub mod catalog;
pub mod favorite;
pub mod money;
pub mod transaction;
pub mod user;

pub use bet::{Bet, BetSlip, BetStatus, BettingError, CashoutReceipt, Placement};
pub use catalog::{League, LeagueRef, LeagueSummary, Match, MatchView};
pub use favorite::FavoriteTeam;
pub use transaction::Transaction;
pub use user::{User, UserProfile};
