//! Money-moving operations. Each validates its input and delegates the
//! atomic read-modify-write to the ledger repository.

pub mod cashout_bet;
pub mod place_bet;

use thiserror::Error;

use crate::ports::RepositoryError;
use crate::validation::ValidationError;

pub use cashout_bet::CashoutBet;
pub use place_bet::{PlaceBet, PlaceBetInput};

#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
