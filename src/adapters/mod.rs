//! Implementations of the persistence ports.

pub mod memory;
pub mod postgres_catalog_repository;
pub mod postgres_favorite_repository;
pub mod postgres_ledger_repository;
pub mod postgres_user_repository;

pub use memory::InMemoryStore;
pub use postgres_catalog_repository::PostgresCatalogRepository;
pub use postgres_favorite_repository::PostgresFavoriteRepository;
pub use postgres_ledger_repository::PostgresLedgerRepository;
pub use postgres_user_repository::PostgresUserRepository;
