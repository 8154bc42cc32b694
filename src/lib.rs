pub mod database;
pub mod errors;
pub mod ranking;
pub mod repository;

pub use database::models::{Player, Tournament};
pub use errors::{RepositoryError, RepositoryResult};
pub use repository::{DirectPlayerRepository, PlayerRepository, PooledPlayerRepository};
