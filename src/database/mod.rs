pub mod connection;
pub mod models;
pub mod setup;

pub use connection::{DbConn, DbPool, create_pool, get_connection, open_connection};
pub use models::*;
