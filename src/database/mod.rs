pub mod assignments;
pub mod availability;
pub mod connection;
pub mod matches;
pub mod referees;
pub mod setup;
pub mod stores;
pub mod tariffs;

pub use connection::{DbConn, DbPool, create_pool, get_connection};
pub use stores::SqliteStore;
