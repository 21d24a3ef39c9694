//! SQLite persistence for the game's key-value state.

mod error;
mod models;
mod schema;
mod store;

pub use error::DbError;
pub use models::{KvEntry, NewKvEntry};
pub use store::SqliteStore;
