//! Strictly Sodas terminal front-end.
//!
//! Wires the [`strictly_sodas`] engine to a SQLite-backed store, a TOML
//! configuration and a ratatui interface.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod db;
mod tui;

// Crate-level exports - Command line and configuration
pub use cli::Cli;
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Persistence
pub use db::{DbError, KvEntry, NewKvEntry, SqliteStore};

// Crate-level exports - Terminal UI
pub use tui::{
    App, Cursor, Direction, Focus, HitMap, KeyAction, SessionGame, key_action, new_game,
    open_store, run,
};
