//! Strictly Memory server - REST transport and callers for the memory game.
//!
//! # Architecture
//!
//! - **Session**: one shared game behind a mutex
//! - **Server**: axum routes for new game, pick, resolve, and board reads
//! - **Client**: typed REST client for a running server
//! - **Players**: automated players that choose cards from a board view
//! - **Runner**: plays a board to completion through any backend
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use strictly_server::{LocalBackend, RecallPlayer, read_board_file, run_game};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let spec = read_board_file("boards/animals.txt")?;
//! let backend = LocalBackend::default();
//! let mut player = RecallPlayer::new("recall");
//! let summary = run_game(&backend, &mut player, &spec, Duration::ZERO).await?;
//! println!("{} mismatches", summary.mismatches());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod backend;
mod client;
mod config;
mod error;
mod players;
mod runner;
mod server;
mod session;

pub mod api;

// Crate-level exports - Configuration
pub use config::{ConfigError, HOST_VAR, PLAIN_PORT_VAR, PORT_VAR, ServerConfig};

// Crate-level exports - Errors
pub use error::ServerError;

// Crate-level exports - Session management
pub use session::SessionManager;

// Crate-level exports - Server
pub use server::{router, serve, serve_on};

// Crate-level exports - Client and backends
pub use backend::{GameBackend, LocalBackend};
pub use client::RestGameClient;

// Crate-level exports - Players and runner
pub use players::{Player, RecallPlayer};
pub use runner::{GameSummary, read_board_file, run_game, run_game_with};
