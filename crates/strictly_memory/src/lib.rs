//! Strictly Memory - a type-safe concentration game engine.
//!
//! A rectangular grid of face-down cards. Players turn cards over two at a
//! time; equal pairs stay face up, unequal pairs wait for an explicit
//! resolve before they turn back down.
//!
//! # Architecture
//!
//! - **Session**: the board plus the pick cursor, all-or-nothing operations
//! - **Contracts**: preconditions that produce caller errors, debug-only postconditions
//! - **Invariants**: first-class properties checked after every transition
//! - **View**: client-safe snapshots that never leak face-down values
//! - **Board files**: `ROWSxCOLS` header followed by one card per line
//!
//! # Example
//!
//! ```
//! use strictly_memory::Session;
//!
//! # fn example() -> Result<(), strictly_memory::SessionError> {
//! let mut session = Session::create(1, 2, ["A", "A"])?;
//! session.pick(0, 0)?;
//! let result = session.pick(0, 1)?;
//! assert_eq!(result.matched(), Some(true));
//! assert!(session.is_complete());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod board_file;
mod contracts;
mod error;
mod session;
mod types;
mod view;

pub mod invariants;

// Crate-level exports - Core types
pub use types::{CardValue, Cell, CellState, Coord, PendingPicks};

// Crate-level exports - Board and session
pub use board::Board;
pub use session::Session;

// Crate-level exports - Actions and results
pub use action::{Pick, PickOutcome, PickResult, Resolve, ResolveResult};

// Crate-level exports - Errors
pub use error::SessionError;

// Crate-level exports - Contracts
pub use contracts::{
    Contract, FaceDownTarget, InBounds, LegalPick, NoPairAwaiting, PickContract, ResolveContract,
};

// Crate-level exports - Views and board files
pub use board_file::{BoardSpec, ParseError};
pub use view::{BoardView, CellView};
