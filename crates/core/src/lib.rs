//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules engine: the board, the piece templates, the active
//! piece controller, the hold/next queue and the gravity loop. It has **no dependencies**
//! on terminals, input devices or wall time:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule is a plain method on [`GameState`]
//! - **Portable**: renderers read a [`GameSnapshot`] and drain events; they never call back
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision queries, locking and line clearing
//! - [`pieces`]: shape matrices for the seven pieces and the rotation transform
//! - [`rng`]: uniform random piece selection
//! - [`game_state`]: active piece, hold/next queue, scoring, gravity and game over
//! - [`clock`]: elapsed-time sources that drive [`GameState::advance`]
//! - [`snapshot`]: read-only state for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every piece has a 1/7 chance on every draw, no bag
//! - **Rotation**: clockwise only, in place, rejected outright when blocked (no kicks)
//! - **Gravity**: one row per 1000ms; a piece that cannot fall locks on the same tick
//! - **Hold**: once per lock cycle, the held piece comes back unrotated at spawn
//! - **Scoring**: 100 points per cleared line, linear
//! - **Game over**: a blocked spawn empties the board and resets the score, then play goes on
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, GameEvent};
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The dropped piece is now part of the board.
//! assert!(!game.board().is_empty());
//! assert!(game.drain_events().any(|e| matches!(e, GameEvent::Cell(_))));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] once per frame with the elapsed milliseconds (or
//! [`GameState::advance`] with a [`Clock`]). Player actions are applied between ticks and
//! never touch the gravity accumulator.

pub mod board;
pub mod clock;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use clock::{Clock, ManualClock, SystemClock};
pub use game_state::{GameConfig, GameState, LockOutcome, SpawnOutcome, Tetromino, TickOutcome};
pub use pieces::{get_shape, spawn_x, Shape};
pub use rng::PieceCatalog;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
