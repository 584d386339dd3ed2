//! Coup - a turn-based elimination game engine
//!
//! This crate provides the core rules for a Coup variant in which every
//! player holds one of six roles, including:
//! - Player state, coins and per-turn flags
//! - Role-specific abilities and reactions
//! - Turn order, elimination bookkeeping and coup resolution
//!
//! # Architecture
//!
//! The [`Game`] owns every player. Drivers (a terminal client, a GUI) address
//! players by [`PlayerId`] and submit [`GameAction`]s; each accepted action
//! returns the [`GameEvent`]s it produced, and each rejected one returns a
//! [`GameError`] without touching the game state.
//!
//! ```
//! use coup_core::{Game, Role};
//!
//! let mut game = Game::new();
//! let anna = game.add_player("Anna", Role::Governor).unwrap();
//! let ben = game.add_player("Ben", Role::Spy).unwrap();
//!
//! game.tax(anna).unwrap();
//! assert_eq!(game.coins(anna), Ok(3));
//! assert_eq!(game.turn(), Ok("Ben"));
//! assert!(game.gather(anna).is_err());
//! # let _ = ben;
//! ```
//!
//! # Modules
//!
//! - [`role`]: The six roles
//! - [`player`]: Player state and role reactions
//! - [`actions`]: Actions and the events they produce
//! - [`rules`]: Tunable coin amounts and thresholds
//! - [`game`]: Game state machine

pub mod actions;
pub mod game;
pub mod player;
pub mod role;
pub mod rules;

// Re-export commonly used types
pub use actions::{ActionTag, GameAction, GameEvent};
pub use game::{ErrorKind, Game, GameError};
pub use player::{Player, PlayerId};
pub use role::Role;
pub use rules::{Rules, RulesError, MAX_PLAYERS};
