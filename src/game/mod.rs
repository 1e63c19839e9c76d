//! # Game Core Module
//!
//! Everything that happens between the replay prompt and the end of the program.
//!
//! ## Components
//!
//! - [`session`] - replay prompt, runs and the per-room loop
//! - [`dungeon`] - player, room and enemy construction
//! - [`combat`] - the player/enemy turn state machine
//! - [`shop`] - upgrades and the Magic Coin
//! - [`console`] - blocking line input and text output
//! - [`text`] - fixed game text and menus
//! - [`errors`] - the unrecoverable error kinds
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────────┐
//! │  Session Loop   │ ← play? y/n, owns rooms_cleared
//! └─────────────────┘
//!          │ per room
//! ┌─────────────────┐
//! │  Room / Enemy   │ ← loot rolls, sawtooth enemy stats
//! └─────────────────┘
//!          │
//! ┌─────────────────┐      ┌──────┐
//! │  Combat         │ ───► │ Shop │
//! └─────────────────┘      └──────┘
//! ```
//!
//! All randomness comes from the generator handed to [`session::Game::new`], so tests can
//! seed it and replay a fight exactly.

pub mod combat;
pub mod console;
pub mod dungeon;
pub mod errors;
pub mod session;
pub mod shop;
pub mod text;

pub use errors::{Entity, GameError};
pub use session::{Game, SessionEnd};
