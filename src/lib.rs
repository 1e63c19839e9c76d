//! # Orc Dungeon - a small turn-based console dungeon crawler
//!
//! Walk from room to room, each guarded by an Orc. Fight, block, shop or run; collect coins and
//! potions from every room you clear; buy the Magic Coin to escape the caves for good.
//!
//! ## Features
//!
//! - **Classic rules**: the Orc Dungeon numbers by default, every one of them configurable.
//! - **Sawtooth difficulty**: Orcs grow stronger each room and reset every five rooms.
//! - **Shop**: health and attack upgrades mid-fight, plus the game-winning Magic Coin.
//! - **Quirk switches**: keep or fix the classic game's permissive menus and shop labels.
//! - **Testable core**: console and random source are injected, so whole sessions can be
//!   scripted and replayed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orc_dungeon::config::Config;
//! use orc_dungeon::game::console::Console;
//! use orc_dungeon::game::Game;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("orc-dungeon.toml")?;
//!     let mut console = Console::new(std::io::stdin().lock(), std::io::stdout().lock());
//!     let mut game = Game::new(config, StdRng::from_entropy());
//!     game.run(&mut console)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`game`] - session loop, rooms, combat, shop and console
//! - [`config`] - configuration loading and defaults
//! - [`logutil`] - helpers for logging raw player input

pub mod config;
pub mod game;
pub mod logutil;
