//! The outer game loop: replay prompt, runs, and the rooms inside a run.
//!
//! A [`Game`] lives for the whole program. It owns the configuration, the random source and
//! the `rooms_cleared` counter. The counter is deliberately not reset between runs, so a new
//! player meets Orcs at whatever point of the difficulty cycle the previous run reached.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use orc_dungeon::config::Config;
//! use orc_dungeon::game::console::Console;
//! use orc_dungeon::game::session::Game;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<(), orc_dungeon::game::GameError> {
//!     let mut console = Console::new(std::io::stdin().lock(), std::io::stdout().lock());
//!     let mut game = Game::new(Config::default(), StdRng::from_entropy());
//!     game.run(&mut console)?;
//!     Ok(())
//! }
//! ```

use std::io::{BufRead, Write};

use log::{debug, info, warn};
use rand::Rng;

use super::combat::{self, CombatOutcome};
use super::console::Console;
use super::dungeon::{Enemy, Player, Room, ORC};
use super::errors::GameError;
use super::text;
use crate::config::Config;

/// How the whole program ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The player answered 'n' or the input closed.
    Quit,
    /// The Magic Coin was bought.
    Escaped,
}

/// How a single run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Died,
    Escaped,
}

/// What happened in one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomReport {
    pub room: Room,
    pub outcome: CombatOutcome,
}

pub struct Game<G> {
    config: Config,
    rng: G,
    rooms_cleared: u32,
}

impl<G: Rng> Game<G> {
    pub fn new(config: Config, rng: G) -> Self {
        Game {
            config,
            rng,
            rooms_cleared: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rooms_cleared(&self) -> u32 {
        self.rooms_cleared
    }

    /// Print the intro, then offer runs until the player says no or escapes.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<SessionEnd, GameError> {
        console.blank(3)?;
        console.say(text::instructions())?;
        let end = loop {
            match ask_to_play(console) {
                Ok(true) => {}
                Ok(false) => break SessionEnd::Quit,
                Err(GameError::InputClosed) => {
                    info!("input closed at the play prompt");
                    break SessionEnd::Quit;
                }
                Err(e) => return Err(e),
            }
            match self.play_run(console) {
                Ok(RunEnd::Died) => continue,
                Ok(RunEnd::Escaped) => break SessionEnd::Escaped,
                Err(GameError::InputClosed) => {
                    warn!("input closed in the middle of a run");
                    break SessionEnd::Quit;
                }
                Err(e) => return Err(e),
            }
        };
        console.flush()?;
        info!(
            "session over: {:?} with {} rooms cleared",
            end, self.rooms_cleared
        );
        Ok(end)
    }

    /// One life: rooms back to back until the player dies or escapes.
    pub fn play_run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<RunEnd, GameError> {
        let mut player = Player::new(&self.config.rules)?;
        info!("run started at room {}", self.rooms_cleared + 1);
        while player.is_alive() {
            let report = self.play_room(console, &mut player)?;
            if report.outcome == CombatOutcome::Escaped {
                return Ok(RunEnd::Escaped);
            }
        }
        console.say(&format!(
            "\nThe {} has killed you! You cleared {} rooms.",
            ORC, self.rooms_cleared
        ))?;
        info!("run ended in death after {} rooms", self.rooms_cleared);
        Ok(RunEnd::Died)
    }

    /// Build the next room and its enemy, fight, and pay out the loot if it was earned.
    pub fn play_room<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        player: &mut Player,
    ) -> Result<RoomReport, GameError> {
        let room = Room::generate(&self.config.rules, &mut self.rng)?;
        let mut enemy = Enemy::for_room(&self.config.rules, self.rooms_cleared)?;
        debug!(
            "room {}: {:?}, enemy HP {} ATK {}",
            self.rooms_cleared + 1,
            room,
            enemy.health,
            enemy.attack
        );

        console.blank(1)?;
        console.say(&format!("\nYou have entered room {}", self.rooms_cleared + 1))?;
        let outcome = if room.has_enemy {
            console.say(&format!("An {} blocks your path!", enemy.name))?;
            console.say(&format!(
                "There are {} coins and {} potions in this room",
                room.coins, room.potions
            ))?;
            combat::resolve(console, &self.config, player, &mut enemy, &mut self.rng)?
        } else {
            console.say(&format!("There are no {}s in this room", enemy.name))?;
            CombatOutcome::RoomWon
        };

        match outcome {
            CombatOutcome::RoomWon => {
                self.rooms_cleared += 1;
                player.loot(&room, &self.config.rules);
            }
            CombatOutcome::PlayerFled => {
                self.rooms_cleared += 1;
            }
            CombatOutcome::PlayerDead | CombatOutcome::Escaped => {}
        }
        Ok(RoomReport { room, outcome })
    }
}

/// Ask until the first character of the answer is 'y' or 'n' (either case).
pub fn ask_to_play<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<bool, GameError> {
    console.blank(1)?;
    let answer = loop {
        let line = console.prompt(text::PLAY_PROMPT)?;
        match line.chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => break true,
            Some('n') => break false,
            _ => continue,
        }
    };
    console.blank(5)?;
    Ok(answer)
}
