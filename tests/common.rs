//! Test utilities: run a whole scripted session against in-memory console buffers.

use orc_dungeon::config::{Config, GameRules};
use orc_dungeon::game::console::Console;
use orc_dungeon::game::{Game, GameError, SessionEnd};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of a scripted session.
pub struct Transcript {
    pub end: Result<SessionEnd, GameError>,
    pub output: String,
    pub rooms_cleared: u32,
}

/// Play `input` line by line with a seeded random source.
pub fn play_script(config: Config, seed: u64, input: &str) -> Transcript {
    let mut console = Console::new(input.as_bytes(), Vec::new());
    let mut game = Game::new(config, StdRng::seed_from_u64(seed));
    let end = game.run(&mut console);
    let rooms_cleared = game.rooms_cleared();
    let output = String::from_utf8(console.into_output()).expect("game output is utf-8");
    Transcript {
        end,
        output,
        rooms_cleared,
    }
}

/// Default config with some rules replaced.
pub fn config_with(rules: GameRules) -> Config {
    Config {
        rules,
        ..Config::default()
    }
}
