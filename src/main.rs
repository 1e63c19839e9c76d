//! Binary entrypoint for the Orc Dungeon CLI.
//!
//! Commands:
//! - `play` - play the game (the default when no command is given)
//! - `init [--force]` - write a starter config file to the `--config` path
//! - `rules` - print the instructions and the rules in effect
//!
//! See the library crate docs for module-level details: `orc_dungeon::`.
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use orc_dungeon::config::Config;
use orc_dungeon::game::console::Console;
use orc_dungeon::game::{text, Game, SessionEnd};

#[derive(Parser)]
#[command(name = "orc-dungeon")]
#[command(about = "A small turn-based console dungeon crawler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "orc-dungeon.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game
    Play,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Show the instructions and the active rules
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let config = Config::load_or_default(&cli.config)?;
            init_logging(&Some(config.clone()), cli.verbose);
            info!("Starting Orc Dungeon v{}", env!("CARGO_PKG_VERSION"));

            let mut console = Console::new(std::io::stdin().lock(), std::io::stdout().lock());
            let mut game = Game::new(config, StdRng::from_entropy());
            match game.run(&mut console) {
                Ok(SessionEnd::Quit) => info!("Player left the dungeon"),
                Ok(SessionEnd::Escaped) => info!("Player escaped with the Magic Coin"),
                Err(e) => {
                    if let Some(code) = e.exit_code() {
                        error!("{}", e);
                        if let Some(text) = e.diagnostic() {
                            let _ = console.say(&text);
                        }
                        let _ = console.flush();
                        std::process::exit(code);
                    }
                    return Err(e).context("game session failed");
                }
            }
        }
        Commands::Init { force } => {
            init_logging(&None, cli.verbose);
            if Path::new(&cli.config).exists() && !force {
                println!(
                    "{} already exists; use --force to overwrite it.",
                    cli.config
                );
                return Ok(());
            }
            Config::create_default(&cli.config)?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote default configuration to {}", cli.config);
        }
        Commands::Rules => {
            let config = Config::load_or_default(&cli.config)?;
            init_logging(&Some(config.clone()), cli.verbose);
            println!("{}", text::rules_summary(&config));
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let configured = config
        .as_ref()
        .and_then(|cfg| cfg.logging.level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);
    let base_level = match verbosity {
        0 => configured,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.as_ref().and_then(|cfg| cfg.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));

            // The game owns stdout; only mirror file logs to a terminal when asked for with -v
            let mirror = verbosity > 0 && atty::is(atty::Stream::Stderr);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if mirror {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
            let _ = builder.try_init();
            return;
        }
        eprintln!("Could not open log file {}; logging to stderr", file);
    }

    builder.format(|fmt, record| {
        writeln!(
            fmt,
            "{} [{}] {}",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
            record.level(),
            record.args()
        )
    });
    let _ = builder.try_init();
}
