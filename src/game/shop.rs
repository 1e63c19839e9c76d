//! The shop, reachable from the combat menu. One purchase attempt per visit.

use std::io::{BufRead, Write};

use log::{debug, info};

use super::console::Console;
use super::dungeon::Player;
use super::errors::GameError;
use super::text;
use crate::config::{Config, GameRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Health,
    Attack,
    MagicCoin,
}

impl Item {
    /// Classic menu mapping: anything that is not 1 or 2 falls through to the Magic Coin.
    pub fn from_choice(choice: Option<i64>) -> Item {
        match choice {
            Some(1) => Item::Health,
            Some(2) => Item::Attack,
            _ => Item::MagicCoin,
        }
    }

    /// Menu mapping that only accepts the listed numbers.
    pub fn from_choice_strict(choice: Option<i64>) -> Option<Item> {
        match choice {
            Some(1) => Some(Item::Health),
            Some(2) => Some(Item::Attack),
            Some(3) => Some(Item::MagicCoin),
            _ => None,
        }
    }

    pub fn cost(self, rules: &GameRules) -> i32 {
        match self {
            Item::Health | Item::Attack => rules.upgrade_cost,
            Item::MagicCoin => rules.magic_coin_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Health { from: i32, to: i32 },
    Attack { from: i32, to: i32 },
    /// The Magic Coin was bought: the game is won.
    MagicCoin,
    /// Not enough coins; nothing changed.
    Refused(Item),
}

/// Try to buy `item`, charging the player only when they can afford it.
pub fn purchase(rules: &GameRules, player: &mut Player, item: Item) -> Purchase {
    let cost = item.cost(rules);
    if !player.can_afford(cost) {
        return Purchase::Refused(item);
    }
    player.coins -= cost;
    match item {
        Item::Health => {
            let from = player.health;
            player.health += rules.health_upgrade;
            Purchase::Health {
                from,
                to: player.health,
            }
        }
        Item::Attack => {
            let from = player.attack;
            player.attack += rules.attack_upgrade;
            Purchase::Attack {
                from,
                to: player.attack,
            }
        }
        Item::MagicCoin => Purchase::MagicCoin,
    }
}

/// Show the shop, read one choice and apply it.
pub fn visit<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
    player: &mut Player,
) -> Result<Purchase, GameError> {
    console.blank(1)?;
    let item = loop {
        console.say(&text::shop_menu(player.coins, &config.rules, &config.quirks))?;
        let choice = console.prompt_number(text::SHOP_PROMPT)?;
        if config.quirks.permissive_menus {
            break Item::from_choice(choice);
        }
        match Item::from_choice_strict(choice) {
            Some(item) => break item,
            None => debug!("shop: rejected choice {:?}", choice),
        }
    };

    let outcome = purchase(&config.rules, player, item);
    match outcome {
        Purchase::Health { from, to } => {
            console.say(&format!("Health upgraded from {} to {}", from, to))?;
        }
        Purchase::Attack { from, to } => {
            // The classic shop announces +1 whatever it actually grants.
            let shown = if config.quirks.honest_shop_labels {
                to
            } else {
                from + 1
            };
            console.say(&format!("Attack upgraded from {} to {}", from, shown))?;
        }
        Purchase::MagicCoin => {
            console.say(text::escape_text())?;
            console.blank(6)?;
        }
        Purchase::Refused(_) => {
            console.say(text::NOT_ENOUGH_COINS)?;
        }
    }
    info!("shop: {:?} -> {:?} (coins left {})", item, outcome, player.coins);
    Ok(outcome)
}
