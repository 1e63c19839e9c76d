//! Fixed game text: intro, prompts, menus and the escape ending.

use crate::config::{Config, GameRules, QuirksConfig};

use super::dungeon::{Enemy, Player};

pub const PLAY_PROMPT: &str = "Would you like to play the game? (y or n): ";
pub const ACTION_PROMPT: &str = "What do you want to do? ";
pub const SHOP_PROMPT: &str = "What would you like to buy? ";
pub const NOT_ENOUGH_COINS: &str = "You do not have enough coins for that item";

/// Printed once at startup.
pub fn instructions() -> &'static str {
    "Welcome to the Orc Dungeon!\n\
\n\
In this game you will have to progress through a series\n\
of rooms. Most rooms will have an Orc that you must defeat\n\
Every few rooms, your health and attack will level up\n\
Every room you have a chance to receive coins and potions\n\
Potions will heal you slightly and coins can be used to buy\n\
health upgrades and attack upgrades."
}

pub fn escape_text() -> &'static str {
    "You purchased a \"Magic Coin\". Looking closely, you\n\
can see the word \"Escape\" on the back of the coin.\n\
You feel your body rising through the ground as you\n\
finally escape the caves."
}

/// Stats and the four combat options, shown before every player action.
pub fn combat_menu(player: &Player, enemy: &Enemy) -> String {
    format!(
        "\nPlayer HP: {:2}  ATK: {:2}  ${}\nEnemy  HP: {:2}  ATK: {:2}\nAttack: 1   Block:    2\nShop:   3   Run Away: 4",
        player.health, player.attack, player.coins, enemy.health, enemy.attack
    )
}

/// The shop list. The classic labels advertise 20 coins and +1 Attack although the shop charges
/// `upgrade_cost` and grants `attack_upgrade`; `honest_shop_labels` prints the real numbers.
pub fn shop_menu(coins: i32, rules: &GameRules, quirks: &QuirksConfig) -> String {
    let (health_label, attack_label) = if quirks.honest_shop_labels {
        (
            format!("+{} Health ({} coins)", rules.health_upgrade, rules.upgrade_cost),
            format!("+{} Attack ({} coins)", rules.attack_upgrade, rules.upgrade_cost),
        )
    } else {
        (
            "+5 Health (20 coins)".to_string(),
            "+1 Attack (20 coins)".to_string(),
        )
    };
    format!(
        "\nYou have {} coins\n1: {}\n2: {}\n3: \"Magic Coin\"  ({} coins)",
        coins, health_label, attack_label, rules.magic_coin_cost
    )
}

/// Instructions plus the numbers in effect, for the `rules` command.
pub fn rules_summary(config: &Config) -> String {
    let r = &config.rules;
    let mut out = String::new();
    out.push_str(instructions());
    out.push_str("\n\nActive rules:\n");
    out.push_str(&format!(
        "  Player starts with HP {} ATK {} and {} coins\n",
        r.player_health, r.player_attack, r.player_coins
    ));
    out.push_str(&format!(
        "  Orcs start at HP {} ATK {} and grow by one every room, resetting every {} rooms\n",
        r.enemy_health, r.enemy_attack, r.difficulty_cycle
    ));
    out.push_str(&format!(
        "  Rooms hold {}-{} coins and {}-{} potions (+{} HP each)\n",
        r.room_coins_min, r.room_coins_max, r.room_potions_min, r.room_potions_max, r.potion_heal
    ));
    out.push_str(&format!(
        "  Running away works {} times in {}; Orcs hit {} times in {}\n",
        (r.flee_below - 1).clamp(0, r.flee_sides.max(0)),
        r.flee_sides,
        (r.enemy_hit_sides - r.enemy_hit_at_least).clamp(0, r.enemy_hit_sides.max(0)),
        r.enemy_hit_sides
    ));
    out.push_str(&format!(
        "  Shop: +{} HP or +{} ATK for {} coins, Magic Coin for {} coins\n",
        r.health_upgrade, r.attack_upgrade, r.upgrade_cost, r.magic_coin_cost
    ));
    out.push_str(&format!(
        "  Permissive menus: {}  Honest shop labels: {}\n",
        yes_no(config.quirks.permissive_menus),
        yes_no(config.quirks.honest_shop_labels)
    ));
    out
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combat_menu_pads_stats() {
        let player = Player {
            health: 7,
            attack: 2,
            coins: 13,
        };
        let enemy = Enemy {
            name: "Orc",
            health: 5,
            attack: 1,
        };
        let menu = combat_menu(&player, &enemy);
        assert!(menu.contains("Player HP:  7  ATK:  2  $13"));
        assert!(menu.contains("Enemy  HP:  5  ATK:  1"));
        assert!(menu.ends_with("Shop:   3   Run Away: 4"));
    }

    #[test]
    fn classic_shop_labels_are_literal() {
        let menu = shop_menu(42, &GameRules::default(), &QuirksConfig::default());
        assert!(menu.contains("You have 42 coins"));
        assert!(menu.contains("1: +5 Health (20 coins)"));
        assert!(menu.contains("2: +1 Attack (20 coins)"));
        assert!(menu.contains("3: \"Magic Coin\"  (100 coins)"));
    }

    #[test]
    fn honest_shop_labels_show_applied_numbers() {
        let quirks = QuirksConfig {
            permissive_menus: true,
            honest_shop_labels: true,
        };
        let menu = shop_menu(0, &GameRules::default(), &quirks);
        assert!(menu.contains("1: +5 Health (10 coins)"));
        assert!(menu.contains("2: +5 Attack (10 coins)"));
    }

    #[test]
    fn rules_summary_reports_odds() {
        let summary = rules_summary(&Config::default());
        assert!(summary.starts_with("Welcome to the Orc Dungeon!"));
        assert!(summary.contains("Running away works 2 times in 20; Orcs hit 5 times in 10"));
        assert!(summary.contains("Magic Coin for 100 coins"));
    }
}
