//! Turn-by-turn fight between the player and a room's enemy.
//!
//! Each round the player picks an action, then the enemy (if still standing) swings back:
//!
//! ```text
//! AwaitingPlayerAction --attack/block/shop/failed run--> EnemyResponds
//! AwaitingPlayerAction --successful run--------------> PlayerFled
//! EnemyResponds --both alive--> AwaitingPlayerAction
//! EnemyResponds --enemy at 0--> RoomWon
//! EnemyResponds --player at 0-> PlayerDead
//! ```
//!
//! Buying the Magic Coin from the shop leaves the fight at once with [`CombatOutcome::Escaped`].
//! Choosing Block has no mechanical effect: the enemy's miss chance is the same every round.

use std::io::{BufRead, Write};

use log::{debug, info};
use rand::Rng;

use super::console::Console;
use super::dungeon::{Enemy, Player};
use super::errors::GameError;
use super::shop::{self, Purchase};
use super::text;
use crate::config::{Config, GameRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    AwaitingPlayerAction,
    EnemyResponds,
    RoomWon,
    PlayerDead,
    PlayerFled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    RoomWon,
    PlayerDead,
    PlayerFled,
    /// The Magic Coin was bought mid-fight.
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Attack,
    Block,
    Shop,
    Run,
}

impl Action {
    /// Classic menu mapping: anything other than 1-3 means Run Away.
    pub fn from_choice(choice: Option<i64>) -> Action {
        match choice {
            Some(1) => Action::Attack,
            Some(2) => Action::Block,
            Some(3) => Action::Shop,
            _ => Action::Run,
        }
    }

    /// Menu mapping that only accepts the listed numbers.
    pub fn from_choice_strict(choice: Option<i64>) -> Option<Action> {
        match choice {
            Some(4) => Some(Action::Run),
            Some(1..=3) => Some(Action::from_choice(choice)),
            _ => None,
        }
    }
}

/// The enemy's swing at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    Hit(i32),
    Blocked,
}

/// Hit the enemy with the player's full attack. Returns the enemy's remaining health.
pub fn player_attack(player: &Player, enemy: &mut Enemy) -> i32 {
    enemy.take_hit(player.attack)
}

/// Roll to slip past the enemy.
pub fn try_flee<R: Rng + ?Sized>(rules: &GameRules, rng: &mut R) -> bool {
    rng.gen_range(1..=rules.flee_sides) < rules.flee_below
}

/// The enemy's answer: either the full attack lands or nothing does.
pub fn enemy_turn<R: Rng + ?Sized>(
    rules: &GameRules,
    enemy: &Enemy,
    player: &mut Player,
    rng: &mut R,
) -> Strike {
    if rng.gen_range(0..rules.enemy_hit_sides) >= rules.enemy_hit_at_least {
        player.take_damage(enemy.attack);
        Strike::Hit(enemy.attack)
    } else {
        Strike::Blocked
    }
}

/// Where the fight stands once a round is over.
pub fn settle(player: &Player, enemy: &Enemy) -> CombatState {
    if !player.is_alive() {
        CombatState::PlayerDead
    } else if !enemy.is_alive() {
        CombatState::RoomWon
    } else {
        CombatState::AwaitingPlayerAction
    }
}

/// Fight until someone falls, the player escapes the room, or the Magic Coin ends the game.
pub fn resolve<R, W, G>(
    console: &mut Console<R, W>,
    config: &Config,
    player: &mut Player,
    enemy: &mut Enemy,
    rng: &mut G,
) -> Result<CombatOutcome, GameError>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let rules = &config.rules;
    let mut state = settle(player, enemy);
    let mut rounds = 0u32;
    loop {
        state = match state {
            CombatState::AwaitingPlayerAction => {
                rounds += 1;
                console.say(&text::combat_menu(player, enemy))?;
                let action = read_action(console, config)?;
                debug!("round {}: player chose {:?}", rounds, action);
                match action {
                    Action::Attack => {
                        console.say("You raise your sword in an offensive position.")?;
                        console.say(&format!("You dealt {} damage", player.attack))?;
                        let before = enemy.health;
                        let after = player_attack(player, enemy);
                        console.say(&format!(
                            "The {} had {} health and now has {} health",
                            enemy.name, before, after
                        ))?;
                        CombatState::EnemyResponds
                    }
                    Action::Block => {
                        console.say("You raise your sword in a defensive position.")?;
                        CombatState::EnemyResponds
                    }
                    Action::Shop => {
                        console.say("You begin to think out what you could buy.")?;
                        if shop::visit(console, config, player)? == Purchase::MagicCoin {
                            info!("combat: escaped with the Magic Coin after {} rounds", rounds);
                            return Ok(CombatOutcome::Escaped);
                        }
                        CombatState::EnemyResponds
                    }
                    Action::Run => {
                        console.say(&format!("You try to run past the {}", enemy.name))?;
                        if try_flee(rules, rng) {
                            console.say(&format!(
                                "You got past the {} and made it to the door!",
                                enemy.name
                            ))?;
                            console.say("In your haste you could not grab any treasure")?;
                            enemy.health = 0;
                            CombatState::PlayerFled
                        } else {
                            console
                                .say(&format!("The {} prevented you from running!", enemy.name))?;
                            CombatState::EnemyResponds
                        }
                    }
                }
            }
            CombatState::EnemyResponds => {
                if enemy.is_alive() {
                    match enemy_turn(rules, enemy, player, rng) {
                        Strike::Hit(damage) => console.say(&format!(
                            "The {} struck you. He did {} damage",
                            enemy.name, damage
                        ))?,
                        Strike::Blocked => {
                            console.say(&format!("You blocked the {}'s attack", enemy.name))?
                        }
                    }
                }
                settle(player, enemy)
            }
            CombatState::RoomWon => {
                info!("combat: room won after {} rounds", rounds);
                return Ok(CombatOutcome::RoomWon);
            }
            CombatState::PlayerDead => {
                info!("combat: player died after {} rounds", rounds);
                return Ok(CombatOutcome::PlayerDead);
            }
            CombatState::PlayerFled => {
                info!("combat: player fled after {} rounds", rounds);
                return Ok(CombatOutcome::PlayerFled);
            }
        };
    }
}

fn read_action<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &Config,
) -> Result<Action, GameError> {
    loop {
        let choice = console.prompt_number(text::ACTION_PROMPT)?;
        if config.quirks.permissive_menus {
            return Ok(Action::from_choice(choice));
        }
        if let Some(action) = Action::from_choice_strict(choice) {
            return Ok(action);
        }
        debug!("combat: rejected choice {:?}", choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuirksConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn player() -> Player {
        Player {
            health: 10,
            attack: 2,
            coins: 0,
        }
    }

    fn orc(health: i32, attack: i32) -> Enemy {
        Enemy {
            name: "Orc",
            health,
            attack,
        }
    }

    /// First seed whose opening draw satisfies `want`.
    fn find_seed(want: impl Fn(&mut StdRng) -> bool) -> u64 {
        (0u64..10_000)
            .find(|s| want(&mut StdRng::seed_from_u64(*s)))
            .expect("some seed should match")
    }

    fn hit_seed(rules: &GameRules, lands: bool) -> u64 {
        find_seed(|rng| {
            (rng.gen_range(0..rules.enemy_hit_sides) >= rules.enemy_hit_at_least) == lands
        })
    }

    fn flee_seed(rules: &GameRules, escapes: bool) -> u64 {
        find_seed(|rng| (rng.gen_range(1..=rules.flee_sides) < rules.flee_below) == escapes)
    }

    fn fight(
        config: &Config,
        p: &mut Player,
        e: &mut Enemy,
        input: &str,
        seed: u64,
    ) -> (CombatOutcome, String) {
        let mut console = Console::new(input.as_bytes(), Vec::new());
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = resolve(&mut console, config, p, e, &mut rng).unwrap();
        (outcome, String::from_utf8(console.into_output()).unwrap())
    }

    #[test]
    fn attack_clamps_enemy_health() {
        let p = player();
        let mut e = orc(3, 1);
        assert_eq!(player_attack(&p, &mut e), 1);
        assert_eq!(player_attack(&p, &mut e), 0);
        assert_eq!(player_attack(&p, &mut e), 0);
    }

    #[test]
    fn enemy_hit_takes_exact_attack() {
        let rules = GameRules::default();
        let e = orc(5, 3);

        let mut p = player();
        let mut rng = StdRng::seed_from_u64(hit_seed(&rules, true));
        assert_eq!(enemy_turn(&rules, &e, &mut p, &mut rng), Strike::Hit(3));
        assert_eq!(p.health, 7);

        let mut p = player();
        let mut rng = StdRng::seed_from_u64(hit_seed(&rules, false));
        assert_eq!(enemy_turn(&rules, &e, &mut p, &mut rng), Strike::Blocked);
        assert_eq!(p.health, 10);
    }

    #[test]
    fn enemy_turn_never_deals_partial_damage() {
        let rules = GameRules::default();
        let e = orc(5, 4);
        let mut rng = StdRng::seed_from_u64(99);
        let mut hits = 0;
        for _ in 0..200 {
            let mut p = Player {
                health: 50,
                ..player()
            };
            match enemy_turn(&rules, &e, &mut p, &mut rng) {
                Strike::Hit(d) => {
                    hits += 1;
                    assert_eq!(d, 4);
                    assert_eq!(p.health, 46);
                }
                Strike::Blocked => assert_eq!(p.health, 50),
            }
        }
        assert!(hits > 50 && hits < 150, "about half should land, got {}", hits);
    }

    #[test]
    fn flee_roll_matches_threshold() {
        let rules = GameRules::default();
        let mut rng = StdRng::seed_from_u64(flee_seed(&rules, true));
        assert!(try_flee(&rules, &mut rng));
        let mut rng = StdRng::seed_from_u64(flee_seed(&rules, false));
        assert!(!try_flee(&rules, &mut rng));
    }

    #[test]
    fn flee_rate_is_about_ten_percent() {
        let rules = GameRules::default();
        let mut rng = StdRng::seed_from_u64(2024);
        let escapes = (0..10_000).filter(|_| try_flee(&rules, &mut rng)).count();
        assert!((800..1200).contains(&escapes), "escapes {}", escapes);
    }

    #[test]
    fn three_attacks_clear_first_room() {
        let config = Config::default();
        let mut p = player();
        let mut e = orc(5, 1);
        let (outcome, out) = fight(&config, &mut p, &mut e, "1\n1\n1\n", 7);
        assert_eq!(outcome, CombatOutcome::RoomWon);
        assert_eq!(e.health, 0);
        assert_eq!(out.matches(text::ACTION_PROMPT).count(), 3);
        assert!(out.contains("The Orc had 1 health and now has 0 health"));
        // At most two enemy swings of 1 damage each happened before the final blow.
        assert!((8..=10).contains(&p.health), "health {}", p.health);
    }

    #[test]
    fn unknown_choice_means_run() {
        assert_eq!(Action::from_choice(Some(9)), Action::Run);
        assert_eq!(Action::from_choice(Some(0)), Action::Run);
        assert_eq!(Action::from_choice(None), Action::Run);
        assert_eq!(Action::from_choice_strict(Some(9)), None);
        assert_eq!(Action::from_choice_strict(Some(4)), Some(Action::Run));
        assert_eq!(Action::from_choice_strict(Some(2)), Some(Action::Block));
    }

    #[test]
    fn successful_run_leaves_room() {
        let config = Config::default();
        let seed = flee_seed(&config.rules, true);
        let mut p = player();
        let mut e = orc(5, 1);
        let (outcome, out) = fight(&config, &mut p, &mut e, "4\n", seed);
        assert_eq!(outcome, CombatOutcome::PlayerFled);
        assert_eq!(e.health, 0);
        assert_eq!(p.health, 10);
        assert!(out.contains("made it to the door!"));
        assert!(!out.contains("struck you"));
    }

    #[test]
    fn failed_run_lets_enemy_act() {
        let config = Config::default();
        let seed = flee_seed(&config.rules, false);
        let mut p = player();
        let mut e = orc(5, 1);
        // Fail the run, then finish the orc off.
        let (outcome, out) = fight(&config, &mut p, &mut e, "4\n1\n1\n1\n", seed);
        assert_eq!(outcome, CombatOutcome::RoomWon);
        assert!(out.contains("The Orc prevented you from running!"));
        let after_run = out.split("prevented you from running!").nth(1).unwrap();
        assert!(
            after_run.trim_start().starts_with("The Orc struck you")
                || after_run.trim_start().starts_with("You blocked the Orc's attack")
        );
    }

    #[test]
    fn blocking_until_death() {
        let config = Config::default();
        let mut p = Player {
            health: 1,
            ..player()
        };
        let mut e = orc(5, 3);
        let input = "2\n".repeat(200);
        let (outcome, out) = fight(&config, &mut p, &mut e, &input, 5);
        assert_eq!(outcome, CombatOutcome::PlayerDead);
        assert_eq!(p.health, 0);
        assert_eq!(e.health, 5);
        assert!(out.contains("The Orc struck you. He did 3 damage"));
    }

    #[test]
    fn magic_coin_ends_fight_immediately() {
        let config = Config::default();
        let mut p = Player {
            coins: 120,
            ..player()
        };
        let mut e = orc(5, 1);
        let (outcome, out) = fight(&config, &mut p, &mut e, "3\n3\n", 1);
        assert_eq!(outcome, CombatOutcome::Escaped);
        assert_eq!(p.coins, 20);
        assert!(!out.contains("struck you") && !out.contains("blocked the Orc"));
    }

    #[test]
    fn shop_visit_still_gives_enemy_a_turn() {
        let config = Config::default();
        let seed = hit_seed(&config.rules, true);
        let mut p = Player {
            coins: 10,
            ..player()
        };
        let mut e = orc(5, 2);
        // Buy health, take the hit, then win with three attacks.
        let (outcome, out) = fight(&config, &mut p, &mut e, "3\n1\n1\n1\n1\n", seed);
        assert_eq!(outcome, CombatOutcome::RoomWon);
        assert!(out.contains("Health upgraded from 10 to 15"));
        let after_shop = out.split("Health upgraded from 10 to 15").nth(1).unwrap();
        assert!(after_shop.trim_start().starts_with("The Orc struck you. He did 2 damage"));
        assert_eq!(p.coins, 0);
    }

    #[test]
    fn strict_menu_reprompts() {
        let config = Config {
            quirks: QuirksConfig {
                permissive_menus: false,
                honest_shop_labels: false,
            },
            ..Config::default()
        };
        let mut p = player();
        let mut e = orc(2, 1);
        let (outcome, out) = fight(&config, &mut p, &mut e, "7\nflee\n1\n", 3);
        assert_eq!(outcome, CombatOutcome::RoomWon);
        assert_eq!(out.matches(text::ACTION_PROMPT).count(), 3);
        assert!(!out.contains("You try to run"));
    }

    #[test]
    fn dead_enemy_skips_combat() {
        let config = Config::default();
        let mut p = player();
        let mut e = orc(0, 1);
        let (outcome, out) = fight(&config, &mut p, &mut e, "", 1);
        assert_eq!(outcome, CombatOutcome::RoomWon);
        assert!(out.is_empty());
    }
}
