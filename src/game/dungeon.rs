//! Players, rooms and the enemies that guard them.
//!
//! Construction checks the configured rules and refuses to build an entity whose numbers would
//! make the game meaningless (or make a dice roll panic). Those failures are unrecoverable.

use log::debug;
use rand::Rng;

use super::errors::{Entity, GameError};
use crate::config::GameRules;

/// Display name of every enemy in the dungeon.
pub const ORC: &str = "Orc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub health: i32,
    pub attack: i32,
    pub coins: i32,
}

impl Player {
    /// Fresh player for a new run.
    pub fn new(rules: &GameRules) -> Result<Self, GameError> {
        let fail = |reason: &str| -> Result<Self, GameError> {
            Err(GameError::construction(Entity::Player, reason))
        };
        if rules.player_health <= 0 {
            return fail("starting health must be positive");
        }
        if rules.player_attack < 0 {
            return fail("starting attack cannot be negative");
        }
        if rules.player_coins < 0 {
            return fail("starting coins cannot be negative");
        }
        // The shop only ever sells to the player, so its numbers are checked here.
        if rules.upgrade_cost < 0 || rules.magic_coin_cost < 0 {
            return fail("shop prices cannot be negative");
        }
        if rules.health_upgrade < 0 || rules.attack_upgrade < 0 {
            return fail("shop upgrades cannot be negative");
        }
        Ok(Player {
            health: rules.player_health,
            attack: rules.player_attack,
            coins: rules.player_coins,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn can_afford(&self, cost: i32) -> bool {
        self.coins >= cost
    }

    /// Lose exactly `damage` health, never dropping below zero.
    pub fn take_damage(&mut self, damage: i32) {
        self.health = (self.health - damage).max(0);
    }

    /// Collect a cleared room's coins and drink its potions. Health has no ceiling.
    pub fn loot(&mut self, room: &Room, rules: &GameRules) {
        self.coins += room.coins;
        self.health += room.potions * rules.potion_heal;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Room {
    pub coins: i32,
    pub potions: i32,
    pub has_enemy: bool,
}

impl Room {
    /// Roll the loot for the next room.
    pub fn generate<R: Rng + ?Sized>(rules: &GameRules, rng: &mut R) -> Result<Self, GameError> {
        let fail = |reason: &str| -> Result<Self, GameError> {
            Err(GameError::construction(Entity::Room, reason))
        };
        if rules.room_coins_min < 0 || rules.room_coins_min > rules.room_coins_max {
            return fail("coin range is empty or negative");
        }
        if rules.room_potions_min < 0 || rules.room_potions_min > rules.room_potions_max {
            return fail("potion range is empty or negative");
        }
        if rules.potion_heal < 0 {
            return fail("potions cannot do damage");
        }
        let coins = rng.gen_range(rules.room_coins_min..=rules.room_coins_max);
        let potions = rng.gen_range(rules.room_potions_min..=rules.room_potions_max);
        // The occupancy roll is still drawn, but every room is occupied whatever it shows.
        let occupancy: i32 = rng.gen_range(1..=10);
        debug!(
            "room rolled: {} coins, {} potions (occupancy roll {})",
            coins, potions, occupancy
        );
        Ok(Room {
            coins,
            potions,
            has_enemy: true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: &'static str,
    pub health: i32,
    pub attack: i32,
}

impl Enemy {
    /// The enemy for the room after `rooms_cleared` cleared rooms. Stats climb by one per room
    /// and fall back to the base values every `difficulty_cycle` rooms.
    pub fn for_room(rules: &GameRules, rooms_cleared: u32) -> Result<Self, GameError> {
        let fail = |reason: &str| -> Result<Self, GameError> {
            Err(GameError::construction(Entity::Enemy, reason))
        };
        if rules.difficulty_cycle == 0 {
            return fail("difficulty cycle must be at least one room");
        }
        if rules.enemy_hit_sides < 1 {
            return fail("the attack die needs at least one side");
        }
        if rules.flee_sides < 1 {
            return fail("the escape die needs at least one side");
        }
        let step = (rooms_cleared % rules.difficulty_cycle) as i32;
        let health = rules.enemy_health + step;
        let attack = rules.enemy_attack + step;
        if health <= 0 {
            return fail("health must be positive");
        }
        if attack < 0 {
            return fail("attack cannot be negative");
        }
        Ok(Enemy {
            name: ORC,
            health,
            attack,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose `damage` health, clamped at zero. Returns the health left.
    pub fn take_hit(&mut self, damage: i32) -> i32 {
        self.health = (self.health - damage).max(0);
        self.health
    }
}
