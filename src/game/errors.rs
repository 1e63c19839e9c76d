use std::fmt;
use thiserror::Error;

/// The things the game builds fresh for every run or room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Player,
    Room,
    Enemy,
}

impl Entity {
    /// Process exit code used when this entity cannot be built.
    pub fn exit_code(self) -> i32 {
        match self {
            Entity::Player => 1,
            Entity::Room => 2,
            Entity::Enemy => 3,
        }
    }

    fn constructor(self) -> &'static str {
        match self {
            Entity::Player => "create_player",
            Entity::Room => "create_room",
            Entity::Enemy => "create_enemy",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Player => "player",
            Entity::Room => "room",
            Entity::Enemy => "enemy",
        };
        f.write_str(name)
    }
}

/// Errors that end a game session.
#[derive(Debug, Error)]
pub enum GameError {
    /// A player, room or enemy could not be built from the configured rules. Unrecoverable.
    #[error("cannot create the {entity}: {reason}")]
    Construction { entity: Entity, reason: String },

    /// Wrapper around console IO errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The console input reached end of file while waiting for an answer.
    #[error("input closed")]
    InputClosed,
}

impl GameError {
    pub fn construction(entity: Entity, reason: impl Into<String>) -> Self {
        GameError::Construction {
            entity,
            reason: reason.into(),
        }
    }

    /// Distinct exit code for construction failures; `None` for every other error.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            GameError::Construction { entity, .. } => Some(entity.exit_code()),
            _ => None,
        }
    }

    /// Player-facing abort message for construction failures.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            GameError::Construction { entity, reason } => Some(format!(
                "Error {} occured in {}.\nCannot create the {}: {}.\nThe game is ending and program is aborting.",
                entity.exit_code(),
                entity.constructor(),
                entity,
                reason
            )),
            _ => None,
        }
    }
}
