use bevy::prelude::*;

use crate::buffs::BuffChoice;
use crate::config::EnemyArchetype;
use crate::constants::{AUTO_SHOOT_INTERVAL_SECS, ENEMY_SPAWN_INTERVAL_SECS, REGEN_INTERVAL_SECS};

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    MainMenu,
    /// Live run
    InGame,
    /// World frozen while the player picks a buff
    LevelUp,
    /// Final screen with run stats
    GameOver,
}

/// Per-run bookkeeping. Single owner, mutated on kill, level-up and the
/// one-second clock tick.
#[derive(Resource)]
pub struct GameSession {
    pub score: u32,
    pub kills: u32,
    pub level: u32,
    pub elapsed_secs: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            score: 0,
            kills: 0,
            level: 1,
            elapsed_secs: 0,
        }
    }
}

impl GameSession {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Enemy archetype table, loaded from `archetypes.toml` at startup.
#[derive(Resource)]
pub struct EnemyCatalog {
    pub archetypes: Vec<EnemyArchetype>,
}

/// Spawn director clock. Ticked only while `AppState::InGame` is active, so
/// the remaining delay survives the level-up pause untouched.
#[derive(Resource)]
pub struct SpawnDirector {
    pub timer: Timer,
}

impl Default for SpawnDirector {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(ENEMY_SPAWN_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

/// One-second game clock driving the elapsed-time counter.
#[derive(Resource)]
pub struct GameClock {
    pub timer: Timer,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

#[derive(Resource)]
pub struct AutoShoot {
    pub timer: Timer,
}

impl Default for AutoShoot {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(AUTO_SHOOT_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

#[derive(Resource)]
pub struct RegenClock {
    pub timer: Timer,
}

impl Default for RegenClock {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(REGEN_INTERVAL_SECS, TimerMode::Repeating),
        }
    }
}

/// The three buffs on offer during the current level-up pause.
#[derive(Resource, Default)]
pub struct PendingBuffChoices {
    pub choices: Vec<BuffChoice>,
}

#[derive(Resource)]
pub struct AudioVolume {
    pub master: f32,
}

impl Default for AudioVolume {
    fn default() -> Self {
        Self { master: 0.5 }
    }
}
