use bevy::prelude::*;

use crate::systems::audio::SoundEffect;

/// Fired exactly once per enemy death.
#[derive(Message)]
pub struct EnemyKilled {
    pub archetype_id: String,
    pub score: u32,
    pub position: Vec2,
}

/// Fired when the player takes a hit (after shield/armor).
#[derive(Message)]
pub struct PlayerDamaged {
    pub dealt: f32,
    pub health_left: f32,
}

/// Fired when a kill crosses the next level threshold, right before the
/// buff-choice pause.
#[derive(Message)]
pub struct LevelUpStarted {
    pub level: u32,
}

/// Fired after the chosen buff has been applied to the player.
#[derive(Message)]
pub struct BuffApplied {
    pub id: &'static str,
    pub summary: String,
}

/// Fired exactly once when the player dies, carrying the final run stats.
#[derive(Message)]
pub struct GameOverEvent {
    pub score: u32,
    pub kills: u32,
    pub level: u32,
    pub elapsed_secs: u32,
}

#[derive(Message)]
pub struct AchievementUnlocked {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Plugin that registers all game events
pub struct EventPlugin;

impl Plugin for EventPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<EnemyKilled>()
            .add_message::<PlayerDamaged>()
            .add_message::<LevelUpStarted>()
            .add_message::<BuffApplied>()
            .add_message::<GameOverEvent>()
            .add_message::<AchievementUnlocked>()
            .add_message::<SoundEffect>();
    }
}
