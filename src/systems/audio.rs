use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::resources::AudioVolume;

/// Convert linear amplitude (0.0-1.0) to decibels for kira audio
fn amplitude_to_db(amplitude: f32) -> f32 {
    if amplitude <= 0.0 {
        -60.0 // kira's silence threshold
    } else {
        20.0 * amplitude.log10()
    }
}

/// Sound effect events - sent by gameplay systems, played by play_sound_effects
#[derive(Message)]
pub enum SoundEffect {
    /// Player weapon fires
    PlayerShot,
    /// An enemy fires
    EnemyShot,
    /// Explosive round detonates
    Explosion,
    /// Heal pickup collected
    Pickup,
    /// Player takes a hit
    PlayerHit,
    /// Level threshold crossed
    LevelUp,
    /// Menu or card button clicked
    ButtonClick,
    /// Run ended
    GameOver,
}

/// Resource holding preloaded sound effect handles
#[derive(Resource)]
pub struct SoundAssets {
    pub player_shot: Handle<bevy_kira_audio::AudioSource>,
    pub enemy_shot: Handle<bevy_kira_audio::AudioSource>,
    pub explosion: Handle<bevy_kira_audio::AudioSource>,
    pub pickup: Handle<bevy_kira_audio::AudioSource>,
    pub player_hit: Handle<bevy_kira_audio::AudioSource>,
    pub level_up: Handle<bevy_kira_audio::AudioSource>,
    pub button_click: Handle<bevy_kira_audio::AudioSource>,
    pub game_over: Handle<bevy_kira_audio::AudioSource>,
    pub background_music: Handle<bevy_kira_audio::AudioSource>,
}

/// Load all sound assets at startup
pub fn load_sound_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundAssets {
        player_shot: asset_server.load("sounds/player_shot.ogg"),
        enemy_shot: asset_server.load("sounds/enemy_shot.ogg"),
        explosion: asset_server.load("sounds/explosion.ogg"),
        pickup: asset_server.load("sounds/pickup.ogg"),
        player_hit: asset_server.load("sounds/player_hit.ogg"),
        level_up: asset_server.load("sounds/level_up.ogg"),
        button_click: asset_server.load("sounds/button_click.ogg"),
        game_over: asset_server.load("sounds/game_over.ogg"),
        background_music: asset_server.load("sounds/soundtrack.ogg"),
    });
}

/// Marker to track if background music has started
#[derive(Resource, Default)]
pub struct BackgroundMusicStarted;

/// Start playing background music once assets are loaded
pub fn start_background_music(
    mut commands: Commands,
    sounds: Option<Res<SoundAssets>>,
    audio: Res<Audio>,
    volume: Res<AudioVolume>,
    started: Option<Res<BackgroundMusicStarted>>,
) {
    if started.is_some() {
        return;
    }
    let Some(sounds) = sounds else { return };

    audio
        .play(sounds.background_music.clone())
        .looped()
        .with_volume(amplitude_to_db(volume.master));

    commands.insert_resource(BackgroundMusicStarted);
}

/// System that plays sound effects when events are received
pub fn play_sound_effects(
    mut events: MessageReader<SoundEffect>,
    sounds: Option<Res<SoundAssets>>,
    audio: Res<Audio>,
    volume: Res<AudioVolume>,
) {
    let Some(sounds) = sounds else { return };

    for event in events.read() {
        let source = match event {
            SoundEffect::PlayerShot => sounds.player_shot.clone(),
            SoundEffect::EnemyShot => sounds.enemy_shot.clone(),
            SoundEffect::Explosion => sounds.explosion.clone(),
            SoundEffect::Pickup => sounds.pickup.clone(),
            SoundEffect::PlayerHit => sounds.player_hit.clone(),
            SoundEffect::LevelUp => sounds.level_up.clone(),
            SoundEffect::ButtonClick => sounds.button_click.clone(),
            SoundEffect::GameOver => sounds.game_over.clone(),
        };

        audio.play(source).with_volume(amplitude_to_db(volume.master));
    }
}
