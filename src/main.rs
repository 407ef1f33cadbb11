mod achievements;
mod bevy;
mod buffs;
mod components;
mod config;
mod constants;
mod events;
mod persistence;
mod progression;
mod resources;
mod systems;

use ::bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;

use achievements::check_achievements;
use bevy::BevyPlugin;
use buffs::BuffRegistry;
use config::ArchetypesConfig;
use events::EventPlugin;
use persistence::Profile;
use resources::*;
use systems::audio::{load_sound_assets, play_sound_effects, start_background_music};
use systems::buff_menu::{buff_card_interaction, cleanup_buff_menu, setup_buff_menu};
use systems::drone::{drone_attack, move_drones, sync_drones};
use systems::enemy::{
    cleanup_dead_enemies, enemy_attack, enemy_specials, move_enemies, run_bursts,
    update_health_bars,
};
use systems::game_state::{
    check_game_over, cleanup_game_over_screen, cleanup_world, game_over_interaction, handle_kills,
    kill_accounting_active, setup_game_over_screen, tick_game_clock,
};
use systems::hud::{
    cleanup_hud, expire_notifications, setup_hud, spawn_notifications, update_health_display,
    update_hud,
};
use systems::menu::{cleanup_menu, menu_interaction, setup_menu};
use systems::pickup::{drop_heal_pickups, update_pickups};
use systems::player::{player_auto_shoot, player_movement, player_regeneration};
use systems::projectile::{
    handle_player_damage, handle_player_hits, move_projectiles, player_hit_flash,
    tick_invulnerability,
};
use systems::setup::{camera_follow, setup_camera, setup_game, setup_world};
use systems::spawning::spawn_enemies;

fn main() {
    let archetypes = ArchetypesConfig::load().unwrap_or_else(|err| {
        eprintln!("failed to load archetypes.toml ({err}), using built-in table");
        ArchetypesConfig::default()
    });

    let mut app = App::new();

    app.add_plugins(BevyPlugin)
        .add_plugins(AudioPlugin)
        .add_plugins(EventPlugin);

    app.insert_state(AppState::MainMenu)
        .init_resource::<GameSession>()
        .init_resource::<BuffRegistry>()
        .init_resource::<SpawnDirector>()
        .init_resource::<GameClock>()
        .init_resource::<AutoShoot>()
        .init_resource::<RegenClock>()
        .init_resource::<PendingBuffChoices>()
        .init_resource::<AudioVolume>()
        .init_resource::<Profile>()
        .insert_resource(EnemyCatalog {
            archetypes: archetypes.archetypes,
        })
        .add_systems(Startup, (setup_camera, setup_world, load_sound_assets))
        .add_systems(Update, (start_background_music, play_sound_effects));

    // Main menu
    app.add_systems(
        OnEnter(AppState::MainMenu),
        (cleanup_world, cleanup_hud, setup_menu).chain(),
    )
    .add_systems(
        Update,
        menu_interaction.run_if(in_state(AppState::MainMenu)),
    )
    .add_systems(
        OnExit(AppState::MainMenu),
        (cleanup_menu, setup_game, setup_hud).chain(),
    );

    // The live run. None of these tick during the level-up pause, so every
    // pending timer keeps its remaining delay.
    app.add_systems(
        Update,
        (
            player_movement,
            player_auto_shoot,
            player_regeneration,
            tick_invulnerability,
            spawn_enemies,
            move_enemies,
            enemy_attack,
            run_bursts,
            enemy_specials,
        )
            .run_if(in_state(AppState::InGame)),
    )
    .add_systems(
        Update,
        (
            move_projectiles,
            handle_player_hits,
            handle_player_damage,
            player_hit_flash,
            cleanup_dead_enemies,
            update_health_bars,
            sync_drones,
            move_drones,
            drone_attack,
            update_pickups,
        )
            .run_if(in_state(AppState::InGame)),
    )
    .add_systems(
        Update,
        (
            tick_game_clock,
            check_game_over,
            check_achievements,
            camera_follow,
            update_hud,
            update_health_display,
            spawn_notifications,
            expire_notifications,
        )
            .run_if(in_state(AppState::InGame)),
    )
    // Kill bookkeeping runs after the death scan and stays live through the
    // buff pause; kill messages are folded in the frame they are written.
    .add_systems(
        Update,
        (handle_kills.before(check_game_over), drop_heal_pickups)
            .after(cleanup_dead_enemies)
            .run_if(kill_accounting_active),
    );

    // Level-up pause
    app.add_systems(OnEnter(AppState::LevelUp), setup_buff_menu)
        .add_systems(
            Update,
            buff_card_interaction.run_if(in_state(AppState::LevelUp)),
        )
        .add_systems(OnExit(AppState::LevelUp), cleanup_buff_menu);

    // Game over screen
    app.add_systems(OnEnter(AppState::GameOver), setup_game_over_screen)
        .add_systems(
            Update,
            game_over_interaction.run_if(in_state(AppState::GameOver)),
        )
        .add_systems(OnExit(AppState::GameOver), cleanup_game_over_screen);

    app.run();
}
