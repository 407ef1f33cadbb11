use bevy::prelude::*;

use crate::components::Player;
use crate::constants::{VIEW_HEIGHT, VIEW_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};
use crate::systems::player::spawn_player;

#[derive(Component)]
pub struct GameCamera;

#[derive(Component)]
pub struct WorldBackdrop;

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, GameCamera));
}

/// Dark arena floor with a visible border so the player can read the world
/// bounds.
pub fn setup_world(mut commands: Commands) {
    commands.spawn((
        Sprite {
            color: Color::srgb(0.05, 0.05, 0.09),
            custom_size: Some(Vec2::new(WORLD_WIDTH, WORLD_HEIGHT)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -1.0),
        WorldBackdrop,
    ));
    commands.spawn((
        Sprite {
            color: Color::srgb(0.2, 0.2, 0.35),
            custom_size: Some(Vec2::new(WORLD_WIDTH + 20.0, WORLD_HEIGHT + 20.0)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -2.0),
        WorldBackdrop,
    ));
}

/// A fresh run: player at the world center with baseline stats.
pub fn setup_game(mut commands: Commands) {
    spawn_player(&mut commands);
}

/// Camera center tracking `target` while keeping the whole view inside the
/// world. Near a wall the camera stops and the target drifts off-center.
pub fn camera_center_for(target: Vec2) -> Vec2 {
    let max_x = (WORLD_WIDTH - VIEW_WIDTH) / 2.0;
    let max_y = (WORLD_HEIGHT - VIEW_HEIGHT) / 2.0;
    Vec2::new(target.x.clamp(-max_x, max_x), target.y.clamp(-max_y, max_y))
}

/// Keep the camera on the player, clamped so the view never leaves the
/// world.
pub fn camera_follow(
    player: Query<&Transform, (With<Player>, Without<GameCamera>)>,
    mut camera: Query<&mut Transform, With<GameCamera>>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let Ok(mut camera_transform) = camera.single_mut() else {
        return;
    };

    let center = camera_center_for(player_transform.translation.truncate());
    camera_transform.translation.x = center.x;
    camera_transform.translation.y = center.y;
}
