use bevy::prelude::*;

use crate::components::{Drone, Enemy, Player, PlayerStats, ProjectileOwner};
use crate::constants::{
    DRONE_FIRE_INTERVAL_SECS, DRONE_ORBIT_RADIUS, DRONE_ORBIT_SECS, DRONE_PROJECTILE_DAMAGE,
    DRONE_PROJECTILE_SPEED, DRONE_RANGE,
};
use crate::systems::projectile::spawn_projectile;

/// Keep the number of live drones in step with the drone buff count.
pub fn sync_drones(
    mut commands: Commands,
    player: Query<(&Transform, &PlayerStats), With<Player>>,
    drones: Query<Entity, With<Drone>>,
) {
    let Ok((player_transform, stats)) = player.single() else {
        return;
    };
    let live = drones.iter().count() as u32;
    if live >= stats.drone_count {
        return;
    }

    for i in live..stats.drone_count {
        let angle = i as f32 / stats.drone_count.max(1) as f32 * std::f32::consts::TAU;
        let offset = Vec2::from_angle(angle) * DRONE_ORBIT_RADIUS;
        commands.spawn((
            Sprite {
                color: Color::srgb(0.6, 0.9, 1.0),
                custom_size: Some(Vec2::new(16.0, 16.0)),
                ..default()
            },
            Transform::from_xyz(
                player_transform.translation.x + offset.x,
                player_transform.translation.y + offset.y,
                2.5,
            ),
            Drone {
                angle,
                fire_timer: Timer::from_seconds(DRONE_FIRE_INTERVAL_SECS, TimerMode::Repeating),
            },
        ));
    }
}

/// Drones circle the player, one revolution every few seconds.
pub fn move_drones(
    mut drones: Query<(&mut Transform, &mut Drone), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    time: Res<Time>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let center = player_transform.translation.truncate();
    let angular_speed = std::f32::consts::TAU / DRONE_ORBIT_SECS;

    for (mut transform, mut drone) in drones.iter_mut() {
        drone.angle = (drone.angle + angular_speed * time.delta_secs()) % std::f32::consts::TAU;
        let offset = Vec2::from_angle(drone.angle) * DRONE_ORBIT_RADIUS;
        transform.translation.x = center.x + offset.x;
        transform.translation.y = center.y + offset.y;
    }
}

/// Each drone fires at the nearest enemy in range on its own clock.
pub fn drone_attack(
    mut commands: Commands,
    mut drones: Query<(&Transform, &mut Drone)>,
    enemies: Query<&Transform, (With<Enemy>, Without<Drone>)>,
    time: Res<Time>,
) {
    for (transform, mut drone) in drones.iter_mut() {
        drone.fire_timer.tick(time.delta());
        if !drone.fire_timer.just_finished() {
            continue;
        }

        let position = transform.translation.truncate();
        let Some(target) = enemies
            .iter()
            .map(|t| t.translation.truncate())
            .filter(|p| p.distance(position) <= DRONE_RANGE)
            .min_by(|a, b| {
                a.distance_squared(position)
                    .total_cmp(&b.distance_squared(position))
            })
        else {
            continue;
        };

        let direction = (target - position).normalize_or_zero();
        if direction == Vec2::ZERO {
            continue;
        }

        spawn_projectile(
            &mut commands,
            ProjectileOwner::Drone,
            position,
            direction * DRONE_PROJECTILE_SPEED,
            DRONE_PROJECTILE_DAMAGE,
            false,
            0,
            0.0,
        );
    }
}
