use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use crate::components::{Enemy, Player, PlayerStats, ProjectileOwner};
use crate::constants::{
    AUTO_SHOOT_INTERVAL_SECS, PLAYER_COLOR, PLAYER_PROJECTILE_DAMAGE, PLAYER_PROJECTILE_SPEED,
    PLAYER_SIZE, PLAYER_SPEED, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::resources::{AutoShoot, RegenClock};
use crate::systems::audio::SoundEffect;
use crate::systems::projectile::spawn_projectile;

pub fn spawn_player(commands: &mut Commands) {
    commands.spawn((
        Sprite {
            color: PLAYER_COLOR,
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 3.0),
        Player,
        PlayerStats::default(),
    ));
}

/// WASD / arrow-key movement, clamped to the world.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut player: Query<(&mut Transform, &PlayerStats), With<Player>>,
    time: Res<Time>,
) {
    let Ok((mut transform, stats)) = player.single_mut() else {
        return;
    };

    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }

    let direction = direction.normalize_or_zero();
    let speed = PLAYER_SPEED * stats.speed_multiplier;
    let movement = direction * speed * time.delta_secs();

    transform.translation.x =
        (transform.translation.x + movement.x).clamp(-WORLD_WIDTH / 2.0, WORLD_WIDTH / 2.0);
    transform.translation.y =
        (transform.translation.y + movement.y).clamp(-WORLD_HEIGHT / 2.0, WORLD_HEIGHT / 2.0);
}

/// Auto-fire at the nearest enemy. Fire rate, multi-shot, crits, piercing,
/// homing and explosions all come from the buffed stats.
pub fn player_auto_shoot(
    mut commands: Commands,
    mut auto_shoot: ResMut<AutoShoot>,
    player: Query<(&Transform, &PlayerStats), With<Player>>,
    enemies: Query<&Transform, With<Enemy>>,
    time: Res<Time>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Ok((player_transform, stats)) = player.single() else {
        return;
    };

    let interval = stats.shot_interval(AUTO_SHOOT_INTERVAL_SECS);
    auto_shoot
        .timer
        .set_duration(Duration::from_secs_f32(interval));
    auto_shoot.timer.tick(time.delta());
    if !auto_shoot.timer.just_finished() {
        return;
    }

    let position = player_transform.translation.truncate();
    let Some(target) = enemies
        .iter()
        .map(|t| t.translation.truncate())
        .min_by(|a, b| {
            a.distance_squared(position)
                .total_cmp(&b.distance_squared(position))
        })
    else {
        return;
    };

    let direction = (target - position).normalize_or_zero();
    if direction == Vec2::ZERO {
        return;
    }

    let mut rng = rand::thread_rng();
    let mut damage = stats.outgoing_damage(PLAYER_PROJECTILE_DAMAGE);
    if stats.crit_chance > 0.0 && rng.gen_bool(stats.crit_chance.clamp(0.0, 1.0) as f64) {
        damage *= 2.0;
    }

    let shots = stats.multi_shot.max(1);
    for i in 0..shots {
        // Fan the extra shots around the aim line
        let offset = (i as f32 - (shots as f32 - 1.0) / 2.0) * 0.15;
        let aimed = Vec2::from_angle(offset).rotate(direction);
        spawn_projectile(
            &mut commands,
            ProjectileOwner::Player,
            position,
            aimed * PLAYER_PROJECTILE_SPEED,
            damage,
            stats.auto_targeting,
            stats.pierce,
            stats.explosion_radius,
        );
    }

    sounds.write(SoundEffect::PlayerShot);
}

/// Regeneration buff: heal every five seconds.
pub fn player_regeneration(
    mut clock: ResMut<RegenClock>,
    mut player: Query<&mut PlayerStats, With<Player>>,
    time: Res<Time>,
) {
    clock.timer.tick(time.delta());
    if !clock.timer.just_finished() {
        return;
    }
    let Ok(mut stats) = player.single_mut() else {
        return;
    };
    if stats.regen_rate > 0.0 {
        let rate = stats.regen_rate;
        stats.heal(rate);
    }
}
