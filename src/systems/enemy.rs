use bevy::prelude::*;
use rand::Rng;

use crate::components::{BurstState, Enemy, HealthBar, Player, PlayerStats, ProjectileOwner};
use crate::config::FirePattern;
use crate::constants::{
    BURST_SHOT_GAP_SECS, MAGE_APPROACH_DISTANCE, MAGE_RETREAT_DISTANCE, MAGE_TELEPORT_MAX_RANGE,
    MAGE_TELEPORT_MIN_RANGE, SPREAD_ANGLE_RAD, WORLD_EDGE_PADDING, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::events::EnemyKilled;
use crate::systems::audio::SoundEffect;
use crate::systems::projectile::spawn_projectile;

/// Per-frame enemy AI: seek the player, hold distance for the mage type.
pub fn move_enemies(
    mut enemies: Query<(&mut Transform, &Enemy), Without<Player>>,
    player: Query<(&Transform, &PlayerStats), With<Player>>,
    time: Res<Time>,
) {
    let Ok((player_transform, stats)) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();
    let slow = 1.0 - stats.enemy_slow.min(0.8);

    for (mut transform, enemy) in enemies.iter_mut() {
        if enemy.dead {
            continue;
        }
        let position = transform.translation.truncate();
        let distance = position.distance(target);
        let to_player = (target - position).normalize_or_zero();
        let speed = enemy.speed * slow;

        let velocity = if enemy.keeps_distance {
            if distance < MAGE_RETREAT_DISTANCE {
                -to_player * speed * 1.2
            } else if distance > MAGE_APPROACH_DISTANCE {
                to_player * speed
            } else {
                // Standoff band: hold position and keep firing
                Vec2::ZERO
            }
        } else {
            to_player * speed
        };

        let movement = velocity * time.delta_secs();
        transform.translation.x = (transform.translation.x + movement.x)
            .clamp(-WORLD_WIDTH / 2.0, WORLD_WIDTH / 2.0);
        transform.translation.y = (transform.translation.y + movement.y)
            .clamp(-WORLD_HEIGHT / 2.0, WORLD_HEIGHT / 2.0);
    }
}

/// Fire at the player when in range and off cooldown.
pub fn enemy_attack(
    mut commands: Commands,
    mut enemies: Query<(Entity, &Transform, &mut Enemy)>,
    player: Query<&Transform, With<Player>>,
    time: Res<Time>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (entity, transform, mut enemy) in enemies.iter_mut() {
        enemy.fire_timer.tick(time.delta());
        if enemy.dead || !enemy.fire_timer.finished() {
            continue;
        }

        let position = transform.translation.truncate();
        if position.distance(target) > enemy.attack_range {
            continue;
        }

        let direction = (target - position).normalize_or_zero();
        if direction == Vec2::ZERO {
            continue;
        }

        match enemy.fire_pattern {
            FirePattern::Single => {
                spawn_projectile(
                    &mut commands,
                    ProjectileOwner::Enemy,
                    position,
                    direction * enemy.projectile_speed,
                    enemy.damage,
                    false,
                    0,
                    0.0,
                );
            }
            FirePattern::Spread3 => {
                for offset in [-SPREAD_ANGLE_RAD, 0.0, SPREAD_ANGLE_RAD] {
                    let rotated = Vec2::from_angle(offset).rotate(direction);
                    spawn_projectile(
                        &mut commands,
                        ProjectileOwner::Enemy,
                        position,
                        rotated * enemy.projectile_speed,
                        enemy.damage,
                        false,
                        0,
                        0.0,
                    );
                }
            }
            FirePattern::Homing => {
                spawn_projectile(
                    &mut commands,
                    ProjectileOwner::Enemy,
                    position,
                    direction * enemy.projectile_speed,
                    enemy.damage,
                    true,
                    0,
                    0.0,
                );
            }
            FirePattern::Burst3 => {
                // First shot now, the rest on the burst clock
                spawn_projectile(
                    &mut commands,
                    ProjectileOwner::Enemy,
                    position,
                    direction * enemy.projectile_speed,
                    enemy.damage,
                    false,
                    0,
                    0.0,
                );
                commands.entity(entity).insert(BurstState {
                    shots_left: 2,
                    gap: Timer::from_seconds(BURST_SHOT_GAP_SECS, TimerMode::Repeating),
                });
            }
        }

        sounds.write(SoundEffect::EnemyShot);
        enemy.fire_timer.reset();
    }
}

/// Delivers the trailing shots of a burst.
pub fn run_bursts(
    mut commands: Commands,
    mut bursts: Query<(Entity, &Transform, &Enemy, &mut BurstState)>,
    player: Query<&Transform, With<Player>>,
    time: Res<Time>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();

    for (entity, transform, enemy, mut burst) in bursts.iter_mut() {
        burst.gap.tick(time.delta());
        if !burst.gap.just_finished() {
            continue;
        }

        let position = transform.translation.truncate();
        let direction = (target - position).normalize_or_zero();
        if direction != Vec2::ZERO && !enemy.dead {
            spawn_projectile(
                &mut commands,
                ProjectileOwner::Enemy,
                position,
                direction * enemy.projectile_speed,
                enemy.damage,
                false,
                0,
                0.0,
            );
        }

        burst.shots_left -= 1;
        if burst.shots_left == 0 {
            commands.entity(entity).remove::<BurstState>();
        }
    }
}

/// Mage teleport: every few seconds it blinks to a ring around the player.
pub fn enemy_specials(
    mut enemies: Query<(&mut Transform, &mut Enemy), Without<Player>>,
    player: Query<&Transform, With<Player>>,
    time: Res<Time>,
) {
    let Ok(player_transform) = player.single() else {
        return;
    };
    let target = player_transform.translation.truncate();
    let mut rng = rand::thread_rng();

    for (mut transform, mut enemy) in enemies.iter_mut() {
        let Some(timer) = enemy.teleport_timer.as_mut() else {
            continue;
        };
        timer.tick(time.delta());
        if !timer.just_finished() || enemy.dead {
            continue;
        }

        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let range = rng.gen_range(MAGE_TELEPORT_MIN_RANGE..MAGE_TELEPORT_MAX_RANGE);
        let destination = target + Vec2::from_angle(angle) * range;

        let limit_x = WORLD_WIDTH / 2.0 - WORLD_EDGE_PADDING;
        let limit_y = WORLD_HEIGHT / 2.0 - WORLD_EDGE_PADDING;
        transform.translation.x = destination.x.clamp(-limit_x, limit_x);
        transform.translation.y = destination.y.clamp(-limit_y, limit_y);
    }
}

/// Scale enemy health bars with remaining health.
pub fn update_health_bars(
    enemies: Query<(&Enemy, &Children)>,
    mut bars: Query<(&mut Transform, &mut Sprite, &HealthBar)>,
) {
    for (enemy, children) in enemies.iter() {
        for child in children.iter() {
            if let Ok((mut transform, mut sprite, bar)) = bars.get_mut(child) {
                let fraction = (enemy.health / bar.max_health).clamp(0.0, 1.0);
                transform.scale.x = fraction;
                sprite.color = if fraction > 0.5 {
                    Color::srgb(0.0, 1.0, 0.0)
                } else if fraction > 0.25 {
                    Color::srgb(1.0, 0.8, 0.0)
                } else {
                    Color::srgb(1.0, 0.2, 0.0)
                };
            }
        }
    }
}

/// Turn dead enemies into exactly one kill notification each, then remove
/// them from the world.
pub fn cleanup_dead_enemies(
    mut commands: Commands,
    mut enemies: Query<(Entity, &Transform, &mut Enemy)>,
    mut killed: MessageWriter<EnemyKilled>,
) {
    for (entity, transform, mut enemy) in enemies.iter_mut() {
        if enemy.health > 0.0 || enemy.dead {
            continue;
        }
        enemy.dead = true;

        killed.write(EnemyKilled {
            archetype_id: enemy.archetype_id.clone(),
            score: enemy.score,
            position: transform.translation.truncate(),
        });

        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn enemy(health: f32, dead: bool) -> Enemy {
        Enemy {
            archetype_id: "assault".to_string(),
            health,
            max_health: 30.0,
            speed: 150.0,
            damage: 5.0,
            score: 10,
            attack_range: 270.0,
            fire_pattern: FirePattern::Single,
            projectile_speed: 300.0,
            fire_timer: Timer::from_seconds(0.8, TimerMode::Once),
            teleport_timer: None,
            keeps_distance: false,
            dead,
        }
    }

    #[test]
    fn death_emits_exactly_one_kill_notification() {
        let mut world = World::new();
        world.init_resource::<Messages<EnemyKilled>>();
        world.spawn((Transform::default(), enemy(0.0, false)));

        world.run_system_once(cleanup_dead_enemies).unwrap();
        assert_eq!(world.resource::<Messages<EnemyKilled>>().len(), 1);

        // A second pass finds nothing left to count
        world.run_system_once(cleanup_dead_enemies).unwrap();
        assert_eq!(world.resource::<Messages<EnemyKilled>>().len(), 1);
    }

    #[test]
    fn latched_corpse_is_not_counted_again() {
        let mut world = World::new();
        world.init_resource::<Messages<EnemyKilled>>();
        world.spawn((Transform::default(), enemy(0.0, true)));

        world.run_system_once(cleanup_dead_enemies).unwrap();
        assert_eq!(world.resource::<Messages<EnemyKilled>>().len(), 0);
    }

    #[test]
    fn live_enemy_is_left_alone() {
        let mut world = World::new();
        world.init_resource::<Messages<EnemyKilled>>();
        world.spawn((Transform::default(), enemy(12.0, false)));

        world.run_system_once(cleanup_dead_enemies).unwrap();
        assert_eq!(world.resource::<Messages<EnemyKilled>>().len(), 0);
        let mut enemies = world.query::<&Enemy>();
        assert_eq!(enemies.iter(&world).count(), 1);
    }
}
