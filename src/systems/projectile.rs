use bevy::prelude::*;

use crate::components::{
    Enemy, Invulnerable, Player, PlayerStats, Projectile, ProjectileOwner,
};
use crate::constants::{
    ENEMY_CONTACT_RADIUS, HOMING_TURN_STRENGTH, PLAYER_COLOR, PLAYER_INVULNERABILITY_SECS,
    PROJECTILE_HIT_RADIUS, PROJECTILE_LIFETIME_SECS, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::events::PlayerDamaged;
use crate::systems::audio::SoundEffect;

pub fn spawn_projectile(
    commands: &mut Commands,
    owner: ProjectileOwner,
    position: Vec2,
    velocity: Vec2,
    damage: f32,
    homing: bool,
    pierce: u32,
    explosion_radius: f32,
) {
    let color = match owner {
        ProjectileOwner::Player => Color::srgb(1.0, 1.0, 0.4),
        ProjectileOwner::Drone => Color::srgb(0.4, 1.0, 1.0),
        ProjectileOwner::Enemy => Color::srgb(1.0, 0.4, 0.2),
    };

    commands.spawn((
        Sprite {
            color,
            custom_size: Some(Vec2::new(8.0, 8.0)),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 2.0),
        Projectile {
            owner,
            damage,
            velocity,
            homing,
            pierce_remaining: pierce,
            explosion_radius,
            lifetime: Timer::from_seconds(PROJECTILE_LIFETIME_SECS, TimerMode::Once),
            already_hit: Vec::new(),
        },
    ));
}

/// Integrate projectile positions; homing shots steer toward their side's
/// target. Expired or out-of-world shots are removed.
pub fn move_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    enemies: Query<&Transform, (With<Enemy>, Without<Projectile>)>,
    player: Query<&Transform, (With<Player>, Without<Projectile>)>,
    time: Res<Time>,
) {
    let player_position = player.single().map(|t| t.translation.truncate()).ok();

    for (entity, mut transform, mut projectile) in projectiles.iter_mut() {
        projectile.lifetime.tick(time.delta());
        if projectile.lifetime.finished() {
            commands.entity(entity).despawn();
            continue;
        }

        let position = transform.translation.truncate();

        if projectile.homing {
            let target = match projectile.owner {
                ProjectileOwner::Enemy => player_position,
                _ => nearest_enemy_position(&enemies, position),
            };
            if let Some(target) = target {
                let speed = projectile.velocity.length();
                let desired = (target - position).normalize_or_zero() * speed;
                let steered = projectile.velocity.lerp(desired, HOMING_TURN_STRENGTH);
                projectile.velocity = steered.normalize_or_zero() * speed;
            }
        }

        let movement = projectile.velocity * time.delta_secs();
        transform.translation.x += movement.x;
        transform.translation.y += movement.y;

        // Face the travel direction
        let angle = projectile.velocity.y.atan2(projectile.velocity.x);
        transform.rotation = Quat::from_rotation_z(angle);

        if transform.translation.x.abs() > WORLD_WIDTH / 2.0 + 100.0
            || transform.translation.y.abs() > WORLD_HEIGHT / 2.0 + 100.0
        {
            commands.entity(entity).despawn();
        }
    }
}

fn nearest_enemy_position(
    enemies: &Query<&Transform, (With<Enemy>, Without<Projectile>)>,
    from: Vec2,
) -> Option<Vec2> {
    enemies
        .iter()
        .map(|t| t.translation.truncate())
        .min_by(|a, b| {
            a.distance_squared(from)
                .total_cmp(&b.distance_squared(from))
        })
}

/// Player and drone shots against enemies. Piercing shots pass through,
/// explosive shots splash around the impact.
pub fn handle_player_hits(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &Transform, &mut Projectile)>,
    mut enemies: Query<(Entity, &Transform, &mut Enemy)>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    for (projectile_entity, projectile_transform, mut projectile) in projectiles.iter_mut() {
        if projectile.owner == ProjectileOwner::Enemy {
            continue;
        }
        let projectile_position = projectile_transform.translation.truncate();

        let mut hit_enemy = None;
        for (enemy_entity, enemy_transform, enemy) in enemies.iter() {
            if enemy.dead || projectile.already_hit.contains(&enemy_entity) {
                continue;
            }
            let distance = projectile_position.distance(enemy_transform.translation.truncate());
            if distance < PROJECTILE_HIT_RADIUS {
                hit_enemy = Some(enemy_entity);
                break;
            }
        }

        let Some(enemy_entity) = hit_enemy else {
            continue;
        };

        if let Ok((_, _, mut enemy)) = enemies.get_mut(enemy_entity) {
            enemy.health -= projectile.damage;
        }
        projectile.already_hit.push(enemy_entity);

        if projectile.explosion_radius > 0.0 {
            sounds.write(SoundEffect::Explosion);
            let splash = projectile.damage * 0.5;
            for (other_entity, other_transform, mut other) in enemies.iter_mut() {
                if other_entity == enemy_entity || other.dead {
                    continue;
                }
                let distance =
                    projectile_position.distance(other_transform.translation.truncate());
                if distance <= projectile.explosion_radius {
                    other.health -= splash;
                }
            }
        }

        if projectile.pierce_remaining > 0 {
            projectile.pierce_remaining -= 1;
        } else {
            commands.entity(projectile_entity).despawn();
        }
    }
}

/// Enemy shots and enemy bodies against the player, gated by the
/// invulnerability window.
pub fn handle_player_damage(
    mut commands: Commands,
    projectiles: Query<(Entity, &Transform, &Projectile)>,
    enemies: Query<(&Transform, &Enemy)>,
    mut player: Query<(Entity, &Transform, &mut PlayerStats), (With<Player>, Without<Invulnerable>)>,
    mut damaged: MessageWriter<PlayerDamaged>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Ok((player_entity, player_transform, mut stats)) = player.single_mut() else {
        return;
    };
    let player_position = player_transform.translation.truncate();

    let mut incoming = None;

    for (projectile_entity, transform, projectile) in projectiles.iter() {
        if projectile.owner != ProjectileOwner::Enemy {
            continue;
        }
        if player_position.distance(transform.translation.truncate()) < PROJECTILE_HIT_RADIUS {
            incoming = Some(projectile.damage);
            commands.entity(projectile_entity).despawn();
            break;
        }
    }

    if incoming.is_none() {
        for (transform, enemy) in enemies.iter() {
            if enemy.dead {
                continue;
            }
            if player_position.distance(transform.translation.truncate()) < ENEMY_CONTACT_RADIUS {
                incoming = Some(enemy.damage);
                break;
            }
        }
    }

    let Some(raw) = incoming else {
        return;
    };

    let dealt = stats.absorb_damage(raw);
    sounds.write(SoundEffect::PlayerHit);
    damaged.write(PlayerDamaged {
        dealt,
        health_left: stats.health,
    });

    commands.entity(player_entity).insert(Invulnerable {
        timer: Timer::from_seconds(PLAYER_INVULNERABILITY_SECS, TimerMode::Once),
    });
}

/// Visual feedback on the hit itself: red when health was lost, white when a
/// shield charge ate the damage.
pub fn player_hit_flash(
    mut events: MessageReader<PlayerDamaged>,
    mut player: Query<&mut Sprite, With<Player>>,
) {
    for event in events.read() {
        let Ok(mut sprite) = player.single_mut() else {
            continue;
        };
        sprite.color = if event.dealt > 0.0 {
            Color::srgb(1.0, 0.3, 0.3)
        } else {
            Color::srgb(1.0, 1.0, 1.0)
        };
    }
}

pub fn tick_invulnerability(
    mut commands: Commands,
    mut query: Query<(Entity, &mut Invulnerable, &mut Sprite)>,
    time: Res<Time>,
) {
    for (entity, mut invulnerable, mut sprite) in query.iter_mut() {
        invulnerable.timer.tick(time.delta());
        if invulnerable.timer.finished() {
            sprite.color = PLAYER_COLOR;
            commands.entity(entity).remove::<Invulnerable>();
        }
    }
}
