use bevy::prelude::*;
use rand::Rng;

use crate::components::{HealPickup, Player, PlayerStats};
use crate::constants::{
    HEAL_DROP_AMOUNT, HEAL_DROP_CHANCE, MAGNET_PULL_SPEED, PICKUP_LIFETIME_SECS, PICKUP_RADIUS,
};
use crate::events::EnemyKilled;
use crate::systems::audio::SoundEffect;

/// Half of all kills leave a healing pickup behind.
pub fn drop_heal_pickups(mut commands: Commands, mut killed: MessageReader<EnemyKilled>) {
    let mut rng = rand::thread_rng();
    for kill in killed.read() {
        if !rng.gen_bool(HEAL_DROP_CHANCE) {
            continue;
        }
        commands.spawn((
            Sprite {
                color: Color::srgb(0.2, 1.0, 0.5),
                custom_size: Some(Vec2::new(14.0, 14.0)),
                ..default()
            },
            Transform::from_xyz(kill.position.x, kill.position.y, 0.5),
            HealPickup {
                amount: HEAL_DROP_AMOUNT,
                lifetime: Timer::from_seconds(PICKUP_LIFETIME_SECS, TimerMode::Once),
            },
        ));
    }
}

/// Collect pickups on contact; the magnet buff pulls them in from afar.
/// Untouched pickups fade out after a while.
pub fn update_pickups(
    mut commands: Commands,
    mut pickups: Query<(Entity, &mut Transform, &mut HealPickup), Without<Player>>,
    mut player: Query<(&Transform, &mut PlayerStats), With<Player>>,
    time: Res<Time>,
    mut sounds: MessageWriter<SoundEffect>,
) {
    let Ok((player_transform, mut stats)) = player.single_mut() else {
        return;
    };
    let player_position = player_transform.translation.truncate();

    for (entity, mut transform, mut pickup) in pickups.iter_mut() {
        pickup.lifetime.tick(time.delta());
        if pickup.lifetime.finished() {
            commands.entity(entity).despawn();
            continue;
        }

        let position = transform.translation.truncate();
        let distance = position.distance(player_position);

        if distance < PICKUP_RADIUS {
            stats.heal(pickup.amount);
            sounds.write(SoundEffect::Pickup);
            commands.entity(entity).despawn();
            continue;
        }

        if stats.magnet_range > 0.0 && distance <= stats.magnet_range {
            let pull = (player_position - position).normalize_or_zero() * MAGNET_PULL_SPEED;
            let movement = pull * time.delta_secs();
            transform.translation.x += movement.x;
            transform.translation.y += movement.y;
        }
    }
}
