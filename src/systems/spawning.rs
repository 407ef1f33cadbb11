use bevy::prelude::*;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::components::{Enemy, HealthBar, Player};
use crate::config::EnemyArchetype;
use crate::constants::{
    ENEMY_MAX_COUNT, SPAWN_MARGIN, SPAWN_MAX_ATTEMPTS, SPAWN_MIN_DISTANCE, VIEW_HEIGHT,
    VIEW_WIDTH, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::progression::batch_size;
use crate::resources::{EnemyCatalog, GameSession, SpawnDirector};
use crate::systems::setup::camera_center_for;

/// Spawn director. Every 3 seconds it places a level-dependent batch of
/// enemies just outside the view, spread out along the four edges.
pub fn spawn_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut director: ResMut<SpawnDirector>,
    session: Res<GameSession>,
    catalog: Res<EnemyCatalog>,
    enemies: Query<(), With<Enemy>>,
    player: Query<&Transform, With<Player>>,
) {
    director.timer.tick(time.delta());
    if !director.timer.just_finished() {
        return;
    }

    let live = enemies.iter().count();
    if live >= ENEMY_MAX_COUNT {
        return;
    }

    let Ok(player_transform) = player.single() else {
        return;
    };
    let player_position = player_transform.translation.truncate();

    let count = (batch_size(session.level) as usize).min(ENEMY_MAX_COUNT - live);
    let mut rng = rand::thread_rng();
    let positions = generate_spread_positions(&mut rng, count, player_position);

    for position in positions {
        if let Some(archetype) = catalog.archetypes.choose(&mut rng) {
            spawn_enemy(&mut commands, archetype, position);
        }
    }
}

/// Instantiate one enemy of the given archetype, with its health bar child.
pub fn spawn_enemy(commands: &mut Commands, archetype: &EnemyArchetype, position: Vec2) {
    let size = Vec2::new(archetype.sprite_size[0], archetype.sprite_size[1]);

    let enemy_entity = commands
        .spawn((
            Sprite {
                color: archetype_color(&archetype.id),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(position.x, position.y, 1.0),
            Enemy {
                archetype_id: archetype.id.clone(),
                health: archetype.max_health,
                max_health: archetype.max_health,
                speed: archetype.speed,
                damage: archetype.damage,
                score: archetype.score,
                attack_range: archetype.attack_range,
                fire_pattern: archetype.fire_pattern,
                projectile_speed: archetype.projectile_speed,
                fire_timer: Timer::from_seconds(archetype.fire_interval_secs, TimerMode::Once),
                teleport_timer: archetype
                    .teleport_interval_secs
                    .map(|secs| Timer::from_seconds(secs, TimerMode::Repeating)),
                keeps_distance: archetype.keeps_distance,
                dead: false,
            },
        ))
        .id();

    // Health bar above the enemy as child
    let health_bar = commands
        .spawn((
            Sprite {
                color: Color::srgb(0.0, 1.0, 0.0),
                custom_size: Some(Vec2::new(size.x, 4.0)),
                ..default()
            },
            Transform::from_xyz(0.0, size.y * 0.6 + 4.0, 0.1),
            HealthBar {
                max_health: archetype.max_health,
            },
        ))
        .id();

    commands.entity(enemy_entity).add_child(health_bar);
}

fn archetype_color(id: &str) -> Color {
    match id {
        "assault" => Color::srgb(0.3, 0.9, 0.3),
        "tank" => Color::srgb(0.9, 0.25, 0.2),
        "mage" => Color::srgb(0.4, 0.4, 1.0),
        _ => Color::srgb(0.8, 0.8, 0.8),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

const SIDES: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

/// Positions for one spawn batch, anchored on the camera view (clamped to
/// the world, same as the follow camera): a random view edge, `SPAWN_MARGIN`
/// outside the visible area, pairwise spacing of at least
/// `SPAWN_MIN_DISTANCE`. Edges whose spawn band would fall outside the world
/// are skipped, so positions never clamp inward onto the screen; since the
/// player is always inside the view, every position is also at least
/// `SPAWN_MARGIN` away from the player. Spacing is best-effort: after
/// `SPAWN_MAX_ATTEMPTS` the last candidate is accepted as-is.
pub fn generate_spread_positions<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    player_position: Vec2,
) -> Vec<Vec2> {
    let view_center = camera_center_for(player_position);
    let sides = open_sides(view_center);
    let mut positions: Vec<Vec2> = Vec::with_capacity(count);
    if sides.is_empty() {
        return positions;
    }

    for _ in 0..count {
        let mut attempts = 0;
        let position = loop {
            let side = sides[rng.gen_range(0..sides.len())];
            let candidate = position_on_side(rng, side, view_center);
            attempts += 1;

            let spaced = positions
                .iter()
                .all(|existing| existing.distance(candidate) >= SPAWN_MIN_DISTANCE);
            if spaced || attempts >= SPAWN_MAX_ATTEMPTS {
                break candidate;
            }
        };
        positions.push(position);
    }

    positions
}

/// View edges with room for the spawn band between the view and the world
/// edge. The world is wider than view + two margins on both axes, so the
/// side away from a wall is always open.
fn open_sides(center: Vec2) -> Vec<Side> {
    let half_w = VIEW_WIDTH / 2.0;
    let half_h = VIEW_HEIGHT / 2.0;

    SIDES
        .iter()
        .copied()
        .filter(|side| match side {
            Side::Top => center.y + half_h + SPAWN_MARGIN <= WORLD_HEIGHT / 2.0,
            Side::Bottom => center.y - half_h - SPAWN_MARGIN >= -WORLD_HEIGHT / 2.0,
            Side::Right => center.x + half_w + SPAWN_MARGIN <= WORLD_WIDTH / 2.0,
            Side::Left => center.x - half_w - SPAWN_MARGIN >= -WORLD_WIDTH / 2.0,
        })
        .collect()
}

fn position_on_side<R: Rng + ?Sized>(rng: &mut R, side: Side, center: Vec2) -> Vec2 {
    let half_w = VIEW_WIDTH / 2.0;
    let half_h = VIEW_HEIGHT / 2.0;

    match side {
        Side::Top => Vec2::new(
            center.x + rng.gen_range(-half_w..half_w),
            center.y + half_h + SPAWN_MARGIN,
        ),
        Side::Bottom => Vec2::new(
            center.x + rng.gen_range(-half_w..half_w),
            center.y - half_h - SPAWN_MARGIN,
        ),
        Side::Right => Vec2::new(
            center.x + half_w + SPAWN_MARGIN,
            center.y + rng.gen_range(-half_h..half_h),
        ),
        Side::Left => Vec2::new(
            center.x - half_w - SPAWN_MARGIN,
            center.y + rng.gen_range(-half_h..half_h),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn positions_land_outside_the_view() {
        let mut rng = StdRng::seed_from_u64(11);
        let center = Vec2::ZERO;
        for position in generate_spread_positions(&mut rng, 50, center) {
            let outside_x = position.x.abs() > VIEW_WIDTH / 2.0;
            let outside_y = position.y.abs() > VIEW_HEIGHT / 2.0;
            assert!(
                outside_x || outside_y,
                "spawn position {position:?} is inside the view"
            );
        }
    }

    fn assert_hidden_and_clear_of(player: Vec2, position: Vec2) {
        let camera = camera_center_for(player);
        let inside_view = (position.x - camera.x).abs() < VIEW_WIDTH / 2.0
            && (position.y - camera.y).abs() < VIEW_HEIGHT / 2.0;
        assert!(
            !inside_view,
            "spawn position {position:?} is visible with the camera at {camera:?}"
        );
        assert!(position.x.abs() <= WORLD_WIDTH / 2.0);
        assert!(position.y.abs() <= WORLD_HEIGHT / 2.0);
        assert!(
            position.distance(player) >= SPAWN_MARGIN,
            "spawn position {position:?} is on top of the player at {player:?}"
        );
    }

    #[test]
    fn wall_hugging_player_still_gets_offscreen_spawns() {
        let mut rng = StdRng::seed_from_u64(3);
        let player = Vec2::new(WORLD_WIDTH / 2.0 - 10.0, 0.0);
        let positions = generate_spread_positions(&mut rng, 200, player);
        assert_eq!(positions.len(), 200);
        for position in positions {
            assert_hidden_and_clear_of(player, position);
        }
    }

    #[test]
    fn corner_camping_player_still_gets_offscreen_spawns() {
        let mut rng = StdRng::seed_from_u64(5);
        let player = Vec2::new(WORLD_WIDTH / 2.0 - 10.0, WORLD_HEIGHT / 2.0 - 10.0);
        let positions = generate_spread_positions(&mut rng, 200, player);
        assert_eq!(positions.len(), 200);
        for position in positions {
            assert_hidden_and_clear_of(player, position);
        }
    }

    #[test]
    fn batches_are_usually_spread_apart() {
        // The retry budget makes spacing best-effort; require it to hold in
        // at least 80% of batches.
        let mut rng = StdRng::seed_from_u64(42);
        let runs = 200;
        let mut spaced_runs = 0;

        for _ in 0..runs {
            let positions = generate_spread_positions(&mut rng, 4, Vec2::ZERO);
            assert_eq!(positions.len(), 4);
            let spaced = positions.iter().enumerate().all(|(i, a)| {
                positions
                    .iter()
                    .skip(i + 1)
                    .all(|b| a.distance(*b) >= SPAWN_MIN_DISTANCE)
            });
            if spaced {
                spaced_runs += 1;
            }
        }

        assert!(
            spaced_runs * 100 >= runs * 80,
            "only {spaced_runs}/{runs} batches were fully spaced"
        );
    }

    #[test]
    fn batch_of_one_needs_no_spacing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_spread_positions(&mut rng, 1, Vec2::ZERO).len(), 1);
        assert!(generate_spread_positions(&mut rng, 0, Vec2::ZERO).is_empty());
    }
}
