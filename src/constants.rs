use bevy::prelude::*;

// World and view dimensions
pub const WORLD_WIDTH: f32 = 2000.0;
pub const WORLD_HEIGHT: f32 = 2000.0;
pub const VIEW_WIDTH: f32 = 1280.0;
pub const VIEW_HEIGHT: f32 = 720.0;

// Player tuning
pub const PLAYER_HEALTH: f32 = 100.0;
pub const PLAYER_SPEED: f32 = 200.0;
pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const PLAYER_COLOR: Color = Color::srgb(0.3, 0.8, 1.0);
pub const PLAYER_INVULNERABILITY_SECS: f32 = 1.0;
pub const AUTO_SHOOT_INTERVAL_SECS: f32 = 0.5;
pub const PLAYER_PROJECTILE_SPEED: f32 = 500.0;
pub const PLAYER_PROJECTILE_DAMAGE: f32 = 10.0;
pub const REGEN_INTERVAL_SECS: f32 = 5.0;

// Spawn director
pub const ENEMY_SPAWN_INTERVAL_SECS: f32 = 3.0;
pub const ENEMY_MAX_COUNT: usize = 50;
pub const SPAWN_MARGIN: f32 = 100.0;
pub const SPAWN_MIN_DISTANCE: f32 = 120.0;
pub const SPAWN_MAX_ATTEMPTS: u32 = 20;
pub const MAX_ENEMIES_PER_BATCH: u32 = 4;

// Pickups
pub const HEAL_DROP_CHANCE: f64 = 0.5;
pub const HEAL_DROP_AMOUNT: f32 = 20.0;
pub const PICKUP_RADIUS: f32 = 24.0;
pub const PICKUP_LIFETIME_SECS: f32 = 15.0;
pub const MAGNET_PULL_SPEED: f32 = 300.0;

// Drones
pub const DRONE_ORBIT_RADIUS: f32 = 80.0;
pub const DRONE_ORBIT_SECS: f32 = 4.0;
pub const DRONE_FIRE_INTERVAL_SECS: f32 = 0.8;
pub const DRONE_RANGE: f32 = 300.0;
pub const DRONE_PROJECTILE_SPEED: f32 = 400.0;
pub const DRONE_PROJECTILE_DAMAGE: f32 = 8.0;

// Projectiles
pub const PROJECTILE_LIFETIME_SECS: f32 = 5.0;
pub const PROJECTILE_HIT_RADIUS: f32 = 16.0;
pub const ENEMY_CONTACT_RADIUS: f32 = 28.0;
pub const BURST_SHOT_GAP_SECS: f32 = 0.1;
pub const SPREAD_ANGLE_RAD: f32 = 0.3;
pub const HOMING_TURN_STRENGTH: f32 = 0.02;

// Mage special
pub const MAGE_TELEPORT_MIN_RANGE: f32 = 200.0;
pub const MAGE_TELEPORT_MAX_RANGE: f32 = 300.0;
pub const MAGE_RETREAT_DISTANCE: f32 = 120.0;
pub const MAGE_APPROACH_DISTANCE: f32 = 300.0;
pub const WORLD_EDGE_PADDING: f32 = 50.0;
