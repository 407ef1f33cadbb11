use bevy::prelude::*;

use crate::config::FirePattern;

#[derive(Component)]
pub struct Player;

/// Mutable attribute bag the buff system works against. Owned by the single
/// player entity; one writer per frame.
#[derive(Component, Debug, Clone)]
pub struct PlayerStats {
    pub health: f32,
    pub max_health: f32,
    pub speed_multiplier: f32,
    pub damage_multiplier: f32,
    pub fire_rate_multiplier: f32,
    pub armor_reduction: f32,
    pub crit_chance: f32,
    pub multi_shot: u32,
    pub pierce: u32,
    pub explosion_radius: f32,
    pub auto_targeting: bool,
    pub berserker: bool,
    pub drone_count: u32,
    pub magnet_range: f32,
    pub regen_rate: f32,
    pub enemy_slow: f32,
    pub shield_charges: u32,
    pub vampirism: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: crate::constants::PLAYER_HEALTH,
            max_health: crate::constants::PLAYER_HEALTH,
            speed_multiplier: 1.0,
            damage_multiplier: 1.0,
            fire_rate_multiplier: 1.0,
            armor_reduction: 0.0,
            crit_chance: 0.0,
            multi_shot: 1,
            pierce: 0,
            explosion_radius: 0.0,
            auto_targeting: false,
            berserker: false,
            drone_count: 0,
            magnet_range: 0.0,
            regen_rate: 0.0,
            enemy_slow: 0.0,
            shield_charges: 0,
            vampirism: 0.0,
        }
    }
}

impl PlayerStats {
    /// Run an incoming hit through shield charges and armor. Returns the
    /// damage actually dealt to health.
    pub fn absorb_damage(&mut self, raw: f32) -> f32 {
        if self.shield_charges > 0 {
            self.shield_charges -= 1;
            return 0.0;
        }
        let reduction = self.armor_reduction.clamp(0.0, 0.9);
        let dealt = raw * (1.0 - reduction);
        self.health = (self.health - dealt).max(0.0);
        dealt
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Base outgoing damage before the crit roll. Berserker adds up to
    /// +100% as health approaches zero.
    pub fn outgoing_damage(&self, base: f32) -> f32 {
        let mut damage = base * self.damage_multiplier;
        if self.berserker && self.max_health > 0.0 {
            let missing = 1.0 - (self.health / self.max_health).clamp(0.0, 1.0);
            damage *= 1.0 + missing;
        }
        damage
    }

    /// Seconds between auto-shots under the current fire-rate multiplier.
    pub fn shot_interval(&self, base_secs: f32) -> f32 {
        base_secs / self.fire_rate_multiplier.max(0.1)
    }
}

/// Enemy instance. Archetype data is copied in at spawn so the entity is
/// self-contained.
#[derive(Component)]
pub struct Enemy {
    pub archetype_id: String,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub score: u32,
    pub attack_range: f32,
    pub fire_pattern: FirePattern,
    pub projectile_speed: f32,
    pub fire_timer: Timer,
    pub teleport_timer: Option<Timer>,
    pub keeps_distance: bool,
    /// Set when the kill has been counted, so a second projectile landing in
    /// the same frame cannot double-score.
    pub dead: bool,
}

/// Pending shots for the burst fire pattern.
#[derive(Component)]
pub struct BurstState {
    pub shots_left: u32,
    pub gap: Timer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Drone,
    Enemy,
}

#[derive(Component)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub damage: f32,
    pub velocity: Vec2,
    pub homing: bool,
    /// Enemies this shot can still pass through
    pub pierce_remaining: u32,
    pub explosion_radius: f32,
    pub lifetime: Timer,
    /// Enemies a piercing shot has already damaged
    pub already_hit: Vec<Entity>,
}

/// Grace window after the player takes a hit.
#[derive(Component)]
pub struct Invulnerable {
    pub timer: Timer,
}

#[derive(Component)]
pub struct Drone {
    pub angle: f32,
    pub fire_timer: Timer,
}

#[derive(Component)]
pub struct HealPickup {
    pub amount: f32,
    pub lifetime: Timer,
}

/// Green bar above an enemy, child of the enemy entity.
#[derive(Component)]
pub struct HealthBar {
    pub max_health: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shield_absorbs_whole_hits_before_armor() {
        let mut stats = PlayerStats {
            shield_charges: 1,
            armor_reduction: 0.15,
            ..default()
        };
        assert_eq!(stats.absorb_damage(20.0), 0.0);
        assert_eq!(stats.shield_charges, 0);
        assert_eq!(stats.health, 100.0);

        // Next hit goes through armor: 20 * 0.85 = 17
        let dealt = stats.absorb_damage(20.0);
        assert!((dealt - 17.0).abs() < f32::EPSILON);
        assert!((stats.health - 83.0).abs() < 0.001);
    }

    #[test]
    fn health_never_goes_negative() {
        let mut stats = PlayerStats::default();
        stats.absorb_damage(1000.0);
        assert_eq!(stats.health, 0.0);
    }

    #[test]
    fn heal_caps_at_max_health() {
        let mut stats = PlayerStats::default();
        stats.health = 90.0;
        assert_eq!(stats.heal(50.0), 10.0);
        assert_eq!(stats.health, stats.max_health);
    }

    #[test]
    fn berserker_scales_with_missing_health() {
        let mut stats = PlayerStats {
            berserker: true,
            ..default()
        };
        assert_eq!(stats.outgoing_damage(10.0), 10.0);
        stats.health = 50.0;
        assert!((stats.outgoing_damage(10.0) - 15.0).abs() < 0.001);
        stats.health = 0.0;
        assert!((stats.outgoing_damage(10.0) - 20.0).abs() < 0.001);
    }

    #[test]
    fn fire_rate_multiplier_shortens_shot_interval() {
        let stats = PlayerStats {
            fire_rate_multiplier: 1.4,
            ..default()
        };
        assert!((stats.shot_interval(0.5) - 0.5 / 1.4).abs() < 0.001);
    }
}
