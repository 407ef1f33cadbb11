//! Level-up buffs.
//!
//! Every buff is a named effect function over [`PlayerStats`]. Effects stack
//! on repeat application: multipliers compound, counters add, flags latch.

use std::collections::HashMap;

use bevy::prelude::*;
use rand::Rng;

use crate::components::PlayerStats;

pub struct BuffDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    apply: fn(&mut PlayerStats) -> String,
}

/// Lightweight copy handed to the level-up overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuffChoice {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Resource)]
pub struct BuffRegistry {
    definitions: Vec<BuffDefinition>,
    applied: HashMap<&'static str, u32>,
}

impl Default for BuffRegistry {
    fn default() -> Self {
        Self {
            definitions: buff_definitions(),
            applied: HashMap::default(),
        }
    }
}

impl BuffRegistry {
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Draw up to `count` distinct buffs. Returns fewer when the registry
    /// holds fewer definitions; never panics.
    pub fn random_buffs<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<BuffChoice> {
        let picks = count.min(self.definitions.len());
        rand::seq::index::sample(rng, self.definitions.len(), picks)
            .iter()
            .map(|i| {
                let def = &self.definitions[i];
                BuffChoice {
                    id: def.id,
                    name: def.name,
                    description: def.description,
                    icon: def.icon,
                }
            })
            .collect()
    }

    /// Apply a buff to the player. Unknown ids are logged and ignored.
    pub fn apply(&mut self, id: &str, stats: &mut PlayerStats) -> Option<String> {
        let Some(def) = self.definitions.iter().find(|d| d.id == id) else {
            warn!("ignoring unknown buff id: {id}");
            return None;
        };
        let summary = (def.apply)(stats);
        *self.applied.entry(def.id).or_insert(0) += 1;
        info!("applied buff {} ({})", def.name, summary);
        Some(summary)
    }

    /// How many times a buff has been taken this run.
    pub fn times_applied(&self, id: &str) -> u32 {
        self.applied.get(id).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.applied.clear();
    }
}

fn buff_definitions() -> Vec<BuffDefinition> {
    vec![
        BuffDefinition {
            id: "health_boost",
            name: "Extra Health",
            description: "+20 max health",
            icon: "❤️",
            apply: |p| {
                p.max_health += 20.0;
                p.heal(20.0);
                format!("Max health: {:.0}", p.max_health)
            },
        },
        BuffDefinition {
            id: "heal",
            name: "First Aid",
            description: "Restore 50 health",
            icon: "🏥",
            apply: |p| {
                let restored = p.heal(50.0);
                format!("Restored {restored:.0} health")
            },
        },
        BuffDefinition {
            id: "damage_boost",
            name: "Damage Up",
            description: "+25% weapon damage",
            icon: "⚡",
            apply: |p| {
                p.damage_multiplier *= 1.25;
                format!("Damage: x{:.2}", p.damage_multiplier)
            },
        },
        BuffDefinition {
            id: "armor",
            name: "Armor Vest",
            description: "Incoming damage -15%",
            icon: "🛡️",
            apply: |p| {
                p.armor_reduction += 0.15;
                format!("Damage reduction: {:.0}%", p.armor_reduction * 100.0)
            },
        },
        BuffDefinition {
            id: "speed_boost",
            name: "Adrenaline",
            description: "+30% move speed",
            icon: "💨",
            apply: |p| {
                p.speed_multiplier *= 1.3;
                format!("Speed: x{:.2}", p.speed_multiplier)
            },
        },
        BuffDefinition {
            id: "fire_rate",
            name: "Rapid Fire",
            description: "+40% fire rate",
            icon: "🔥",
            apply: |p| {
                p.fire_rate_multiplier *= 1.4;
                format!("Fire rate: x{:.2}", p.fire_rate_multiplier)
            },
        },
        BuffDefinition {
            id: "drone",
            name: "Combat Drone",
            description: "A drone orbits you and shoots nearby enemies",
            icon: "🤖",
            apply: |p| {
                p.drone_count += 1;
                format!("Drones: {}", p.drone_count)
            },
        },
        BuffDefinition {
            id: "auto_targeting",
            name: "Auto Targeting",
            description: "Your shots seek out enemies",
            icon: "🎯",
            apply: |p| {
                p.auto_targeting = true;
                "Auto targeting online".to_string()
            },
        },
        BuffDefinition {
            id: "piercing_shots",
            name: "Piercing Shots",
            description: "Shots pass through enemies",
            icon: "🏹",
            apply: |p| {
                p.pierce += 2;
                format!("Pierces {} enemies", p.pierce)
            },
        },
        BuffDefinition {
            id: "multi_shot",
            name: "Triple Shot",
            description: "Fire three projectiles at once",
            icon: "🔱",
            apply: |p| {
                p.multi_shot += 2;
                format!("Projectiles per shot: {}", p.multi_shot)
            },
        },
        BuffDefinition {
            id: "explosive_rounds",
            name: "Explosive Rounds",
            description: "Shots explode on impact",
            icon: "💥",
            apply: |p| {
                p.explosion_radius += 50.0;
                format!("Blast radius: {:.0}px", p.explosion_radius)
            },
        },
        BuffDefinition {
            id: "magnetic",
            name: "Magnetism",
            description: "Pulls pickups toward you",
            icon: "🧲",
            apply: |p| {
                p.magnet_range += 100.0;
                format!("Magnet range: {:.0}px", p.magnet_range)
            },
        },
        BuffDefinition {
            id: "regeneration",
            name: "Regeneration",
            description: "+1 health every 5 seconds",
            icon: "🌿",
            apply: |p| {
                p.regen_rate += 1.0;
                format!("Regen: {:.0} hp / 5s", p.regen_rate)
            },
        },
        BuffDefinition {
            id: "time_slow",
            name: "Chrono Field",
            description: "Enemies move 20% slower",
            icon: "⏰",
            apply: |p| {
                p.enemy_slow += 0.2;
                format!("Enemy slow: {:.0}%", p.enemy_slow.min(0.8) * 100.0)
            },
        },
        BuffDefinition {
            id: "luck",
            name: "Lucky Streak",
            description: "+15% critical hit chance (x2 damage)",
            icon: "🍀",
            apply: |p| {
                p.crit_chance += 0.15;
                format!("Crit chance: {:.0}%", p.crit_chance * 100.0)
            },
        },
        BuffDefinition {
            id: "energy_shield",
            name: "Energy Shield",
            description: "Blocks the next 3 hits",
            icon: "🔰",
            apply: |p| {
                p.shield_charges += 3;
                format!("Shield charges: {}", p.shield_charges)
            },
        },
        BuffDefinition {
            id: "vampire",
            name: "Vampirism",
            description: "Heal 2 health per kill",
            icon: "🧛",
            apply: |p| {
                p.vampirism += 2.0;
                format!("Vampirism: +{:.0} hp per kill", p.vampirism)
            },
        },
        BuffDefinition {
            id: "berserker",
            name: "Berserker",
            description: "The lower your health, the higher your damage",
            icon: "😡",
            apply: |p| {
                p.berserker = true;
                "Berserker mode engaged".to_string()
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn registry_holds_the_full_buff_set() {
        let registry = BuffRegistry::default();
        assert_eq!(registry.len(), 18);
    }

    #[test]
    fn random_buffs_returns_distinct_ids() {
        let registry = BuffRegistry::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picks = registry.random_buffs(&mut rng, 3);
            assert_eq!(picks.len(), 3);
            assert_ne!(picks[0].id, picks[1].id);
            assert_ne!(picks[0].id, picks[2].id);
            assert_ne!(picks[1].id, picks[2].id);
        }
    }

    #[test]
    fn random_buffs_degrades_when_asking_for_too_many() {
        let registry = BuffRegistry::default();
        let mut rng = StdRng::seed_from_u64(7);
        let picks = registry.random_buffs(&mut rng, 1000);
        assert_eq!(picks.len(), registry.len());
    }

    #[test]
    fn damage_boost_compounds_multiplicatively() {
        let mut registry = BuffRegistry::default();
        let mut stats = PlayerStats::default();
        registry.apply("damage_boost", &mut stats);
        registry.apply("damage_boost", &mut stats);
        assert!((stats.damage_multiplier - 1.5625).abs() < 0.0001);
        assert_eq!(registry.times_applied("damage_boost"), 2);
    }

    #[test]
    fn additive_buffs_stack() {
        let mut registry = BuffRegistry::default();
        let mut stats = PlayerStats::default();
        registry.apply("armor", &mut stats);
        registry.apply("armor", &mut stats);
        assert!((stats.armor_reduction - 0.3).abs() < 0.0001);

        registry.apply("drone", &mut stats);
        registry.apply("drone", &mut stats);
        registry.apply("drone", &mut stats);
        assert_eq!(stats.drone_count, 3);
    }

    #[test]
    fn unknown_buff_is_a_logged_no_op() {
        let mut registry = BuffRegistry::default();
        let mut stats = PlayerStats::default();
        let before = stats.clone();
        assert!(registry.apply("no_such_buff", &mut stats).is_none());
        assert_eq!(stats.damage_multiplier, before.damage_multiplier);
        assert_eq!(registry.times_applied("no_such_buff"), 0);
    }

    #[test]
    fn health_boost_raises_cap_and_heals() {
        let mut registry = BuffRegistry::default();
        let mut stats = PlayerStats::default();
        stats.health = 60.0;
        registry.apply("health_boost", &mut stats);
        assert_eq!(stats.max_health, 120.0);
        assert_eq!(stats.health, 80.0);
    }
}
