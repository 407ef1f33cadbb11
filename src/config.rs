use serde::{Deserialize, Serialize};

/// How an archetype fires at the player once it is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirePattern {
    /// One projectile straight at the target
    Single,
    /// Three projectiles in quick succession
    Burst3,
    /// Three projectiles in a fan
    Spread3,
    /// One projectile that curves toward the target
    Homing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyArchetype {
    pub id: String,
    pub name: String,
    pub max_health: f32,
    pub speed: f32,
    pub damage: f32,
    pub fire_interval_secs: f32,
    pub score: u32,
    pub attack_range: f32,
    pub projectile_speed: f32,
    pub fire_pattern: FirePattern,
    /// Seconds between teleports, if the archetype has one
    pub teleport_interval_secs: Option<f32>,
    /// Archetype that holds distance instead of closing in
    #[serde(default)]
    pub keeps_distance: bool,
    pub sprite_size: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchetypesConfig {
    pub archetypes: Vec<EnemyArchetype>,
}

impl ArchetypesConfig {
    pub fn load() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let content = std::fs::read_to_string("archetypes.toml")?;
        Ok(toml::from_str(&content)?)
    }

    pub fn get(&self, id: &str) -> Option<&EnemyArchetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }
}

impl Default for ArchetypesConfig {
    fn default() -> Self {
        Self {
            archetypes: vec![
                EnemyArchetype {
                    id: "assault".into(),
                    name: "Assault".into(),
                    max_health: 30.0,
                    speed: 150.0,
                    damage: 5.0,
                    fire_interval_secs: 0.8,
                    score: 10,
                    attack_range: 270.0,
                    projectile_speed: 300.0,
                    fire_pattern: FirePattern::Single,
                    teleport_interval_secs: None,
                    keeps_distance: false,
                    sprite_size: [38.0, 38.0],
                },
                EnemyArchetype {
                    id: "tank".into(),
                    name: "Tank".into(),
                    max_health: 100.0,
                    speed: 80.0,
                    damage: 15.0,
                    fire_interval_secs: 2.0,
                    score: 30,
                    attack_range: 220.0,
                    projectile_speed: 200.0,
                    fire_pattern: FirePattern::Spread3,
                    teleport_interval_secs: None,
                    keeps_distance: false,
                    sprite_size: [58.0, 58.0],
                },
                EnemyArchetype {
                    id: "mage".into(),
                    name: "Mage".into(),
                    max_health: 60.0,
                    speed: 110.0,
                    damage: 12.0,
                    fire_interval_secs: 1.2,
                    score: 20,
                    attack_range: 300.0,
                    projectile_speed: 250.0,
                    fire_pattern: FirePattern::Homing,
                    teleport_interval_secs: Some(5.0),
                    keeps_distance: true,
                    sprite_size: [48.0, 48.0],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_three_archetypes() {
        let config = ArchetypesConfig::default();
        assert_eq!(config.archetypes.len(), 3);
        assert!(config.get("assault").is_some());
        assert!(config.get("tank").is_some());
        assert!(config.get("mage").is_some());
        assert!(config.get("boss").is_none());
    }

    #[test]
    fn mage_is_the_only_teleporter() {
        let config = ArchetypesConfig::default();
        let teleporters: Vec<_> = config
            .archetypes
            .iter()
            .filter(|a| a.teleport_interval_secs.is_some())
            .collect();
        assert_eq!(teleporters.len(), 1);
        assert_eq!(teleporters[0].id, "mage");
        assert_eq!(teleporters[0].teleport_interval_secs, Some(5.0));
    }

    #[test]
    fn archetype_toml_round_trip() {
        let config = ArchetypesConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: ArchetypesConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.archetypes.len(), config.archetypes.len());
        let tank = parsed.get("tank").unwrap();
        assert_eq!(tank.fire_pattern, FirePattern::Spread3);
        assert_eq!(tank.max_health, 100.0);
    }
}
