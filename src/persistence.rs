//! Flat JSON save file: best score and unlocked achievements.
//!
//! Loading never fails the game; a missing or corrupt file degrades to a
//! fresh profile with a logged warning.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const SAVE_FILE: &str = "future_survivors_save.json";
const SAVE_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveData {
    pub version: String,
    pub high_score: u32,
    pub achievements: BTreeMap<String, bool>,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION.to_string(),
            high_score: 0,
            achievements: BTreeMap::new(),
        }
    }
}

impl SaveData {
    /// Returns true when `score` beat the stored best.
    pub fn record_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.achievements.get(id).copied().unwrap_or(false)
    }

    pub fn unlock(&mut self, id: &str) {
        self.achievements.insert(id.to_string(), true);
    }
}

/// Loaded profile plus the path it round-trips through.
#[derive(Resource)]
pub struct Profile {
    pub data: SaveData,
    pub path: PathBuf,
}

impl Default for Profile {
    fn default() -> Self {
        let path = PathBuf::from(SAVE_FILE);
        Self {
            data: load_save(&path),
            path,
        }
    }
}

impl Profile {
    pub fn persist(&self) {
        if let Err(err) = write_save(&self.path, &self.data) {
            warn!("failed to write save file {:?}: {err}", self.path);
        }
    }
}

pub fn load_save(path: &Path) -> SaveData {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(err) => {
                warn!("corrupt save file {path:?} ({err}), starting fresh");
                SaveData::default()
            }
        },
        Err(_) => SaveData::default(),
    }
}

pub fn write_save(
    path: &Path,
    data: &SaveData,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fs_save_test_{name}_{}.json", std::process::id()))
    }

    #[test]
    fn save_round_trip_preserves_profile() {
        let path = temp_path("round_trip");
        let mut data = SaveData::default();
        data.record_score(4200);
        data.unlock("first_kill");
        data.unlock("slayer");
        write_save(&path, &data).unwrap();

        let loaded = load_save(&path);
        assert_eq!(loaded, data);
        assert!(loaded.is_unlocked("first_kill"));
        assert!(!loaded.is_unlocked("exterminator"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_loads_default() {
        let loaded = load_save(Path::new("definitely/not/here.json"));
        assert_eq!(loaded, SaveData::default());
    }

    #[test]
    fn corrupt_file_loads_default() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{not json at all").unwrap();
        let loaded = load_save(&path);
        assert_eq!(loaded, SaveData::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn record_score_only_improves() {
        let mut data = SaveData::default();
        assert!(data.record_score(100));
        assert!(!data.record_score(50));
        assert_eq!(data.high_score, 100);
    }
}
