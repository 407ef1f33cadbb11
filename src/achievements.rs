//! Run milestones persisted across sessions.

use bevy::prelude::*;

use crate::events::AchievementUnlocked;
use crate::persistence::{Profile, SaveData};
use crate::resources::GameSession;

pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    check: fn(&GameSession) -> bool,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_kill",
        name: "First Blood",
        description: "Destroy your first enemy",
        check: |s| s.kills >= 1,
    },
    AchievementDef {
        id: "slayer",
        name: "Slayer",
        description: "Destroy 100 enemies",
        check: |s| s.kills >= 100,
    },
    AchievementDef {
        id: "exterminator",
        name: "Exterminator",
        description: "Destroy 500 enemies",
        check: |s| s.kills >= 500,
    },
    AchievementDef {
        id: "survivor",
        name: "Survivor",
        description: "Stay alive for 5 minutes",
        check: |s| s.elapsed_secs >= 300,
    },
    AchievementDef {
        id: "veteran",
        name: "Veteran",
        description: "Stay alive for 15 minutes",
        check: |s| s.elapsed_secs >= 900,
    },
    AchievementDef {
        id: "high_roller",
        name: "High Roller",
        description: "Score 10000 points",
        check: |s| s.score >= 10_000,
    },
];

/// Achievements earned by the current session state that the profile does
/// not hold yet.
pub fn newly_unlocked<'a>(
    session: &GameSession,
    save: &SaveData,
) -> Vec<&'a AchievementDef> {
    ACHIEVEMENTS
        .iter()
        .filter(|def| (def.check)(session) && !save.is_unlocked(def.id))
        .collect()
}

/// Unlocks milestones as the session stats move. Runs while in game; the
/// profile write happens on game over together with the high score.
pub fn check_achievements(
    session: Res<GameSession>,
    mut profile: ResMut<Profile>,
    mut unlocked: MessageWriter<AchievementUnlocked>,
) {
    if !session.is_changed() {
        return;
    }
    for def in newly_unlocked(&session, &profile.data) {
        profile.data.unlock(def.id);
        info!("achievement unlocked: {}", def.name);
        unlocked.write(AchievementUnlocked {
            id: def.id,
            name: def.name,
            description: def.description,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kill_milestones_unlock_in_order() {
        let mut session = GameSession::default();
        let save = SaveData::default();

        assert!(newly_unlocked(&session, &save).is_empty());

        session.kills = 1;
        let ids: Vec<_> = newly_unlocked(&session, &save).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first_kill"]);

        session.kills = 100;
        let ids: Vec<_> = newly_unlocked(&session, &save).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["first_kill", "slayer"]);
    }

    #[test]
    fn unlocked_achievements_do_not_fire_again() {
        let mut session = GameSession::default();
        session.kills = 1;
        let mut save = SaveData::default();
        save.unlock("first_kill");
        assert!(newly_unlocked(&session, &save).is_empty());
    }

    #[test]
    fn score_and_time_milestones() {
        let mut session = GameSession::default();
        session.score = 10_000;
        session.elapsed_secs = 900;
        let save = SaveData::default();
        let ids: Vec<_> = newly_unlocked(&session, &save).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["survivor", "veteran", "high_roller"]);
    }
}
