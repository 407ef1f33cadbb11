//! Kill-driven level progression.
//!
//! Levels are earned purely through kills. The threshold table covers the
//! first ten levels; beyond it every level costs another 40 kills.

const LEVEL_KILL_THRESHOLDS: [u32; 10] = [0, 10, 30, 70, 110, 150, 190, 230, 270, 310];
const KILLS_PER_LEVEL_BEYOND_TABLE: u32 = 40;

/// Total kills required to reach `level`. Level 1 is the starting level.
pub fn required_kills(level: u32) -> u32 {
    if level == 0 {
        return 0;
    }
    let index = (level - 1) as usize;
    if index < LEVEL_KILL_THRESHOLDS.len() {
        LEVEL_KILL_THRESHOLDS[index]
    } else {
        let last = LEVEL_KILL_THRESHOLDS[LEVEL_KILL_THRESHOLDS.len() - 1];
        let extra = level - LEVEL_KILL_THRESHOLDS.len() as u32;
        last + extra * KILLS_PER_LEVEL_BEYOND_TABLE
    }
}

/// Enemies spawned per batch at the given level: 1 at the start, one more
/// every three levels, capped at 4.
pub fn batch_size(level: u32) -> u32 {
    (1 + level / 3).clamp(1, crate::constants::MAX_ENEMIES_PER_BATCH)
}

/// Whether `kills` is enough to leave `level` behind.
pub fn level_up_due(level: u32, kills: u32) -> bool {
    kills >= required_kills(level + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_table_through_level_ten() {
        let expected = [0, 10, 30, 70, 110, 150, 190, 230, 270, 310];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(required_kills(i as u32 + 1), *want);
        }
    }

    #[test]
    fn thresholds_extend_by_forty_beyond_table() {
        assert_eq!(required_kills(11), 350);
        assert_eq!(required_kills(12), 390);
        assert_eq!(required_kills(20), 710);
    }

    #[test]
    fn thresholds_are_monotonic() {
        let mut prev = 0;
        for level in 1..100 {
            let kills = required_kills(level);
            assert!(kills >= prev, "level {level} regressed");
            prev = kills;
        }
    }

    #[test]
    fn batch_size_follows_level_formula() {
        assert_eq!(batch_size(1), 1);
        assert_eq!(batch_size(2), 1);
        assert_eq!(batch_size(3), 2);
        assert_eq!(batch_size(6), 3);
        assert_eq!(batch_size(9), 4);
        assert_eq!(batch_size(20), 4);
        assert_eq!(batch_size(0), 1);
    }

    #[test]
    fn ten_kills_earn_the_second_level() {
        assert!(!level_up_due(1, 9));
        assert!(level_up_due(1, 10));
        assert!(!level_up_due(2, 29));
        assert!(level_up_due(2, 30));
    }
}
