//! BaseStatsSource - A character's own attributes

use crate::source::StatSource;
use crate::stats::CharacterStats;

/// Attributes a character has before any gear
pub struct BaseStatsSource {
    pub stats: CharacterStats,
}

impl BaseStatsSource {
    pub fn new(stats: CharacterStats) -> Self {
        BaseStatsSource { stats }
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        "base_stats"
    }

    fn priority(&self) -> i32 {
        -100 // Base stats apply first
    }

    fn apply(&self, stats: &mut CharacterStats) {
        *stats += self.stats;
    }
}
