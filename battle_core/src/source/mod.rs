//! StatSource - Trait and implementations for stat providers

mod base_stats;
mod equipment;

pub use base_stats::BaseStatsSource;
pub use equipment::EquipmentData;

use crate::stats::CharacterStats;

/// Trait for anything that contributes attributes to a character
pub trait StatSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Suggested priorities:
    /// - Base stats: -100
    /// - Equipment: 0
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's attributes to the running total
    fn apply(&self, stats: &mut CharacterStats);
}

/// Fold every source into one attribute set, lowest priority first
pub fn compose_stats(sources: &[&dyn StatSource]) -> CharacterStats {
    let mut ordered: Vec<&&dyn StatSource> = sources.iter().collect();
    ordered.sort_by_key(|source| source.priority());

    let mut stats = CharacterStats::default();
    for source in ordered {
        source.apply(&mut stats);
    }
    stats
}
