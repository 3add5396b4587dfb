//! Enemy definitions

use crate::ability::AbilityData;
use crate::character::CharacterData;
use crate::stats::CharacterStats;
use crate::types::{CharacterClass, EnemyType, TargetType};

/// Build a stock enemy. The name defaults to the kind's display name.
pub fn create_enemy(kind: EnemyType) -> CharacterData {
    match kind {
        EnemyType::GoblinArcher => CharacterData::new(
            "Goblin Archer",
            CharacterClass::Ranger,
            CharacterStats::new(3, 4, 2, 3, 5, 2, 1, 1, 6),
        )
        .with_ability(AbilityData::attack("Shoot", "Fires an arrow.", 5, 0))
        .with_ability(AbilityData::attack("Poison Arrow", "Fires a poisoned arrow.", 4, 2)),

        EnemyType::Ratman => CharacterData::new(
            "Ratman",
            CharacterClass::Warrior,
            CharacterStats::new(5, 4, 1, 5, 4, 1, 3, 1, 4),
        )
        .with_ability(AbilityData::attack("Claw", "Slashes with claws.", 6, 0))
        .with_ability(AbilityData::attack("Bite", "A vicious bite.", 8, 2)),

        EnemyType::Minotaur => CharacterData::new(
            "Minotaur",
            CharacterClass::Warrior,
            CharacterStats::new(12, 6, 2, 10, 3, 3, 8, 2, 2),
        )
        .with_ability(AbilityData::attack("Gore", "Charges and gores the target.", 14, 0))
        .with_ability(
            AbilityData::attack("Stomp", "Stomps the ground, hitting all enemies.", 8, 0)
                .with_target(TargetType::AllEnemies),
        )
        .with_ability(
            AbilityData::skill("Enrage", "Works itself into a fury.", 0, 4)
                .with_target(TargetType::OnSelf),
        ),
    }
}
