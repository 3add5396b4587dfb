//! CharacterStats - The nine raw attributes

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Raw character attributes.
///
/// Composed additively: base stats plus every equipment modifier. Values may be
/// negative on modifiers (cursed gear), so they are signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterStats {
    pub endurance: i32,
    pub stamina: i32,
    pub intellect: i32,
    pub strength: i32,
    pub dexterity: i32,
    pub willpower: i32,
    pub armor: i32,
    pub magic_resist: i32,
    pub initiative: i32,
}

impl CharacterStats {
    /// Build from the nine attributes in sheet order:
    /// END STA INT STR DEX WIL ARM MRS INI
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        endurance: i32,
        stamina: i32,
        intellect: i32,
        strength: i32,
        dexterity: i32,
        willpower: i32,
        armor: i32,
        magic_resist: i32,
        initiative: i32,
    ) -> Self {
        CharacterStats {
            endurance,
            stamina,
            intellect,
            strength,
            dexterity,
            willpower,
            armor,
            magic_resist,
            initiative,
        }
    }
}

impl AddAssign for CharacterStats {
    fn add_assign(&mut self, other: CharacterStats) {
        self.endurance += other.endurance;
        self.stamina += other.stamina;
        self.intellect += other.intellect;
        self.strength += other.strength;
        self.dexterity += other.dexterity;
        self.willpower += other.willpower;
        self.armor += other.armor;
        self.magic_resist += other.magic_resist;
        self.initiative += other.initiative;
    }
}

impl Add for CharacterStats {
    type Output = CharacterStats;

    fn add(mut self, other: CharacterStats) -> CharacterStats {
        self += other;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_fieldwise() {
        let base = CharacterStats::new(8, 5, 2, 7, 4, 3, 6, 2, 4);
        let helmet = CharacterStats {
            armor: 2,
            initiative: -1,
            ..Default::default()
        };

        let total = base + helmet;
        assert_eq!(total.armor, 8);
        assert_eq!(total.initiative, 3);
        assert_eq!(total.strength, 7);
    }

    #[test]
    fn test_add_default_is_identity() {
        let base = CharacterStats::new(3, 2, 9, 2, 4, 8, 1, 4, 5);
        assert_eq!(base + CharacterStats::default(), base);
    }
}
