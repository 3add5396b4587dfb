//! Player class definitions

use crate::ability::AbilityData;
use crate::character::CharacterData;
use crate::stats::CharacterStats;
use crate::types::{AbilityTab, AbilityTag, CharacterClass, DamageType, Element, TargetType};

/// Build a fresh level 1 character of the given class
pub fn create_character(name: &str, class: CharacterClass) -> CharacterData {
    let data = CharacterData::new(name, class, base_stats(class))
        .with_ability(signature_ability(class))
        .with_passive(signature_passive(class))
        .with_abilities(generic_abilities());

    match class {
        CharacterClass::Wizard => data.with_default_element(Element::Arcane),
        _ => data,
    }
}

pub fn base_stats(class: CharacterClass) -> CharacterStats {
    match class {
        //                                          END STA INT STR DEX WIL ARM MRS INI
        CharacterClass::Warrior => CharacterStats::new(8, 5, 2, 7, 4, 3, 6, 2, 4),
        CharacterClass::Rogue => CharacterStats::new(4, 7, 3, 5, 8, 3, 3, 3, 7),
        CharacterClass::Ranger => CharacterStats::new(5, 6, 3, 4, 7, 4, 3, 3, 6),
        CharacterClass::Priest => CharacterStats::new(7, 3, 7, 3, 3, 7, 5, 5, 3),
        CharacterClass::Wizard => CharacterStats::new(3, 2, 9, 2, 4, 8, 1, 4, 5),
        CharacterClass::Warlock => CharacterStats::new(5, 3, 8, 3, 3, 7, 2, 6, 4),
    }
}

/// The one class ability every new character starts with
pub fn signature_ability(class: CharacterClass) -> AbilityData {
    match class {
        CharacterClass::Warrior => AbilityData::skill(
            "Crushing Blow",
            "A powerful strike that deals bonus damage.",
            12,
            3,
        ),
        CharacterClass::Rogue => {
            AbilityData::attack("Quick Stab", "A fast attack that uses only a short action.", 6, 0)
                .short_action(1)
        }
        CharacterClass::Ranger => AbilityData::skill(
            "Mark",
            "Marks an enemy, boosting all attacks against it.",
            5,
            2,
        )
        .with_tag(AbilityTag::Mark),
        CharacterClass::Priest => AbilityData::spell(
            "Word of Protection",
            "Creates a small shield that absorbs damage for an ally.",
            8,
            4,
            Element::Holy,
        )
        .with_target(TargetType::SingleAlly)
        .with_tag(AbilityTag::WordOfProtection),
        CharacterClass::Wizard => AbilityData::spell(
            "Magic Bolt",
            "A bolt of magic that takes the school of the last spell used.",
            10,
            4,
            Element::Arcane,
        )
        .with_tag(AbilityTag::MagicBolt),
        CharacterClass::Warlock => AbilityData {
            tab: AbilityTab::Spells,
            damage_type: DamageType::Magical,
            element: Element::Shadow,
            ..AbilityData::stance("Ritual", "Sacrifice HP to gain mana.", AbilityTag::Ritual)
        }
        .with_hp_cost(5),
    }
}

pub fn signature_passive(class: CharacterClass) -> AbilityData {
    match class {
        CharacterClass::Warrior => AbilityData::passive("Tough", "Gains bonus HP from Endurance."),
        CharacterClass::Rogue => AbilityData::passive("Evasive", "Increased dodge chance."),
        CharacterClass::Ranger => {
            AbilityData::passive("Keen Eye", "Increased accuracy and crit chance.")
        }
        CharacterClass::Priest => AbilityData::passive("Faith", "Healing spells are more effective."),
        CharacterClass::Wizard => AbilityData::passive("Arcane Affinity", "Spells cost less mana."),
        CharacterClass::Warlock => AbilityData::passive("Dark Pact", "Gains mana when taking damage."),
    }
}

/// Actions every class shares
pub fn generic_abilities() -> Vec<AbilityData> {
    vec![
        AbilityData::quick_action("Swap Position", "Switch grid position with an ally.")
            .with_target(TargetType::SingleAlly)
            .excluding_self()
            .with_tag(AbilityTag::Swap),
        AbilityData::stance(
            "Anticipate",
            "Act with priority next turn, but lose 1 short action.",
            AbilityTag::Anticipate,
        ),
        AbilityData::stance(
            "Prepare",
            "Recover resources. Acts last next turn.",
            AbilityTag::Prepare,
        ),
        AbilityData::stance(
            "Protect",
            "Increase chance of being targeted.",
            AbilityTag::Protect,
        ),
        AbilityData::stance("Hide", "Decrease chance of being targeted.", AbilityTag::Hide),
    ]
}
