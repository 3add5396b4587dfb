//! Built-in roster: the six player classes and the stock enemies

mod classes;
mod enemies;

pub use classes::{base_stats, create_character, generic_abilities, signature_ability, signature_passive};
pub use enemies::create_enemy;
