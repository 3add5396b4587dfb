//! Ability cost validation errors

use thiserror::Error;

/// Why an ability cannot be paid for right now
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostError {
    #[error("needs {needed} long action point(s), has {available}")]
    InsufficientLongPoints { needed: u32, available: u32 },
    #[error("needs {needed} short action point(s), has {available} counting long points")]
    InsufficientActionPoints { needed: u32, available: u32 },
    #[error("needs {needed} energy, has {available}")]
    InsufficientEnergy { needed: u32, available: u32 },
    #[error("needs {needed} mana, has {available}")]
    InsufficientMana { needed: u32, available: u32 },
    #[error("paying {cost} HP would be fatal at {current} HP")]
    InsufficientHp { cost: u32, current: u32 },
}
