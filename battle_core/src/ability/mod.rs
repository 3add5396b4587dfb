//! Ability definitions

mod data;

pub use data::AbilityData;
