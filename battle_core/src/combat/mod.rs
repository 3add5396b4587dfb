//! Combat resolution - hit rolls and the ability execution pipeline

mod hit;
mod pipeline;
mod report;

pub use hit::{resolve_hit_with_rng, HitResult};
pub use pipeline::execute_ability;
pub use report::{ActionReport, TargetOutcome};
