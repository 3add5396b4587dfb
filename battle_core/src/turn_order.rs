//! Per-round acting order
//!
//! Living characters are bucketed Positive, Normal, Negative; each bucket is
//! sorted by initiative, highest first. Equal initiative keeps battlefield
//! order (players before enemies, then list position).

use crate::battle::Battlefield;
use crate::character::CharacterId;
use crate::types::Priority;
use std::collections::VecDeque;

/// Build the FIFO queue for one round
pub fn calculate_turn_order(field: &Battlefield) -> VecDeque<CharacterId> {
    let mut living: Vec<(CharacterId, Priority, i32)> = field
        .all_ids()
        .filter_map(|id| {
            let c = field.get(id)?;
            c.is_alive().then_some((id, c.priority, c.stats.initiative))
        })
        .collect();

    // Stable: ties keep battlefield order
    living.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

    living.into_iter().map(|(id, _, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_battle_setup, GameplayConfig};

    fn field() -> Battlefield {
        default_battle_setup().build(&GameplayConfig::default())
    }

    #[test]
    fn test_default_order_by_initiative() {
        let field = field();
        let order: Vec<CharacterId> = calculate_turn_order(&field).into_iter().collect();

        // Shade 7, Goblin Archers 6, Elara 6, Aldric 4, Ratmen 4, Maren 3
        assert_eq!(
            order,
            vec![
                CharacterId::player(1),
                CharacterId::player(2),
                CharacterId::enemy(2),
                CharacterId::enemy(3),
                CharacterId::player(0),
                CharacterId::enemy(0),
                CharacterId::enemy(1),
                CharacterId::player(3),
            ]
        );
    }

    #[test]
    fn test_priority_dominates_initiative() {
        let mut field = field();
        if let Some(c) = field.get_mut(CharacterId::player(3)) {
            c.priority = Priority::Positive;
        }
        if let Some(c) = field.get_mut(CharacterId::player(1)) {
            c.priority = Priority::Negative;
        }

        let order = calculate_turn_order(&field);
        assert_eq!(order.front(), Some(&CharacterId::player(3)));
        assert_eq!(order.back(), Some(&CharacterId::player(1)));
    }

    #[test]
    fn test_dead_are_skipped() {
        let mut field = field();
        if let Some(c) = field.get_mut(CharacterId::enemy(2)) {
            c.current_hp = 0;
        }
        let order = calculate_turn_order(&field);
        assert_eq!(order.len(), 7);
        assert!(!order.contains(&CharacterId::enemy(2)));
    }
}
