//! CombatLog - Keeps the most recent combat log lines

use super::{BattleEvent, EventSink};
use std::collections::VecDeque;

/// Rolling window of `CombatLogMessage` text
#[derive(Debug, Clone)]
pub struct CombatLog {
    messages: VecDeque<String>,
    capacity: usize,
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        CombatLog {
            messages: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for CombatLog {
    fn default() -> Self {
        CombatLog::new(10)
    }
}

impl EventSink for CombatLog {
    fn publish(&mut self, event: &BattleEvent) {
        if let BattleEvent::CombatLogMessage { text } = event {
            if self.capacity == 0 {
                return;
            }
            while self.messages.len() >= self.capacity {
                self.messages.pop_front();
            }
            self.messages.push_back(text.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> BattleEvent {
        BattleEvent::CombatLogMessage {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_keeps_latest() {
        let mut log = CombatLog::new(2);
        log.publish(&line("one"));
        log.publish(&BattleEvent::BattleStarted);
        log.publish(&line("two"));
        log.publish(&line("three"));

        let kept: Vec<&str> = log.messages().collect();
        assert_eq!(kept, vec!["two", "three"]);
        assert_eq!(log.last(), Some("three"));
    }

    #[test]
    fn test_zero_capacity_drops_everything() {
        let mut log = CombatLog::new(0);
        log.publish(&line("one"));
        assert!(log.is_empty());
    }
}
