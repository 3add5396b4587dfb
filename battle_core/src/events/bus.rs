//! EventBus - Fan-out to several independent sinks

use super::{BattleEvent, EventSink};

/// Owns any number of sinks and forwards every event to each, in
/// subscription order
#[derive(Default)]
pub struct EventBus {
    sinks: Vec<Box<dyn EventSink>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.subscribe(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for EventBus {
    fn publish(&mut self, event: &BattleEvent) {
        for sink in &mut self.sinks {
            sink.publish(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").field("sinks", &self.sinks.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_every_sink_sees_every_event() {
        let first = Rc::new(RefCell::new(Vec::<BattleEvent>::new()));
        let second = Rc::new(RefCell::new(Vec::<BattleEvent>::new()));
        let mut bus = EventBus::new()
            .with_sink(Rc::clone(&first))
            .with_sink(Rc::clone(&second));

        bus.publish(&BattleEvent::BattleStarted);
        bus.publish(&BattleEvent::CombatLogMessage {
            text: "hi".to_string(),
        });

        assert_eq!(bus.len(), 2);
        assert_eq!(first.borrow().len(), 2);
        assert_eq!(*first.borrow(), *second.borrow());
    }

    #[test]
    fn test_empty_bus_is_fine() {
        let mut bus = EventBus::new();
        bus.publish(&BattleEvent::BattleStarted);
        assert!(bus.is_empty());
    }
}
