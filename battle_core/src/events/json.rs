//! JsonLinesSink - One JSON object per event

use super::{BattleEvent, EventSink};
use std::io::Write;

/// Writes every event as a JSON line. Write failures are counted and traced,
/// never propagated into the battle.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    failures: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink {
            writer,
            failures: 0,
        }
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &BattleEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn publish(&mut self, event: &BattleEvent) {
        if let Err(err) = self.write_event(event) {
            self.failures += 1;
            tracing::warn!("failed to write event: {}", err);
        }
    }
}
