//! Match splitter state machine.
//!
//! - NoActiveMatch: waiting for the first `InitGame:`; every other line is dropped
//! - ActiveMatch: player events update the active record
//!
//! A match ends only when the next `InitGame:` arrives or input runs out.

use super::record::MatchRecord;
use crate::game_log::{EventKind, LogEvent, ParseError, classify, normalize_line, parse_event};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterState {
    NoActiveMatch,
    ActiveMatch,
}

#[derive(Debug, Default)]
pub struct MatchSplitter {
    active: Option<MatchRecord>,
    finalized: Vec<MatchRecord>,
}

impl MatchSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SplitterState {
        if self.active.is_some() {
            SplitterState::ActiveMatch
        } else {
            SplitterState::NoActiveMatch
        }
    }

    pub fn active_match(&self) -> Option<&MatchRecord> {
        self.active.as_ref()
    }

    pub fn finalized(&self) -> &[MatchRecord] {
        &self.finalized
    }

    /// Normalize, classify, parse and apply one raw log line.
    ///
    /// Player-event lines are only parsed while a match is open, so a malformed
    /// `Kill:` before the first `InitGame:` is dropped rather than reported.
    pub fn feed(&mut self, raw_line: &str) -> Result<(), ParseError> {
        let line = normalize_line(raw_line);
        let kind = classify(line);

        match kind {
            EventKind::Ignored => return Ok(()),
            EventKind::MatchStart => {}
            _ if self.active.is_none() => return Ok(()),
            _ => {}
        }

        if let Some(event) = parse_event(kind, line)? {
            self.process(event);
        }
        Ok(())
    }

    /// Advance the state machine with an already-parsed event.
    pub fn process(&mut self, event: LogEvent) {
        match (self.state(), event) {
            (_, LogEvent::MatchStart { map_name }) => {
                self.finalize_current();
                let sequence_number = self.finalized.len() as u32 + 1;
                tracing::debug!(game = sequence_number, map = %map_name, "Match started");
                self.active = Some(MatchRecord::new(sequence_number, map_name));
            }
            (SplitterState::NoActiveMatch, _) => {}
            (SplitterState::ActiveMatch, event) => {
                if let Some(record) = self.active.as_mut() {
                    record.apply(&event);
                }
            }
        }
    }

    /// End of input: close the active match and hand back every match in order.
    pub fn finish(mut self) -> Vec<MatchRecord> {
        self.finalize_current();
        self.finalized
    }

    fn finalize_current(&mut self) {
        if let Some(record) = self.active.take() {
            tracing::debug!(
                game = record.sequence_number,
                map = %record.map_name,
                total_kills = record.total_kills,
                players = record.player_count(),
                "Match finalized"
            );
            self.finalized.push(record);
        }
    }
}
