//! Per-match state: who played, what they picked up, who killed whom.
//!
//! A [`MatchSplitter`] owns at most one active [`MatchRecord`] and a list of
//! finalized ones. Each record owns its [`PlayerRecord`]s outright; nothing is
//! shared between matches and a player re-joining a later match starts fresh.

mod player;
mod record;
mod splitter;


pub use player::PlayerRecord;
pub use record::{KillOutcome, MatchRecord};
pub use splitter::{MatchSplitter, SplitterState};
