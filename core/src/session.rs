//! Whole-log driver: feeds every line through a [`MatchSplitter`] under a
//! [`ParsePolicy`] and returns the finalized matches.

use fraglog_types::ParsePolicy;
use thiserror::Error;

use crate::game_log::ParseError;
use crate::match_state::{MatchRecord, MatchSplitter};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("malformed event on line {line_number}")]
    LineParse {
        /// 1-based
        line_number: usize,
        #[source]
        source: ParseError,
    },
}

/// Result of a full pass over one log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub matches: Vec<MatchRecord>,
    pub lines_read: usize,
    /// Malformed lines dropped under [`ParsePolicy::Lenient`]
    pub skipped_lines: usize,
}

/// Split and aggregate a whole log.
///
/// Under [`ParsePolicy::Strict`] the first malformed event line aborts the run
/// and nothing is returned; under [`ParsePolicy::Lenient`] it is logged and skipped.
pub fn parse_log_into_matches<I>(lines: I, policy: ParsePolicy) -> Result<ParseOutcome, PipelineError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut splitter = MatchSplitter::new();
    let mut lines_read = 0;
    let mut skipped_lines = 0;

    for (idx, raw_line) in lines.into_iter().enumerate() {
        lines_read += 1;
        let line_number = idx + 1;

        if let Err(source) = splitter.feed(raw_line.as_ref()) {
            match policy {
                ParsePolicy::Strict => {
                    return Err(PipelineError::LineParse {
                        line_number,
                        source,
                    });
                }
                ParsePolicy::Lenient => {
                    tracing::warn!(line_number, error = %source, "Skipping malformed line");
                    skipped_lines += 1;
                }
            }
        }
    }

    let matches = splitter.finish();
    tracing::info!(
        lines = lines_read,
        matches = matches.len(),
        skipped = skipped_lines,
        "Parsed log"
    );

    Ok(ParseOutcome {
        matches,
        lines_read,
        skipped_lines,
    })
}
