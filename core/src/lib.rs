pub mod context;
pub mod game_ids;
pub mod game_log;
pub mod match_state;
pub mod reader;
pub mod report;
pub mod session;
pub mod storage;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt};
pub use game_ids::*;
pub use match_state::{MatchRecord, MatchSplitter, PlayerRecord};
pub use report::{AnalysisSummary, GamesReport, analyze, build_report};
pub use session::{ParseOutcome, PipelineError, parse_log_into_matches};
