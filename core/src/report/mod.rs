//! Exportable views over finalized matches.
//!
//! - **builder**: the `{"games": [...]}` record tree handed to the sinks
//! - **analysis**: cross-match rankings computed from that tree

mod analysis;
mod builder;

pub use analysis::{AnalysisSummary, RankEntry, analyze};
pub use builder::{GameExport, GamesReport, PlayerExport, build_report};
