//! Quake 3 server log lines.
//!
//! A raw line goes through three steps before it touches match state:
//! - **normalize**: trim and drop the `mm:ss` timestamp prefix
//! - **classify**: decide which event marker (if any) the line carries
//! - **parse**: pull the fields out of the line into a [`LogEvent`]

mod classify;
mod event;
mod normalize;
mod parser;

pub use classify::{EventKind, classify, marker};
pub use event::LogEvent;
pub use normalize::normalize_line;
pub use parser::{
    KillFields, ParseError, parse_event, parse_item_pickup, parse_kill, parse_map_name,
    parse_name_change,
};
