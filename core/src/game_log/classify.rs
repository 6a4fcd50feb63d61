use memchr::memmem;

/// Event markers recognized in a normalized line.
pub mod marker {
    pub const INIT_GAME: &str = "InitGame:";
    pub const USERINFO_CHANGED: &str = "ClientUserinfoChanged:";
    pub const ITEM: &str = "Item:";
    pub const KILL: &str = "Kill:";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    MatchStart,
    NameChange,
    ItemPickup,
    Kill,
    Ignored,
}

/// Classify a normalized line. First match wins; `InitGame:` may appear anywhere
/// in the line, the other markers must start it.
pub fn classify(line: &str) -> EventKind {
    if memmem::find(line.as_bytes(), marker::INIT_GAME.as_bytes()).is_some() {
        EventKind::MatchStart
    } else if line.starts_with(marker::USERINFO_CHANGED) {
        EventKind::NameChange
    } else if line.starts_with(marker::ITEM) {
        EventKind::ItemPickup
    } else if line.starts_with(marker::KILL) {
        EventKind::Kill
    } else {
        EventKind::Ignored
    }
}
