//! Fixed identifiers used by the Quake 3 server log.

/// Client id the server uses for `<world>`: falls, lava, trigger_hurt and so on.
/// Never a real player and never gets its own record.
pub const WORLD_ID: i64 = 1022;

pub mod means_of_death {
    /// Kill line with no trailing `by <MOD>` token
    pub const UNKNOWN: &str = "UNKNOWN";
}

/// Exported favorite weapon of a player with no credited kills.
pub const NO_FAVORITE_WEAPON: &str = "none";
