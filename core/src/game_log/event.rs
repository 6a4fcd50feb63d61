/// A classified and parsed log line that changes match state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    MatchStart {
        /// Empty when the line carries no `\mapname\` key
        map_name: String,
    },
    NameChange {
        player_id: i64,
        /// Empty when the userinfo has no `n` value; no rename is applied then
        name: String,
    },
    ItemPickup {
        player_id: i64,
        item: String,
    },
    Kill {
        killer_id: i64,
        victim_id: i64,
        means_of_death: String,
    },
}
