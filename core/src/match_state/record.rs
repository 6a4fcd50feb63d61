use hashbrown::HashMap;

use super::player::PlayerRecord;
use crate::game_ids::WORLD_ID;
use crate::game_log::LogEvent;

/// How a kill line was attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// Victim is `<world>`; nobody's counters change
    WorldVictim,
    /// Killed by `<world>`; victim death only
    Environmental,
    Suicide,
    Frag,
}

/// One match, from its `InitGame:` line to the next one (or end of input).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRecord {
    /// 1-based, in order of appearance
    pub sequence_number: u32,
    pub map_name: String,
    /// Every kill line counts, whatever its attribution
    pub total_kills: u32,
    players: HashMap<i64, PlayerRecord>,
}

impl MatchRecord {
    pub fn new(sequence_number: u32, map_name: impl Into<String>) -> Self {
        Self {
            sequence_number,
            map_name: map_name.into(),
            total_kills: 0,
            players: HashMap::new(),
        }
    }

    // --- Players ---

    /// Look up a player, creating an empty record on first reference.
    pub fn player_entry(&mut self, id: i64) -> &mut PlayerRecord {
        self.players
            .entry(id)
            .or_insert_with(|| PlayerRecord::new(id))
    }

    pub fn player(&self, id: i64) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players in ascending id order.
    pub fn players_by_id(&self) -> Vec<&PlayerRecord> {
        let mut players: Vec<_> = self.players.values().collect();
        players.sort_unstable_by_key(|p| p.id);
        players
    }

    // --- Event application ---

    /// Apply a player event. `MatchStart` is the splitter's business and is ignored here.
    pub fn apply(&mut self, event: &LogEvent) {
        match event {
            LogEvent::NameChange { player_id, name } => self.apply_name_change(*player_id, name),
            LogEvent::ItemPickup { player_id, item } => self.apply_item_pickup(*player_id, item),
            LogEvent::Kill {
                killer_id,
                victim_id,
                means_of_death,
            } => {
                let outcome = self.apply_kill(*killer_id, *victim_id, means_of_death);
                tracing::trace!(
                    game = self.sequence_number,
                    killer_id,
                    victim_id,
                    ?outcome,
                    "Kill"
                );
            }
            LogEvent::MatchStart { .. } => {}
        }
    }

    pub fn apply_name_change(&mut self, player_id: i64, name: &str) {
        self.player_entry(player_id).rename(name);
    }

    pub fn apply_item_pickup(&mut self, player_id: i64, item: &str) {
        self.player_entry(player_id).collect_item(item);
    }

    /// Attribute one kill line. Order matters: the match total always moves,
    /// a `<world>` victim stops everything else, and a victim death is recorded
    /// before deciding between environmental death, suicide and frag.
    pub fn apply_kill(&mut self, killer_id: i64, victim_id: i64, means_of_death: &str) -> KillOutcome {
        self.total_kills += 1;

        if victim_id == WORLD_ID {
            return KillOutcome::WorldVictim;
        }

        self.player_entry(victim_id).deaths += 1;

        if killer_id == WORLD_ID {
            return KillOutcome::Environmental;
        }

        if killer_id == victim_id {
            self.player_entry(killer_id).suicides += 1;
            return KillOutcome::Suicide;
        }

        self.player_entry(killer_id).credit_kill(means_of_death);
        KillOutcome::Frag
    }
}
