use serde::{Deserialize, Serialize};

use crate::match_state::{MatchRecord, PlayerRecord};

/// Root of the exported record tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesReport {
    pub games: Vec<GameExport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameExport {
    pub game: u32,
    pub map: String,
    pub total_kills: u32,
    /// Ascending by id
    pub players: Vec<PlayerExport>,
}

/// Player as exported. Per-weapon counts stay internal; only the favorite is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerExport {
    pub id: i64,
    pub current_name: String,
    pub old_names: Vec<String>,
    pub kills: u32,
    pub deaths: u32,
    pub suicides: u32,
    pub favorite_weapon: String,
    pub collected_items: Vec<String>,
}

impl PlayerExport {
    pub fn from_record(player: &PlayerRecord) -> Self {
        Self {
            id: player.id,
            current_name: player.current_name.clone(),
            old_names: player.old_names.clone(),
            kills: player.kills,
            deaths: player.deaths,
            suicides: player.suicides,
            favorite_weapon: player.favorite_weapon().to_string(),
            collected_items: player.collected_items.clone(),
        }
    }

    /// Name used to merge players across matches: current name, or `id_<id>`.
    pub fn display_key(&self) -> String {
        if self.current_name.is_empty() {
            format!("id_{}", self.id)
        } else {
            self.current_name.clone()
        }
    }
}

impl GameExport {
    pub fn from_record(record: &MatchRecord) -> Self {
        Self {
            game: record.sequence_number,
            map: record.map_name.clone(),
            total_kills: record.total_kills,
            players: record
                .players_by_id()
                .into_iter()
                .map(PlayerExport::from_record)
                .collect(),
        }
    }
}

pub fn build_report(matches: &[MatchRecord]) -> GamesReport {
    GamesReport {
        games: matches.iter().map(GameExport::from_record).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_match() -> MatchRecord {
        let mut record = MatchRecord::new(1, "q3dm17");
        record.apply_name_change(5, "Zeh");
        record.apply_name_change(2, "Dono");
        record.apply_name_change(2, "Mocinha");
        record.apply_item_pickup(2, "weapon_railgun");
        record.apply_kill(2, 5, "MOD_RAILGUN");
        record.apply_kill(2, 5, "MOD_SHOTGUN");
        record.apply_kill(1022, 5, "MOD_FALLING");
        record
    }

    #[test]
    fn test_export_shape_matches_record_tree() {
        let report = build_report(&[sample_match()]);
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(
            value,
            json!({
                "games": [{
                    "game": 1,
                    "map": "q3dm17",
                    "total_kills": 3,
                    "players": [
                        {
                            "id": 2,
                            "current_name": "Mocinha",
                            "old_names": ["Dono"],
                            "kills": 2,
                            "deaths": 0,
                            "suicides": 0,
                            "favorite_weapon": "MOD_RAILGUN",
                            "collected_items": ["weapon_railgun"]
                        },
                        {
                            "id": 5,
                            "current_name": "Zeh",
                            "old_names": [],
                            "kills": 0,
                            "deaths": 3,
                            "suicides": 0,
                            "favorite_weapon": "none",
                            "collected_items": []
                        }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_weapon_counts_are_not_exported() {
        let text = serde_json::to_string(&build_report(&[sample_match()])).unwrap();
        assert!(!text.contains("weapon_kills"));
    }

    #[test]
    fn test_display_key_falls_back_to_id() {
        let mut record = MatchRecord::new(1, "");
        record.apply_item_pickup(7, "item_health");
        record.apply_name_change(8, "Assasinu Credi");

        let game = GameExport::from_record(&record);
        assert_eq!(game.players[0].display_key(), "id_7");
        assert_eq!(game.players[1].display_key(), "Assasinu Credi");
    }

    #[test]
    fn test_empty_report_serializes_empty_games() {
        let value = serde_json::to_value(build_report(&[])).unwrap();
        assert_eq!(value, json!({ "games": [] }));
    }
}
