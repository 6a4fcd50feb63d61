//! Cross-match rankings.
//!
//! Players are merged across matches only by display name (see
//! [`PlayerExport::display_key`]); there is no persistent identity.

use std::fmt::Write as _;

use fraglog_types::RankingLimits;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::builder::{GamesReport, PlayerExport};
use crate::game_ids::NO_FAVORITE_WEAPON;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub top_killers: Vec<RankEntry>,
    pub top_deaths: Vec<RankEntry>,
    pub top_suicides: Vec<RankEntry>,
    pub top_maps_by_total_kills: Vec<RankEntry>,
    /// How many players had each weapon as their favorite
    pub most_frequent_favorite_weapons: Vec<RankEntry>,
}

/// Label -> count accumulator that remembers first-seen order.
#[derive(Debug, Default)]
struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<RankEntry>,
}

impl Tally {
    fn add(&mut self, label: &str, amount: u64) {
        match self.index.get(label) {
            Some(&idx) => self.entries[idx].count += amount,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push(RankEntry {
                    label: label.to_string(),
                    count: amount,
                });
            }
        }
    }

    /// Highest counts first; equal counts keep first-seen order.
    fn top(mut self, limit: usize) -> Vec<RankEntry> {
        self.entries.sort_by(|a, b| b.count.cmp(&a.count));
        self.entries.truncate(limit);
        self.entries
    }
}

pub fn analyze(report: &GamesReport, limits: &RankingLimits) -> AnalysisSummary {
    let mut kills = Tally::default();
    let mut deaths = Tally::default();
    let mut suicides = Tally::default();
    let mut map_kills = Tally::default();
    let mut favorite_weapons = Tally::default();

    for game in &report.games {
        map_kills.add(&game.map, u64::from(game.total_kills));

        for player in &game.players {
            let key = player.display_key();
            kills.add(&key, u64::from(player.kills));
            deaths.add(&key, u64::from(player.deaths));
            suicides.add(&key, u64::from(player.suicides));

            if has_favorite_weapon(player) {
                favorite_weapons.add(&player.favorite_weapon, 1);
            }
        }
    }

    let summary = AnalysisSummary {
        top_killers: kills.top(limits.top_killers),
        top_deaths: deaths.top(limits.top_deaths),
        top_suicides: suicides.top(limits.top_suicides),
        top_maps_by_total_kills: map_kills.top(limits.top_maps),
        most_frequent_favorite_weapons: favorite_weapons.top(limits.top_weapons),
    };

    tracing::debug!(
        games = report.games.len(),
        leader = summary.top_killers.first().map(|e| e.label.as_str()),
        "Computed rankings"
    );

    summary
}

fn has_favorite_weapon(player: &PlayerExport) -> bool {
    !player.favorite_weapon.is_empty() && player.favorite_weapon != NO_FAVORITE_WEAPON
}

impl AnalysisSummary {
    pub fn top_killer(&self) -> Option<&RankEntry> {
        self.top_killers.first()
    }

    /// Plain-text rendering, one section per ranking.
    pub fn render_text(&self) -> String {
        let sections = [
            ("Top players by kills", &self.top_killers),
            ("Top players by deaths", &self.top_deaths),
            ("Top players by suicides", &self.top_suicides),
            ("Maps with the most total kills", &self.top_maps_by_total_kills),
            ("Most frequent favorite weapons", &self.most_frequent_favorite_weapons),
        ];

        let mut out = String::from("MATCH LOG ANALYSIS (summary)\n");
        for (title, entries) in sections {
            let _ = writeln!(out, "\n{title}:");
            if entries.is_empty() {
                out.push_str("  (no data)\n");
            }
            for entry in entries {
                let _ = writeln!(out, "  - {}: {}", entry.label, entry.count);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::builder::GameExport;

    fn player(id: i64, name: &str, kills: u32, deaths: u32, suicides: u32, favorite: &str) -> PlayerExport {
        PlayerExport {
            id,
            current_name: name.to_string(),
            old_names: vec![],
            kills,
            deaths,
            suicides,
            favorite_weapon: favorite.to_string(),
            collected_items: vec![],
        }
    }

    fn game(game: u32, map: &str, total_kills: u32, players: Vec<PlayerExport>) -> GameExport {
        GameExport {
            game,
            map: map.to_string(),
            total_kills,
            players,
        }
    }

    fn labels(entries: &[RankEntry]) -> Vec<(&str, u64)> {
        entries.iter().map(|e| (e.label.as_str(), e.count)).collect()
    }

    fn sample_report() -> GamesReport {
        GamesReport {
            games: vec![
                game(
                    1,
                    "q3dm17",
                    11,
                    vec![
                        player(2, "Dono", 3, 1, 0, "MOD_RAILGUN"),
                        player(3, "Zeh", 5, 2, 1, "MOD_ROCKET"),
                        player(4, "", 0, 4, 2, "none"),
                    ],
                ),
                game(2, "q3dm6", 4, vec![player(7, "Dono", 2, 0, 0, "MOD_ROCKET")]),
                game(3, "q3dm17", 2, vec![player(4, "", 0, 1, 0, "none")]),
            ],
        }
    }

    #[test]
    fn test_players_merge_by_display_name() {
        let summary = analyze(&sample_report(), &RankingLimits::default());
        assert_eq!(
            labels(&summary.top_killers),
            vec![("Dono", 5), ("Zeh", 5), ("id_4", 0)]
        );
        assert_eq!(
            labels(&summary.top_deaths),
            vec![("id_4", 5), ("Zeh", 2), ("Dono", 1)]
        );
        assert_eq!(
            labels(&summary.top_suicides),
            vec![("id_4", 2), ("Zeh", 1), ("Dono", 0)]
        );
    }

    #[test]
    fn test_map_totals_sum_across_games() {
        let summary = analyze(&sample_report(), &RankingLimits::default());
        assert_eq!(
            labels(&summary.top_maps_by_total_kills),
            vec![("q3dm17", 13), ("q3dm6", 4)]
        );
    }

    #[test]
    fn test_favorite_weapons_count_players_not_kills() {
        let summary = analyze(&sample_report(), &RankingLimits::default());
        assert_eq!(
            labels(&summary.most_frequent_favorite_weapons),
            vec![("MOD_ROCKET", 2), ("MOD_RAILGUN", 1)]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order_and_limits_apply() {
        let report = GamesReport {
            games: vec![game(
                1,
                "q3dm17",
                0,
                vec![
                    player(1, "C", 1, 0, 0, "MOD_A"),
                    player(2, "A", 1, 0, 0, "MOD_B"),
                    player(3, "B", 1, 0, 0, "MOD_C"),
                ],
            )],
        };
        let limits = RankingLimits {
            top_killers: 2,
            top_weapons: 1,
            ..RankingLimits::default()
        };

        let summary = analyze(&report, &limits);
        assert_eq!(labels(&summary.top_killers), vec![("C", 1), ("A", 1)]);
        assert_eq!(labels(&summary.most_frequent_favorite_weapons), vec![("MOD_A", 1)]);
    }

    #[test]
    fn test_empty_report() {
        let summary = analyze(&GamesReport::default(), &RankingLimits::default());
        assert_eq!(summary, AnalysisSummary::default());
        assert!(summary.top_killer().is_none());
        assert!(summary.render_text().contains("(no data)"));
    }

    #[test]
    fn test_render_text_lists_every_section() {
        let text = analyze(&sample_report(), &RankingLimits::default()).render_text();
        assert!(text.contains("Top players by kills:\n  - Dono: 5\n  - Zeh: 5\n"));
        assert!(text.contains("Maps with the most total kills:\n  - q3dm17: 13\n"));
        assert!(text.contains("Most frequent favorite weapons:\n  - MOD_ROCKET: 2\n"));
        assert!(text.contains("Top players by suicides:"));
        assert!(text.contains("Top players by deaths:"));
    }
}
