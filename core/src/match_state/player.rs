use crate::game_ids::NO_FAVORITE_WEAPON;

/// Running statistics for one client id inside one match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: i64,
    pub current_name: String,
    /// Names held before a rename, oldest first, no duplicates
    pub old_names: Vec<String>,
    pub kills: u32,
    pub deaths: u32,
    pub suicides: u32,
    /// Kills per means of death, in order of first use
    pub weapon_kills: Vec<(String, u32)>,
    /// Distinct items in pickup order
    pub collected_items: Vec<String>,
}

impl PlayerRecord {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Apply a `ClientUserinfoChanged` name. An empty name changes nothing.
    ///
    /// History never holds the current name: switching back to an old name
    /// moves it out of `old_names`.
    pub fn rename(&mut self, new_name: &str) {
        if new_name.is_empty() || self.current_name == new_name {
            return;
        }
        if !self.current_name.is_empty() && !self.old_names.contains(&self.current_name) {
            let previous = std::mem::take(&mut self.current_name);
            self.old_names.push(previous);
        }
        self.old_names.retain(|name| name != new_name);
        self.current_name = new_name.to_string();
    }

    pub fn collect_item(&mut self, item: &str) {
        if !item.is_empty() && !self.collected_items.iter().any(|i| i == item) {
            self.collected_items.push(item.to_string());
        }
    }

    /// Credit a kill made with `means_of_death`.
    pub fn credit_kill(&mut self, means_of_death: &str) {
        self.kills += 1;
        match self.weapon_kills.iter_mut().find(|(w, _)| w == means_of_death) {
            Some((_, count)) => *count += 1,
            None => self.weapon_kills.push((means_of_death.to_string(), 1)),
        }
    }

    pub fn weapon_kill_count(&self, means_of_death: &str) -> u32 {
        self.weapon_kills
            .iter()
            .find(|(w, _)| w == means_of_death)
            .map_or(0, |(_, count)| *count)
    }

    /// Means of death with the most kills. Ties go to the one used first;
    /// `"none"` when the player never scored.
    pub fn favorite_weapon(&self) -> &str {
        let mut best: Option<(&str, u32)> = None;
        for (weapon, count) in &self.weapon_kills {
            if best.is_none_or(|(_, top)| *count > top) {
                best = Some((weapon.as_str(), *count));
            }
        }
        best.map_or(NO_FAVORITE_WEAPON, |(weapon, _)| weapon)
    }
}
