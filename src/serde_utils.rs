//! Serde helpers for maps keyed by [`Player`].
//!
//! JSON object keys have to be strings, so player-keyed maps are written as
//! arrays of `[player, value]` pairs, sorted by player id for stable output.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::Player;

pub mod player_map {
    use super::*;

    pub fn serialize<S, V>(map: &HashMap<Player, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let mut entries: Vec<(&Player, &V)> = map.iter().collect();
        entries.sort_by(|a, b| a.0.id.cmp(&b.0.id));
        serializer.collect_seq(entries)
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<HashMap<Player, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let entries: Vec<(Player, V)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}
