//! # Hole card files
//!
//! Besides the event log, the platform can export a JSON hand history per
//! player perspective. Those files know the hole cards dealt to whoever was
//! watching, which the event log only reveals at showdown.
//!
//! [`HoleCardParser`] reads one file or a whole folder of perspectives of the
//! same session, and [`attach_hole_cards`] zips the result onto the hands
//! from [`HistoryParser`](crate::history::HistoryParser) by hand index.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::core::{Card, Player};
use crate::errors::{HistoryError, Result};
use crate::history::Ply;

/// Known hole cards for one hand.
pub type HoleCards = HashMap<Player, (Card, Card)>;

#[derive(Debug, Deserialize)]
struct HistoryFile {
    hands: Vec<RawHand>,
}

#[derive(Debug, Deserialize)]
struct RawHand {
    #[serde(default)]
    players: Vec<RawPlayer>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    id: String,
    name: String,
    #[serde(default)]
    hand: Option<Vec<String>>,
}

impl RawPlayer {
    fn hole_cards(&self) -> Result<Option<(Card, Card)>> {
        let Some(tokens) = &self.hand else {
            return Ok(None);
        };
        match tokens.as_slice() {
            [first, second] => Ok(Some((
                Card::from_letter_token(first)?,
                Card::from_letter_token(second)?,
            ))),
            _ => Err(HistoryError::UnknownCardToken(tokens.join(" "))),
        }
    }
}

/// Reader for the JSON hole card exports.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoleCardParser;

impl HoleCardParser {
    /// One map per hand, in file order.
    pub fn parse_str(raw: &str) -> Result<Vec<HoleCards>> {
        let file: HistoryFile = serde_json::from_str(raw)?;
        file.hands
            .iter()
            .map(|hand| -> Result<HoleCards> {
                let mut known = HoleCards::new();
                for raw_player in &hand.players {
                    if let Some(cards) = raw_player.hole_cards()? {
                        known.insert(Player::new(&raw_player.name, &raw_player.id), cards);
                    }
                }
                Ok(known)
            })
            .collect()
    }

    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<HoleCards>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::parse_str(&raw)
    }

    /// Parse every file in `folder` and merge them hand by hand.
    ///
    /// Files are visited in name order and later files win when two know
    /// the same player's cards.
    #[instrument(level = "debug", skip(folder), fields(folder = %folder.as_ref().display()))]
    pub fn parse_folder(folder: impl AsRef<Path>) -> Result<Vec<HoleCards>> {
        let mut paths = std::fs::read_dir(folder.as_ref())?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<PathBuf>>>()?;
        paths.retain(|path| path.is_file());
        paths.sort();
        debug!(files = paths.len(), "Parsing hole card folder");

        let perspectives = paths
            .iter()
            .map(Self::parse_file)
            .collect::<Result<Vec<_>>>()?;
        Ok(merge_perspectives(perspectives))
    }
}

/// Merge per-file results by hand index, later perspectives overwriting
/// earlier ones player by player.
pub fn merge_perspectives(perspectives: Vec<Vec<HoleCards>>) -> Vec<HoleCards> {
    let hands = perspectives.iter().map(Vec::len).max().unwrap_or(0);
    if perspectives.iter().any(|p| p.len() != hands) {
        warn!(hands, "Hole card files disagree on the number of hands");
    }

    let mut merged = vec![HoleCards::new(); hands];
    for perspective in perspectives {
        for (best_knowledge, known) in merged.iter_mut().zip(perspective) {
            best_knowledge.extend(known);
        }
    }
    merged
}

/// Copy hole cards onto the matching hand. Extra entries on either side are
/// ignored.
pub fn attach_hole_cards(plies: &mut [Ply], hole_cards: &[HoleCards]) {
    if plies.len() != hole_cards.len() {
        warn!(
            hands = plies.len(),
            hole_card_hands = hole_cards.len(),
            "Hand counts differ between event log and hole card files"
        );
    }
    for (ply, known) in plies.iter_mut().zip(hole_cards) {
        ply.merge_hole_cards(known);
    }
}
