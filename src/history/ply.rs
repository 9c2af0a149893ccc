use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use tracing::{trace, warn};

use super::action::{Action, Street};
use super::extract::Extracted;
use crate::core::{Card, Chips, Player};
use crate::errors::{HistoryError, Result};

/// One hand, built up event by event.
///
/// The board only grows through the street advancing methods, and those
/// refuse to run out of order, so every `Ply` has 0, 3, 4 or 5 board cards
/// matching its `state`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ply {
    id: String,
    number: Option<u64>,
    dealer: Option<Player>,
    /// Players in seating order, from the stacks announcement.
    seats: Vec<Player>,
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_utils::player_map"))]
    stacks: HashMap<Player, Chips>,
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_utils::player_map"))]
    positions: HashMap<Player, usize>,
    board: Vec<Card>,
    state: Street,
    actions: BTreeMap<Street, Vec<Action>>,
    #[cfg_attr(feature = "serde", serde(with = "crate::serde_utils::player_map"))]
    cards: HashMap<Player, (Card, Card)>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Ply {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn number(&self) -> Option<u64> {
        self.number
    }

    /// `None` for a dead button hand.
    pub fn dealer(&self) -> Option<&Player> {
        self.dealer.as_ref()
    }

    pub fn seats(&self) -> &[Player] {
        &self.seats
    }

    pub fn stacks(&self) -> &HashMap<Player, Chips> {
        &self.stacks
    }

    /// Offset of each seated player from the button, 0 being the button.
    pub fn positions(&self) -> &HashMap<Player, usize> {
        &self.positions
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn state(&self) -> Street {
        self.state
    }

    pub fn actions(&self) -> &BTreeMap<Street, Vec<Action>> {
        &self.actions
    }

    /// Actions taken on one street, in log order.
    pub fn actions_in(&self, street: Street) -> &[Action] {
        self.actions.get(&street).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Hole cards of the players that showed them.
    pub fn cards(&self) -> &HashMap<Player, (Card, Card)> {
        &self.cards
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Total of every `Collected` action in the hand, `None` if it doesn't
    /// fit in a [`Chips`].
    pub fn pot_collected(&self) -> Option<Chips> {
        self.actions
            .values()
            .flatten()
            .filter_map(|action| match action {
                Action::Collected { amount, .. } => Some(*amount),
                _ => None,
            })
            .try_fold(Chips::ZERO, Chips::checked_add)
    }

    pub fn start_hand(
        &mut self,
        id: impl Into<String>,
        number: Option<u64>,
        dealer: Option<Player>,
    ) {
        self.id = id.into();
        self.number = number;
        self.dealer = dealer;
    }

    /// Record starting stacks from seats listed in seating order.
    ///
    /// When the dealer is known and seated this also derives `positions`.
    pub fn set_stacks(&mut self, seats: Vec<(Player, Chips)>) {
        self.seats = seats.iter().map(|(player, _)| player.clone()).collect();
        self.stacks = seats.into_iter().collect();

        let dealer_idx = self
            .dealer
            .as_ref()
            .and_then(|dealer| self.seat_index(dealer));
        if let Some(idx) = dealer_idx {
            self.positions = self.rotate_from(idx, 0);
        }
    }

    /// Replace the position map wholesale.
    pub fn set_positions(&mut self, positions: HashMap<Player, usize>) {
        self.positions = positions;
    }

    /// Append an action to the current street.
    pub fn record_action(&mut self, action: Action) {
        self.actions.entry(self.state).or_default().push(action);
    }

    pub fn advance_to_flop(&mut self, flop: [Card; 3]) -> Result<()> {
        self.advance(Street::Flop, &flop)
    }

    pub fn advance_to_turn(&mut self, turn: Card) -> Result<()> {
        self.advance(Street::Turn, &[turn])
    }

    pub fn advance_to_river(&mut self, river: Card) -> Result<()> {
        self.advance(Street::River, &[river])
    }

    pub fn record_showdown_cards(&mut self, player: Player, cards: (Card, Card)) {
        self.cards.insert(player, cards);
    }

    /// Overwrite hole cards from an outside source, such as the hole-card
    /// files of the same session.
    pub fn merge_hole_cards(&mut self, hole_cards: &HashMap<Player, (Card, Card)>) {
        for (player, cards) in hole_cards {
            self.cards.insert(player.clone(), *cards);
        }
    }

    /// Note that an event at `timestamp` belongs to this hand.
    pub fn observe(&mut self, timestamp: DateTime<Utc>) {
        self.started_at.get_or_insert(timestamp);
        self.ended_at = Some(timestamp);
    }

    /// Apply one extracted payload.
    pub fn apply(&mut self, extracted: Extracted) -> Result<()> {
        trace!(?extracted, street = %self.state, "Applying event");
        match extracted {
            Extracted::StartHand { number, id, dealer } => {
                self.start_hand(id, Some(number), dealer)
            }
            Extracted::Stacks(seats) => self.set_stacks(seats),
            Extracted::Action(action) => {
                if let Action::PostSmallBlind { player, .. } = &action {
                    self.reposition_from_small_blind(player);
                }
                self.record_action(action);
            }
            Extracted::Flop(flop) => self.advance_to_flop(flop)?,
            Extracted::Turn(card) => self.advance_to_turn(card)?,
            Extracted::River(card) => self.advance_to_river(card)?,
            Extracted::Shows { player, cards } => self.record_showdown_cards(player, cards),
            Extracted::EndHand => {}
        }
        Ok(())
    }

    fn advance(&mut self, to: Street, cards: &[Card]) -> Result<()> {
        if self.state.next() != Some(to) {
            return Err(HistoryError::InvalidStreetTransition {
                from: self.state,
                to,
            });
        }
        self.board.extend_from_slice(cards);
        self.state = to;
        Ok(())
    }

    fn seat_index(&self, player: &Player) -> Option<usize> {
        self.seats.iter().position(|p| p == player)
    }

    /// Positions with the player in seat `anchor` placed at `anchor_offset`.
    fn rotate_from(&self, anchor: usize, anchor_offset: usize) -> HashMap<Player, usize> {
        let n = self.seats.len();
        self.seats
            .iter()
            .enumerate()
            .map(|(idx, player)| (player.clone(), (idx + n - anchor + anchor_offset) % n))
            .collect()
    }

    /// The small blind sits one seat after the button, except heads up where
    /// the button posts it.
    fn reposition_from_small_blind(&mut self, small_blind: &Player) {
        let Some(idx) = self.seat_index(small_blind) else {
            warn!(
                player = %small_blind,
                hand = %self.id,
                "Small blind posted by an unseated player"
            );
            return;
        };
        let offset = if self.seats.len() == 2 { 0 } else { 1 };
        self.positions = self.rotate_from(idx, offset);
    }
}
