use std::fmt;

use crate::core::{Chips, Player};

/// The betting round a hand is in. Only ever moves forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

impl Street {
    /// The street that follows this one, `None` after the river.
    pub fn next(&self) -> Option<Self> {
        match *self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// How many community cards are out once this street is reached.
    pub fn board_len(&self) -> usize {
        match *self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

/// Something a player did during a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Forced small blind.
    PostSmallBlind { player: Player, amount: Chips },
    /// Forced big blind.
    PostBigBlind { player: Player, amount: Chips },
    Fold { player: Player },
    Check { player: Player },
    /// Matches the current bet. `amount` is the total the log reports.
    Call { player: Player, amount: Chips },
    /// Opening bet or raise. `amount` is the new total to call.
    Raise {
        player: Player,
        amount: Chips,
        all_in: bool,
    },
    /// Won (part of) a pot.
    Collected { player: Player, amount: Chips },
}

impl Action {
    /// The acting player.
    pub fn player(&self) -> &Player {
        match self {
            Action::PostSmallBlind { player, .. }
            | Action::PostBigBlind { player, .. }
            | Action::Fold { player }
            | Action::Check { player }
            | Action::Call { player, .. }
            | Action::Raise { player, .. }
            | Action::Collected { player, .. } => player,
        }
    }

    /// Amount attached to the action, if the kind carries one.
    pub fn amount(&self) -> Option<Chips> {
        match self {
            Action::PostSmallBlind { amount, .. }
            | Action::PostBigBlind { amount, .. }
            | Action::Call { amount, .. }
            | Action::Raise { amount, .. }
            | Action::Collected { amount, .. } => Some(*amount),
            Action::Fold { .. } | Action::Check { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_order() {
        assert_eq!(Some(Street::Flop), Street::Preflop.next());
        assert_eq!(Some(Street::Turn), Street::Flop.next());
        assert_eq!(Some(Street::River), Street::Turn.next());
        assert_eq!(None, Street::River.next());
        assert!(Street::Preflop < Street::Flop && Street::Turn < Street::River);
    }

    #[test]
    fn test_board_len() {
        let lens: Vec<usize> = [Street::Preflop, Street::Flop, Street::Turn, Street::River]
            .iter()
            .map(Street::board_len)
            .collect();
        assert_eq!(vec![0, 3, 4, 5], lens);
    }

    #[test]
    fn test_player_and_amount() {
        let bob = Player::new("Bob", "p2");
        let raise = Action::Raise {
            player: bob.clone(),
            amount: Chips::new(60),
            all_in: true,
        };
        assert_eq!(&bob, raise.player());
        assert_eq!(Some(Chips::new(60)), raise.amount());

        let fold = Action::Fold { player: bob.clone() };
        assert_eq!(&bob, fold.player());
        assert_eq!(None, fold.amount());
    }
}
