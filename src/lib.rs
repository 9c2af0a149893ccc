//! Reconstructs structured poker hands from PokerNow event logs.
//!
//! A PokerNow session export is a CSV of free text events. This crate
//! normalizes those lines, cuts them into hands and, for each hand, records
//! the dealer, starting stacks, seat positions, blinds, every betting action
//! by street, the board and any cards shown at showdown.
//!
//! ```
//! use pokernow_history::history::{HistoryParser, Street};
//!
//! let log = "entry,at,order\n\
//!     -- starting hand #1 (id: x1) (dealer: \"\"Bob @ p2\"\") --,2024-01-01T00:00:00,1\n\
//!     Player stacks: #1 \"\"Alice @ p1\"\" (100) | #2 \"\"Bob @ p2\"\" (100),2024-01-01T00:00:00,2\n\
//!     \"\"Alice @ p1\"\" posts a small blind of 1,2024-01-01T00:00:01,3\n\
//!     Flop: [2♠] [K♣] [9♥],2024-01-01T00:00:05,4\n";
//!
//! let hands = HistoryParser::default().parse_str(log).unwrap();
//! assert_eq!("x1", hands[0].id());
//! assert_eq!(Street::Flop, hands[0].state());
//! assert_eq!(3, hands[0].board().len());
//! ```

/// Cards, players and chips.
pub mod core;

/// Error taxonomy shared by every parser in the crate.
pub mod errors;

/// The event log engine.
pub mod history;

/// Companion reader for the JSON hole card exports.
#[cfg(feature = "serde")]
pub mod hole_cards;

#[cfg(feature = "serde")]
mod serde_utils;

pub use errors::{HistoryError, Result};
