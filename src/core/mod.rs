/// Cards and suits, plus the token spellings found in logs and hole-card files.
mod card;
/// Export `Card` and `Suit`
pub use self::card::{Card, Suit, ACE, JACK, KING, QUEEN};

/// Player identity.
mod player;
/// Export `Player`
pub use self::player::Player;

/// Fixed point money.
mod chips;
/// Export `Chips`
pub use self::chips::{Chips, ParseChipsError};
