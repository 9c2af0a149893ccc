use std::fmt;
use std::str::FromStr;

use crate::errors::{HistoryError, Result};

/// Rank used for an Ace. Logs and the hole-card files both use the low
/// sentinel, so an Ace shares its numeral with a (non-existent) card of one.
pub const ACE: u8 = 1;
pub const JACK: u8 = 11;
pub const QUEEN: u8 = 12;
pub const KING: u8 = 13;

/// The four suits, keyed by the glyph the platform prints.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// Suit from the glyph used in event logs (`♠ ♥ ♦ ♣`).
    pub fn from_glyph(c: char) -> Option<Suit> {
        match c {
            '♠' => Some(Suit::Spades),
            '♥' => Some(Suit::Hearts),
            '♦' => Some(Suit::Diamonds),
            '♣' => Some(Suit::Clubs),
            _ => None,
        }
    }

    /// Suit from the lower case letter used in hole-card files (`s h d c`).
    pub fn from_letter(c: char) -> Option<Suit> {
        match c {
            's' => Some(Suit::Spades),
            'h' => Some(Suit::Hearts),
            'd' => Some(Suit::Diamonds),
            'c' => Some(Suit::Clubs),
            _ => None,
        }
    }

    pub fn to_glyph(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// A single playing card.
///
/// `rank` is 2 through 10 for numerals, 11 to 13 for Jack, Queen, King and
/// [`ACE`] (1) for an Ace.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

/// Map a rank token (`2`-`9`, `J`, `Q`, `K`, `A`, or `ten`) to its numeral.
///
/// Event logs spell ten `10`, hole-card files spell it `T`; each caller
/// passes the one spelling its format allows.
fn rank_from_token(token: &str, ten: &str) -> Option<u8> {
    match token {
        "A" => Some(ACE),
        "K" => Some(KING),
        "Q" => Some(QUEEN),
        "J" => Some(JACK),
        t if t == ten => Some(10),
        _ => match token.parse::<u8>() {
            Ok(n) if (2..=9).contains(&n) && token.len() == 1 => Some(n),
            _ => None,
        },
    }
}

impl Card {
    pub fn new(rank: u8, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Parse a card as printed in event bodies: a rank followed by a suit
    /// glyph, optionally wrapped in brackets. `[10♥]`, `K♣`.
    pub fn from_glyph_token(token: &str) -> Result<Card> {
        let inner = token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .unwrap_or(token);
        let mut chars = inner.chars();
        let suit = chars
            .next_back()
            .and_then(Suit::from_glyph)
            .ok_or_else(|| HistoryError::UnknownCardToken(token.to_string()))?;
        let rank = rank_from_token(chars.as_str(), "10")
            .ok_or_else(|| HistoryError::UnknownCardToken(token.to_string()))?;
        Ok(Card { rank, suit })
    }

    /// Parse a two character card as found in hole-card files: `Ah`, `Td`.
    pub fn from_letter_token(token: &str) -> Result<Card> {
        let mut chars = token.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(HistoryError::UnknownCardToken(token.to_string()));
        };
        let rank = rank_from_token(rank.encode_utf8(&mut [0; 4]), "T")
            .ok_or_else(|| HistoryError::UnknownCardToken(token.to_string()))?;
        let suit = Suit::from_letter(suit)
            .ok_or_else(|| HistoryError::UnknownCardToken(token.to_string()))?;
        Ok(Card { rank, suit })
    }

    fn rank_str(&self) -> String {
        match self.rank {
            ACE => "A".to_string(),
            KING => "K".to_string(),
            QUEEN => "Q".to_string(),
            JACK => "J".to_string(),
            n => n.to_string(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_str(), self.suit.to_glyph())
    }
}

/// Accepts either card spelling: glyph (`10♥`, `[Q♠]`) or letters (`Th`).
impl FromStr for Card {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        Card::from_glyph_token(s).or_else(|_| Card::from_letter_token(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_numerals() {
        for n in 2..=9u8 {
            let token = format!("{n}♦");
            assert_eq!(Card::new(n, Suit::Diamonds), Card::from_glyph_token(&token).unwrap());
        }
        assert_eq!(
            Card::new(10, Suit::Hearts),
            Card::from_glyph_token("[10♥]").unwrap()
        );
    }

    #[test]
    fn test_glyph_faces() {
        assert_eq!(ACE, Card::from_glyph_token("A♠").unwrap().rank);
        assert_eq!(KING, Card::from_glyph_token("K♣").unwrap().rank);
        assert_eq!(QUEEN, Card::from_glyph_token("[Q♥]").unwrap().rank);
        assert_eq!(JACK, Card::from_glyph_token("J♦").unwrap().rank);
    }

    #[test]
    fn test_letter_tokens() {
        assert_eq!(Card::new(ACE, Suit::Hearts), Card::from_letter_token("Ah").unwrap());
        assert_eq!(Card::new(10, Suit::Diamonds), Card::from_letter_token("Td").unwrap());
        assert_eq!(Card::new(7, Suit::Clubs), Card::from_letter_token("7c").unwrap());
    }

    #[test]
    fn test_unknown_tokens() {
        let bad_tokens = [
            "1♠", "11♠", "X♥", "A", "♠", "[K♣", "Kx", "1s", "Ahh", "", "T♥", "[T♥]",
        ];
        for bad in bad_tokens {
            assert!(
                matches!(bad.parse::<Card>(), Err(HistoryError::UnknownCardToken(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_ten_spelling_follows_format() {
        for bad in ["T♥", "[T♥]"] {
            assert!(matches!(
                Card::from_glyph_token(bad),
                Err(HistoryError::UnknownCardToken(_))
            ));
        }
        assert!(Card::from_letter_token("10").is_err());
        assert_eq!(Card::new(10, Suit::Hearts), Card::from_letter_token("Th").unwrap());
    }

    #[test]
    fn test_display_uses_glyphs() {
        assert_eq!("10♥", Card::new(10, Suit::Hearts).to_string());
        assert_eq!("A♠", Card::new(ACE, Suit::Spades).to_string());
        assert_eq!("K♣", Card::from_letter_token("Kc").unwrap().to_string());
    }
}
