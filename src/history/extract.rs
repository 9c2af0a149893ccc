//! Field extractors, one per [`EventKind`].
//!
//! Every extractor is a pure function of the event body. A cue that matched
//! but a grammar that didn't is a [`HistoryError::FieldExtraction`] carrying
//! the offending line.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::action::Action;
use super::classifier::EventKind;
use crate::core::{Card, Chips, Player};
use crate::errors::{HistoryError, Result};

/// `""username @ id""`, two capture groups.
const PLAYER: &str = r##"""([^"]+) @ ([^"]+)"""##;
/// Signed decimal literal.
const AMOUNT: &str = r"[+-]?(?:\d*\.)?\d+";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction patterns are valid regexes")
}

static START_HAND: LazyLock<Regex> =
    LazyLock::new(|| compile(r"starting hand #(\d+)(?: \(id: ([^)]+)\))?"));
static DEALER: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"\(dealer: {PLAYER}\)")));
static SEAT: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"#(\d+) {PLAYER} \(({AMOUNT})\)")));
static SMALL_BLIND: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{PLAYER} posts a small blind of ({AMOUNT})")));
static BIG_BLIND: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{PLAYER} posts a big blind of ({AMOUNT})")));
static FOLD: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"{PLAYER} folds")));
static CHECK: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"{PLAYER} checks")));
static CALL: LazyLock<Regex> = LazyLock::new(|| compile(&format!(r"{PLAYER} calls ({AMOUNT})")));
static RAISE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{PLAYER} (?:bets|raises to) ({AMOUNT})")));
static COLLECTED: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{PLAYER} collected ({AMOUNT})")));
static SHOWS: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{PLAYER} shows a ([^,\s]+), ([^,\s]+)")));
/// Any bracketed token; the card parser decides whether it's a real card.
static BOARD_CARD: LazyLock<Regex> = LazyLock::new(|| compile(r"\[([^\[\]\s,]+)\]"));

/// Payload pulled out of one event body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    StartHand {
        number: u64,
        id: String,
        dealer: Option<Player>,
    },
    /// Seats in the order they are listed, which is seating order.
    Stacks(Vec<(Player, Chips)>),
    Action(Action),
    Flop([Card; 3]),
    Turn(Card),
    River(Card),
    Shows { player: Player, cards: (Card, Card) },
    EndHand,
}

/// Run the extractor for `kind` over `body`.
pub fn extract(kind: EventKind, body: &str) -> Result<Extracted> {
    let fail = || HistoryError::FieldExtraction {
        kind,
        line: body.to_string(),
    };
    let captures = |re: &Regex| re.captures(body).ok_or_else(fail);
    let amount = |caps: &Captures, idx: usize| caps[idx].parse::<Chips>().map_err(|_| fail());

    let extracted = match kind {
        EventKind::StartHand => {
            let caps = captures(&*START_HAND)?;
            let number_str = &caps[1];
            let number = number_str.parse::<u64>().map_err(|_| fail())?;
            let id = caps
                .get(2)
                .map_or(number_str, |m| m.as_str())
                .trim()
                .to_string();
            let dealer = if body.contains("dead button") {
                None
            } else {
                Some(player_at(&captures(&*DEALER)?, 1))
            };
            Extracted::StartHand { number, id, dealer }
        }
        EventKind::PlayerStacks => {
            let seats = SEAT
                .captures_iter(body)
                .map(|caps| -> Result<(Player, Chips)> {
                    Ok((player_at(&caps, 2), amount(&caps, 4)?))
                })
                .collect::<Result<Vec<_>>>()?;
            if seats.is_empty() {
                return Err(fail());
            }
            Extracted::Stacks(seats)
        }
        EventKind::SmallBlind => {
            let caps = captures(&*SMALL_BLIND)?;
            Extracted::Action(Action::PostSmallBlind {
                player: player_at(&caps, 1),
                amount: amount(&caps, 3)?,
            })
        }
        EventKind::BigBlind => {
            let caps = captures(&*BIG_BLIND)?;
            Extracted::Action(Action::PostBigBlind {
                player: player_at(&caps, 1),
                amount: amount(&caps, 3)?,
            })
        }
        EventKind::Fold => Extracted::Action(Action::Fold {
            player: player_at(&captures(&*FOLD)?, 1),
        }),
        EventKind::Check => Extracted::Action(Action::Check {
            player: player_at(&captures(&*CHECK)?, 1),
        }),
        EventKind::Call => {
            let caps = captures(&*CALL)?;
            Extracted::Action(Action::Call {
                player: player_at(&caps, 1),
                amount: amount(&caps, 3)?,
            })
        }
        EventKind::Raise => {
            let caps = captures(&*RAISE)?;
            Extracted::Action(Action::Raise {
                player: player_at(&caps, 1),
                amount: amount(&caps, 3)?,
                all_in: body.contains("all in"),
            })
        }
        EventKind::Flop => {
            let cards: [Card; 3] = board_cards(body)?.try_into().map_err(|_| fail())?;
            Extracted::Flop(cards)
        }
        EventKind::Turn => Extracted::Turn(single_card(body).ok_or_else(fail)??),
        EventKind::River => Extracted::River(single_card(body).ok_or_else(fail)??),
        EventKind::Collected => {
            let caps = captures(&*COLLECTED)?;
            Extracted::Action(Action::Collected {
                player: player_at(&caps, 1),
                amount: amount(&caps, 3)?,
            })
        }
        EventKind::Shows => {
            let caps = captures(&*SHOWS)?;
            // The second card is usually followed by the sentence's period
            // and the CSV closing quote.
            let second = caps[4].trim_end_matches(['.', '"']);
            Extracted::Shows {
                player: player_at(&caps, 1),
                cards: (Card::from_glyph_token(&caps[3])?, Card::from_glyph_token(second)?),
            }
        }
        EventKind::EndHand => Extracted::EndHand,
    };
    Ok(extracted)
}

/// Build a player from the username/id pair starting at capture `idx`.
fn player_at(caps: &Captures, idx: usize) -> Player {
    Player::new(&caps[idx], &caps[idx + 1])
}

fn board_cards(body: &str) -> Result<Vec<Card>> {
    BOARD_CARD
        .find_iter(body)
        .map(|m| Card::from_glyph_token(m.as_str()))
        .collect()
}

/// `Some` only when exactly one bracketed card is present.
fn single_card(body: &str) -> Option<Result<Card>> {
    let mut tokens = BOARD_CARD.find_iter(body);
    match (tokens.next(), tokens.next()) {
        (Some(m), None) => Some(Card::from_glyph_token(m.as_str())),
        _ => None,
    }
}
