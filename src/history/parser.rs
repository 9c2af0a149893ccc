use std::path::Path;

use tracing::{debug, instrument, trace};

use super::classifier::{classify, is_hand_boundary, EventKind};
use super::config::ParserConfig;
use super::event::PokerEvent;
use super::extract::extract;
use super::ply::Ply;
use crate::errors::{HistoryError, Result};

/// Splits a full event log into hands and builds a [`Ply`] for each.
///
/// # Example
///
/// ```
/// use pokernow_history::history::{HistoryParser, Street};
///
/// let log = "entry,at,order\n\
///     \"\"Alice @ p1\"\" posts a small blind of 1,2024-01-01T00:00:00,1\n\
///     \"\"Bob @ p2\"\" posts a big blind of 2,2024-01-01T00:00:01,2\n\
///     -- ending hand #1 --,2024-01-01T00:00:02,3\n";
///
/// let hands = HistoryParser::default().parse_str(log).unwrap();
/// assert_eq!(1, hands.len());
/// assert_eq!(2, hands[0].actions_in(Street::Preflop).len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HistoryParser {
    config: ParserConfig,
}

impl HistoryParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Read and parse one exported log file.
    #[instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Ply>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        self.parse_str(&raw)
    }

    /// Parse the full contents of an exported log.
    pub fn parse_str(&self, raw: &str) -> Result<Vec<Ply>> {
        self.parse_lines(raw.lines())
    }

    /// Parse raw lines. The header is dropped here when the config asks for
    /// it; blank lines are ignored.
    pub fn parse_lines<'a, I>(&self, lines: I) -> Result<Vec<Ply>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let events = lines
            .into_iter()
            .skip(usize::from(self.config.skip_header))
            .filter(|line| !line.trim().is_empty())
            .map(PokerEvent::parse)
            .collect::<Result<Vec<_>>>()?;
        self.parse_events(events)
    }

    /// Segment already normalized events into hands.
    ///
    /// Events are processed by ascending `order`, whatever order they came
    /// in. A hand ends at its `ending hand` line; events after the last
    /// boundary still make up a final hand.
    pub fn parse_events(&self, mut events: Vec<PokerEvent>) -> Result<Vec<Ply>> {
        events.sort_by_key(|event| event.order);
        debug!(events = events.len(), "Parsing event stream");

        let mut plies = Vec::new();
        let mut current = Ply::new();
        let mut first_body: Option<&str> = None;

        for event in &events {
            current.observe(event.timestamp);
            first_body.get_or_insert(&event.body);

            if is_hand_boundary(&event.body) {
                let ply = std::mem::take(&mut current);
                plies.push(self.seal(ply, first_body.take())?);
                continue;
            }

            for kind in classify(&event.body) {
                trace!(%kind, order = event.order, "Classified event");
                current.apply(extract(kind, &event.body)?)?;
            }
        }

        // The last hand of a log often has no ending line.
        if first_body.is_some() {
            plies.push(self.seal(current, first_body)?);
        }

        debug!(hands = plies.len(), "Finished parsing");
        Ok(plies)
    }

    fn seal(&self, ply: Ply, first_body: Option<&str>) -> Result<Ply> {
        let unstarted = ply.number().is_none() && !ply.actions().is_empty();
        if self.config.require_start_line && unstarted {
            return Err(HistoryError::FieldExtraction {
                kind: EventKind::StartHand,
                line: first_body.unwrap_or_default().to_string(),
            });
        }
        debug!(
            hand = ply.id(),
            street = %ply.state(),
            board = ply.board().len(),
            "Sealed hand"
        );
        Ok(ply)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use crate::core::{Chips, Player};
    use crate::history::{Action, Street};

    use super::*;

    const HEADER: &str = "entry,at,order";

    fn line(body: &str, order: i64) -> String {
        format!("{body},2024-01-01T00:00:{:02},{order}", order % 60)
    }

    fn log(lines: &[String]) -> String {
        std::iter::once(HEADER.to_string())
            .chain(lines.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn alice() -> Player {
        Player::new("Alice", "p1")
    }

    fn bob() -> Player {
        Player::new("Bob", "p2")
    }

    #[test_log::test]
    fn test_blinds_only_hand() {
        let raw = log(&[
            line("\"\"\"Alice @ p1\"\" posts a small blind of 1\"", 1),
            line("\"\"\"Bob @ p2\"\" posts a big blind of 2\"", 2),
            line("\"-- ending hand #1 --\"", 3),
        ]);
        let plies = HistoryParser::default().parse_str(&raw).unwrap();

        assert_eq!(1, plies.len());
        let ply = &plies[0];
        assert_eq!(
            &[
                Action::PostSmallBlind {
                    player: alice(),
                    amount: Chips::new(1),
                },
                Action::PostBigBlind {
                    player: bob(),
                    amount: Chips::new(2),
                },
            ],
            ply.actions_in(Street::Preflop)
        );
        assert!(ply.board().is_empty());
        assert_eq!(Street::Preflop, ply.state());
    }

    #[test]
    fn test_events_sorted_by_order() {
        let raw = log(&[
            line("\"\"Bob @ p2\"\" posts a big blind of 2", 2),
            line("-- ending hand #1 --", 3),
            line("\"\"Alice @ p1\"\" posts a small blind of 1", 1),
        ]);
        let plies = HistoryParser::default().parse_str(&raw).unwrap();
        assert_eq!(1, plies.len());
        let actors: Vec<&Player> = plies[0]
            .actions_in(Street::Preflop)
            .iter()
            .map(Action::player)
            .collect();
        assert_eq!(vec![&alice(), &bob()], actors);
    }

    #[test]
    fn test_trailing_hand_without_boundary() {
        let raw = log(&[
            line("\"\"Alice @ p1\"\" checks", 1),
            line("-- ending hand #1 --", 2),
            line("\"\"Bob @ p2\"\" folds", 3),
        ]);
        let plies = HistoryParser::default().parse_str(&raw).unwrap();
        assert_eq!(2, plies.len());
        assert_eq!(
            &[Action::Fold { player: bob() }],
            plies[1].actions_in(Street::Preflop)
        );
    }

    #[test]
    fn test_empty_hand_between_boundaries_still_counts() {
        let raw = log(&[
            line("-- ending hand #1 --", 1),
            line("-- ending hand #2 --", 2),
        ]);
        assert_eq!(2, HistoryParser::default().parse_str(&raw).unwrap().len());
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(HistoryParser::default().parse_str(HEADER).unwrap().is_empty());
        assert!(HistoryParser::default().parse_str("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_line_aborts() {
        let raw = log(&[
            line("\"\"Alice @ p1\"\" checks", 1),
            "only two,fields".to_string(),
        ]);
        assert!(matches!(
            HistoryParser::default().parse_str(&raw),
            Err(HistoryError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn test_double_flop_aborts() {
        let raw = log(&[
            line("Flop: [2♠] [K♣] [9♥]", 1),
            line("Flop: [3♠] [4♣] [5♥]", 2),
        ]);
        assert!(matches!(
            HistoryParser::default().parse_str(&raw),
            Err(HistoryError::InvalidStreetTransition {
                from: Street::Flop,
                to: Street::Flop
            })
        ));
    }

    #[test]
    fn test_without_header_skip() {
        let raw = [
            line("\"\"Alice @ p1\"\" checks", 1),
            line("-- ending hand #1 --", 2),
        ]
        .join("\n");
        let parser = HistoryParser::new(ParserConfig::new().skip_header(false));
        let plies = parser.parse_str(&raw).unwrap();
        assert_eq!(1, plies[0].actions_in(Street::Preflop).len());
    }

    #[test]
    fn test_require_start_line() {
        let raw = log(&[line("\"\"Alice @ p1\"\" checks", 1)]);
        let parser = HistoryParser::new(ParserConfig::new().require_start_line(true));
        assert!(matches!(
            parser.parse_str(&raw),
            Err(HistoryError::FieldExtraction {
                kind: EventKind::StartHand,
                ..
            })
        ));

        let raw = log(&[
            line("-- starting hand #1 (id: abc) (dead button) --", 1),
            line("\"\"Alice @ p1\"\" checks", 2),
        ]);
        assert_eq!(1, parser.parse_str(&raw).unwrap().len());
    }

    #[test]
    fn test_timestamps_span_the_hand() {
        let raw = log(&[
            line("\"\"Alice @ p1\"\" checks", 5),
            line("\"\"Bob @ p2\"\" checks", 9),
            line("-- ending hand #1 --", 12),
        ]);
        let ply = &HistoryParser::default().parse_str(&raw).unwrap()[0];
        let started = ply.started_at().unwrap();
        let ended = ply.ended_at().unwrap();
        assert_eq!(7, (ended - started).num_seconds());
    }

    #[test]
    fn test_parse_events_directly() {
        let at = |secs: i64| DateTime::<Utc>::from_timestamp(1_700_000_000 + secs, 0).unwrap();
        let events = vec![
            PokerEvent::new("-- ending hand #1 --", at(3), 30),
            PokerEvent::new("\"\"Bob @ p2\"\" calls 2", at(2), 20),
            PokerEvent::new("\"\"Alice @ p1\"\" bets 2", at(1), 10),
            PokerEvent::new("\"\"Alice @ p1\"\" checks", at(4), 40),
        ];
        let parser = HistoryParser::default();
        assert!(parser.config().skip_header);

        let plies = parser.parse_events(events).unwrap();
        assert_eq!(2, plies.len());
        assert_eq!(
            &[
                Action::Raise {
                    player: alice(),
                    amount: Chips::new(2),
                    all_in: false,
                },
                Action::Call {
                    player: bob(),
                    amount: Chips::new(2),
                },
            ],
            plies[0].actions_in(Street::Preflop)
        );
        assert_eq!(Some(at(1)), plies[0].started_at());
        assert_eq!(Some(at(3)), plies[0].ended_at());
        assert_eq!(
            &[Action::Check { player: alice() }],
            plies[1].actions_in(Street::Preflop)
        );
    }

    #[test]
    fn test_oversized_pot_is_not_summed() {
        let raw = log(&[
            line("\"\"Alice @ p1\"\" collected 92233720368547758.07 from pot", 1),
            line("\"\"Bob @ p2\"\" collected 1 from pot", 2),
            line("-- ending hand #1 --", 3),
        ]);
        let plies = HistoryParser::default().parse_str(&raw).unwrap();
        let collected: Vec<Chips> = plies[0]
            .actions_in(Street::Preflop)
            .iter()
            .filter_map(Action::amount)
            .collect();
        assert_eq!(vec![Chips::from_hundredths(i64::MAX), Chips::new(1)], collected);
        assert_eq!(None, plies[0].pot_collected());
    }
}
