use std::fmt;

/// Every kind of log line the engine understands.
///
/// Classification is a set of independent substring tests, not a switch:
/// a body that contains the cues of several kinds is each of those kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    StartHand,
    PlayerStacks,
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    Flop,
    Turn,
    River,
    Collected,
    Shows,
    EndHand,
}

impl EventKind {
    /// Catalogue order; handlers for one line fire in this order.
    pub const ALL: [EventKind; 14] = [
        EventKind::StartHand,
        EventKind::PlayerStacks,
        EventKind::SmallBlind,
        EventKind::BigBlind,
        EventKind::Fold,
        EventKind::Check,
        EventKind::Call,
        EventKind::Raise,
        EventKind::Flop,
        EventKind::Turn,
        EventKind::River,
        EventKind::Collected,
        EventKind::Shows,
        EventKind::EndHand,
    ];

    /// Substrings that mark a body as this kind. Any one is enough.
    pub fn cues(&self) -> &'static [&'static str] {
        match self {
            EventKind::StartHand => &["starting hand"],
            EventKind::PlayerStacks => &["Player stacks"],
            EventKind::SmallBlind => &["posts a small blind"],
            EventKind::BigBlind => &["posts a big blind"],
            EventKind::Fold => &["folds"],
            EventKind::Check => &["checks"],
            EventKind::Call => &["calls"],
            EventKind::Raise => &["raises to", "bets"],
            EventKind::Flop => &["Flop: "],
            EventKind::Turn => &["Turn: "],
            EventKind::River => &["River: "],
            EventKind::Collected => &["collected"],
            EventKind::Shows => &["shows a "],
            EventKind::EndHand => &["ending hand"],
        }
    }

    pub fn matches(&self, body: &str) -> bool {
        self.cues().iter().any(|cue| body.contains(cue))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::StartHand => "starting hand",
            EventKind::PlayerStacks => "player stacks",
            EventKind::SmallBlind => "small blind",
            EventKind::BigBlind => "big blind",
            EventKind::Fold => "fold",
            EventKind::Check => "check",
            EventKind::Call => "call",
            EventKind::Raise => "bet/raise",
            EventKind::Flop => "flop",
            EventKind::Turn => "turn",
            EventKind::River => "river",
            EventKind::Collected => "collected",
            EventKind::Shows => "showdown",
            EventKind::EndHand => "ending hand",
        };
        f.write_str(name)
    }
}

/// All kinds whose cues appear in `body`, in catalogue order.
pub fn classify(body: &str) -> impl Iterator<Item = EventKind> + '_ {
    EventKind::ALL.into_iter().filter(move |kind| kind.matches(body))
}

/// True when `body` closes the current hand.
pub fn is_hand_boundary(body: &str) -> bool {
    EventKind::EndHand.matches(body)
}
