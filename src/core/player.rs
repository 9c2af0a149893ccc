use std::fmt;
use std::hash::{Hash, Hasher};

/// A seated player as printed in the log: `""username @ id""`.
///
/// Identity is the platform id alone. The same id can show up under
/// different usernames over a session, and those still compare equal and
/// hash identically, so a `Player` is safe to use as a map key.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub username: String,
    pub id: String,
}

impl Player {
    pub fn new(username: impl Into<String>, id: impl Into<String>) -> Self {
        Player {
            username: username.into(),
            id: id.into(),
        }
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.username, self.id)
    }
}
