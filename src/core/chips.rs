use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use thiserror::Error;

/// Number of fractional decimal digits a `Chips` value can hold.
const SCALE_DIGITS: usize = 2;
const SCALE: i64 = 100;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ParseChipsError {
    #[error("Empty amount")]
    Empty,
    #[error("Amount contains a character that is not a digit")]
    InvalidDigit,
    #[error("Amount has more than two fractional digits")]
    TooPrecise,
    #[error("Amount is too large")]
    Overflow,
}

/// A monetary amount in fixed point: an `i64` count of hundredths.
///
/// Logs print amounts as decimal literals. Keeping them as integers means
/// summing a session's pots never drifts the way `f32`/`f64` sums do.
///
/// The operators saturate at the `i64` bounds. Use [`Chips::checked_add`]
/// when an overflowing total has to be noticed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(i64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    /// Whole units, `Chips::new(5)` is five chips.
    pub const fn new(units: i64) -> Self {
        Chips(units * SCALE)
    }

    pub const fn from_hundredths(hundredths: i64) -> Self {
        Chips(hundredths)
    }

    pub const fn hundredths(self) -> i64 {
        self.0
    }

    pub const fn checked_add(self, rhs: Chips) -> Option<Chips> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Chips(v)),
            None => None,
        }
    }

    pub const fn checked_sub(self, rhs: Chips) -> Option<Chips> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Chips(v)),
            None => None,
        }
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Lossy conversion for callers that want to do float maths.
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl FromStr for Chips {
    type Err = ParseChipsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            Some(_) => (false, s),
            None => return Err(ParseChipsError::Empty),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(ParseChipsError::Empty);
        }
        if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(ParseChipsError::InvalidDigit);
        }
        if frac.len() > SCALE_DIGITS {
            return Err(ParseChipsError::TooPrecise);
        }

        let mut value: i64 = 0;
        let padded = frac.bytes().chain(std::iter::repeat(b'0')).take(SCALE_DIGITS);
        for b in whole.bytes().chain(padded) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(b - b'0')))
                .ok_or(ParseChipsError::Overflow)?;
        }
        Ok(Chips(if negative { -value } else { value }))
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / SCALE as u64;
        let frac = abs % SCALE as u64;
        if frac == 0 {
            write!(f, "{sign}{whole}")
        } else if frac % 10 == 0 {
            write!(f, "{sign}{whole}.{}", frac / 10)
        } else {
            write!(f, "{sign}{whole}.{frac:02}")
        }
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        *self = *self + rhs;
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        *self = *self - rhs;
    }
}

impl Neg for Chips {
    type Output = Chips;

    fn neg(self) -> Self::Output {
        Chips(self.0.saturating_neg())
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Chips> for Chips {
    fn sum<I: Iterator<Item = &'a Chips>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// Serialized as the decimal string so JSON consumers never see a float
// that has already been rounded.
#[cfg(feature = "serde")]
impl serde::Serialize for Chips {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Chips {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
