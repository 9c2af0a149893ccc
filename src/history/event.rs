use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{HistoryError, Result};

/// Layouts with a numeric offset, tried after RFC 3339 and RFC 2822.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// Naive layouts tried last. A timestamp without an offset is taken to be
/// UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One normalized line of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PokerEvent {
    /// Free text of the line, CSV quoting left intact.
    pub body: String,
    pub timestamp: DateTime<Utc>,
    /// Sequence number from the platform. Authoritative over file position.
    pub order: i64,
}

impl PokerEvent {
    pub fn new(body: impl Into<String>, timestamp: DateTime<Utc>, order: i64) -> Self {
        PokerEvent {
            body: body.into(),
            timestamp,
            order,
        }
    }

    /// Normalize a raw `<body>,<timestamp>,<order>` record.
    ///
    /// Only the last two commas separate fields; the body keeps any commas
    /// of its own.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let malformed = |reason| HistoryError::MalformedEvent {
            line: line.to_string(),
            reason,
        };

        let mut fields = line.rsplitn(3, ',');
        let (Some(order), Some(timestamp), Some(body)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed("expected at least 3 comma separated fields"));
        };

        let order = order
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed("order is not an integer"))?;
        let timestamp =
            parse_timestamp(timestamp.trim()).ok_or_else(|| malformed("unparsable timestamp"))?;

        Ok(PokerEvent {
            body: body.to_string(),
            timestamp,
            order,
        })
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim_matches('"');
    let with_offset = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(raw, fmt).ok())
        });
    if let Some(dt) = with_offset {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
