//! Time normalization for the Satellite API.
//!
//! Satellite has shipped several timestamp layouts over the years. Most
//! date/time properties use a "standard" layout while the `next_sync` and
//! `sync_date` properties of sync plans use a "sync" layout; legacy
//! releases (e.g. 6.5) used `/` separated date fields. All layouts are
//! attempted in a fixed priority order when decoding, so a single parser
//! handles every supported Satellite version.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::JSON_NULL_KEYWORD;

/// Layout used by the majority of date/time properties when the account
/// timezone is `(GMT+00:00) UTC`, e.g. `2024-05-09 21:14:51 UTC`.
pub const STANDARD_API_TIME_LAYOUT_WITH_TIMEZONE: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Layout used by the majority of date/time properties when the account
/// timezone is `Browser timezone`, e.g. `2024-05-09 16:14:51 -0500`.
pub const STANDARD_API_TIME_LAYOUT_WITH_OFFSET: &str = "%Y-%m-%d %H:%M:%S %z";

/// Layout used by current sync plan properties (`next_sync`, `sync_date`)
/// when the account timezone is `(GMT+00:00) UTC`.
pub const SYNC_TIME_LAYOUT_WITH_TIMEZONE: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Layout used by current sync plan properties when the account timezone
/// is `Browser timezone`.
pub const SYNC_TIME_LAYOUT_WITH_OFFSET: &str = "%Y-%m-%d %H:%M:%S %z";

/// Layout used by legacy sync plan properties, e.g.
/// `2024/05/10 20:16:00 +0000`.
pub const LEGACY_SYNC_TIME_LAYOUT: &str = "%Y/%m/%d %H:%M:%S %z";

/// Error produced when a timestamp string matches none of the known
/// Satellite API layouts. Carries the offending string and the parse
/// failure from the last layout attempted.
#[derive(Debug, Error)]
#[error("unrecognized Satellite timestamp {value:?}: {source}")]
pub struct TimeParseError {
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Parse a timestamp string using the known Satellite API layouts in
/// priority order. The offset or `UTC` literal in the string is
/// authoritative; no local timezone inference is performed.
pub fn parse_api_datetime(value: &str) -> Result<DateTime<Utc>, TimeParseError> {
    // (layout, carries explicit numeric offset)
    const KNOWN_LAYOUTS: [(&str, bool); 5] = [
        (STANDARD_API_TIME_LAYOUT_WITH_TIMEZONE, false),
        (STANDARD_API_TIME_LAYOUT_WITH_OFFSET, true),
        (SYNC_TIME_LAYOUT_WITH_TIMEZONE, false),
        (SYNC_TIME_LAYOUT_WITH_OFFSET, true),
        (LEGACY_SYNC_TIME_LAYOUT, true),
    ];

    let mut last_err = None;
    for (layout, has_offset) in KNOWN_LAYOUTS {
        let parsed = if has_offset {
            DateTime::parse_from_str(value, layout).map(|t| t.with_timezone(&Utc))
        } else {
            NaiveDateTime::parse_from_str(value, layout).map(|t| t.and_utc())
        };

        match parsed {
            Ok(t) => return Ok(t),
            Err(err) => last_err = Some(err),
        }
    }

    Err(TimeParseError {
        value: value.to_string(),
        source: last_err.expect("at least one layout is attempted"),
    })
}

fn deserialize_nullable_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) => {
            let trimmed = value.trim();
            // The null keyword and empty values are a documented no-op,
            // not an error; the instant stays at its zero value.
            if trimmed.is_empty() || trimmed == JSON_NULL_KEYWORD {
                return Ok(None);
            }

            parse_api_datetime(trimmed)
                .map(Some)
                .map_err(D::Error::custom)
        }
    }
}

/// Time value as represented by the majority of Satellite API date/time
/// properties. `None` is the zero instant and round-trips as JSON null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApiTime(Option<DateTime<Utc>>);

/// Time value as represented by the Satellite sync plans API for the
/// `next_sync` and `sync_date` properties. `None` means "not scheduled".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncTime(Option<DateTime<Utc>>);

impl ApiTime {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }
}

impl SyncTime {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_none()
    }
}

impl From<DateTime<Utc>> for ApiTime {
    fn from(t: DateTime<Utc>) -> Self {
        ApiTime(Some(t))
    }
}

impl From<DateTime<Utc>> for SyncTime {
    fn from(t: DateTime<Utc>) -> Self {
        SyncTime(Some(t))
    }
}

impl fmt::Display for ApiTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, "{}", t.format(STANDARD_API_TIME_LAYOUT_WITH_OFFSET)),
            None => write!(f, "{JSON_NULL_KEYWORD}"),
        }
    }
}

impl fmt::Display for SyncTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, "{}", t.format(SYNC_TIME_LAYOUT_WITH_OFFSET)),
            None => write!(f, "Not scheduled"),
        }
    }
}

impl<'de> Deserialize<'de> for ApiTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_nullable_time(deserializer).map(ApiTime)
    }
}

impl<'de> Deserialize<'de> for SyncTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_nullable_time(deserializer).map(SyncTime)
    }
}

impl Serialize for ApiTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(t) => serializer.serialize_str(
                &t.format(STANDARD_API_TIME_LAYOUT_WITH_OFFSET).to_string(),
            ),
            None => serializer.serialize_none(),
        }
    }
}

impl Serialize for SyncTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Some(t) => {
                serializer.serialize_str(&t.format(SYNC_TIME_LAYOUT_WITH_OFFSET).to_string())
            }
            None => serializer.serialize_none(),
        }
    }
}
