use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ParamError;

const NAIVE_FORMAT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second]";
const NAIVE_FRACTIONAL_FORMAT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]";

/// Timestamp normalized to UTC.
///
/// Accepts RFC3339 input with any offset, and naive ISO-8601 date-times
/// (the shape of `transaction.timestamp` in event payloads), which are read as UTC.
/// Ordering and equality are exact down to the nanosecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, ParamError> {
        let trimmed = input.trim();
        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self::from_offset_datetime(parsed));
        }

        parse_naive(trimmed).map(|naive| Self(naive.assume_utc())).ok_or_else(|| {
            ParamError::invalid_value(
                "timestamp",
                input,
                "expected RFC3339 or YYYY-MM-DDTHH:MM:SS[.ffffff]",
            )
        })
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    pub fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration))
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

fn parse_naive(input: &str) -> Option<PrimitiveDateTime> {
    [NAIVE_FORMAT, NAIVE_FRACTIONAL_FORMAT]
        .into_iter()
        .find_map(|format| {
            let items = time::format_description::parse(format).ok()?;
            PrimitiveDateTime::parse(input, &items).ok()
        })
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
