use std::fmt::{Display, Formatter};

use crate::{AuctionType, EventType, UtcDateTime};

/// Loosely-typed request parameter as supplied by a caller.
///
/// Query validation decides whether the kind fits the field, so a boolean
/// handed in where a timestamp belongs is reported as a type error instead of
/// being coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Timestamp(UtcDateTime),
}

impl ParamValue {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub const fn as_timestamp(&self) -> Option<UtcDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Timestamp(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<UtcDateTime> for ParamValue {
    fn from(value: UtcDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<EventType> for ParamValue {
    fn from(value: EventType) -> Self {
        Self::Text(value.as_str().to_owned())
    }
}

impl From<AuctionType> for ParamValue {
    fn from(value: AuctionType) -> Self {
        Self::Text(value.as_str().to_owned())
    }
}
