use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ParamError;

/// Kind of marketplace event to filter on.
///
/// `created` covers new auctions and `successful` covers sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Created,
    Successful,
    Cancelled,
    BidEntered,
    BidWithdrawn,
    Transfer,
    Approve,
}

impl EventType {
    pub const ALL: [Self; 7] = [
        Self::Created,
        Self::Successful,
        Self::Cancelled,
        Self::BidEntered,
        Self::BidWithdrawn,
        Self::Transfer,
        Self::Approve,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Successful => "successful",
            Self::Cancelled => "cancelled",
            Self::BidEntered => "bid_entered",
            Self::BidWithdrawn => "bid_withdrawn",
            Self::Transfer => "transfer",
            Self::Approve => "approve",
        }
    }

    /// Wire values accepted by the events endpoint.
    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|value| value.as_str()).collect()
    }

    /// Exact, case-sensitive lookup by wire value.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == value)
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_value(value).ok_or_else(|| {
            ParamError::invalid_value(
                "event_type",
                value,
                format!("expected one of {}", Self::values().join(", ")),
            )
        })
    }
}

/// Selling mechanism of the listing an event belongs to.
///
/// `dutch` covers fixed-price and declining-price sell orders, `min-price` the
/// CryptoPunks bidding auctions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionType {
    #[serde(rename = "english")]
    English,
    #[serde(rename = "dutch")]
    Dutch,
    #[serde(rename = "min-price")]
    MinPrice,
}

impl AuctionType {
    pub const ALL: [Self; 3] = [Self::English, Self::Dutch, Self::MinPrice];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Dutch => "dutch",
            Self::MinPrice => "min-price",
        }
    }

    pub fn values() -> Vec<&'static str> {
        Self::ALL.iter().map(|value| value.as_str()).collect()
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == value)
    }
}

impl Display for AuctionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionType {
    type Err = ParamError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_value(value).ok_or_else(|| {
            ParamError::invalid_value(
                "auction_type",
                value,
                format!("expected one of {}", Self::values().join(", ")),
            )
        })
    }
}
