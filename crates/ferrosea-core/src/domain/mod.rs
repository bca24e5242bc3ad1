//! # Domain Types
//!
//! Closed value sets and timestamps used by the events endpoint.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`EventType`] | Event kind filter (`successful`, `transfer`, ...) |
//! | [`AuctionType`] | Auction mechanism filter (`english`, `dutch`, `min-price`) |
//! | [`UtcDateTime`] | UTC timestamp with exact ordering |
//! | [`ParamValue`] | Caller-supplied parameter before validation |

mod event_type;
mod param_value;
mod timestamp;

pub use event_type::{AuctionType, EventType};
pub use param_value::ParamValue;
pub use timestamp::UtcDateTime;
