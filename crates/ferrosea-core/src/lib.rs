//! # Ferrosea Core
//!
//! Typed client for the marketplace `events` endpoint.
//!
//! ## Overview
//!
//! - **Closed filter sets** ([`EventType`], [`AuctionType`]) with their wire values
//! - **Fail-fast validation** of filter combinations before any network call
//! - **Request construction** against a pluggable [`HttpClient`] transport
//! - **Response mapping** of `asset_events` into [`EventRecord`]s
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client_params`] | Pagination window (`offset`, `limit`) |
//! | [`config`] | Base URL, API key and timeout, from the environment |
//! | [`domain`] | Event/auction enums, timestamps, raw parameter values |
//! | [`endpoint`] | Endpoint lifecycle trait and the client that sends requests |
//! | [`error`] | Validation, config and request errors |
//! | [`events`] | Events filters, validation and endpoint |
//! | [`http_client`] | HTTP transport abstraction and reqwest implementation |
//! | [`responses`] | Event response records |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐   validate   ┌──────────────────┐
//! │  EventsParams   │─────────────▶│   EventsQuery    │
//! └─────────────────┘              └────────┬─────────┘
//!                                           │
//!                                           ▼
//! ┌─────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ EventsEndpoint  │────▶│  OpenSeaClient   │────▶│   HttpClient     │
//! │ (Endpoint impl) │     │ (config + auth)  │     │ (reqwest/fake)   │
//! └────────┬────────┘     └──────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  EventRecord    │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use ferrosea_core::{ClientParams, EventsParams, EventsQuery, ParamErrorKind};
//!
//! let params = EventsParams::new().with_event_type("randomstr");
//! let error = EventsQuery::validate(&ClientParams::default(), params).unwrap_err();
//! assert_eq!(error.kind(), ParamErrorKind::Value);
//! assert_eq!(error.field(), Some("event_type"));
//! ```
//!
//! ## Security
//!
//! - The API key is read from `FERROSEA_API_KEY` and redacted from `Debug` output
//! - It is never attached to log events

pub mod client_params;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod http_client;
pub mod responses;

#[cfg(test)]
mod test_support;

pub use client_params::{ClientParams, MAX_LIMIT};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use domain::{AuctionType, EventType, ParamValue, UtcDateTime};
pub use endpoint::{ApiEndpoint, Endpoint, OpenSeaClient};
pub use error::{ConfigError, EventsError, ParamError, ParamErrorKind, ValidationError};
pub use events::{EventsEndpoint, EventsParams, EventsQuery};
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};
pub use responses::{
    Account, AccountUser, AssetContract, EventAsset, EventRecord, PaymentToken, Transaction,
};
