//! Events endpoint: filter validation, request construction, response mapping.
//!
//! # Example
//!
//! ```rust,ignore
//! use ferrosea_core::{ClientParams, EventType, EventsEndpoint, EventsParams, OpenSeaClient};
//!
//! async fn latest_sales() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenSeaClient::from_env()?;
//!     let params = EventsParams::new()
//!         .with_asset_contract_address("0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb")
//!         .with_event_type(EventType::Successful);
//!
//!     let mut endpoint = EventsEndpoint::new(client, ClientParams::new(0, 5)?, params)?;
//!     endpoint.get_request().await?;
//!     for event in endpoint.response()? {
//!         println!("{:?} {:?}", event.event_type, event.total_price);
//!     }
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::endpoint::{ApiEndpoint, Endpoint, OpenSeaClient};
use crate::{
    AuctionType, ClientParams, EventRecord, EventType, EventsError, HttpResponse, ParamError,
    ParamValue, UtcDateTime, ValidationError,
};

/// Caller-supplied filters for one events request, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventsParams {
    pub asset_contract_address: Option<String>,
    pub token_id: Option<String>,
    pub collection_slug: Option<String>,
    pub account_address: Option<String>,
    pub occurred_before: Option<ParamValue>,
    pub occurred_after: Option<ParamValue>,
    pub event_type: Option<ParamValue>,
    pub auction_type: Option<ParamValue>,
    pub only_opensea: bool,
}

impl EventsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset_contract_address(mut self, address: impl Into<String>) -> Self {
        self.asset_contract_address = Some(address.into());
        self
    }

    pub fn with_token_id(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    pub fn with_collection_slug(mut self, slug: impl Into<String>) -> Self {
        self.collection_slug = Some(slug.into());
        self
    }

    pub fn with_account_address(mut self, address: impl Into<String>) -> Self {
        self.account_address = Some(address.into());
        self
    }

    pub fn with_occurred_before(mut self, value: impl Into<ParamValue>) -> Self {
        self.occurred_before = Some(value.into());
        self
    }

    pub fn with_occurred_after(mut self, value: impl Into<ParamValue>) -> Self {
        self.occurred_after = Some(value.into());
        self
    }

    pub fn with_event_type(mut self, value: impl Into<ParamValue>) -> Self {
        self.event_type = Some(value.into());
        self
    }

    pub fn with_auction_type(mut self, value: impl Into<ParamValue>) -> Self {
        self.auction_type = Some(value.into());
        self
    }

    pub fn with_only_opensea(mut self, only_opensea: bool) -> Self {
        self.only_opensea = only_opensea;
        self
    }
}

/// Validated, immutable events filter set.
///
/// Only obtainable through [`EventsQuery::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsQuery {
    offset: u32,
    limit: u32,
    asset_contract_address: Option<String>,
    token_id: Option<String>,
    collection_slug: Option<String>,
    account_address: Option<String>,
    occurred_before: Option<UtcDateTime>,
    occurred_after: Option<UtcDateTime>,
    event_type: EventType,
    auction_type: Option<AuctionType>,
    only_opensea: bool,
}

impl EventsQuery {
    /// Check every filter group in order: auction type, event type, occurred bounds.
    ///
    /// All groups run; each stops at its own first failure. The returned error
    /// lists the failures in that order.
    pub fn validate(
        client_params: &ClientParams,
        params: EventsParams,
    ) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        let auction_type = record(&mut errors, validate_auction_type(params.auction_type.as_ref()));
        let event_type = record(&mut errors, validate_event_type(params.event_type.as_ref()));
        let bounds = record(
            &mut errors,
            validate_occurred_bounds(
                params.occurred_before.as_ref(),
                params.occurred_after.as_ref(),
            ),
        );

        let (Some(auction_type), Some(event_type), Some((occurred_before, occurred_after))) =
            (auction_type, event_type, bounds)
        else {
            return Err(ValidationError::from_errors(errors));
        };

        Ok(Self {
            offset: client_params.offset(),
            limit: client_params.limit(),
            asset_contract_address: params.asset_contract_address,
            token_id: params.token_id,
            collection_slug: params.collection_slug,
            account_address: params.account_address,
            occurred_before,
            occurred_after,
            event_type,
            auction_type,
            only_opensea: params.only_opensea,
        })
    }

    pub const fn offset(&self) -> u32 {
        self.offset
    }

    pub const fn limit(&self) -> u32 {
        self.limit
    }

    pub fn asset_contract_address(&self) -> Option<&str> {
        self.asset_contract_address.as_deref()
    }

    pub fn token_id(&self) -> Option<&str> {
        self.token_id.as_deref()
    }

    pub fn collection_slug(&self) -> Option<&str> {
        self.collection_slug.as_deref()
    }

    pub fn account_address(&self) -> Option<&str> {
        self.account_address.as_deref()
    }

    pub const fn occurred_before(&self) -> Option<UtcDateTime> {
        self.occurred_before
    }

    pub const fn occurred_after(&self) -> Option<UtcDateTime> {
        self.occurred_after
    }

    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    pub const fn auction_type(&self) -> Option<AuctionType> {
        self.auction_type
    }

    pub const fn only_opensea(&self) -> bool {
        self.only_opensea
    }

    /// Wire query pairs; `None` filters are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let optional = [
            ("collection_slug", self.collection_slug.clone()),
            ("token_id", self.token_id.clone()),
            ("account_address", self.account_address.clone()),
            ("auction_type", self.auction_type.map(|value| value.as_str().to_owned())),
            ("occurred_before", self.occurred_before.map(UtcDateTime::format_rfc3339)),
            ("occurred_after", self.occurred_after.map(UtcDateTime::format_rfc3339)),
        ];

        let mut pairs = vec![
            ("offset", self.offset.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(address) = &self.asset_contract_address {
            pairs.push(("asset_contract_address", address.clone()));
        }
        pairs.push(("event_type", self.event_type.as_str().to_owned()));
        pairs.push(("only_opensea", self.only_opensea.to_string()));
        pairs.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.map(|value| (name, value))),
        );
        pairs
    }
}

fn record<T>(errors: &mut Vec<ParamError>, result: Result<T, ParamError>) -> Option<T> {
    result.map_err(|error| errors.push(error)).ok()
}

fn validate_auction_type(value: Option<&ParamValue>) -> Result<Option<AuctionType>, ParamError> {
    let Some(value) = value else {
        return Ok(None);
    };

    let text = value.as_text().ok_or_else(|| {
        ParamError::invalid_type("auction_type", "text", value.kind(), value.to_string())
    })?;

    AuctionType::from_value(text).map(Some).ok_or_else(|| {
        ParamError::invalid_value(
            "auction_type",
            text,
            format!("expected one of {}", AuctionType::values().join(", ")),
        )
    })
}

fn validate_event_type(value: Option<&ParamValue>) -> Result<EventType, ParamError> {
    let Some(value) = value else {
        return Err(ParamError::invalid_value(
            "event_type",
            "<absent>",
            "event_type is required",
        ));
    };

    let text = value.as_text().ok_or_else(|| {
        ParamError::invalid_type("event_type", "text", value.kind(), value.to_string())
    })?;

    EventType::from_value(text).ok_or_else(|| {
        ParamError::invalid_value(
            "event_type",
            text,
            format!("expected one of {}", EventType::values().join(", ")),
        )
    })
}

type OccurredBounds = (Option<UtcDateTime>, Option<UtcDateTime>);

fn validate_occurred_bounds(
    before: Option<&ParamValue>,
    after: Option<&ParamValue>,
) -> Result<OccurredBounds, ParamError> {
    let before = timestamp_param("occurred_before", before)?;
    let after = timestamp_param("occurred_after", after)?;

    if let (Some(before), Some(after)) = (before, after) {
        if after == before {
            return Err(ParamError::invalid_value(
                "occurred_after",
                format!("occurred_before={before}, occurred_after={after}"),
                "occurred_before and occurred_after may not be equal",
            ));
        }
        if after > before {
            return Err(ParamError::invalid_value(
                "occurred_after",
                format!("occurred_before={before}, occurred_after={after}"),
                "occurred_after must be earlier than occurred_before",
            ));
        }
    }

    Ok((before, after))
}

fn timestamp_param(
    field: &'static str,
    value: Option<&ParamValue>,
) -> Result<Option<UtcDateTime>, ParamError> {
    match value {
        None => Ok(None),
        Some(value) => value.as_timestamp().map(Some).ok_or_else(|| {
            ParamError::invalid_type(field, "timestamp", value.kind(), value.to_string())
        }),
    }
}

#[derive(Debug, Deserialize)]
struct EventsPage {
    asset_events: Vec<Value>,
}

/// One events request: validated at construction, sent at most once.
#[derive(Debug)]
pub struct EventsEndpoint {
    client: OpenSeaClient,
    query: EventsQuery,
    requested: bool,
    http_response: Option<HttpResponse>,
}

impl EventsEndpoint {
    /// Validate `params` against `client_params`. Fails before any network I/O.
    pub fn new(
        client: OpenSeaClient,
        client_params: ClientParams,
        params: EventsParams,
    ) -> Result<Self, ValidationError> {
        let query = EventsQuery::validate(&client_params, params)?;
        debug!(
            event_type = %query.event_type(),
            offset = query.offset(),
            limit = query.limit(),
            "validated events query"
        );
        Ok(Self::from_query(client, query))
    }

    pub fn from_query(client: OpenSeaClient, query: EventsQuery) -> Self {
        Self {
            client,
            query,
            requested: false,
            http_response: None,
        }
    }

    pub fn query(&self) -> &EventsQuery {
        &self.query
    }

    /// Issue the GET and retain the raw response.
    ///
    /// A failed attempt still counts as the one request this endpoint may send.
    pub async fn get_request(&mut self) -> Result<&HttpResponse, EventsError> {
        if self.requested {
            return Err(EventsError::AlreadyRequested);
        }
        self.requested = true;

        let response = self.client.get(&*self).await?;
        Ok(self.http_response.insert(response))
    }

    /// [`get_request`](Self::get_request) on a private current-thread runtime.
    ///
    /// Fails with [`EventsError::Runtime`] when called from inside an async runtime.
    pub fn get_request_blocking(&mut self) -> Result<&HttpResponse, EventsError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(EventsError::Runtime(std::io::Error::other(
                "blocking request issued from inside an async runtime",
            )));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(EventsError::Runtime)?;
        runtime.block_on(self.get_request())
    }

    pub fn http_response(&self) -> Option<&HttpResponse> {
        self.http_response.as_ref()
    }

    /// Parsed events in server order.
    pub fn response(&self) -> Result<Vec<EventRecord>, EventsError> {
        let response = self.http_response.as_ref().ok_or(EventsError::NotRequested)?;
        self.parse(response)
    }
}

impl Endpoint for EventsEndpoint {
    type Response = Vec<EventRecord>;

    fn api_endpoint(&self) -> ApiEndpoint {
        ApiEndpoint::Events
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        self.query.to_query_pairs()
    }

    fn parse(&self, response: &HttpResponse) -> Result<Self::Response, EventsError> {
        let page: EventsPage = response.json()?;
        let events = page
            .asset_events
            .into_iter()
            .map(EventRecord::from_json)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = events.len(), "parsed asset events");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::Duration;

    use super::*;
    use crate::test_support::{block_on, RecordingHttpClient};
    use crate::{ClientConfig, HttpError, ParamErrorKind};

    const PUNKS: &str = "0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb";

    fn base_params() -> EventsParams {
        EventsParams::new()
            .with_asset_contract_address(PUNKS)
            .with_event_type(EventType::Successful)
    }

    fn validate(params: EventsParams) -> Result<EventsQuery, ValidationError> {
        EventsQuery::validate(&ClientParams::default(), params)
    }

    fn ts(input: &str) -> UtcDateTime {
        UtcDateTime::parse(input).expect("valid timestamp")
    }

    fn endpoint_with(
        transport: Arc<RecordingHttpClient>,
        params: EventsParams,
    ) -> EventsEndpoint {
        let client = OpenSeaClient::new(transport, ClientConfig::default());
        EventsEndpoint::new(client, ClientParams::new(0, 5).expect("valid"), params)
            .expect("valid query")
    }

    #[test]
    fn accepts_every_event_type_value() {
        for value in EventType::values() {
            let query = validate(base_params().with_event_type(value)).expect("listed value");
            assert_eq!(query.event_type().as_str(), value);
        }
    }

    #[test]
    fn unknown_event_type_is_a_value_error() {
        let error = validate(base_params().with_event_type("randomstr")).expect_err("must fail");
        assert_eq!(error.kind(), ParamErrorKind::Value);
        assert_eq!(error.field(), Some("event_type"));
    }

    #[test]
    fn non_text_event_type_is_a_type_error() {
        let error = validate(base_params().with_event_type(true)).expect_err("must fail");
        assert_eq!(error.kind(), ParamErrorKind::Type);
        assert_eq!(error.field(), Some("event_type"));
    }

    #[test]
    fn missing_event_type_is_rejected() {
        let mut params = base_params();
        params.event_type = None;
        let error = validate(params).expect_err("must fail");
        assert_eq!(error.kind(), ParamErrorKind::Value);
        assert_eq!(error.field(), Some("event_type"));
    }

    #[test]
    fn auction_type_absent_or_listed_is_accepted() {
        assert_eq!(validate(base_params()).expect("absent").auction_type(), None);
        for value in AuctionType::values() {
            let query = validate(base_params().with_auction_type(value)).expect("listed value");
            assert_eq!(query.auction_type().map(AuctionType::as_str), Some(value));
        }
    }

    #[test]
    fn auction_type_outside_set_is_rejected() {
        let unknown = validate(base_params().with_auction_type("randomstr")).expect_err("must fail");
        assert_eq!(unknown.kind(), ParamErrorKind::Value);

        let float = validate(base_params().with_auction_type(0.0)).expect_err("must fail");
        assert_eq!(float.kind(), ParamErrorKind::Type);
        assert_eq!(float.primary().map(ParamError::value), Some("0.0"));
    }

    #[test]
    fn non_timestamp_bounds_are_type_errors() {
        let before = validate(base_params().with_occurred_before(true)).expect_err("must fail");
        assert_eq!(before.kind(), ParamErrorKind::Type);
        assert_eq!(before.field(), Some("occurred_before"));

        let after = validate(base_params().with_occurred_after("2021-08-01")).expect_err("must fail");
        assert_eq!(after.kind(), ParamErrorKind::Type);
        assert_eq!(after.field(), Some("occurred_after"));
    }

    #[test]
    fn equal_bounds_are_rejected() {
        let now = UtcDateTime::now();
        let error = validate(base_params().with_occurred_before(now).with_occurred_after(now))
            .expect_err("must fail");
        assert_eq!(error.kind(), ParamErrorKind::Value);
    }

    #[test]
    fn after_later_than_before_is_rejected_even_by_a_microsecond() {
        let before = UtcDateTime::now();
        let after = before.saturating_add(Duration::microseconds(1));
        let error = validate(base_params().with_occurred_before(before).with_occurred_after(after))
            .expect_err("must fail");
        assert_eq!(error.kind(), ParamErrorKind::Value);
    }

    #[test]
    fn after_strictly_before_upper_bound_is_accepted() {
        let after = ts("2021-07-30T00:00:00");
        let before = after.saturating_add(Duration::microseconds(1));
        let query = validate(base_params().with_occurred_before(before).with_occurred_after(after))
            .expect("ordered bounds");
        assert_eq!(query.occurred_after(), Some(after));
        assert_eq!(query.occurred_before(), Some(before));
    }

    #[test]
    fn every_group_reports_in_check_order() {
        let error = validate(
            base_params()
                .with_event_type("nope")
                .with_auction_type(1_i64)
                .with_occurred_before(false),
        )
        .expect_err("must fail");

        let fields = error
            .errors()
            .iter()
            .map(ParamError::field)
            .collect::<Vec<_>>();
        assert_eq!(fields, vec!["auction_type", "event_type", "occurred_before"]);
        assert_eq!(error.kind(), ParamErrorKind::Type);
    }

    #[test]
    fn query_pairs_follow_wire_order_and_skip_absent_filters() {
        let query = validate(
            base_params()
                .with_auction_type(AuctionType::MinPrice)
                .with_occurred_after(ts("2021-08-01T00:00:00"))
                .with_only_opensea(true),
        )
        .expect("valid");

        let names = query
            .to_query_pairs()
            .into_iter()
            .map(|(name, _)| name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "offset",
                "limit",
                "asset_contract_address",
                "event_type",
                "only_opensea",
                "auction_type",
                "occurred_after"
            ]
        );
    }

    #[test]
    fn get_request_sends_validated_filters() {
        let transport = Arc::new(RecordingHttpClient::with_body(r#"{"asset_events": []}"#));
        let mut endpoint = endpoint_with(
            transport.clone(),
            base_params()
                .with_token_id("2140")
                .with_auction_type(AuctionType::Dutch)
                .with_occurred_before(ts("2021-08-02T00:00:00")),
        );

        block_on(endpoint.get_request()).expect("request should succeed");

        let requests = transport.recorded_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.url, "https://api.opensea.io/api/v1/events");
        assert_eq!(request.query_value("offset"), Some("0"));
        assert_eq!(request.query_value("limit"), Some("5"));
        assert_eq!(request.query_value("asset_contract_address"), Some(PUNKS));
        assert_eq!(request.query_value("event_type"), Some("successful"));
        assert_eq!(request.query_value("only_opensea"), Some("false"));
        assert_eq!(request.query_value("token_id"), Some("2140"));
        assert_eq!(request.query_value("auction_type"), Some("dutch"));
        assert_eq!(
            request.query_value("occurred_before"),
            Some("2021-08-02T00:00:00Z")
        );
        assert_eq!(request.query_value("collection_slug"), None);
        assert_eq!(request.query_value("occurred_after"), None);
    }

    #[test]
    fn response_preserves_server_order() {
        let transport = Arc::new(RecordingHttpClient::with_body(
            r#"{"asset_events": [{"id": 3, "event_type": "successful"}, {"id": 1, "event_type": "successful"}, {"id": 2, "event_type": "successful"}]}"#,
        ));
        let mut endpoint = endpoint_with(transport, base_params());

        block_on(endpoint.get_request()).expect("request should succeed");
        let ids = endpoint
            .response()
            .expect("events should parse")
            .into_iter()
            .map(|event| event.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
    }

    #[test]
    fn request_is_issued_at_most_once() {
        let transport = Arc::new(RecordingHttpClient::with_body(r#"{"asset_events": []}"#));
        let mut endpoint = endpoint_with(transport.clone(), base_params());

        block_on(endpoint.get_request()).expect("first request succeeds");
        let second = block_on(endpoint.get_request()).expect_err("second request must fail");

        assert!(matches!(second, EventsError::AlreadyRequested));
        assert_eq!(transport.recorded_requests().len(), 1);
    }

    #[test]
    fn response_before_request_is_an_error() {
        let transport = Arc::new(RecordingHttpClient::with_body(r#"{"asset_events": []}"#));
        let endpoint = endpoint_with(transport.clone(), base_params());

        assert!(matches!(endpoint.response(), Err(EventsError::NotRequested)));
        assert!(endpoint.http_response().is_none());
        assert!(transport.recorded_requests().is_empty());
    }

    #[test]
    fn missing_or_non_array_events_key_is_a_decode_error() {
        for body in [r#"{"events": []}"#, r#"{"asset_events": {"id": 1}}"#] {
            let transport = Arc::new(RecordingHttpClient::with_body(body));
            let mut endpoint = endpoint_with(transport, base_params());

            block_on(endpoint.get_request()).expect("transport succeeds");
            assert!(matches!(endpoint.response(), Err(EventsError::Decode(_))));
        }
    }

    #[test]
    fn transport_errors_pass_through_unchanged() {
        let transport = Arc::new(RecordingHttpClient::failing(HttpError::new(
            "connection failed: refused",
        )));
        let mut endpoint = endpoint_with(transport, base_params());

        let error = block_on(endpoint.get_request()).expect_err("must fail");
        match error {
            EventsError::Transport(inner) => {
                assert_eq!(inner.message(), "connection failed: refused");
                assert!(inner.retryable());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blocking_request_drives_transport_once() {
        let transport = Arc::new(RecordingHttpClient::with_body(
            r#"{"asset_events": [{"event_type": "transfer"}]}"#,
        ));
        let mut endpoint = endpoint_with(transport.clone(), base_params());

        let status = endpoint
            .get_request_blocking()
            .expect("request should succeed")
            .status;
        assert_eq!(status, 200);
        assert_eq!(endpoint.response().expect("parses").len(), 1);
        assert_eq!(transport.recorded_requests().len(), 1);
    }

    #[test]
    fn failed_request_is_not_sent_again() {
        let transport = Arc::new(RecordingHttpClient::failing(HttpError::new(
            "connection failed: refused",
        )));
        let mut endpoint = endpoint_with(transport.clone(), base_params());

        let first = block_on(endpoint.get_request()).expect_err("transport fails");
        let second = block_on(endpoint.get_request()).expect_err("retry must be refused");

        assert!(matches!(first, EventsError::Transport(_)));
        assert!(matches!(second, EventsError::AlreadyRequested));
        assert_eq!(transport.recorded_requests().len(), 1);
        assert!(endpoint.http_response().is_none());
    }

    #[tokio::test]
    async fn blocking_request_inside_a_runtime_is_an_error() {
        let transport = Arc::new(RecordingHttpClient::with_body(r#"{"asset_events": []}"#));
        let mut endpoint = endpoint_with(transport.clone(), base_params());

        let error = endpoint
            .get_request_blocking()
            .expect_err("nested runtime must be refused");

        assert!(matches!(error, EventsError::Runtime(_)));
        assert!(transport.recorded_requests().is_empty());

        endpoint.get_request().await.expect("async path still available");
        assert_eq!(transport.recorded_requests().len(), 1);
    }
}
