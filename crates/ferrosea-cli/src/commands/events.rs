use serde::Serialize;

use ferrosea_core::{
    ClientParams, EventRecord, EventsEndpoint, EventsParams, OpenSeaClient, ParamError,
    UtcDateTime,
};
use tracing::info;

use crate::cli::EventsArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct EventsResponseData {
    pub events: Vec<EventRecord>,
}

pub async fn run(args: &EventsArgs, client: OpenSeaClient) -> Result<EventsResponseData, CliError> {
    let client_params = ClientParams::new(args.offset, args.limit)?;
    let mut endpoint = EventsEndpoint::new(client, client_params, to_params(args)?)?;

    endpoint.get_request().await?;
    let events = endpoint.response()?;
    info!(count = events.len(), "fetched events");

    Ok(EventsResponseData { events })
}

/// Map flags to raw filters. Timestamps are parsed here; enum values are left to query validation.
pub fn to_params(args: &EventsArgs) -> Result<EventsParams, CliError> {
    let mut params = EventsParams::new()
        .with_event_type(args.event_type.as_str())
        .with_only_opensea(args.only_opensea);

    if let Some(address) = &args.asset_contract_address {
        params = params.with_asset_contract_address(address);
    }
    if let Some(token_id) = &args.token_id {
        params = params.with_token_id(token_id);
    }
    if let Some(slug) = &args.collection_slug {
        params = params.with_collection_slug(slug);
    }
    if let Some(address) = &args.account_address {
        params = params.with_account_address(address);
    }
    if let Some(auction_type) = &args.auction_type {
        params = params.with_auction_type(auction_type.as_str());
    }
    if let Some(raw) = &args.occurred_before {
        params = params.with_occurred_before(parse_bound("occurred_before", raw)?);
    }
    if let Some(raw) = &args.occurred_after {
        params = params.with_occurred_after(parse_bound("occurred_after", raw)?);
    }

    Ok(params)
}

fn parse_bound(field: &'static str, raw: &str) -> Result<UtcDateTime, ParamError> {
    UtcDateTime::parse(raw).map_err(|error| {
        ParamError::invalid_value(field, raw, error.to_string())
    })
}
