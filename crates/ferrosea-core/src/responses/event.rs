use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AuctionType, EventType, UtcDateTime};

/// One entry of the `asset_events` array.
///
/// The server omits or nulls fields depending on the event kind, so every field
/// is optional. Enum-valued fields are kept as raw strings; use the `parsed_*`
/// accessors to compare against [`EventType`] and [`AuctionType`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRecord {
    pub id: Option<u64>,
    pub event_type: Option<String>,
    pub auction_type: Option<String>,
    pub asset: Option<EventAsset>,
    pub collection_slug: Option<String>,
    pub contract_address: Option<String>,
    pub created_date: Option<String>,
    pub quantity: Option<String>,
    pub total_price: Option<String>,
    pub payment_token: Option<PaymentToken>,
    pub from_account: Option<Account>,
    pub to_account: Option<Account>,
    pub seller: Option<Account>,
    pub winner_account: Option<Account>,
    pub transaction: Option<Transaction>,
}

impl EventRecord {
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn parsed_event_type(&self) -> Option<EventType> {
        self.event_type.as_deref().and_then(EventType::from_value)
    }

    pub fn parsed_auction_type(&self) -> Option<AuctionType> {
        self.auction_type
            .as_deref()
            .and_then(AuctionType::from_value)
    }

    pub fn permalink(&self) -> Option<&str> {
        self.asset.as_ref()?.permalink.as_deref()
    }

    /// Time the on-chain transaction was mined, when the event has one.
    pub fn transaction_timestamp(&self) -> Option<UtcDateTime> {
        let raw = self.transaction.as_ref()?.timestamp.as_deref()?;
        UtcDateTime::parse(raw).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventAsset {
    pub id: Option<u64>,
    pub token_id: Option<String>,
    pub name: Option<String>,
    pub permalink: Option<String>,
    pub asset_contract: Option<AssetContract>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetContract {
    pub address: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentToken {
    pub symbol: Option<String>,
    pub address: Option<String>,
    pub decimals: Option<u32>,
    pub eth_price: Option<String>,
    pub usd_price: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub address: Option<String>,
    pub user: Option<AccountUser>,
}

impl Account {
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref()?.username.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountUser {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub id: Option<u64>,
    pub transaction_hash: Option<String>,
    pub block_number: Option<String>,
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_sale_event() {
        let record = EventRecord::from_json(json!({
            "id": 4021,
            "event_type": "successful",
            "auction_type": "dutch",
            "asset": {
                "id": 17,
                "token_id": "2140",
                "name": "CryptoPunk #2140",
                "permalink": "https://opensea.io/assets/0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb/2140",
                "asset_contract": { "address": "0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb" }
            },
            "total_price": "1000000000000000000",
            "payment_token": { "symbol": "ETH", "decimals": 18, "usd_price": "3000.5" },
            "winner_account": { "address": "0xabc", "user": { "username": "punkfan" } },
            "transaction": { "timestamp": "2021-08-01T12:00:00", "block_number": "12936339" },
            "is_private": false
        }))
        .expect("event should parse");

        assert_eq!(record.parsed_event_type(), Some(EventType::Successful));
        assert_eq!(record.parsed_auction_type(), Some(AuctionType::Dutch));
        assert!(record.permalink().is_some_and(|link| link.contains("opensea.io")));
        assert_eq!(
            record.winner_account.as_ref().and_then(Account::username),
            Some("punkfan")
        );
        assert_eq!(
            record.transaction_timestamp(),
            Some(UtcDateTime::parse("2021-08-01T12:00:00Z").expect("valid"))
        );
    }

    #[test]
    fn tolerates_nulls_and_missing_fields() {
        let record = EventRecord::from_json(json!({
            "event_type": "transfer",
            "asset": null,
            "auction_type": null,
            "transaction": null
        }))
        .expect("sparse event should parse");

        assert!(record.permalink().is_none());
        assert!(record.parsed_auction_type().is_none());
        assert!(record.transaction_timestamp().is_none());
    }

    #[test]
    fn unknown_event_kind_is_kept_raw() {
        let record =
            EventRecord::from_json(json!({ "event_type": "offer_entered" })).expect("must parse");
        assert_eq!(record.event_type.as_deref(), Some("offer_entered"));
        assert!(record.parsed_event_type().is_none());
    }

    #[test]
    fn wrongly_shaped_field_is_a_decode_error() {
        let result = EventRecord::from_json(json!({ "asset": "not-an-object" }));
        assert!(result.is_err());
    }
}
