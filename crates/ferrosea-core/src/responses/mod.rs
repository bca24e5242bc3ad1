//! Typed views over endpoint response payloads.

mod event;

pub use event::{
    Account, AccountUser, AssetContract, EventAsset, EventRecord, PaymentToken, Transaction,
};
