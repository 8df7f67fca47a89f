use super::account::{AccountId, Amount, Incentive};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a durably recorded transfer, assigned monotonically by the
/// record store.
pub type RecordId = u64;

/// Inbound request to move funds between two accounts.
///
/// Wire-shaped: this is exactly the JSON object the message stream delivers
/// and the incentive collaborator receives. Transient; never persisted on
/// its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferEvent {
    pub sender_id: AccountId,
    pub recipient_id: AccountId,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

/// A validated, quoted transfer ready for the atomic commit.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferDraft {
    pub sender_id: AccountId,
    pub recipient_id: AccountId,
    pub amount: Amount,
    pub incentive: Incentive,
}

/// A completed transfer as durably recorded. Immutable once created; the
/// record store is append-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: RecordId,
    pub sender_id: AccountId,
    pub recipient_id: AccountId,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub incentive: Decimal,
    pub timestamp: DateTime<Utc>,
}
