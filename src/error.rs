use crate::domain::account::AccountId;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures surfaced by the transfer pipeline.
///
/// Only `StoreUnavailable` is retryable: the consumer leaves the event
/// uncommitted so the stream redelivers it. Every other variant either drops
/// the transfer without side effects or is recovered locally.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Sender or recipient does not exist. The transfer is dropped.
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// Sender cannot cover the transfer. The transfer is dropped.
    #[error("account {account} holds {available}, transfer requires {requested}")]
    InsufficientFunds {
        account: AccountId,
        available: Decimal,
        requested: Decimal,
    },

    /// Transfer amounts must be strictly positive.
    #[error("invalid transfer amount {0}")]
    InvalidAmount(Decimal),

    /// Incentives must not be negative.
    #[error("invalid incentive amount {0}")]
    InvalidIncentive(Decimal),

    /// A store could not complete the atomic write. Processing aborts and
    /// the event is left uncommitted for redelivery.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Failures talking to the external incentive collaborator.
///
/// Kept distinct from a zero-amount quote so callers can tell "no incentive"
/// from "call failed". The processor recovers every variant fail-open as a
/// zero incentive.
#[derive(Error, Debug)]
pub enum IncentiveError {
    #[error("incentive request failed: {0}")]
    Transport(reqwest::Error),

    #[error("incentive service answered {0}")]
    Status(StatusCode),

    #[error("malformed incentive response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
