use super::account::{Account, AccountId, Incentive};
use super::transfer::{RecordId, TransactionRecord, TransferDraft, TransferEvent};
use crate::error::{EngineError, IncentiveError};
use async_trait::async_trait;

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type RecordStoreBox = Box<dyn RecordStore>;
pub type IncentiveClientBox = Box<dyn IncentiveClient>;

/// Holds account balances and exposes the locked read-modify-write that
/// keeps the ledger consistent under contention.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Reads an account's current state.
    async fn get(&self, id: AccountId) -> Result<Option<Account>, EngineError>;

    /// Applies a transfer as a single atomic unit: re-checks the sender's
    /// funds, debits the sender by the amount, credits the recipient with
    /// amount + incentive, and appends the transaction record, all inside
    /// one critical section. Calls touching overlapping accounts serialize;
    /// disjoint pairs may proceed concurrently.
    async fn apply_transfer(
        &self,
        draft: &TransferDraft,
    ) -> Result<TransactionRecord, EngineError>;

    /// Snapshot of every account, sorted by id. Each balance is read under
    /// its own lock; the snapshot is not atomic across accounts.
    async fn all(&self) -> Result<Vec<Account>, EngineError>;
}

/// Append-only store of completed transfers.
///
/// Implementations that back this port and [`AccountStore`] with the same
/// engine must commit the append inside the transfer's critical section, so
/// that a crash can never separate the balance mutation from its record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Appends a completed transfer, assigning the next record id and the
    /// timestamp. No update or delete exists.
    async fn append(&self, draft: &TransferDraft) -> Result<TransactionRecord, EngineError>;

    async fn get(&self, id: RecordId) -> Result<Option<TransactionRecord>, EngineError>;

    async fn all(&self) -> Result<Vec<TransactionRecord>, EngineError>;
}

/// Synchronous call to the external incentive calculator.
///
/// `Ok` with a zero amount means "no incentive granted"; `Err` means the
/// call itself failed. The distinction is kept here even though the
/// processor currently resolves both to zero.
#[async_trait]
pub trait IncentiveClient: Send + Sync {
    async fn quote(&self, event: &TransferEvent) -> Result<Incentive, IncentiveError>;
}

/// One ordered partition of the message stream, with at-least-once delivery.
#[async_trait]
pub trait EventStream: Send {
    /// Returns the event at the current position without committing it. The
    /// same event is delivered again on the next poll until [`commit`]
    /// advances past it. Returns `None` once the stream is closed and
    /// drained.
    ///
    /// [`commit`]: EventStream::commit
    async fn poll(&mut self) -> Result<Option<TransferEvent>, EngineError>;

    /// Commits the current position, acknowledging the last polled event.
    async fn commit(&mut self) -> Result<(), EngineError>;
}
