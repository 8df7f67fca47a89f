use crate::domain::account::{Amount, Incentive};
use crate::domain::ports::{AccountStoreBox, IncentiveClientBox};
use crate::domain::transfer::{TransactionRecord, TransferDraft, TransferEvent};
use crate::error::EngineError;
use tracing::{debug, warn};

/// Terminal result of processing one event.
#[derive(Debug)]
pub enum Outcome {
    /// The transfer committed: both balances moved and the record exists.
    Completed(TransactionRecord),
    /// The transfer was dropped without side effects. The event is still
    /// acknowledged; the fault is visible only here and in the logs.
    Dropped(EngineError),
}

/// Orchestrates validation, incentive acquisition, and the atomic commit for
/// one transfer event.
///
/// Collaborators are handed over at construction; nothing resolves them
/// implicitly. The processor performs no retries of its own: a
/// `StoreUnavailable` error propagates so the consumer can leave the event
/// uncommitted for redelivery.
pub struct TransactionProcessor {
    accounts: AccountStoreBox,
    incentives: IncentiveClientBox,
}

impl TransactionProcessor {
    pub fn new(accounts: AccountStoreBox, incentives: IncentiveClientBox) -> Self {
        Self {
            accounts,
            incentives,
        }
    }

    /// Runs one event through received → validated → quoted → applied →
    /// recorded.
    ///
    /// Validation failures finish as [`Outcome::Dropped`]; the incentive
    /// call fails open to zero; only a store outage escapes as an error.
    /// Redelivering an already-processed event reapplies the transfer;
    /// the stream's at-least-once semantics are not deduplicated here.
    pub async fn process(&self, event: &TransferEvent) -> Result<Outcome, EngineError> {
        let amount = match Amount::new(event.amount) {
            Ok(amount) => amount,
            Err(fault) => return Self::drop_event(event, fault),
        };

        // received: both parties must exist before anything else happens.
        let Some(sender) = self.accounts.get(event.sender_id).await? else {
            return Self::drop_event(event, EngineError::AccountNotFound(event.sender_id));
        };
        if self.accounts.get(event.recipient_id).await?.is_none() {
            return Self::drop_event(event, EngineError::AccountNotFound(event.recipient_id));
        }

        // validated: the pre-check that keeps the sender out of the red. The
        // authoritative check runs again inside the store's critical section.
        if sender.balance.value() < amount.value() {
            return Self::drop_event(
                event,
                EngineError::InsufficientFunds {
                    account: sender.id,
                    available: sender.balance.value(),
                    requested: amount.value(),
                },
            );
        }

        // quoted: fail open. A dead collaborator must not stall transfers.
        let incentive = match self.incentives.quote(event).await {
            Ok(incentive) => incentive,
            Err(fault) => {
                warn!(
                    sender = event.sender_id,
                    recipient = event.recipient_id,
                    error = %fault,
                    "incentive collaborator unavailable, proceeding without incentive"
                );
                Incentive::ZERO
            }
        };

        // applied + recorded: one atomic unit inside the account store.
        let draft = TransferDraft {
            sender_id: event.sender_id,
            recipient_id: event.recipient_id,
            amount,
            incentive,
        };
        match self.accounts.apply_transfer(&draft).await {
            Ok(record) => {
                debug!(
                    record = record.id,
                    sender = record.sender_id,
                    recipient = record.recipient_id,
                    "transfer recorded"
                );
                Ok(Outcome::Completed(record))
            }
            // A concurrent transfer can win the balance between the
            // pre-check and the commit; that loss is a drop, not an outage.
            Err(fault @ (EngineError::AccountNotFound(_) | EngineError::InsufficientFunds { .. })) => {
                Self::drop_event(event, fault)
            }
            Err(fault) => Err(fault),
        }
    }

    fn drop_event(event: &TransferEvent, fault: EngineError) -> Result<Outcome, EngineError> {
        warn!(
            sender = event.sender_id,
            recipient = event.recipient_id,
            amount = %event.amount,
            %fault,
            "transfer dropped"
        );
        Ok(Outcome::Dropped(fault))
    }
}
