use async_trait::async_trait;
use rust_decimal::Decimal;
use transfer_engine::domain::account::{Account, Balance, Incentive};
use transfer_engine::domain::ports::IncentiveClient;
use transfer_engine::domain::transfer::TransferEvent;
use transfer_engine::error::IncentiveError;
use transfer_engine::infrastructure::in_memory::InMemoryLedger;

/// Quotes the same incentive for every transfer.
pub struct FixedIncentive(pub Decimal);

#[async_trait]
impl IncentiveClient for FixedIncentive {
    async fn quote(&self, _event: &TransferEvent) -> Result<Incentive, IncentiveError> {
        Ok(Incentive::new(self.0).unwrap())
    }
}

/// Fails every quote, as a dead collaborator would.
pub struct DeadIncentive;

#[async_trait]
impl IncentiveClient for DeadIncentive {
    async fn quote(&self, _event: &TransferEvent) -> Result<Incentive, IncentiveError> {
        Err(IncentiveError::Status(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
        ))
    }
}

pub async fn seeded_ledger(seed: &[(u64, Decimal)]) -> InMemoryLedger {
    let ledger = InMemoryLedger::new();
    for (id, balance) in seed {
        ledger
            .insert_account(Account::new(*id, Balance::new(*balance)))
            .await;
    }
    ledger
}

pub fn event(sender: u64, recipient: u64, amount: Decimal) -> TransferEvent {
    TransferEvent {
        sender_id: sender,
        recipient_id: recipient,
        amount,
    }
}
