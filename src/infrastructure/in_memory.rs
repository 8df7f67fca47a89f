use crate::domain::account::{Account, AccountId, Balance};
use crate::domain::ports::{AccountStore, RecordStore};
use crate::domain::transfer::{RecordId, TransactionRecord, TransferDraft};
use crate::error::EngineError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// In-memory ledger backing both store ports with one engine.
///
/// Balances live in per-account `Mutex` cells registered in a shared map.
/// `apply_transfer` locks both parties in ascending account-id order, so two
/// transfers crossing the same pair in opposite directions cannot deadlock,
/// and the funds check, both mutations, and the record append all happen
/// inside that one critical section.
///
/// `Clone` shares the underlying state, which is how the same engine gets
/// boxed once per port at wiring time.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    accounts: Arc<RwLock<HashMap<AccountId, Arc<Mutex<Balance>>>>>,
    records: Arc<Mutex<Vec<TransactionRecord>>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an account with its opening balance. Bootstrap-only; transfers
    /// are the sole mutation path afterwards.
    pub async fn insert_account(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, Arc::new(Mutex::new(account.balance)));
    }

    async fn cell(&self, id: AccountId) -> Result<Arc<Mutex<Balance>>, EngineError> {
        let accounts = self.accounts.read().await;
        accounts
            .get(&id)
            .cloned()
            .ok_or(EngineError::AccountNotFound(id))
    }
}

#[async_trait]
impl AccountStore for InMemoryLedger {
    async fn get(&self, id: AccountId) -> Result<Option<Account>, EngineError> {
        let accounts = self.accounts.read().await;
        match accounts.get(&id) {
            Some(cell) => {
                let balance = *cell.lock().await;
                Ok(Some(Account { id, balance }))
            }
            None => Ok(None),
        }
    }

    async fn apply_transfer(
        &self,
        draft: &TransferDraft,
    ) -> Result<TransactionRecord, EngineError> {
        let amount = draft.amount.value();
        let credit = Balance::new(amount + draft.incentive.value());

        // A self-transfer holds a single lock; net effect is the incentive.
        if draft.sender_id == draft.recipient_id {
            let cell = self.cell(draft.sender_id).await?;
            let mut balance = cell.lock().await;
            if balance.value() < amount {
                return Err(EngineError::InsufficientFunds {
                    account: draft.sender_id,
                    available: balance.value(),
                    requested: amount,
                });
            }
            *balance = *balance - Balance::new(amount) + credit;
            return self.append(draft).await;
        }

        let sender_cell = self.cell(draft.sender_id).await?;
        let recipient_cell = self.cell(draft.recipient_id).await?;

        // Fixed lock order by account id keeps crossing transfers
        // deadlock-free.
        let (mut sender, mut recipient) = if draft.sender_id < draft.recipient_id {
            let sender = sender_cell.lock().await;
            let recipient = recipient_cell.lock().await;
            (sender, recipient)
        } else {
            let recipient = recipient_cell.lock().await;
            let sender = sender_cell.lock().await;
            (sender, recipient)
        };

        if sender.value() < amount {
            return Err(EngineError::InsufficientFunds {
                account: draft.sender_id,
                available: sender.value(),
                requested: amount,
            });
        }

        *sender -= Balance::new(amount);
        *recipient += credit;

        // Both guards are still held: the append commits with the mutation.
        self.append(draft).await
    }

    async fn all(&self) -> Result<Vec<Account>, EngineError> {
        let accounts = self.accounts.read().await;
        let mut snapshot = Vec::with_capacity(accounts.len());
        for (id, cell) in accounts.iter() {
            let balance = *cell.lock().await;
            snapshot.push(Account { id: *id, balance });
        }
        snapshot.sort_by_key(|account| account.id);
        Ok(snapshot)
    }
}

#[async_trait]
impl RecordStore for InMemoryLedger {
    async fn append(&self, draft: &TransferDraft) -> Result<TransactionRecord, EngineError> {
        let mut records = self.records.lock().await;
        let record = TransactionRecord {
            id: records.len() as RecordId + 1,
            sender_id: draft.sender_id,
            recipient_id: draft.recipient_id,
            amount: draft.amount.value(),
            incentive: draft.incentive.value(),
            timestamp: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: RecordId) -> Result<Option<TransactionRecord>, EngineError> {
        let records = self.records.lock().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn all(&self) -> Result<Vec<TransactionRecord>, EngineError> {
        let records = self.records.lock().await;
        Ok(records.clone())
    }
}
