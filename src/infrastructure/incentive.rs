use crate::domain::account::Incentive;
use crate::domain::ports::IncentiveClient;
use crate::domain::transfer::TransferEvent;
use crate::error::IncentiveError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Response body of the incentive collaborator.
#[derive(Debug, Deserialize)]
struct IncentivePayload {
    amount: Decimal,
}

/// HTTP client for the external incentive calculator.
///
/// POSTs the transfer event as JSON and expects `{"amount": number}` back.
/// The bounded timeout is mandatory: without it a stalled collaborator would
/// occupy the consumer indefinitely. Every failure mode surfaces as an
/// [`IncentiveError`]; the fail-open policy lives in the processor, not here.
pub struct HttpIncentiveClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIncentiveClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, IncentiveError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IncentiveError::Transport)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl IncentiveClient for HttpIncentiveClient {
    async fn quote(&self, event: &TransferEvent) -> Result<Incentive, IncentiveError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(event)
            .send()
            .await
            .map_err(IncentiveError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(IncentiveError::Status(status));
        }

        let payload: IncentivePayload = response
            .json()
            .await
            .map_err(|e| IncentiveError::Malformed(e.to_string()))?;

        Incentive::new(payload.amount).map_err(|_| {
            IncentiveError::Malformed(format!("negative incentive amount {}", payload.amount))
        })
    }
}
