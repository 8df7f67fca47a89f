use super::processor::{Outcome, TransactionProcessor};
use crate::domain::ports::EventStream;
use crate::error::EngineError;
use std::time::Duration;
use tracing::{error, info};

/// Delay before re-polling after a store outage left an event uncommitted.
const REDELIVERY_BACKOFF: Duration = Duration::from_millis(100);

/// Counters reported once the stream is drained.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerReport {
    pub completed: u64,
    pub dropped: u64,
    pub redeliveries: u64,
}

/// Drives the event stream through the processor and owns commit timing.
///
/// An event's position is committed only after the processor finishes with a
/// completed transfer or a validation drop, never before. When the store is
/// unavailable the event stays uncommitted, so the stream delivers it
/// again; redelivery is the system's sole retry mechanism.
pub struct EventConsumer<S> {
    stream: S,
    processor: TransactionProcessor,
}

impl<S: EventStream> EventConsumer<S> {
    pub fn new(stream: S, processor: TransactionProcessor) -> Self {
        Self { stream, processor }
    }

    /// Consumes the stream to exhaustion, one event at a time in delivery
    /// order.
    pub async fn run(mut self) -> Result<ConsumerReport, EngineError> {
        let mut report = ConsumerReport::default();
        while let Some(event) = self.stream.poll().await? {
            match self.processor.process(&event).await {
                Ok(Outcome::Completed(_)) => {
                    report.completed += 1;
                    self.stream.commit().await?;
                }
                Ok(Outcome::Dropped(_)) => {
                    report.dropped += 1;
                    self.stream.commit().await?;
                }
                Err(fault) => {
                    report.redeliveries += 1;
                    error!(%fault, "processing aborted, leaving event for redelivery");
                    tokio::time::sleep(REDELIVERY_BACKOFF).await;
                }
            }
        }
        info!(
            completed = report.completed,
            dropped = report.dropped,
            redeliveries = report.redeliveries,
            "event stream drained"
        );
        Ok(report)
    }
}
