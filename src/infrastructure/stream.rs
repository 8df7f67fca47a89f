use crate::domain::ports::EventStream;
use crate::domain::transfer::TransferEvent;
use crate::error::EngineError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Creates a producer/consumer pair over one in-process ordered log.
///
/// Stands in for a single partition of the message broker: events append in
/// order, the consumer tracks its own position, and the position advances
/// only on `commit`. An uncommitted event is delivered again on the next
/// poll, which gives at-least-once semantics, duplicates included.
pub fn channel() -> (EventProducer, InMemoryStream) {
    let shared = Arc::new(Shared::default());
    (
        EventProducer {
            shared: shared.clone(),
        },
        InMemoryStream {
            shared,
            position: 0,
        },
    )
}

#[derive(Default)]
struct Shared {
    log: Mutex<LogState>,
    notify: Notify,
}

#[derive(Default)]
struct LogState {
    events: Vec<TransferEvent>,
    closed: bool,
}

/// Publishing side of the log.
#[derive(Clone)]
pub struct EventProducer {
    shared: Arc<Shared>,
}

impl EventProducer {
    /// Appends an event to the log.
    pub async fn publish(&self, event: TransferEvent) {
        let mut log = self.shared.log.lock().await;
        log.events.push(event);
        self.shared.notify.notify_waiters();
    }

    /// Marks the log complete; consumers drain the remainder and stop.
    pub async fn close(&self) {
        let mut log = self.shared.log.lock().await;
        log.closed = true;
        self.shared.notify.notify_waiters();
    }
}

/// Consuming side of the log. Holds the committed position.
pub struct InMemoryStream {
    shared: Arc<Shared>,
    position: usize,
}

#[async_trait]
impl EventStream for InMemoryStream {
    async fn poll(&mut self) -> Result<Option<TransferEvent>, EngineError> {
        loop {
            // Register for wakeups before checking, so a publish between the
            // check and the await is not lost.
            let notified = self.shared.notify.notified();
            {
                let log = self.shared.log.lock().await;
                if self.position < log.events.len() {
                    return Ok(Some(log.events[self.position].clone()));
                }
                if log.closed {
                    return Ok(None);
                }
            }
            notified.await;
        }
    }

    async fn commit(&mut self) -> Result<(), EngineError> {
        self.position += 1;
        Ok(())
    }
}
