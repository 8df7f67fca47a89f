mod common;

use common::{DeadIncentive, FixedIncentive, event, seeded_ledger};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;
use transfer_engine::application::consumer::EventConsumer;
use transfer_engine::application::processor::TransactionProcessor;
use transfer_engine::domain::ports::{AccountStore, RecordStore};
use transfer_engine::infrastructure::in_memory::InMemoryLedger;
use transfer_engine::infrastructure::incentive::HttpIncentiveClient;
use transfer_engine::infrastructure::stream;

async fn balance_of(ledger: &InMemoryLedger, id: u64) -> Decimal {
    AccountStore::get(ledger, id)
        .await
        .unwrap()
        .unwrap()
        .balance
        .value()
}

#[tokio::test]
async fn test_worked_example_end_to_end() {
    let ledger = seeded_ledger(&[(1, dec!(100)), (2, dec!(50))]).await;
    let processor = TransactionProcessor::new(
        Box::new(ledger.clone()),
        Box::new(FixedIncentive(dec!(5))),
    );
    let (producer, consumer_stream) = stream::channel();

    producer.publish(event(1, 2, dec!(40))).await;
    producer.close().await;

    let report = EventConsumer::new(consumer_stream, processor)
        .run()
        .await
        .unwrap();

    assert_eq!(report.completed, 1);
    assert_eq!(balance_of(&ledger, 1).await, dec!(60));
    assert_eq!(balance_of(&ledger, 2).await, dec!(95));

    let records = RecordStore::all(&ledger).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount, dec!(40));
    assert_eq!(records[0].incentive, dec!(5));
}

#[tokio::test]
async fn test_mixed_batch_total_grows_only_by_incentives() {
    let ledger = seeded_ledger(&[(1, dec!(100)), (2, dec!(50)), (3, dec!(30))]).await;
    let processor = TransactionProcessor::new(
        Box::new(ledger.clone()),
        Box::new(FixedIncentive(dec!(5))),
    );
    let (producer, consumer_stream) = stream::channel();

    producer.publish(event(1, 2, dec!(40))).await; // completes
    producer.publish(event(3, 2, dec!(100))).await; // insufficient funds
    producer.publish(event(9, 1, dec!(10))).await; // unknown sender
    producer.publish(event(2, 3, dec!(20))).await; // completes
    producer.close().await;

    let report = EventConsumer::new(consumer_stream, processor)
        .run()
        .await
        .unwrap();

    assert_eq!(report.completed, 2);
    assert_eq!(report.dropped, 2);

    assert_eq!(balance_of(&ledger, 1).await, dec!(60));
    assert_eq!(balance_of(&ledger, 2).await, dec!(75));
    assert_eq!(balance_of(&ledger, 3).await, dec!(55));

    // 180 seeded, two completed transfers injected 5 each.
    let total: Decimal = AccountStore::all(&ledger)
        .await
        .unwrap()
        .iter()
        .map(|account| account.balance.value())
        .sum();
    assert_eq!(total, dec!(190));

    assert_eq!(RecordStore::all(&ledger).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_dead_collaborator_still_moves_the_amount() {
    let ledger = seeded_ledger(&[(1, dec!(100)), (2, dec!(50))]).await;
    let processor =
        TransactionProcessor::new(Box::new(ledger.clone()), Box::new(DeadIncentive));
    let (producer, consumer_stream) = stream::channel();

    producer.publish(event(1, 2, dec!(40))).await;
    producer.close().await;

    let report = EventConsumer::new(consumer_stream, processor)
        .run()
        .await
        .unwrap();

    assert_eq!(report.completed, 1);
    assert_eq!(balance_of(&ledger, 1).await, dec!(60));
    // Recipient gains exactly the amount; the incentive failed open to zero.
    assert_eq!(balance_of(&ledger, 2).await, dec!(90));
    assert_eq!(RecordStore::all(&ledger).await.unwrap()[0].incentive, dec!(0));
}

// The same pipeline against a live HTTP collaborator instead of a stub.
#[tokio::test]
async fn test_pipeline_with_http_collaborator() {
    use axum::routing::post;
    use axum::{Json, Router};

    let router = Router::new().route(
        "/incentive",
        post(|| async { Json(serde_json::json!({"amount": 2.5})) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let ledger = seeded_ledger(&[(1, dec!(100)), (2, dec!(50))]).await;
    let incentives = HttpIncentiveClient::new(
        format!("http://{addr}/incentive"),
        Duration::from_millis(500),
    )
    .unwrap();
    let processor =
        TransactionProcessor::new(Box::new(ledger.clone()), Box::new(incentives));
    let (producer, consumer_stream) = stream::channel();

    producer.publish(event(1, 2, dec!(40))).await;
    producer.close().await;

    let report = EventConsumer::new(consumer_stream, processor)
        .run()
        .await
        .unwrap();

    assert_eq!(report.completed, 1);
    assert_eq!(balance_of(&ledger, 1).await, dec!(60));
    assert_eq!(balance_of(&ledger, 2).await, dec!(92.5));
}
