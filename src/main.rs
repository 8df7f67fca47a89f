use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use transfer_engine::application::consumer::EventConsumer;
use transfer_engine::application::processor::TransactionProcessor;
use transfer_engine::domain::account::Account;
use transfer_engine::domain::ports::{AccountStore, AccountStoreBox, IncentiveClientBox};
use transfer_engine::infrastructure::in_memory::InMemoryLedger;
use transfer_engine::infrastructure::incentive::HttpIncentiveClient;
use transfer_engine::infrastructure::stream;
use transfer_engine::interfaces::http::balance::{ApiState, router};
use transfer_engine::interfaces::jsonl::event_reader::EventReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Opening account balances, a JSON array of {"id", "balance"} objects
    accounts: PathBuf,

    /// Transfer events, one JSON object per line
    events: PathBuf,

    /// Incentive collaborator endpoint
    #[arg(long, default_value = "http://127.0.0.1:8080/incentive")]
    incentive_url: String,

    /// Incentive call timeout in milliseconds
    #[arg(long, default_value_t = 2000)]
    incentive_timeout_ms: u64,

    /// Serve the balance query API on this address once the stream drains.
    /// Without it, final balances are written to stdout instead.
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Explicit wiring: one ledger engine, boxed per port.
    let ledger = InMemoryLedger::new();
    let accounts_file = File::open(&cli.accounts).into_diagnostic()?;
    let seeds: Vec<Account> = serde_json::from_reader(accounts_file).into_diagnostic()?;
    let seeded = seeds.len();
    for account in seeds {
        ledger.insert_account(account).await;
    }
    info!(accounts = seeded, "ledger seeded");

    let incentives: IncentiveClientBox = Box::new(
        HttpIncentiveClient::new(
            &cli.incentive_url,
            Duration::from_millis(cli.incentive_timeout_ms),
        )
        .into_diagnostic()?,
    );
    let accounts: AccountStoreBox = Box::new(ledger.clone());
    let processor = TransactionProcessor::new(accounts, incentives);

    let (producer, events_stream) = stream::channel();
    let consumer = tokio::spawn(EventConsumer::new(events_stream, processor).run());

    let events_file = File::open(&cli.events).into_diagnostic()?;
    for event in EventReader::new(events_file).events() {
        match event {
            Ok(event) => producer.publish(event).await,
            Err(e) => warn!(error = %e, "skipping unreadable event"),
        }
    }
    producer.close().await;

    let report = consumer.await.into_diagnostic()?.into_diagnostic()?;
    info!(
        completed = report.completed,
        dropped = report.dropped,
        "stream drained"
    );

    if let Some(addr) = cli.listen {
        let state = ApiState {
            accounts: Arc::new(ledger),
        };
        let listener = tokio::net::TcpListener::bind(addr).await.into_diagnostic()?;
        info!(%addr, "balance query surface listening");
        axum::serve(listener, router(state)).await.into_diagnostic()?;
    } else {
        let snapshot = ledger.all().await.into_diagnostic()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).into_diagnostic()?
        );
    }

    Ok(())
}
