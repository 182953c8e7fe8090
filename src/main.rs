#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! questream — exercises the subscription registry end to end: initializes
//! a couple of expression subscriptions, commits them against a historical
//! snapshot, then streams live values through while a concurrent publisher
//! runs on its own task.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use questream::config::Config;
use questream::{QueryResult, Range, SequencedValue, SubscriptionRegistry, UpdatePolicy};

/// Demonstrates the streaming expression-query subscription engine.
#[derive(Parser)]
#[command(name = "questream", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<String>,
    /// Number of live values to publish after commit.
    #[arg(long, default_value_t = 10)]
    events: u64,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    info!("questream demo starting");

    let registry: Arc<SubscriptionRegistry<i64, i64, &'static str>> =
        Arc::new(SubscriptionRegistry::new());
    let client = "demo-client";

    // An "even inputs, scaled by ten" subscription over the whole stream.
    registry
        .initialize(
            client,
            1,
            Range::new(0, u64::MAX),
            Box::new(|value: &i64| Ok(value % 2 == 0)),
            UpdatePolicy::All,
            Box::new(|value: &i64| Ok(value * 10)),
        )
        .expect("demo query id should not already be in use");

    // Historical values arrive out of band — typically loaded from storage
    // by the caller while this subscription was buffering the live stream.
    let historical: Vec<SequencedValue<i64>> =
        (0..5).map(|seq| SequencedValue::new(seq as i64, seq)).collect();

    registry.commit(
        &client,
        config.registry.default_snapshot_limit(),
        QueryResult::new(1),
        historical,
        |result| {
            info!(
                query_id = result.query_id,
                snapshot = ?result.snapshot,
                "commit delivered"
            );
        },
    );

    let publisher_registry = Arc::clone(&registry);
    let events = cli.events;
    let publisher = tokio::spawn(async move {
        for seq in 5..5 + events {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let value = SequencedValue::new(seq as i64, seq);
            publisher_registry.publish(&value, |client, query_id, output| {
                info!(
                    client = %client,
                    query_id,
                    sequence = output.sequence,
                    value = output.value,
                    "published"
                );
            });
        }
    });

    if publisher.await.is_err() {
        warn!("publisher task panicked");
    }

    registry.remove_all(&client);
    info!("questream demo finished");
}
