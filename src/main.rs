//! Event demand forecast CLI
//!
//! Two invocation shapes:
//! - `event-forecast history.csv future.csv` — file mode
//! - `event-forecast` — remote mode, event store configured via environment

use std::path::PathBuf;

use clap::Parser;
use event_forecast::{
    config::RemoteConfig,
    data::{csv_loader, remote::SupabaseClient, BehavioralAggregates, EventRecord},
    pipeline,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "event-forecast")]
#[command(about = "Forecast ticket sales and revenue for upcoming events")]
struct Cli {
    /// Historical events CSV; omit both paths to load from the remote store
    history: Option<PathBuf>,

    /// Future events CSV
    future: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (history, future, enrichment) = match (cli.history, cli.future) {
        (Some(history_path), Some(future_path)) => {
            let history = csv_loader::load_history(&history_path)?;
            let future = csv_loader::load_future(&future_path)?;
            (history, future, None)
        }
        (None, None) => load_remote().await?,
        _ => anyhow::bail!("expected two CSV paths (history, future) or none for remote mode"),
    };

    tracing::info!(
        history = history.len(),
        future = future.len(),
        "starting forecast run"
    );

    let output = pipeline::run(&history, &future, enrichment)?;
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn load_remote() -> anyhow::Result<(
    Vec<EventRecord>,
    Vec<EventRecord>,
    Option<BehavioralAggregates>,
)> {
    let config = RemoteConfig::from_env()?;
    let client = SupabaseClient::new(&config)?;
    let (history, future) = client.fetch_events().await?;
    let enrichment = client.fetch_enrichment().await?;
    Ok((history, future, Some(enrichment)))
}
