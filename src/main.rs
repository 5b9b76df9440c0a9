use anyhow::Result;
use clap::Parser;
use nhl_live_scores::scheduler::run_cycles;
use nhl_live_scores::store::firestore::{FirestoreClient, ServiceAccount};
use nhl_live_scores::updater::ScoreUpdater;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tracing::warn;

/// NHL live score updater. Fetches scores from the NHL API and writes
/// them to a local JSON file, optionally settling pending bets in
/// Firestore. Does not rescrape odds.
#[derive(Parser, Debug)]
#[command(name = "update-live-scores")]
struct Args {
    /// Fetch games for a specific date (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<String>,

    /// Run continuously at a fixed interval
    #[arg(long)]
    continuous: bool,

    /// Minutes between updates in continuous mode
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Also push scores and settlement results to Firestore
    #[arg(long)]
    firebase: bool,

    /// Output path for the live scores JSON document
    #[arg(long, default_value = "public/live_scores.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    println!("🏒 NHL Live Score Updater");
    println!("{}\n", "=".repeat(50));

    let store = if args.firebase {
        init_store(&args)
    } else {
        None
    };

    let updater = ScoreUpdater::new(args.output, store)?;

    if args.continuous {
        println!(
            "🔄 Running continuously (every {} minutes)",
            args.interval
        );
        println!("   Press Ctrl+C to stop\n");

        let shutdown = Arc::new(Notify::new());
        let notifier = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                notifier.notify_one();
            }
        });

        let interval = Duration::from_secs(args.interval * 60);
        let date = args.date;
        let updater = &updater;
        run_cycles(interval, &shutdown, || {
            let date = date.clone();
            async move { updater.update(date.as_deref()).await }
        })
        .await;
        Ok(())
    } else {
        let success = updater.update(args.date.as_deref()).await;
        if !success {
            std::process::exit(1);
        }
        Ok(())
    }
}

/// Build the Firestore capability from env credentials. Missing or bad
/// credentials degrade to local-only operation with a warning, never a
/// startup failure.
fn init_store(args: &Args) -> Option<FirestoreClient> {
    let Some(account) = ServiceAccount::from_env() else {
        warn!("Missing Firebase credentials in environment");
        warn!("Required: FIREBASE_PROJECT_ID, FIREBASE_CLIENT_EMAIL, FIREBASE_PRIVATE_KEY");
        warn!("Scores will only be saved to {}", args.output.display());
        return None;
    };
    match FirestoreClient::new(account) {
        Ok(client) => {
            println!("✅ Firestore client initialized");
            Some(client)
        }
        Err(e) => {
            warn!("Could not initialize Firestore: {e:#}");
            warn!("Scores will only be saved to {}", args.output.display());
            None
        }
    }
}
