use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use vidgrid::app::{App, AppEvent};
use vidgrid::config::Config;
use vidgrid::feed::FeedClient;
use vidgrid::server;
use vidgrid::storage::{seed_demo_videos, Database, StoreError};
use vidgrid::ui;

/// Get the config directory path (~/.config/vidgrid/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("vidgrid"))
}

#[derive(Parser, Debug)]
#[command(name = "vidgrid", about = "Terminal video gallery with a built-in feed API")]
struct Args {
    /// Database file (defaults to ~/.config/vidgrid/videos.db)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Port for the feed API
    #[arg(long)]
    port: Option<u16>,

    /// Seed the store with N demo videos before starting
    #[arg(long, value_name = "N")]
    seed: Option<usize>,

    /// Reset database (delete and recreate)
    #[arg(long)]
    reset_db: bool,

    /// Run only the feed API server, without the gallery TUI
    #[arg(long)]
    serve_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    let config = Config::load(&config_dir.join("config.toml"))
        .context("Failed to load configuration")?;

    let port = args.port.unwrap_or(config.port);
    let db_path = args
        .db
        .clone()
        .or_else(|| config.db_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| config_dir.join("videos.db"));

    // Handle --reset-db flag
    if args.reset_db && db_path.exists() {
        std::fs::remove_file(&db_path).context("Failed to delete database")?;
        println!("Database reset.");
    }

    // Open database
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(StoreError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of vidgrid appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    // Handle --seed flag
    if let Some(n) = args.seed {
        let written = seed_demo_videos(&db, n)
            .await
            .context("Failed to seed demo videos")?;
        println!("Seeded {} demo videos.", written);
    }

    let total = db.count_videos().await.context("Failed to count videos")?;
    tracing::info!(db = %db_path.display(), videos = total, port, "Store ready");
    if total == 0 {
        eprintln!("Note: the store is empty. Run with --seed 120 for demo data.");
    }

    // The feed API serves the TUI (and anything else on localhost)
    if args.serve_only {
        return server::serve(db, port).await;
    }

    let server_db = db.clone();
    tokio::spawn(async move {
        if let Err(e) = server::serve(server_db, port).await {
            tracing::error!(error = %e, "Feed API server exited");
        }
    });

    // Wait for the listener to accept before the gallery's first fetch
    for _ in 0..20 {
        if tokio::net::TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Create app state and run the TUI
    let client = FeedClient::new(format!("http://127.0.0.1:{}", port));
    let mut app = App::new(client, config.topics.clone(), config.cell_width_px);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::run(&mut app, event_tx, event_rx).await?;

    println!("Goodbye!");
    Ok(())
}
