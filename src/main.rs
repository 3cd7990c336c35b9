use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gamedex::config::{DEFAULT_ANDROID_URL, DEFAULT_IOS_URL, ServerConfig};
use gamedex::ingest::SourceClient;
use gamedex::server::{AppState, create_router};
use gamedex::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "gamedex")]
#[command(about = "A game catalog server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "3000")]
        port: u16,

        /// Path to the SQLite database file
        #[arg(long, default_value = "./data/gamedex.db")]
        db: String,

        /// Source URL for the android top-chart document
        #[arg(long, default_value = DEFAULT_ANDROID_URL)]
        android_url: String,

        /// Source URL for the ios top-chart document
        #[arg(long, default_value = DEFAULT_IOS_URL)]
        ios_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("gamedex=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            db,
            android_url,
            ios_url,
        } => {
            let config = ServerConfig {
                host,
                port,
                db_path: db.into(),
                android_url,
                ios_url,
            };

            if let Some(parent) = config.db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }

            let store = SqliteStore::new(&config.db_path)?;
            store.initialize()?;

            let state = Arc::new(AppState {
                store: Arc::new(store),
                sources: SourceClient::new(
                    config.android_url.clone(),
                    config.ios_url.clone(),
                )?,
            });

            let app = create_router(state);
            let addr = config.socket_addr()?;

            info!("Starting server on {}", addr);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
