use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use unimatch_api::{AppState, InMemoryFeedbackStore, RestApi};
use unimatch_core::Dataset;
use unimatch_similarity::{EngineConfig, Recommender};

/// Institution recommendation server
#[derive(Parser, Debug)]
#[command(name = "unimatch")]
#[command(about = "Ranks higher-education institutions against a student profile", long_about = None)]
struct Args {
    /// Path to the institution dataset (JSON array)
    #[arg(short, long, default_value = "./data/colleges.json")]
    dataset: PathBuf,

    /// Optional engine config (JSON); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind the HTTP API to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 5001)]
    http_port: u16,

    /// Log level or filter directive
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    info!("Starting unimatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Dataset: {:?}", args.dataset);

    let config = match &args.config {
        Some(path) => {
            info!("Engine config: {:?}", path);
            EngineConfig::load(path).with_context(|| format!("loading engine config {:?}", path))?
        }
        None => EngineConfig::default(),
    };

    // nothing is served until the dataset is loaded and embedded
    let dataset = Dataset::load(&args.dataset).with_context(|| format!("loading dataset {:?}", args.dataset))?;
    let recommender = Arc::new(Recommender::new(Arc::new(dataset), config)?);
    let state = AppState::new(recommender, Arc::new(InMemoryFeedbackStore::new()));

    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", host, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, &host, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/api/health", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
