//! Admatch HTTP server entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use admatch::config::Config;
use admatch::embedding::{Embedder, HttpEmbedder, StubEmbedder};
use admatch::indexing::Indexer;
use admatch::matching::MatchPipeline;
use admatch::vectordb::QdrantStore;
use admatch_server::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
 █████╗ ██████╗ ███╗   ███╗ █████╗ ████████╗ ██████╗██╗  ██╗
██╔══██╗██╔══██╗████╗ ████║██╔══██╗╚══██╔══╝██╔════╝██║  ██║
███████║██║  ██║██╔████╔██║███████║   ██║   ██║     ███████║
██╔══██║██║  ██║██║╚██╔╝██║██╔══██║   ██║   ██║     ██╔══██║
██║  ██║██████╔╝██║ ╚═╝ ██║██║  ██║   ██║   ╚██████╗██║  ██║
╚═╝  ╚═╝╚═════╝ ╚═╝     ╚═╝╚═╝  ╚═╝   ╚═╝    ╚═════╝╚═╝  ╚═╝

        EMBED. MATCH. ENFORCE.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        qdrant_url = %config.qdrant_url,
        collection = %config.collection_name,
        "Admatch starting"
    );

    let store = QdrantStore::new(
        &config.qdrant_url,
        &config.collection_name,
        config.ad_id_namespace,
    )
    .await?;

    match config.embedder_url.clone() {
        Some(url) => {
            let embedder = HttpEmbedder::new(&url, config.embedding_dimension as usize);
            serve(config, addr, store, embedder).await
        }
        None => {
            tracing::warn!("No ADMATCH_EMBEDDER_URL configured, running embedder in stub mode");
            let embedder = StubEmbedder::new(config.embedding_dimension as usize);
            serve(config, addr, store, embedder).await
        }
    }
}

async fn serve<E>(
    config: Config,
    addr: SocketAddr,
    store: QdrantStore,
    embedder: E,
) -> anyhow::Result<()>
where
    E: Embedder + Clone + Send + Sync + 'static,
{
    let pipeline = MatchPipeline::new(embedder.clone(), store.clone());
    let indexer = Indexer::new(
        embedder,
        store,
        config.max_batch_size,
        config.embedding_dimension,
    );

    let status = indexer.ensure_collection(None).await?;
    tracing::info!(
        collection = %status.name,
        created = status.created,
        "Collection ready"
    );

    let state = HandlerState::new(pipeline, indexer);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Admatch shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("ADMATCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
