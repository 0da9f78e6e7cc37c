//! Test server harness.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use admatch::embedding::{Embedder, HttpEmbedder, StubEmbedder};
use admatch::indexing::Indexer;
use admatch::matching::MatchPipeline;
use admatch::vectordb::{MockVectorStore, QdrantStore, VectorStore};
use admatch::{Config, DEFAULT_AD_ID_NAMESPACE};
use admatch_server::gateway::{HandlerState, create_router_with_state};

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
const TEST_COLLECTION_NAME: &str = "admatch_test_ads";
const TEST_BATCH_SIZE: usize = 100;

/// Embedding width used by the stub embedder in spawned test servers.
pub const TEST_DIMENSION: u64 = 64;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub collection_name: Option<String>,
    pub dimension: u64,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            collection_name: None,
            dimension: TEST_DIMENSION,
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn find_available_port() -> std::io::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    Ok(addr.port())
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Builds a router with the collection already ensured.
async fn build_app<E, V>(embedder: E, store: V, dimension: u64) -> Result<Router, ServerStartupError>
where
    E: Embedder + Clone + Send + Sync + 'static,
    V: VectorStore + Clone + Send + Sync + 'static,
{
    let pipeline = MatchPipeline::new(embedder.clone(), store.clone());
    let indexer = Indexer::new(embedder, store, TEST_BATCH_SIZE, dimension);

    indexer
        .ensure_collection(None)
        .await
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    Ok(create_router_with_state(HandlerState::new(
        pipeline, indexer,
    )))
}

async fn serve_app(
    listener: TcpListener,
    local_addr: SocketAddr,
    app: Router,
) -> Result<TestServer, ServerStartupError> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Spawns a fully-mocked test server for integration tests.
///
/// All external dependencies are in-process:
/// - **Vector store**: `MockVectorStore` (in-memory, no Qdrant required)
/// - **Embedder**: `StubEmbedder` (deterministic, fast)
///
/// The ad collection is created before the server accepts traffic, so
/// tests can ingest and match immediately.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let collection_name = config
        .collection_name
        .unwrap_or_else(|| TEST_COLLECTION_NAME.to_string());

    let store = MockVectorStore::with_collection(&collection_name);
    let embedder = StubEmbedder::new(config.dimension as usize);

    let app = build_app(embedder, store, config.dimension).await?;

    serve_app(listener, local_addr, app).await
}

/// Spawns a test server backed by a **real Qdrant** instance.
///
/// The embedder is still the stub unless `ADMATCH_EMBEDDER_URL` points at
/// a live embedding service. Each spawn gets a uniquely-named collection
/// so parallel runs do not interfere.
///
/// Requires a running Qdrant instance, e.g.:
/// ```bash
/// docker run -p 6333:6333 -p 6334:6334 qdrant/qdrant
/// ```
pub async fn spawn_real_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let port = if config.port == 0 {
        find_available_port().await?
    } else {
        config.port
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let collection_name = config
        .collection_name
        .unwrap_or_else(|| format!("{}_{}", TEST_COLLECTION_NAME, uuid::Uuid::new_v4().simple()));

    let qdrant_url =
        std::env::var("ADMATCH_QDRANT_URL").unwrap_or_else(|_| Config::default().qdrant_url);

    let store = QdrantStore::new(&qdrant_url, &collection_name, DEFAULT_AD_ID_NAMESPACE)
        .await
        .map_err(|e| {
            ServerStartupError::StartupFailed(format!("Failed to connect to Qdrant: {}", e))
        })?;

    let app = if let Ok(url) = std::env::var("ADMATCH_EMBEDDER_URL") {
        println!("Using HTTP embedder: {}", url);
        let embedder = HttpEmbedder::new(&url, config.dimension as usize);
        build_app(embedder, store, config.dimension).await?
    } else {
        println!("Using stub embedder");
        let embedder = StubEmbedder::new(config.dimension as usize);
        build_app(embedder, store, config.dimension).await?
    };

    serve_app(listener, local_addr, app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_available_port() {
        let port = find_available_port()
            .await
            .expect("Should find available port");
        assert!(port > 0);
    }

    #[tokio::test]
    async fn test_server_config_defaults() {
        let config = TestServerConfig::default();
        assert_eq!(config.port, 0);
        assert_eq!(config.dimension, TEST_DIMENSION);
    }

    #[tokio::test]
    async fn test_server_helpers_are_callable() {
        let (shutdown_tx, _shutdown_rx) = oneshot::channel();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let server = TestServer {
            addr,
            _server_handle: tokio::spawn(async {}),
            shutdown_tx: Some(shutdown_tx),
        };

        let _ = server.url();
        server.shutdown().await;
    }

    #[test]
    fn test_spawners_are_referenced() {
        std::mem::drop(spawn_test_server(TestServerConfig::default()));
        std::mem::drop(spawn_real_server(TestServerConfig::default()));
    }

    #[test]
    fn test_server_url_formatting() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let url = format!("http://{}", addr);
        assert_eq!(url, "http://127.0.0.1:8080");
    }
}
