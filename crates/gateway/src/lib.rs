//! HTTP/JSON gateway for the TempConv gRPC service.
//!
//! Decodes JSON-over-HTTP conversion requests, invokes the backend over the
//! shared [`GrpcClient`] binding under a per-call deadline, and translates
//! backend failures into HTTP status codes.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tempconv_grpc::GrpcClient;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod handlers;

use handlers::AppState;

/// Default timeout for an HTTP request handled by the gateway.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(20);

/// Default deadline for a single backend call made on behalf of a request.
pub const DEFAULT_CALL_DEADLINE: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("gateway server has already been stopped")]
    AlreadyStopped,
}

/// The gateway server handle.
#[derive(Debug, Clone)]
pub struct GatewayServerHandle {
    /// The actual address that the server is bound to.
    addr: SocketAddr,
    /// Handle to stop the server.
    handle: ServerHandle,
}

impl GatewayServerHandle {
    /// Tell the server to stop without waiting for the server to stop.
    pub fn stop(&self) -> Result<(), Error> {
        self.handle.stop()
    }

    /// Wait until the server has stopped.
    pub async fn stopped(self) {
        self.handle.stopped().await
    }

    /// Returns true if the server has stopped.
    pub fn is_stopped(&self) -> bool {
        self.handle.is_stopped()
    }

    /// Returns the socket address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// The gateway server.
///
/// The backend connection handle is injected at construction and shared by
/// every request handler; the underlying channel multiplexes concurrent
/// calls so no additional locking is layered on top.
#[derive(Debug)]
pub struct GatewayServer {
    timeout: Duration,
    deadline: Duration,
    client: GrpcClient,
}

impl GatewayServer {
    /// Create a new gateway server over the given backend client binding.
    pub fn new(client: GrpcClient) -> Self {
        Self { timeout: DEFAULT_GATEWAY_TIMEOUT, deadline: DEFAULT_CALL_DEADLINE, client }
    }

    /// Set the HTTP request timeout. Default is 20 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-request backend call deadline. Default is 1 second.
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Start the gateway server.
    pub async fn start(&self, addr: SocketAddr) -> Result<GatewayServerHandle, Error> {
        let listener = TcpListener::bind(addr).await?;

        let app = self.create_app();
        let actual_addr = listener.local_addr()?;
        let (server_handle, stop_handle) = stop_channel();

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                stop_handle.shutdown().await;
            });

            if let Err(err) = server.await {
                error!(target: "gateway", error = ?err, "Gateway server error.");
            }
        });

        info!(target: "gateway", addr = %actual_addr, "Gateway server started.");

        Ok(GatewayServerHandle { addr: actual_addr, handle: server_handle })
    }

    /// Create the Axum application with all routes configured.
    fn create_app(&self) -> Router {
        // Create shared application state
        let state = AppState { client: self.client.clone(), deadline: self.deadline };

        // Preflight OPTIONS requests are answered by the CORS layer itself,
        // before any handler runs.
        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE]),
            )
            .layer(TimeoutLayer::new(self.timeout));

        Router::new()
            .route("/api/c2f", post(handlers::celsius_to_fahrenheit))
            .route("/api/f2c", post(handlers::fahrenheit_to_celsius))
            .route(
                "/celsius-to-fahrenheit",
                get(handlers::celsius_to_fahrenheit_query)
                    .post(handlers::celsius_to_fahrenheit_body),
            )
            .route(
                "/fahrenheit-to-celsius",
                get(handlers::fahrenheit_to_celsius_query)
                    .post(handlers::fahrenheit_to_celsius_body),
            )
            .route("/api/health", get(handlers::health))
            .layer(middleware)
            .with_state(state)
    }
}

/// Server handle.
///
/// When all [`StopHandle`]'s have been `dropped` or `stop` has been called
/// the server will be stopped.
#[derive(Debug, Clone)]
struct ServerHandle(Arc<watch::Sender<()>>);

impl ServerHandle {
    /// Create a new server handle.
    pub(crate) fn new(tx: watch::Sender<()>) -> Self {
        Self(Arc::new(tx))
    }

    /// Tell the server to stop without waiting for the server to stop.
    fn stop(&self) -> Result<(), Error> {
        self.0.send(()).map_err(|_| Error::AlreadyStopped)
    }

    /// Wait for the server to stop.
    async fn stopped(self) {
        self.0.closed().await
    }

    /// Check if the server has been stopped.
    fn is_stopped(&self) -> bool {
        self.0.is_closed()
    }
}

/// Represent a stop handle which is a wrapper over a `multi-consumer receiver`
/// and cloning [`StopHandle`] will get a separate instance of the underlying receiver.
#[derive(Debug, Clone)]
struct StopHandle(watch::Receiver<()>);

impl StopHandle {
    /// Create a new stop handle.
    fn new(rx: watch::Receiver<()>) -> Self {
        Self(rx)
    }

    /// A future that resolves when server has been stopped
    /// it consumes the stop handle.
    async fn shutdown(mut self) {
        let _ = self.0.changed().await;
    }
}

/// Create channel to determine whether
/// the server shall continue to run or not.
fn stop_channel() -> (ServerHandle, StopHandle) {
    let (tx, rx) = tokio::sync::watch::channel(());
    (ServerHandle::new(tx), StopHandle::new(rx))
}
