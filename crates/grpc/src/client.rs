//! gRPC client implementation.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint, Uri};
use tonic::{Request, Response, Status};

use crate::proto::temp_conv_client::TempConvClient;
use crate::proto::{CelsiusReply, CelsiusRequest, FahrenheitReply, FahrenheitRequest};

/// The default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// The default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Error type for gRPC client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport error from tonic.
    #[error(transparent)]
    Transport(#[from] tonic::transport::Error),

    /// Invalid URI.
    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),
}

/// Builder for creating a gRPC client.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use tempconv_grpc::GrpcClient;
///
/// let client = GrpcClient::builder("http://localhost:50051")
///     .timeout(Duration::from_secs(2))
///     .connect_timeout(Duration::from_secs(10))
///     .connect()
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct GrpcClientBuilder {
    endpoint: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl GrpcClientBuilder {
    /// Creates a new client builder for the specified endpoint.
    fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Sets the request timeout. Default is 1 second.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout. Default is 5 seconds.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Connects to the gRPC server and returns a client.
    pub async fn connect(self) -> Result<GrpcClient, Error> {
        let channel = self.endpoint()?.connect().await?;
        Ok(GrpcClient::from_channel(channel))
    }

    /// Returns a client whose connection is established on first use.
    ///
    /// Useful when the server may not be up yet; a call made while the
    /// backend is down fails with an `Unavailable` status instead of an
    /// error at construction time.
    pub fn connect_lazy(self) -> Result<GrpcClient, Error> {
        let channel = self.endpoint()?.connect_lazy();
        Ok(GrpcClient::from_channel(channel))
    }

    fn endpoint(&self) -> Result<Endpoint, Error> {
        let uri: Uri = self.endpoint.parse()?;
        Ok(Endpoint::from(uri).timeout(self.timeout).connect_timeout(self.connect_timeout))
    }
}

/// A client for interacting with the TempConv gRPC service.
///
/// Holds a single multiplexed [`Channel`]; cloning the client shares the
/// underlying connection, so concurrent callers need no external locking.
#[derive(Debug, Clone)]
pub struct GrpcClient {
    tempconv: TempConvClient<Channel>,
}

impl GrpcClient {
    /// Creates a new client builder for the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The URI of the gRPC server (e.g., "http://localhost:50051")
    pub fn builder(endpoint: impl Into<String>) -> GrpcClientBuilder {
        GrpcClientBuilder::new(endpoint)
    }

    /// Connects to the gRPC server with default configuration.
    ///
    /// This is a convenience method equivalent to `GrpcClient::builder(endpoint).connect()`.
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self, Error> {
        Self::builder(endpoint).connect().await
    }

    /// Creates a new gRPC client from an existing channel.
    pub fn from_channel(channel: Channel) -> Self {
        Self { tempconv: TempConvClient::new(channel) }
    }

    /// Converts a temperature in degrees Celsius to degrees Fahrenheit.
    pub async fn celsius_to_fahrenheit(
        &mut self,
        request: impl Into<Request<CelsiusRequest>>,
    ) -> Result<Response<FahrenheitReply>, Status> {
        self.tempconv.celsius_to_fahrenheit(request.into()).await
    }

    /// Converts a temperature in degrees Fahrenheit to degrees Celsius.
    pub async fn fahrenheit_to_celsius(
        &mut self,
        request: impl Into<Request<FahrenheitRequest>>,
    ) -> Result<Response<CelsiusReply>, Status> {
        self.tempconv.fahrenheit_to_celsius(request.into()).await
    }
}
