use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tempconv_gateway::GatewayServer;
use tempconv_grpc::{GrpcClient, GrpcConfig, GrpcServer, TempConvService};
use tokio::runtime::Runtime;

/// Default gateway listening port.
const DEFAULT_GATEWAY_PORT: u16 = 8080;

/// Default backend endpoint the gateway connects to.
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:50051";

#[derive(Debug, Parser)]
#[command(name = "tempconv", version, about = "Temperature conversion service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_logging();

        match self.commands {
            Commands::Server(args) => execute_async(args.execute())?,
            Commands::Gateway(args) => execute_async(args.execute())?,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the TempConv gRPC server")]
    Server(ServerArgs),

    #[command(about = "Run the HTTP/JSON gateway")]
    Gateway(GatewayArgs),
}

#[derive(Debug, Args)]
struct ServerArgs {
    /// Address to bind the gRPC server to.
    #[arg(long, default_value_t = tempconv_grpc::DEFAULT_GRPC_ADDR)]
    addr: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = tempconv_grpc::DEFAULT_GRPC_PORT)]
    port: u16,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = tempconv_grpc::DEFAULT_GRPC_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl ServerArgs {
    async fn execute(self) -> Result<()> {
        let config = GrpcConfig::new(self.addr, self.port)
            .with_timeout(Duration::from_secs(self.timeout_secs));

        let mut server = GrpcServer::new(TempConvService);
        if let Some(timeout) = config.timeout {
            server = server.timeout(timeout);
        }

        let handle = server
            .start(config.socket_addr())
            .await
            .context("Failed to start gRPC server")?;

        tokio::signal::ctrl_c().await.context("Failed to listen for shutdown signal")?;
        handle.stop()?;
        handle.stopped().await;

        Ok(())
    }
}

#[derive(Debug, Args)]
struct GatewayArgs {
    /// Address to bind the gateway to.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    addr: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = DEFAULT_GATEWAY_PORT)]
    port: u16,

    /// URL of the backend gRPC server.
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,

    /// Deadline for a single backend call, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    deadline_ms: u64,
}

impl GatewayArgs {
    async fn execute(self) -> Result<()> {
        let deadline = Duration::from_millis(self.deadline_ms);

        // Lazy connection: the gateway may come up before the backend, and a
        // down backend surfaces per call as an internal error.
        let client = GrpcClient::builder(self.backend_url)
            .timeout(deadline)
            .connect_lazy()
            .context("Failed to create backend client")?;

        let handle = GatewayServer::new(client)
            .deadline(deadline)
            .start(SocketAddr::new(self.addr, self.port))
            .await
            .context("Failed to start gateway server")?;

        tokio::signal::ctrl_c().await.context("Failed to listen for shutdown signal")?;
        handle.stop()?;
        handle.stopped().await;

        Ok(())
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn execute_async<F: Future>(future: F) -> Result<F::Output> {
    Ok(build_tokio_runtime().context("Failed to build tokio runtime")?.block_on(future))
}

fn build_tokio_runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread().enable_all().build()
}
