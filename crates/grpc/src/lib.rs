//! gRPC server and client for the temperature conversion service.
//!
//! The [`GrpcServer`] exposes the two conversion operations from
//! [`tempconv_core`] over the wire, and [`GrpcClient`] is the long-lived
//! connection handle used by callers such as the HTTP gateway.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod client;
mod config;
mod protos;
mod server;
mod service;

pub use client::{GrpcClient, GrpcClientBuilder};
pub use config::{GrpcConfig, DEFAULT_GRPC_ADDR, DEFAULT_GRPC_PORT, DEFAULT_GRPC_TIMEOUT_SECS};
pub use protos::tempconv as proto;
pub use server::{GrpcServer, GrpcServerHandle};
pub use service::TempConvService;
