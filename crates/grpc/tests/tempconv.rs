//! Integration tests for the TempConv gRPC server.

use tempconv_grpc::proto::{CelsiusRequest, FahrenheitRequest};
use tempconv_grpc::{GrpcClient, GrpcServer, GrpcServerHandle, TempConvService};
use tonic::Request;

async fn setup() -> (GrpcServerHandle, GrpcClient) {
    let addr = "127.0.0.1:0".parse().unwrap();
    let handle = GrpcServer::new(TempConvService)
        .start(addr)
        .await
        .expect("failed to start gRPC server");

    let client = GrpcClient::connect(format!("http://{}", handle.addr()))
        .await
        .expect("failed to connect to gRPC server");

    (handle, client)
}

#[tokio::test]
async fn celsius_to_fahrenheit() {
    let (_handle, mut client) = setup().await;

    let response = client
        .celsius_to_fahrenheit(Request::new(CelsiusRequest { celsius: 100.0 }))
        .await
        .expect("celsius_to_fahrenheit call failed");

    assert_eq!(response.into_inner().fahrenheit, 212.0);
}

#[tokio::test]
async fn fahrenheit_to_celsius() {
    let (_handle, mut client) = setup().await;

    let response = client
        .fahrenheit_to_celsius(Request::new(FahrenheitRequest { fahrenheit: 32.0 }))
        .await
        .expect("fahrenheit_to_celsius call failed");

    assert_eq!(response.into_inner().celsius, 0.0);
}

#[tokio::test]
async fn values_below_absolute_zero_are_accepted() {
    let (_handle, mut client) = setup().await;

    let response = client
        .celsius_to_fahrenheit(Request::new(CelsiusRequest { celsius: -300.0 }))
        .await
        .expect("celsius_to_fahrenheit call failed");

    assert_eq!(response.into_inner().fahrenheit, -508.0);
}

#[tokio::test]
async fn calls_fail_after_stop() {
    let (handle, mut client) = setup().await;

    handle.stop().expect("failed to stop server");
    handle.stopped().await;
    assert!(handle.is_stopped());

    let result =
        client.celsius_to_fahrenheit(Request::new(CelsiusRequest { celsius: 0.0 })).await;
    assert!(result.is_err(), "expected a transport failure after server shutdown");
}

#[tokio::test]
async fn stopping_twice_fails() {
    let (handle, _client) = setup().await;

    handle.stop().expect("first stop should succeed");
    handle.stopped().await;
    assert!(handle.stop().is_err(), "second stop should report an already-stopped server");
}

#[tokio::test]
async fn connect_to_dead_endpoint_fails() {
    // Port 1 is practically never bound; the connection is refused outright.
    let result = GrpcClient::connect("http://127.0.0.1:1").await;
    assert!(result.is_err(), "expected connection to a dead endpoint to fail");
}

#[tokio::test]
async fn invalid_endpoint_uri_is_rejected() {
    let result = GrpcClient::connect("not a valid uri").await;
    assert!(result.is_err(), "expected an invalid URI to be rejected");
}
