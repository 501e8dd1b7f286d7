use std::time::Duration;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tempconv_grpc::proto::{CelsiusRequest, FahrenheitRequest};
use tempconv_grpc::GrpcClient;
use tonic::{Request, Status};

/// Shared application state containing the backend client binding.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: GrpcClient,
    /// Deadline applied to each backend call.
    pub deadline: Duration,
}

impl AppState {
    /// Invoke the forward conversion on the backend under the call deadline.
    ///
    /// On expiry the call future is dropped, abandoning the in-flight call;
    /// concurrent requests each carry their own deadline.
    async fn celsius_to_fahrenheit(&self, celsius: f64) -> Result<f64, ApiError> {
        let mut client = self.client.clone();
        let mut request = Request::new(CelsiusRequest { celsius });
        request.set_timeout(self.deadline);

        let response = tokio::time::timeout(self.deadline, client.celsius_to_fahrenheit(request))
            .await
            .map_err(|_| ApiError::DeadlineExceeded(self.deadline))??;

        Ok(response.into_inner().fahrenheit)
    }

    /// Invoke the inverse conversion on the backend under the call deadline.
    async fn fahrenheit_to_celsius(&self, fahrenheit: f64) -> Result<f64, ApiError> {
        let mut client = self.client.clone();
        let mut request = Request::new(FahrenheitRequest { fahrenheit });
        request.set_timeout(self.deadline);

        let response = tokio::time::timeout(self.deadline, client.fahrenheit_to_celsius(request))
            .await
            .map_err(|_| ApiError::DeadlineExceeded(self.deadline))??;

        Ok(response.into_inner().celsius)
    }
}

/// Request body for the forward conversion routes.
#[derive(Debug, Deserialize)]
pub struct C2fRequest {
    pub celsius: f64,
}

/// Request body for the inverse conversion routes.
#[derive(Debug, Deserialize)]
pub struct F2cRequest {
    pub fahrenheit: f64,
}

/// Query parameters for `GET /celsius-to-fahrenheit`.
#[derive(Debug, Deserialize)]
pub struct CelsiusQuery {
    pub c: f64,
}

/// Query parameters for `GET /fahrenheit-to-celsius`.
#[derive(Debug, Deserialize)]
pub struct FahrenheitQuery {
    pub f: f64,
}

/// Handler for `GET /api/health`.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for `POST /api/c2f`.
pub async fn celsius_to_fahrenheit(
    State(state): State<AppState>,
    body: Result<Json<C2fRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body?;
    let fahrenheit = state.celsius_to_fahrenheit(req.celsius).await?;
    Ok(Json(json!({ "fahrenheit": fahrenheit })))
}

/// Handler for `POST /api/f2c`.
pub async fn fahrenheit_to_celsius(
    State(state): State<AppState>,
    body: Result<Json<F2cRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body?;
    let celsius = state.fahrenheit_to_celsius(req.fahrenheit).await?;
    Ok(Json(json!({ "celsius": celsius })))
}

/// Handler for `GET /celsius-to-fahrenheit?c=<number>`.
pub async fn celsius_to_fahrenheit_query(
    State(state): State<AppState>,
    query: Result<Query<CelsiusQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    convert_celsius(state, params.c).await
}

/// Handler for `POST /celsius-to-fahrenheit` with a JSON body.
pub async fn celsius_to_fahrenheit_body(
    State(state): State<AppState>,
    body: Result<Json<C2fRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body?;
    convert_celsius(state, req.celsius).await
}

/// Handler for `GET /fahrenheit-to-celsius?f=<number>`.
pub async fn fahrenheit_to_celsius_query(
    State(state): State<AppState>,
    query: Result<Query<FahrenheitQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = query?;
    convert_fahrenheit(state, params.f).await
}

/// Handler for `POST /fahrenheit-to-celsius` with a JSON body.
pub async fn fahrenheit_to_celsius_body(
    State(state): State<AppState>,
    body: Result<Json<F2cRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body?;
    convert_fahrenheit(state, req.fahrenheit).await
}

/// Shared dispatch for the direct forward-conversion route.
///
/// The query and JSON entry points both land here so they cannot diverge in
/// backend semantics or error handling.
async fn convert_celsius(state: AppState, celsius: f64) -> Result<Json<Value>, ApiError> {
    let fahrenheit = state.celsius_to_fahrenheit(celsius).await?;
    Ok(Json(json!({ "celsius": celsius, "fahrenheit": fahrenheit })))
}

/// Shared dispatch for the direct inverse-conversion route.
async fn convert_fahrenheit(state: AppState, fahrenheit: f64) -> Result<Json<Value>, ApiError> {
    let celsius = state.fahrenheit_to_celsius(fahrenheit).await?;
    Ok(Json(json!({ "celsius": celsius, "fahrenheit": fahrenheit })))
}

/// API error types with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body or query string could not be decoded.
    #[error("{0}")]
    MalformedRequest(String),

    /// The backend did not respond within the call deadline.
    #[error("backend request timed out after {0:?}")]
    DeadlineExceeded(Duration),

    /// The backend call failed at the transport level.
    #[error("backend error: {0}")]
    Backend(#[from] Status),
}

impl ApiError {
    /// Convert to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DeadlineExceeded(_) | ApiError::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> Json<Value> {
        Json(json!({ "error": self.to_string() }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.body();
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::MalformedRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::MalformedRequest(value.body_text())
    }
}
