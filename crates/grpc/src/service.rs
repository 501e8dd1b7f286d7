//! TempConv service handler implementation.

use tonic::{Request, Response, Status};

use crate::proto::temp_conv_server::TempConv;
use crate::proto::{CelsiusReply, CelsiusRequest, FahrenheitReply, FahrenheitRequest};

/// The handler for the TempConv gRPC service.
///
/// Delegates to the conversion functions in [`tempconv_core`]. Both
/// operations are total, so the handler never produces a business-level
/// [`Status`]; any failure a caller observes originates in the transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TempConvService;

#[tonic::async_trait]
impl TempConv for TempConvService {
    async fn celsius_to_fahrenheit(
        &self,
        request: Request<CelsiusRequest>,
    ) -> Result<Response<FahrenheitReply>, Status> {
        let fahrenheit = tempconv_core::celsius_to_fahrenheit(request.into_inner().celsius);
        Ok(Response::new(FahrenheitReply { fahrenheit }))
    }

    async fn fahrenheit_to_celsius(
        &self,
        request: Request<FahrenheitRequest>,
    ) -> Result<Response<CelsiusReply>, Status> {
        let celsius = tempconv_core::fahrenheit_to_celsius(request.into_inner().fahrenheit);
        Ok(Response::new(CelsiusReply { celsius }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forward_conversion() {
        let response = TempConvService
            .celsius_to_fahrenheit(Request::new(CelsiusRequest { celsius: 25.0 }))
            .await
            .unwrap();
        assert_eq!(response.into_inner().fahrenheit, 77.0);
    }

    #[tokio::test]
    async fn inverse_conversion() {
        let response = TempConvService
            .fahrenheit_to_celsius(Request::new(FahrenheitRequest { fahrenheit: 212.0 }))
            .await
            .unwrap();
        assert_eq!(response.into_inner().celsius, 100.0);
    }
}
