use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use coinboard_market_data::MarketDataError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    MarketData(#[from] MarketDataError),
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::MarketData(e) if e.is_validation() => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: e.to_string(),
                    details: None,
                },
            ),
            // The provider's status is reported in the message; the client
            // always sees a gateway failure.
            ApiError::MarketData(e @ MarketDataError::Upstream { .. }) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    error: e.to_string(),
                    details: e.details(),
                },
            ),
            ApiError::MarketData(e) => (
                StatusCode::BAD_GATEWAY,
                ErrorBody {
                    error: "Upstream fetch failed".to_string(),
                    details: e.details(),
                },
            ),
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody {
                    error: self.to_string(),
                    details: None,
                },
            ),
            ApiError::BadRequest(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: reason.clone(),
                    details: None,
                },
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!("API error: {}", body.details.as_deref().unwrap_or(&body.error));
        }

        match self {
            ApiError::MethodNotAllowed => {
                (status, [(header::ALLOW, "GET")], Json(body)).into_response()
            }
            _ => (status, Json(body)).into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
