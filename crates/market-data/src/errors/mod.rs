//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers both request validation (an unsupported display
//! currency) and every way an upstream fetch can fail. The server maps each
//! variant to an HTTP status; the classification helpers here keep that
//! mapping out of the providers.

use std::sync::Arc;

use thiserror::Error;

use crate::models::VsCurrency;

/// Maximum number of bytes of an upstream error body kept for diagnostics.
pub const MAX_ERROR_BODY_BYTES: usize = 500;

/// Errors that can occur during market data operations.
///
/// Cloneable so one failed refresh can be reported to every request that
/// was waiting on it.
#[derive(Error, Debug, Clone)]
pub enum MarketDataError {
    /// The requested display currency is not in the allow-list.
    /// Raised before any upstream call is made.
    #[error("Invalid currency: {0}. Use one of: {allowed}", allowed = VsCurrency::allowed_list())]
    InvalidCurrency(String),

    /// The provider answered with a non-success HTTP status.
    #[error("{provider} error {status}: {reason}")]
    Upstream {
        /// The provider that returned the status
        provider: String,
        /// HTTP status code returned by the provider
        status: u16,
        /// Canonical reason phrase for the status, empty when unknown
        reason: String,
        /// Response body, truncated to [`MAX_ERROR_BODY_BYTES`]
        body: String,
    },

    /// The request to the provider did not complete in time.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider returned a success status but the body could not be decoded.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// The provider that returned the body
        provider: String,
        /// Decoder error message
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[source] Arc<reqwest::Error>),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(Arc::new(err))
    }
}

impl MarketDataError {
    /// Builds an [`MarketDataError::Upstream`] from a status and raw body,
    /// truncating the body.
    pub fn upstream(provider: &str, status: u16, reason: &str, body: &str) -> Self {
        Self::Upstream {
            provider: provider.to_string(),
            status,
            reason: reason.to_string(),
            body: truncate_body(body, MAX_ERROR_BODY_BYTES).to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than the provider.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidCurrency(_))
    }

    /// The provider's HTTP status, when the failure was a non-success response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic detail to surface alongside the error message.
    ///
    /// For upstream responses this is the truncated body; for transport and
    /// decode failures it is the error message itself.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::InvalidCurrency(_) => None,
            Self::Upstream { body, .. } => Some(body.clone()),
            Self::Timeout { .. } | Self::InvalidResponse { .. } | Self::Network(_) => {
                Some(self.to_string())
            }
        }
    }
}

/// Returns at most `max_bytes` of `body`, cut back to the nearest char boundary.
pub fn truncate_body(body: &str, max_bytes: usize) -> &str {
    if body.len() <= max_bytes {
        return body;
    }
    let mut end = max_bytes;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_currency_lists_allowed_set() {
        let error = MarketDataError::InvalidCurrency("eur".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid currency: eur. Use one of: usd, krw"
        );
        assert!(error.is_validation());
        assert_eq!(error.details(), None);
    }

    #[test]
    fn test_upstream_error_display_contains_status() {
        let error = MarketDataError::upstream("CoinGecko", 429, "Too Many Requests", "slow down");
        assert_eq!(error.to_string(), "CoinGecko error 429: Too Many Requests");
        assert_eq!(error.upstream_status(), Some(429));
        assert_eq!(error.details().as_deref(), Some("slow down"));
        assert!(!error.is_validation());
    }

    #[test]
    fn test_upstream_body_is_truncated() {
        let body = "x".repeat(2_000);
        let error = MarketDataError::upstream("CoinGecko", 500, "Internal Server Error", &body);
        match error {
            MarketDataError::Upstream { body, .. } => assert_eq!(body.len(), MAX_ERROR_BODY_BYTES),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // "가" is three bytes in UTF-8
        let body = "가".repeat(200);
        let truncated = truncate_body(&body, 500);
        assert_eq!(truncated.len(), 498);
        assert!(truncated.chars().all(|c| c == '가'));
    }

    #[test]
    fn test_truncate_body_short_input_unchanged() {
        assert_eq!(truncate_body("short", 500), "short");
        assert_eq!(truncate_body("", 500), "");
    }

    #[test]
    fn test_clone_keeps_message_and_details() {
        let error = MarketDataError::upstream("CoinGecko", 503, "Service Unavailable", "down");
        let shared = error.clone();
        assert_eq!(shared.to_string(), error.to_string());
        assert_eq!(shared.upstream_status(), Some(503));
        assert_eq!(shared.details(), error.details());
    }

    #[test]
    fn test_timeout_details() {
        let error = MarketDataError::Timeout {
            provider: "CoinGecko".to_string(),
        };
        assert_eq!(error.upstream_status(), None);
        assert_eq!(error.details().as_deref(), Some("Timeout: CoinGecko"));
    }
}
