//! Transport-level errors for the REST client.
//!
//! A non-2xx status is not an error here; callers inspect the status and
//! the envelope themselves.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to construct the underlying HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never completed: DNS, refused connection, timeout, reset.
    #[error("Network error requesting '{url}': {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A caller-supplied header could not be used.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl ApiError {
    /// Short machine-readable classification, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Client(_) => "client_error",
            ApiError::Network { .. } => "network_error",
            ApiError::Decode { .. } => "decode_error",
            ApiError::Encode(_) => "encode_error",
            ApiError::InvalidHeader { .. } => "invalid_header",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_kind_and_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Decode {
            url: "http://localhost:3000/api/players".to_string(),
            source,
        };
        assert_eq!(err.kind(), "decode_error");
        assert!(err.to_string().contains("/api/players"));
    }

    #[test]
    fn test_invalid_header_message() {
        let err = ApiError::InvalidHeader {
            name: "x bad".to_string(),
            reason: "invalid header name".to_string(),
        };
        assert_eq!(err.kind(), "invalid_header");
        assert_eq!(err.to_string(), "Invalid header 'x bad': invalid header name");
    }
}
