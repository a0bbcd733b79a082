//! Error types for the ICE3X client library.

use thiserror::Error;

/// The main error type for all ICE3X client operations.
///
/// Variants fall into three groups, see [`Ice3xError::is_transport`],
/// [`Ice3xError::is_serialization`] and [`Ice3xError::is_api`].
#[derive(Error, Debug)]
pub enum Ice3xError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code returned by the server
        status: reqwest::StatusCode,
        /// Raw response body
        body: String,
    },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// A configured header value is not valid
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and private key required")]
    MissingCredentials,

    /// ICE3X API returned `success: false`
    #[error("ICE3X API error: {0}")]
    Api(ApiError),
}

impl Ice3xError {
    /// Network, TLS, timeout or non-2xx failures.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Http(e) => !e.is_decode(),
            Self::HttpMiddleware(_) | Self::HttpStatus { .. } | Self::Timeout | Self::Url(_) => {
                true
            }
            _ => false,
        }
    }

    /// The request body could not be encoded or the response could not be decoded.
    pub fn is_serialization(&self) -> bool {
        match self {
            Self::Json(_) | Self::InvalidResponse(_) => true,
            Self::Http(e) => e.is_decode(),
            _ => false,
        }
    }

    /// A well-formed response reporting `success: false`.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// HTTP status of the failed request, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Error reported by the ICE3X API in a `success: false` response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The `errorCode` field, if the server sent one
    pub code: Option<i32>,
    /// The `errorMessage` field, empty if the server sent none
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: Option<i32>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
