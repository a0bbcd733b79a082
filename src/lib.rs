//! # ICE3X Client
//!
//! An async Rust client library for the ICE3X exchange trading API.
//!
//! ## Features
//!
//! - HMAC-SHA512 request signing with `apikey`, `signature` and `timestamp` headers
//! - Trade history retrieval with strongly typed requests and responses
//! - Integer fixed-point amounts, never floats
//! - Optional outbound proxy and configurable request timeout
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ice3x_api_client::rest::Ice3xRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Ice3xRestClient::new("api_key", "cHJpdmF0ZV9rZXk=")?;
//!     let trades = client
//!         .fetch_trade_history_for("ZAR", "BTC", 10, 1)
//!         .await?
//!         .into_result()?;
//!     println!("{} trades", trades.len());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, Ice3xError};
pub use rest::{Ice3xClient, Ice3xRestClient, Trade, TradeHistoryResponse, TradeRequest};

/// Result type alias using Ice3xError
pub type Result<T> = std::result::Result<T, Ice3xError>;
