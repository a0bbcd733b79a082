//! ICE3X REST API client.
//!
//! All endpoints are signed JSON POSTs; see [`crate::auth`] for the scheme.
//!
//! # Trait-based API
//!
//! The [`Ice3xClient`] trait abstracts the REST operations, enabling mock
//! implementations for testing and wrapper clients.

mod client;
mod endpoints;
mod traits;
pub mod types;

pub use client::{DEFAULT_TIMEOUT, Ice3xRestClient, Ice3xRestClientBuilder, ProxyConfig};
pub use endpoints::*;
pub use traits::Ice3xClient;
pub use types::{Trade, TradeHistoryResponse, TradeRequest};
