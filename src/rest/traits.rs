//! Trait definition for the ICE3X REST API client.
//!
//! [`Ice3xClient`] abstracts the API operations so callers can substitute a
//! mock or wrap the real client.
//!
//! # Example
//!
//! ```rust,ignore
//! use ice3x_api_client::rest::{Ice3xClient, Ice3xRestClient};
//!
//! async fn latest_trade_id<C: Ice3xClient>(client: &C) -> Result<Option<i64>, ice3x_api_client::Ice3xError> {
//!     let trades = client.fetch_trade_history_for("ZAR", "BTC", 1, 0).await?.into_result()?;
//!     Ok(trades.first().map(|t| t.id))
//! }
//! ```

use std::future::Future;

use crate::error::Ice3xError;
use crate::rest::client::Ice3xRestClient;
use crate::rest::types::{TradeHistoryResponse, TradeRequest};

/// Trait defining the ICE3X REST API operations.
pub trait Ice3xClient: Send + Sync {
    /// Get the trade history.
    fn fetch_trade_history(
        &self,
        request: &TradeRequest,
    ) -> impl Future<Output = Result<TradeHistoryResponse, Ice3xError>> + Send;

    /// Get the trade history from individual parameters.
    fn fetch_trade_history_for(
        &self,
        currency: &str,
        instrument: &str,
        limit: i32,
        since: i64,
    ) -> impl Future<Output = Result<TradeHistoryResponse, Ice3xError>> + Send;
}

impl Ice3xClient for Ice3xRestClient {
    async fn fetch_trade_history(
        &self,
        request: &TradeRequest,
    ) -> Result<TradeHistoryResponse, Ice3xError> {
        Ice3xRestClient::fetch_trade_history(self, request).await
    }

    async fn fetch_trade_history_for(
        &self,
        currency: &str,
        instrument: &str,
        limit: i32,
        since: i64,
    ) -> Result<TradeHistoryResponse, Ice3xError> {
        Ice3xRestClient::fetch_trade_history_for(self, currency, instrument, limit, since).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::types::Trade;

    struct CannedClient {
        response: TradeHistoryResponse,
    }

    impl Ice3xClient for CannedClient {
        async fn fetch_trade_history(
            &self,
            _request: &TradeRequest,
        ) -> Result<TradeHistoryResponse, Ice3xError> {
            Ok(self.response.clone())
        }

        async fn fetch_trade_history_for(
            &self,
            currency: &str,
            instrument: &str,
            limit: i32,
            since: i64,
        ) -> Result<TradeHistoryResponse, Ice3xError> {
            self.fetch_trade_history(&TradeRequest::new(currency, instrument, limit, since))
                .await
        }
    }

    async fn total_volume<C: Ice3xClient>(client: &C) -> Result<i64, Ice3xError> {
        let trades = client
            .fetch_trade_history_for("ZAR", "BTC", 10, 1)
            .await?
            .into_result()?;
        Ok(trades.iter().map(|t| t.volume).sum())
    }

    fn trade(id: i64, volume: i64) -> Trade {
        Trade {
            id,
            creation_time: 1_700_000_000_000 + id,
            description: String::new(),
            price: 100,
            volume,
            fee: 1,
        }
    }

    #[tokio::test]
    async fn test_generic_caller_with_mock() {
        let client = CannedClient {
            response: TradeHistoryResponse {
                success: true,
                error_code: None,
                error_message: None,
                trades: vec![trade(1, 5), trade(2, 7)],
            },
        };
        assert_eq!(total_volume(&client).await.unwrap(), 12);
    }

    #[tokio::test]
    async fn test_generic_caller_sees_api_error() {
        let client = CannedClient {
            response: TradeHistoryResponse {
                success: false,
                error_code: Some(403),
                error_message: Some("Forbidden".to_string()),
                trades: Vec::new(),
            },
        };
        let err = total_volume(&client).await.unwrap_err();
        assert!(err.is_api());
    }
}
