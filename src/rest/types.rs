//! Request and response types for the ICE3X REST API.
//!
//! Monetary amounts are integers in the exchange's fixed-point units.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{ApiError, Ice3xError};
use crate::types::serde_helpers::{empty_string_as_none, null_as_default};

/// Request body for the trade history endpoint.
///
/// Field order is part of the signature: the body is serialized in
/// declaration order and signed byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    /// Quote currency (e.g. "ZAR")
    pub currency: String,
    /// Traded asset (e.g. "BTC")
    pub instrument: String,
    /// Maximum number of trades to return
    pub limit: i32,
    /// Trade id or timestamp to start from
    pub since: i64,
}

impl TradeRequest {
    /// Create a new trade history request.
    pub fn new(
        currency: impl Into<String>,
        instrument: impl Into<String>,
        limit: i32,
        since: i64,
    ) -> Self {
        Self {
            currency: currency.into(),
            instrument: instrument.into(),
            limit,
            since,
        }
    }
}

/// A single executed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade id
    pub id: i64,
    /// Execution time in Unix epoch milliseconds
    #[serde(rename = "creationtime")]
    pub creation_time: i64,
    /// Free-form description from the exchange
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub description: String,
    /// Price in fixed-point units
    pub price: i64,
    /// Volume in fixed-point units
    pub volume: i64,
    /// Fee in fixed-point units
    pub fee: i64,
}

impl Trade {
    /// Execution time as a UTC date-time.
    pub fn created_at(&self) -> Result<OffsetDateTime, Ice3xError> {
        let nanos = i128::from(self.creation_time) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| {
            Ice3xError::InvalidResponse(format!(
                "creationtime {} out of range: {e}",
                self.creation_time
            ))
        })
    }
}

/// Response from the trade history endpoint.
///
/// `success` decides which half is meaningful: `trades` on success,
/// `error_code`/`error_message` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TradeHistoryResponse {
    /// Whether the request succeeded
    pub success: bool,
    /// Error code, present only on failure
    #[serde(rename = "errorCode", default)]
    pub error_code: Option<i32>,
    /// Error message, present only on failure
    #[serde(
        rename = "errorMessage",
        default,
        deserialize_with = "empty_string_as_none::deserialize"
    )]
    pub error_message: Option<String>,
    /// Trades in the order returned by the server
    #[serde(default, deserialize_with = "null_as_default::deserialize")]
    pub trades: Vec<Trade>,
}

impl TradeHistoryResponse {
    /// The API error carried by a `success: false` response.
    pub fn api_error(&self) -> Option<ApiError> {
        if self.success {
            return None;
        }
        Some(ApiError::new(
            self.error_code,
            self.error_message.clone().unwrap_or_default(),
        ))
    }

    /// Convert into the trades, or [`Ice3xError::Api`] if the server reported failure.
    pub fn into_result(self) -> Result<Vec<Trade>, Ice3xError> {
        match self.api_error() {
            Some(error) => Err(Ice3xError::Api(error)),
            None => Ok(self.trades),
        }
    }
}
