//! ICE3X REST API endpoint constants.

/// Base URL for the ICE3X REST API.
pub const ICE3X_BASE_URL: &str = "https://api.ice3x.com";

/// Private endpoints (signed POST requests).
pub mod private {
    /// Get the account's trade history.
    pub const TRADE_HISTORY: &str = "/order/trade/history";
}
