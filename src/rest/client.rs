//! ICE3X REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, ACCEPT_CHARSET, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::auth::{
    CredentialsProvider, StaticCredentials, SystemClock, TimestampProvider, sign_request,
};
use crate::error::Ice3xError;
use crate::rest::endpoints::{ICE3X_BASE_URL, private};
use crate::rest::types::{TradeHistoryResponse, TradeRequest};

/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The ICE3X REST API client.
///
/// Every request is a signed JSON POST. The client holds only immutable
/// configuration and is cheap to clone and share across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use ice3x_api_client::rest::Ice3xRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Ice3xRestClient::new("api_key", "cHJpdmF0ZV9rZXk=")?;
///
///     let response = client.fetch_trade_history_for("ZAR", "BTC", 10, 1).await?;
///     if response.success {
///         for trade in &response.trades {
///             println!("{}: {} @ {}", trade.id, trade.volume, trade.price);
///         }
///     } else {
///         println!("{:?}: {:?}", response.error_code, response.error_message);
///     }
///
///     Ok(())
/// }
/// ```
///
/// Routing through a proxy:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use ice3x_api_client::auth::StaticCredentials;
/// use ice3x_api_client::rest::{Ice3xRestClient, ProxyConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Ice3xRestClient::builder()
///     .credentials(Arc::new(StaticCredentials::new("api_key", "cHJpdmF0ZV9rZXk=")))
///     .proxy(ProxyConfig::new("http://proxy.local:3128")?.basic_auth("user", "pass"))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Ice3xRestClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
    timestamp_provider: Arc<dyn TimestampProvider>,
}

impl Ice3xRestClient {
    /// Create a client for the production API with the given API key and
    /// base64 private key.
    ///
    /// No network I/O happens here and the key is not validated until the
    /// first request is signed.
    pub fn new(
        api_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Result<Self, Ice3xError> {
        Self::builder()
            .credentials(Arc::new(StaticCredentials::new(api_key, private_key)))
            .build()
    }

    /// Create a new client builder.
    pub fn builder() -> Ice3xRestClientBuilder {
        Ice3xRestClientBuilder::new()
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a signed JSON POST request and decode the JSON response.
    ///
    /// The body is serialized once; the same string is signed and sent.
    pub async fn signed_post<T, P>(&self, path: &str, params: &P) -> Result<T, Ice3xError>
    where
        T: serde::de::DeserializeOwned,
        P: serde::Serialize + ?Sized,
    {
        let creds = self.credentials.get_credentials();

        let body = serde_json::to_string(params)?;
        let timestamp = self.timestamp_provider.timestamp_millis();
        let signature = sign_request(creds, path, timestamp, &body)?;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(path, timestamp, "sending signed request");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &creds.api_key)
            .header("signature", signature)
            .header("timestamp", timestamp.to_string())
            .header(ACCEPT_CHARSET, "utf-8")
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_middleware_error)?;

        self.parse_response(path, response).await
    }

    /// Check the status and decode the body of an ICE3X response.
    async fn parse_response<T>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, Ice3xError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            tracing::warn!(path, %status, "request rejected");
            return Err(Ice3xError::HttpStatus { status, body });
        }

        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::warn!(path, error = %e, "failed to decode response");
            Ice3xError::Json(e)
        })
    }

    /// Get the trade history.
    ///
    /// A response with `success: false` is returned as `Ok`; check
    /// [`TradeHistoryResponse::success`] or use
    /// [`TradeHistoryResponse::into_result`].
    pub async fn fetch_trade_history(
        &self,
        request: &TradeRequest,
    ) -> Result<TradeHistoryResponse, Ice3xError> {
        let response: TradeHistoryResponse =
            self.signed_post(private::TRADE_HISTORY, request).await?;
        tracing::debug!(
            success = response.success,
            trades = response.trades.len(),
            "trade history received"
        );
        Ok(response)
    }

    /// Get the trade history.
    ///
    /// # Arguments
    ///
    /// * `currency` - Quote currency (e.g., "ZAR")
    /// * `instrument` - Traded asset (e.g., "BTC")
    /// * `limit` - Maximum number of trades
    /// * `since` - Trade id or timestamp to start from
    pub async fn fetch_trade_history_for(
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

impl std::fmt::Debug for Ice3xRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ice3xRestClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.credentials.get_credentials().api_key)
            .finish()
    }
}

fn map_middleware_error(e: reqwest_middleware::Error) -> Ice3xError {
    match e {
        reqwest_middleware::Error::Reqwest(inner) => map_reqwest_error(inner),
        other => Ice3xError::HttpMiddleware(other),
    }
}

fn map_reqwest_error(e: reqwest::Error) -> Ice3xError {
    if e.is_timeout() {
        Ice3xError::Timeout
    } else {
        Ice3xError::Http(e)
    }
}

/// Outbound proxy used for every request made by the client.
///
/// Only the connection is affected; signatures are computed the same way.
#[derive(Clone)]
pub struct ProxyConfig {
    url: Url,
    username: Option<String>,
    password: Option<SecretString>,
}

impl ProxyConfig {
    /// Parse a proxy URL such as `http://proxy.local:3128`.
    pub fn new(url: &str) -> Result<Self, Ice3xError> {
        Ok(Self::from_url(Url::parse(url)?))
    }

    /// Use an already parsed proxy URL.
    pub fn from_url(url: Url) -> Self {
        Self {
            url,
            username: None,
            password: None,
        }
    }

    /// Authenticate against the proxy with basic auth.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// The proxy URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    fn to_reqwest(&self) -> Result<reqwest::Proxy, Ice3xError> {
        let mut proxy = reqwest::Proxy::all(self.url.as_str())?;
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            proxy = proxy.basic_auth(username, password.expose_secret());
        }
        Ok(proxy)
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("url", &self.url.as_str())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Builder for [`Ice3xRestClient`].
pub struct Ice3xRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    timestamp_provider: Option<Arc<dyn TimestampProvider>>,
    user_agent: Option<String>,
    proxy: Option<ProxyConfig>,
    timeout: Duration,
}

impl Ice3xRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: ICE3X_BASE_URL.to_string(),
            credentials: None,
            timestamp_provider: None,
            user_agent: None,
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider used to sign requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom timestamp provider.
    pub fn timestamp_provider(mut self, provider: Arc<dyn TimestampProvider>) -> Self {
        self.timestamp_provider = Some(provider);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Route all requests through a proxy.
    pub fn proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set the per-request timeout (defaults to 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    ///
    /// Fails if no credentials were set, the base URL or user agent is
    /// invalid, or the HTTP client cannot be created with the requested proxy.
    pub fn build(self) -> Result<Ice3xRestClient, Ice3xError> {
        let credentials = self.credentials.ok_or(Ice3xError::MissingCredentials)?;

        Url::parse(&self.base_url)?;
        let base_url = self.base_url.trim_end_matches('/').to_string();

        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("ice3x-api-client/{}", env!("CARGO_PKG_VERSION")));
        headers.insert(USER_AGENT, HeaderValue::from_str(&user_agent)?);

        let mut reqwest_builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout);
        if let Some(proxy) = &self.proxy {
            reqwest_builder = reqwest_builder.proxy(proxy.to_reqwest()?);
        }
        let reqwest_client = reqwest_builder.build()?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        let timestamp_provider = self
            .timestamp_provider
            .unwrap_or_else(|| Arc::new(SystemClock));

        Ok(Ice3xRestClient {
            http_client: client,
            base_url,
            credentials,
            timestamp_provider,
        })
    }
}

impl Default for Ice3xRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_credentials() {
        let err = Ice3xRestClient::builder().build().unwrap_err();
        assert!(matches!(err, Ice3xError::MissingCredentials));
    }

    #[test]
    fn test_build_rejects_bad_base_url() {
        let err = Ice3xRestClient::builder()
            .credentials(Arc::new(StaticCredentials::new("K", "c2VjcmV0")))
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Ice3xError::Url(_)));
    }

    #[test]
    fn test_new_uses_production_url() {
        let client = Ice3xRestClient::new("K", "c2VjcmV0").unwrap();
        assert_eq!(client.base_url(), "https://api.ice3x.com");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = Ice3xRestClient::builder()
            .credentials(Arc::new(StaticCredentials::new("K", "c2VjcmV0")))
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_debug_hides_private_key() {
        let client = Ice3xRestClient::new("my_key", "c2VjcmV0").unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("c2VjcmV0"));
    }

    #[test]
    fn test_build_rejects_bad_user_agent() {
        let err = Ice3xRestClient::builder()
            .credentials(Arc::new(StaticCredentials::new("K", "c2VjcmV0")))
            .user_agent("bad\nagent")
            .build()
            .unwrap_err();
        assert!(matches!(err, Ice3xError::InvalidHeader(_)));
    }

    #[test]
    fn test_build_with_proxy() {
        let proxy = ProxyConfig::new("http://proxy.local:3128")
            .unwrap()
            .basic_auth("user", "hunter2");
        let debug_str = format!("{:?}", proxy);
        assert!(debug_str.contains("proxy.local"));
        assert!(!debug_str.contains("hunter2"));

        let client = Ice3xRestClient::builder()
            .credentials(Arc::new(StaticCredentials::new("K", "c2VjcmV0")))
            .proxy(proxy)
            .timeout(Duration::from_secs(5))
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn test_proxy_rejects_bad_url() {
        assert!(matches!(
            ProxyConfig::new("::not a proxy::"),
            Err(Ice3xError::Url(_))
        ));
    }
}
