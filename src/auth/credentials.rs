//! Credential management for ICE3X API authentication.

use secrecy::{ExposeSecret, SecretString};

/// Environment variable read by [`EnvCredentials::from_env`] for the API key.
pub const API_KEY_VAR: &str = "ICE3X_API_KEY";
/// Environment variable read by [`EnvCredentials::from_env`] for the private key.
pub const PRIVATE_KEY_VAR: &str = "ICE3X_PRIVATE_KEY";

/// API credentials containing the key and the base64 private key.
#[derive(Clone)]
pub struct Credentials {
    /// The API key (public identifier, sent as the `apikey` header)
    pub api_key: String,
    /// The private key, base64 encoded, used as the HMAC key once decoded
    private_key: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and a base64 private key.
    ///
    /// The private key is only decoded when a request is signed.
    pub fn new(api_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            private_key: SecretString::from(private_key.into()),
        }
    }

    /// Get the base64 private key for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.private_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

impl CredentialsProvider for Credentials {
    fn get_credentials(&self) -> &Credentials {
        self
    }
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(api_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(api_key, private_key),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `ICE3X_API_KEY` and `ICE3X_PRIVATE_KEY`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if either variable is not set.
    pub fn from_env() -> Option<Self> {
        Self::from_env_vars(API_KEY_VAR, PRIVATE_KEY_VAR)
    }

    /// Try to create credentials from custom environment variable names.
    ///
    /// Returns `None` if either variable is not set.
    pub fn from_env_vars(key_var: &str, private_key_var: &str) -> Option<Self> {
        let api_key = std::env::var(key_var).ok()?;
        let private_key = std::env::var(private_key_var).ok()?;

        Some(Self {
            credentials: Credentials::new(api_key, private_key),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("my_key", "c3VwZXJfc2VjcmV0");
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("my_key"));
        assert!(!debug_str.contains("c3VwZXJfc2VjcmV0"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials() {
        let provider = StaticCredentials::new("key", "c2VjcmV0");
        let creds = provider.get_credentials();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.expose_secret(), "c2VjcmV0");
    }

    #[test]
    fn test_env_credentials_missing_vars() {
        let creds = EnvCredentials::from_env_vars(
            "ICE3X_TEST_UNSET_KEY_VAR",
            "ICE3X_TEST_UNSET_PRIVATE_VAR",
        );
        assert!(creds.is_none());
    }
}
