//! Authentication module for the ICE3X API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Millisecond timestamps for the `timestamp` header
//! - HMAC-SHA512 signature generation for authenticated requests

mod credentials;
mod signature;
mod timestamp;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use signature::{sign_message, sign_request, signing_message};
pub use timestamp::{SystemClock, TimestampProvider};
