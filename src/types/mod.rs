//! Shared serialization helpers for the ICE3X client library.

pub mod serde_helpers;
